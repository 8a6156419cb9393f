pub mod normal;
pub mod sampler;
pub mod wad;
