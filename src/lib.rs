pub mod config;
pub mod engine;
pub mod error;
pub mod math;
pub mod output;
pub mod types;
