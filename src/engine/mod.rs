pub mod suite;
pub mod verify;
