pub mod config;
pub mod core;
pub mod physics;
pub mod snapshot;

pub use config::Config;
pub use snapshot::{snapshot, PetInputs, PetSnapshot};
