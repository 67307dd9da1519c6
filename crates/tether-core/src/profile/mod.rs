//! Profile types and operations

pub mod store;
mod types;

pub use store::{ProfileStore, PROFILES_CONFIG_KEY};
pub use types::*;
