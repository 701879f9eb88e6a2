//! # SpawnRand Core
//!
//! Random spawn assignment for block worlds.
//!
//! This crate provides:
//! - Spawn area validation against the world border
//! - Annulus sampling with ground safety checks
//! - Per-player spawn records and their stores
//! - Settings persistence
//! - The curator that handles spawn, respawn and death events

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod curator;
pub mod record;
pub mod safety;
pub mod selector;
pub mod settings;
pub mod store;
pub mod world;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::*;
    pub use crate::curator::*;
    pub use crate::record::*;
    pub use crate::safety::*;
    pub use crate::selector::*;
    pub use crate::settings::*;
    pub use crate::store::*;
    pub use crate::world::*;
}

pub use prelude::*;
