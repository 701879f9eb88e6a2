//! # SpawnRand World
//!
//! Standalone [`WorldQuery`](spawnrand_core::WorldQuery) implementations for
//! exercising spawn curation without a game server:
//! - Superflat worlds with hand-placed blocks
//! - Perlin heightmap terrain with water below sea level

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod flat;
pub mod materials;
pub mod terrain;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::flat::*;
    pub use crate::terrain::*;
}

pub use prelude::*;
