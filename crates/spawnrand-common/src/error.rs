//! Error types for SpawnRand.

use thiserror::Error;

/// Smallest usable world radius (half the border diameter) in blocks.
pub const MIN_WORLD_RADIUS: i32 = 500;

/// Top-level error type for spawn curation.
#[derive(Debug, Error)]
pub enum SpawnError {
    /// The world border is too small for random spawning
    #[error("World unusable: radius {radius} is below the minimum of {minimum}")]
    WorldUnusable {
        /// Usable world radius
        radius: i32,
        /// Required minimum radius
        minimum: i32,
    },

    /// Sampling ran out of attempts without finding safe ground
    #[error("No safe spawn location found after {attempts} attempts")]
    NoSafeLocation {
        /// Number of candidates tried
        attempts: u32,
    },

    /// Persistence errors
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}

impl SpawnError {
    /// Creates a world-unusable error for the given radius.
    #[must_use]
    pub const fn world_unusable(radius: i32) -> Self {
        Self::WorldUnusable {
            radius,
            minimum: MIN_WORLD_RADIUS,
        }
    }
}

/// Errors raised by the player record and settings stores.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to encode data for writing
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Failed to decode stored data
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Result type alias for spawn operations.
pub type SpawnResult<T> = Result<T, SpawnError>;

/// Result type alias for persistence operations.
pub type PersistenceResult<T> = Result<T, PersistenceError>;
