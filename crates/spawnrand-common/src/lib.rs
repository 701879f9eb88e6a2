//! # SpawnRand Common
//!
//! Common types shared by the SpawnRand crates:
//! - Block and column coordinates
//! - Player and block type identifiers
//! - Error types

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod coords;
pub mod error;
pub mod ids;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::coords::*;
    pub use crate::error::*;
    pub use crate::ids::*;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn column_distance_is_symmetric(
            ax in -30_000i32..30_000,
            az in -30_000i32..30_000,
            bx in -30_000i32..30_000,
            bz in -30_000i32..30_000,
        ) {
            let a = ColumnPos::new(ax, az);
            let b = ColumnPos::new(bx, bz);
            prop_assert!((a.distance_to(b) - b.distance_to(a)).abs() < 1e-9);
            prop_assert_eq!(a.at_height(64).below().above(), a.at_height(64));
        }
    }

    #[test]
    fn test_distinct_player_ids() {
        assert_ne!(PlayerId::new(), PlayerId::new());
    }
}
