//! World queries needed to place a player.
//!
//! Hosts implement [`WorldQuery`] over their own block storage; the
//! selector and safety checks only ever read through it.

use serde::{Deserialize, Serialize};
use spawnrand_common::{BlockPos, BlockType};

/// Dimension kind of a world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    /// Overworld
    #[default]
    Normal,
    /// The Nether
    Nether,
    /// The End
    TheEnd,
    /// Any host-defined dimension
    Custom,
}

impl Environment {
    /// Whether spawns in this environment are left to the host.
    #[must_use]
    pub const fn is_excluded(self) -> bool {
        matches!(self, Self::TheEnd)
    }
}

/// Read-only block access to a single world.
pub trait WorldQuery {
    /// Dimension kind of the world.
    fn environment(&self) -> Environment;

    /// Full width of the world border in blocks.
    fn border_diameter(&self) -> f64;

    /// Usable radius: `floor(border diameter / 2)`.
    fn world_border_radius(&self) -> i32 {
        (self.border_diameter() / 2.0).floor() as i32
    }

    /// Y of the highest non-air block in the column at (x, z).
    fn highest_surface_y(&self, x: i32, z: i32) -> i32;

    /// Block type at a position.
    fn block_type_at(&self, pos: BlockPos) -> BlockType;

    /// Whether a block type can be stood on / blocks movement.
    fn is_solid(&self, block: &BlockType) -> bool;
}

impl<W: WorldQuery + ?Sized> WorldQuery for &W {
    fn environment(&self) -> Environment {
        (**self).environment()
    }

    fn border_diameter(&self) -> f64 {
        (**self).border_diameter()
    }

    fn world_border_radius(&self) -> i32 {
        (**self).world_border_radius()
    }

    fn highest_surface_y(&self, x: i32, z: i32) -> i32 {
        (**self).highest_surface_y(x, z)
    }

    fn block_type_at(&self, pos: BlockPos) -> BlockType {
        (**self).block_type_at(pos)
    }

    fn is_solid(&self, block: &BlockType) -> bool {
        (**self).is_solid(block)
    }
}
