//! Superflat world with optional hand-placed blocks.

use crate::materials::{self, AIR, BEDROCK, DIRT, GRASS_BLOCK};
use spawnrand_common::{BlockPos, BlockType, ColumnPos};
use spawnrand_core::{Environment, WorldQuery};
use std::collections::HashMap;

/// Flat world: bedrock at `floor_y`, dirt up to the surface, one surface layer.
#[derive(Debug, Clone)]
pub struct FlatWorld {
    environment: Environment,
    border_diameter: f64,
    floor_y: i32,
    surface_y: i32,
    surface: BlockType,
    placed: HashMap<BlockPos, BlockType>,
}

impl FlatWorld {
    /// Creates a grass world with its surface at `surface_y`.
    #[must_use]
    pub fn new(surface_y: i32, border_diameter: f64) -> Self {
        Self {
            environment: Environment::Normal,
            border_diameter,
            floor_y: surface_y.min(-64),
            surface_y,
            surface: BlockType::from(GRASS_BLOCK),
            placed: HashMap::new(),
        }
    }

    /// Sets the surface layer block.
    #[must_use]
    pub fn with_surface(mut self, block: impl Into<BlockType>) -> Self {
        self.surface = block.into();
        self
    }

    /// Sets the environment.
    #[must_use]
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Places a block, replacing the generated one. Placing air digs.
    pub fn place(&mut self, pos: BlockPos, block: impl Into<BlockType>) {
        self.placed.insert(pos, block.into());
    }

    /// Surface Y of the generated layers.
    #[must_use]
    pub const fn surface_y(&self) -> i32 {
        self.surface_y
    }

    fn generated(&self, y: i32) -> BlockType {
        match y {
            y if y == self.floor_y => BlockType::from(BEDROCK),
            y if y > self.floor_y && y < self.surface_y => BlockType::from(DIRT),
            y if y == self.surface_y => self.surface.clone(),
            _ => BlockType::from(AIR),
        }
    }
}

impl WorldQuery for FlatWorld {
    fn environment(&self) -> Environment {
        self.environment
    }

    fn border_diameter(&self) -> f64 {
        self.border_diameter
    }

    fn highest_surface_y(&self, x: i32, z: i32) -> i32 {
        let column = ColumnPos::new(x, z);
        let placed_top = self
            .placed
            .iter()
            .filter(|(pos, block)| pos.column() == column && block.as_str() != AIR)
            .map(|(pos, _)| pos.y)
            .max();

        let mut top = placed_top.map_or(self.surface_y, |y| y.max(self.surface_y));
        // Dug-out blocks lower the surface.
        while top > self.floor_y && self.block_type_at(column.at_height(top)).as_str() == AIR {
            top -= 1;
        }
        top
    }

    fn block_type_at(&self, pos: BlockPos) -> BlockType {
        self.placed
            .get(&pos)
            .cloned()
            .unwrap_or_else(|| self.generated(pos.y))
    }

    fn is_solid(&self, block: &BlockType) -> bool {
        materials::is_solid(block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_layers() {
        let world = FlatWorld::new(64, 10_000.0);
        assert_eq!(world.block_type_at(BlockPos::new(3, 64, 3)).as_str(), GRASS_BLOCK);
        assert_eq!(world.block_type_at(BlockPos::new(3, 10, 3)).as_str(), DIRT);
        assert_eq!(world.block_type_at(BlockPos::new(3, -64, 3)).as_str(), BEDROCK);
        assert_eq!(world.block_type_at(BlockPos::new(3, 65, 3)).as_str(), AIR);
        assert_eq!(world.highest_surface_y(3, 3), 64);
        assert_eq!(world.world_border_radius(), 5000);
    }

    #[test]
    fn test_placed_blocks_raise_surface() {
        let mut world = FlatWorld::new(64, 10_000.0);
        world.place(BlockPos::new(0, 70, 0), "oak_leaves");
        assert_eq!(world.highest_surface_y(0, 0), 70);
        assert_eq!(world.highest_surface_y(1, 0), 64);
    }

    #[test]
    fn test_digging_lowers_surface() {
        let mut world = FlatWorld::new(64, 10_000.0);
        world.place(BlockPos::new(0, 64, 0), AIR);
        world.place(BlockPos::new(0, 63, 0), AIR);
        assert_eq!(world.highest_surface_y(0, 0), 62);
    }

    #[test]
    fn test_custom_surface() {
        let world = FlatWorld::new(40, 2000.0)
            .with_surface("sand")
            .with_environment(Environment::Nether);
        assert_eq!(world.block_type_at(BlockPos::new(0, 40, 0)).as_str(), "sand");
        assert_eq!(world.environment(), Environment::Nether);
        assert_eq!(world.surface_y(), 40);
    }
}
