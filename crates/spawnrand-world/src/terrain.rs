//! Procedural heightmap world.

use crate::materials::{self, AIR, BEDROCK, DIRT, GRASS_BLOCK, SAND, SNOW_BLOCK, STONE, WATER};
use noise::{NoiseFn, Perlin};
use serde::{Deserialize, Serialize};
use spawnrand_common::{BlockPos, BlockType};
use spawnrand_core::{Environment, WorldQuery};
use tracing::debug;

/// Terrain generator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// World seed
    pub seed: u32,
    /// Full border width in blocks
    pub border_diameter: f64,
    /// Water fills every column up to this height
    pub sea_level: i32,
    /// Average terrain height
    pub base_height: i32,
    /// Height variation above and below the base
    pub height_scale: f64,
    /// Horizontal feature size (larger = smoother)
    pub terrain_scale: f64,
    /// Bedrock layer
    pub min_y: i32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            seed: 12345,
            border_diameter: 60_000.0,
            sea_level: 62,
            base_height: 68,
            height_scale: 24.0,
            terrain_scale: 400.0,
            min_y: -64,
        }
    }
}

/// Perlin heightmap world with oceans, beaches, grassland and snowy peaks.
pub struct TerrainWorld {
    config: TerrainConfig,
    environment: Environment,
    terrain_noise: Perlin,
    detail_noise: Perlin,
}

impl TerrainWorld {
    /// Creates a new world with the given config.
    #[must_use]
    pub fn new(config: TerrainConfig) -> Self {
        let terrain_noise = Perlin::new(config.seed);
        let detail_noise = Perlin::new(config.seed.wrapping_add(1));
        debug!(
            seed = config.seed,
            border_diameter = config.border_diameter,
            "Terrain generator ready"
        );

        Self {
            config,
            environment: Environment::Normal,
            terrain_noise,
            detail_noise,
        }
    }

    /// Creates a world with default config and the given seed.
    #[must_use]
    pub fn with_seed(seed: u32) -> Self {
        Self::new(TerrainConfig {
            seed,
            ..Default::default()
        })
    }

    /// Sets the environment.
    #[must_use]
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Returns the generator configuration.
    #[must_use]
    pub const fn config(&self) -> &TerrainConfig {
        &self.config
    }

    /// Height of the topmost ground block, ignoring water.
    #[must_use]
    pub fn ground_height(&self, x: i32, z: i32) -> i32 {
        let wx = f64::from(x) / self.config.terrain_scale;
        let wz = f64::from(z) / self.config.terrain_scale;

        let height = self.terrain_noise.get([wx, wz]);
        let detail = self.detail_noise.get([wx * 4.0, wz * 4.0]) * 0.15;

        let offset = ((height + detail) * self.config.height_scale).round() as i32;
        (self.config.base_height + offset).max(self.config.min_y + 1)
    }

    /// Surface material for a column with the given ground height.
    fn surface_material(&self, ground: i32) -> &'static str {
        match ground - self.config.sea_level {
            d if d <= 2 => SAND,
            d if d < 22 => GRASS_BLOCK,
            d if d < 30 => STONE,
            _ => SNOW_BLOCK,
        }
    }
}

impl std::fmt::Debug for TerrainWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerrainWorld")
            .field("config", &self.config)
            .field("environment", &self.environment)
            .finish_non_exhaustive()
    }
}

impl WorldQuery for TerrainWorld {
    fn environment(&self) -> Environment {
        self.environment
    }

    fn border_diameter(&self) -> f64 {
        self.config.border_diameter
    }

    fn highest_surface_y(&self, x: i32, z: i32) -> i32 {
        self.ground_height(x, z).max(self.config.sea_level)
    }

    fn block_type_at(&self, pos: BlockPos) -> BlockType {
        let ground = self.ground_height(pos.x, pos.z);
        let id = match pos.y {
            y if y <= self.config.min_y => BEDROCK,
            y if y > ground && y <= self.config.sea_level => WATER,
            y if y > ground => AIR,
            y if y == ground => self.surface_material(ground),
            y if y > ground - 4 && self.surface_material(ground) == GRASS_BLOCK => DIRT,
            y if y > ground - 4 && self.surface_material(ground) == SAND => SAND,
            _ => STONE,
        };
        BlockType::from(id)
    }

    fn is_solid(&self, block: &BlockType) -> bool {
        materials::is_solid(block)
    }
}
