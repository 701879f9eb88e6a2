//! Block ids used by the bundled worlds and their solidity.

use spawnrand_common::BlockType;

/// Air.
pub const AIR: &str = "air";
/// Water.
pub const WATER: &str = "water";
/// Lava.
pub const LAVA: &str = "lava";
/// Grass block.
pub const GRASS_BLOCK: &str = "grass_block";
/// Dirt.
pub const DIRT: &str = "dirt";
/// Sand.
pub const SAND: &str = "sand";
/// Stone.
pub const STONE: &str = "stone";
/// Snow block.
pub const SNOW_BLOCK: &str = "snow_block";
/// Bedrock.
pub const BEDROCK: &str = "bedrock";

/// Blocks a player can occupy.
const NON_SOLID: &[&str] = &[
    AIR,
    "cave_air",
    "void_air",
    WATER,
    LAVA,
    "short_grass",
    "tall_grass",
    "fern",
    "dandelion",
    "poppy",
    "snow",
    "fire",
    "soul_fire",
    "torch",
    "sweet_berry_bush",
    "powder_snow",
];

/// Whether a block type blocks movement.
#[must_use]
pub fn is_solid(block: &BlockType) -> bool {
    !NON_SOLID.contains(&block.as_str())
}
