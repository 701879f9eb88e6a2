//! Ground safety checks for spawn candidates.

use crate::world::WorldQuery;
use spawnrand_common::{BlockPos, BlockType};
use std::collections::BTreeSet;
use std::fmt;

/// Reason a candidate position was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hazard {
    /// Ground block is on the deny-list
    DangerousGround(BlockType),
    /// Ground block cannot be stood on
    NoGround(BlockType),
    /// The feet position is inside a solid block
    Obstructed(BlockType),
    /// The head position is inside a solid block
    NoHeadroom(BlockType),
}

impl fmt::Display for Hazard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DangerousGround(block) => write!(f, "dangerous ground ({block})"),
            Self::NoGround(block) => write!(f, "no ground to stand on ({block})"),
            Self::Obstructed(block) => write!(f, "obstructed by {block}"),
            Self::NoHeadroom(block) => write!(f, "no headroom ({block})"),
        }
    }
}

/// Rules deciding whether a player can be placed at a position.
#[derive(Debug, Clone, Default)]
pub struct SafetyRules {
    danger_blocks: BTreeSet<BlockType>,
}

impl SafetyRules {
    /// Creates rules with the given ground deny-list.
    #[must_use]
    pub fn new<I, B>(danger_blocks: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<BlockType>,
    {
        Self {
            danger_blocks: danger_blocks.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether a ground block is deny-listed.
    #[must_use]
    pub fn is_dangerous(&self, block: &BlockType) -> bool {
        self.danger_blocks.contains(block)
    }

    /// Returns the deny-listed ground blocks.
    pub fn danger_blocks(&self) -> impl Iterator<Item = &BlockType> {
        self.danger_blocks.iter()
    }

    /// Checks a feet position, returning the first hazard found.
    pub fn check<W: WorldQuery + ?Sized>(&self, world: &W, pos: BlockPos) -> Result<(), Hazard> {
        let ground = world.block_type_at(pos.below());
        if self.is_dangerous(&ground) {
            return Err(Hazard::DangerousGround(ground));
        }
        if !world.is_solid(&ground) {
            return Err(Hazard::NoGround(ground));
        }

        // Transparent solids such as glass still count as obstructions.
        let feet = world.block_type_at(pos);
        if world.is_solid(&feet) {
            return Err(Hazard::Obstructed(feet));
        }

        let head = world.block_type_at(pos.above());
        if world.is_solid(&head) {
            return Err(Hazard::NoHeadroom(head));
        }

        Ok(())
    }

    /// Whether a player placed with feet at `pos` is safe.
    #[must_use]
    pub fn is_safe<W: WorldQuery + ?Sized>(&self, world: &W, pos: BlockPos) -> bool {
        self.check(world, pos).is_ok()
    }
}
