//! Random spawn selection inside an annulus around the configured center.
//!
//! Offsets are drawn uniformly from the square `[-max, max]²` and rejected
//! unless `min < distance < max`. Accepted offsets are moved to the
//! center, lifted to one block above the surface and checked with
//! [`SafetyRules`]. Both loops are bounded.

use crate::config::SpawnConfig;
use crate::safety::SafetyRules;
use crate::world::WorldQuery;
use spawnrand_common::{BlockPos, BlockType, ColumnPos, SpawnError, SpawnResult};
use tracing::{debug, trace, warn};

/// Default number of candidates checked for safety before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10_000;

/// Square draws allowed per candidate before the candidate counts as failed.
pub const ANNULUS_DRAWS_PER_ATTEMPT: u32 = 64;

/// Offset from the center that fell inside the annulus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// X offset from the center
    pub dx: i32,
    /// Z offset from the center
    pub dz: i32,
    /// Distance from the center
    pub distance: f64,
}

impl Candidate {
    /// Builds a candidate, computing its distance from the center.
    #[must_use]
    pub fn new(dx: i32, dz: i32) -> Self {
        let distance = f64::from(dx).hypot(f64::from(dz));
        Self { dx, dz, distance }
    }

    /// Whether the candidate lies strictly between the two radii.
    #[must_use]
    pub fn within(&self, min_distance: i32, max_distance: i32) -> bool {
        self.distance > f64::from(min_distance) && self.distance < f64::from(max_distance)
    }
}

/// A safe location found by [`SpawnSelector::select`].
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnSelection {
    /// Feet position of the player
    pub position: BlockPos,
    /// Block under the feet
    pub standing_on: BlockType,
    /// Candidates checked, including the accepted one
    pub attempts: u32,
}

/// Samples spawn locations.
#[derive(Debug, Clone)]
pub struct SpawnSelector {
    rng: fastrand::Rng,
    max_attempts: u32,
}

impl Default for SpawnSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl SpawnSelector {
    /// Creates a selector seeded from system entropy.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Creates a deterministic selector.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Sets the candidate cap. Zero is treated as one.
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Returns the candidate cap.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Uniform integer in `min..=max`.
    fn rand_between(&mut self, min: i32, max: i32) -> i32 {
        self.rng.i32(min..=max)
    }

    /// Draws an offset inside the annulus, or `None` if the draw budget ran out.
    pub fn sample_offset(&mut self, config: &SpawnConfig) -> Option<Candidate> {
        let max = config.max_distance;
        if max <= 0 || config.min_distance >= max {
            return None;
        }

        for _ in 0..ANNULUS_DRAWS_PER_ATTEMPT {
            let dx = self.rand_between(-max, max);
            let dz = self.rand_between(-max, max);
            let candidate = Candidate::new(dx, dz);
            if candidate.within(config.min_distance, max) {
                return Some(candidate);
            }
        }
        None
    }

    /// Finds a safe spawn location in `world`.
    ///
    /// `config` is expected to be validated; an empty annulus simply
    /// exhausts the attempts.
    pub fn select<W: WorldQuery + ?Sized>(
        &mut self,
        config: &SpawnConfig,
        world: &W,
        rules: &SafetyRules,
    ) -> SpawnResult<SpawnSelection> {
        let center = ColumnPos::new(config.center_x, config.center_z);

        for attempt in 1..=self.max_attempts {
            let Some(candidate) = self.sample_offset(config) else {
                continue;
            };

            let column = center.offset(candidate.dx, candidate.dz);
            let position = column.at_height(world.highest_surface_y(column.x, column.z) + 1);

            match rules.check(world, position) {
                Ok(()) => {
                    let standing_on = world.block_type_at(position.below());
                    debug!(
                        %position,
                        %standing_on,
                        attempt,
                        distance = candidate.distance,
                        "Accepted spawn candidate"
                    );
                    return Ok(SpawnSelection {
                        position,
                        standing_on,
                        attempts: attempt,
                    });
                },
                Err(hazard) => trace!(%position, %hazard, "Rejected spawn candidate"),
            }
        }

        warn!(
            attempts = self.max_attempts,
            ?config,
            "No safe spawn location found"
        );
        Err(SpawnError::NoSafeLocation {
            attempts: self.max_attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::Environment;
    use proptest::prelude::*;

    /// Infinite flat world: `ground` at y = 64, or at every column for which
    /// `is_hazard` holds, lava.
    struct Flat {
        ground: &'static str,
        is_hazard: fn(i32, i32) -> bool,
    }

    impl WorldQuery for Flat {
        fn environment(&self) -> Environment {
            Environment::Normal
        }

        fn border_diameter(&self) -> f64 {
            60_000_000.0
        }

        fn highest_surface_y(&self, _x: i32, _z: i32) -> i32 {
            64
        }

        fn block_type_at(&self, pos: BlockPos) -> BlockType {
            match pos.y {
                64 if (self.is_hazard)(pos.x, pos.z) => BlockType::from("lava"),
                64 => BlockType::from(self.ground),
                y if y < 64 => BlockType::from("stone"),
                _ => BlockType::air(),
            }
        }

        fn is_solid(&self, block: &BlockType) -> bool {
            !matches!(block.as_str(), "air" | "lava")
        }
    }

    fn grass() -> Flat {
        Flat {
            ground: "grass_block",
            is_hazard: |_, _| false,
        }
    }

    fn rules() -> SafetyRules {
        SafetyRules::new(["lava"])
    }

    #[test]
    fn test_flat_world_spawn_above_surface() {
        let config = SpawnConfig::new(0, 0, 500, 2000);
        let mut selector = SpawnSelector::with_seed(7);

        let selection = selector.select(&config, &grass(), &rules()).expect("selection");

        assert_eq!(selection.position.y, 65);
        assert_eq!(selection.standing_on, BlockType::from("grass_block"));
        assert_eq!(selection.attempts, 1);
    }

    #[test]
    fn test_center_offset_applied() {
        let config = SpawnConfig::new(10_000, -5_000, 100, 200);
        let mut selector = SpawnSelector::with_seed(99);

        let selection = selector.select(&config, &grass(), &rules()).expect("selection");
        let distance = selection
            .position
            .column()
            .distance_to(ColumnPos::new(10_000, -5_000));

        assert!(distance > 100.0 && distance < 200.0, "distance {distance}");
    }

    #[test]
    fn test_hazards_are_skipped() {
        // Lava everywhere except the eastern half.
        let world = Flat {
            ground: "grass_block",
            is_hazard: |x, _| x <= 0,
        };
        let config = SpawnConfig::new(0, 0, 100, 1000);
        let mut selector = SpawnSelector::with_seed(3);

        for _ in 0..20 {
            let selection = selector.select(&config, &world, &rules()).expect("selection");
            assert!(selection.position.x > 0);
            assert_eq!(selection.standing_on, BlockType::from("grass_block"));
        }
    }

    #[test]
    fn test_all_hazard_world_gives_up() {
        let world = Flat {
            ground: "grass_block",
            is_hazard: |_, _| true,
        };
        let config = SpawnConfig::new(0, 0, 100, 1000);
        let mut selector = SpawnSelector::with_seed(1).with_max_attempts(50);

        let err = selector
            .select(&config, &world, &rules())
            .expect_err("should give up");
        assert!(matches!(err, SpawnError::NoSafeLocation { attempts: 50 }));
    }

    #[test]
    fn test_empty_annulus_has_no_offsets() {
        let mut selector = SpawnSelector::with_seed(5);
        assert_eq!(selector.sample_offset(&SpawnConfig::new(0, 0, 100, 100)), None);
        assert_eq!(selector.sample_offset(&SpawnConfig::new(0, 0, 0, 0)), None);
        assert_eq!(selector.sample_offset(&SpawnConfig::new(0, 0, 0, -10)), None);
    }

    #[test]
    fn test_zero_attempts_clamped() {
        assert_eq!(SpawnSelector::new().with_max_attempts(0).max_attempts(), 1);
    }

    #[test]
    fn test_candidate_boundaries_are_exclusive() {
        assert!(!Candidate::new(100, 0).within(100, 200));
        assert!(!Candidate::new(0, 200).within(100, 200));
        assert!(Candidate::new(120, 90).within(100, 200));
    }

    proptest! {
        #[test]
        fn offsets_stay_strictly_inside_annulus(
            seed in any::<u64>(),
            max_distance in 100i32..100_000,
            ratio in 0.0f64..0.8,
        ) {
            let min_distance = (f64::from(max_distance) * ratio) as i32;
            let config = SpawnConfig::new(0, 0, min_distance, max_distance);
            let mut selector = SpawnSelector::with_seed(seed);

            for _ in 0..32 {
                if let Some(candidate) = selector.sample_offset(&config) {
                    prop_assert!(candidate.distance > f64::from(min_distance));
                    prop_assert!(candidate.distance < f64::from(max_distance));
                    prop_assert!(candidate.dx.abs() <= max_distance);
                    prop_assert!(candidate.dz.abs() <= max_distance);
                }
            }
        }

        #[test]
        fn selected_spawns_stay_inside_annulus(
            seed in any::<u64>(),
            center_x in -1_000_000i32..1_000_000,
            center_z in -1_000_000i32..1_000_000,
        ) {
            let config = SpawnConfig::new(center_x, center_z, 400, 2000);
            let mut selector = SpawnSelector::with_seed(seed);

            let selection = selector.select(&config, &grass(), &rules()).expect("selection");
            let distance = selection
                .position
                .column()
                .distance_to(ColumnPos::new(center_x, center_z));
            prop_assert!(distance > 400.0 && distance < 2000.0);
        }
    }
}
