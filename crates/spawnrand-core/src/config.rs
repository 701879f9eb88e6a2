//! Spawn area configuration and its validation against a world border.
//!
//! [`validate`] is pure: it returns the corrected configuration together
//! with every [`Adjustment`] it made, and leaves persisting the result to
//! the caller.

use serde::{Deserialize, Serialize};
use spawnrand_common::{SpawnError, SpawnResult, MIN_WORLD_RADIUS};
use std::fmt;

/// Lower bound for `max_distance`.
pub const MIN_MAX_DISTANCE: i32 = 100;

/// Largest allowed `min_distance` as a fraction of `max_distance`.
pub const MIN_TO_MAX_RATIO: f64 = 0.80;

/// Spawn area: an annulus of `min_distance..max_distance` around a center.
///
/// Missing fields deserialize to zero and are corrected on first use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SpawnConfig {
    /// X of the annulus center
    #[serde(default, alias = "centerX")]
    pub center_x: i32,
    /// Z of the annulus center
    #[serde(default, alias = "centerZ")]
    pub center_z: i32,
    /// Exclusive inner radius
    #[serde(default, alias = "minDistance")]
    pub min_distance: i32,
    /// Exclusive outer radius
    #[serde(default, alias = "maxDistance")]
    pub max_distance: i32,
}

impl SpawnConfig {
    /// Creates a new configuration.
    #[must_use]
    pub const fn new(center_x: i32, center_z: i32, min_distance: i32, max_distance: i32) -> Self {
        Self {
            center_x,
            center_z,
            min_distance,
            max_distance,
        }
    }

    /// Largest `min_distance` allowed for the current `max_distance`.
    #[must_use]
    pub fn min_distance_limit(&self) -> i32 {
        ratio_limit(self.max_distance)
    }

    /// `max_distance` plus the larger center coordinate.
    #[must_use]
    pub fn reach(&self) -> i64 {
        i64::from(self.max_distance) + i64::from(self.center_x.max(self.center_z))
    }
}

fn ratio_limit(max_distance: i32) -> i32 {
    (f64::from(max_distance) * MIN_TO_MAX_RATIO).round() as i32
}

/// A single correction made by [`validate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Adjustment {
    /// `max_distance` was below [`MIN_MAX_DISTANCE`]
    MaxDistanceRaised {
        /// Configured value
        from: i32,
        /// New value
        to: i32,
    },
    /// `min_distance` exceeded the ratio limit
    MinDistanceClamped {
        /// Configured value
        from: i32,
        /// New value
        to: i32,
    },
    /// Area reached past the border and was scaled toward the origin
    ScaledToBorder {
        /// Scale factor applied
        factor: f64,
        /// Values before scaling
        before: SpawnConfig,
        /// Values after scaling
        after: SpawnConfig,
    },
    /// `max_distance` exceeded the world radius
    MaxDistanceCapped {
        /// Previous value
        from: i32,
        /// New value
        to: i32,
    },
}

impl fmt::Display for Adjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MaxDistanceRaised { from, to } => {
                write!(f, "max_distance raised from {from} to {to}")
            },
            Self::MinDistanceClamped { from, to } => {
                write!(f, "min_distance clamped from {from} to {to}")
            },
            Self::ScaledToBorder {
                factor,
                before,
                after,
            } => write!(
                f,
                "scaled by {factor:.4} to fit border: max_distance {} -> {}, center ({}, {}) -> ({}, {})",
                before.max_distance,
                after.max_distance,
                before.center_x,
                before.center_z,
                after.center_x,
                after.center_z
            ),
            Self::MaxDistanceCapped { from, to } => {
                write!(f, "max_distance capped from {from} to world radius {to}")
            },
        }
    }
}

/// Output of [`validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct Validated {
    /// Corrected configuration
    pub config: SpawnConfig,
    /// Corrections in the order they were made
    pub adjustments: Vec<Adjustment>,
}

impl Validated {
    /// Whether the configuration differs from the input and must be saved.
    #[must_use]
    pub fn changed(&self) -> bool {
        !self.adjustments.is_empty()
    }
}

/// Clamps `config` into a consistent range that fits inside `world_radius`.
///
/// After success:
/// - `max_distance >= MIN_MAX_DISTANCE`
/// - `min_distance <= round(max_distance * 0.8)`
/// - `max_distance + max(center_x, center_z) <= world_radius`
/// - `max_distance <= world_radius`
pub fn validate(config: SpawnConfig, world_radius: i32) -> SpawnResult<Validated> {
    if world_radius < MIN_WORLD_RADIUS {
        return Err(SpawnError::world_unusable(world_radius));
    }

    let mut config = config;
    let mut adjustments = Vec::new();

    if config.max_distance < MIN_MAX_DISTANCE {
        adjustments.push(Adjustment::MaxDistanceRaised {
            from: config.max_distance,
            to: MIN_MAX_DISTANCE,
        });
        config.max_distance = MIN_MAX_DISTANCE;
    }

    clamp_min_distance(&mut config, &mut adjustments);

    let reach = config.reach();
    if reach > i64::from(world_radius) {
        let before = config;
        let factor = f64::from(world_radius) / reach as f64;

        config.max_distance = (f64::from(config.max_distance) * factor).trunc() as i32;
        config.center_x = (f64::from(config.center_x) * factor).trunc() as i32;
        config.center_z = (f64::from(config.center_z) * factor).trunc() as i32;

        // Floating point rounding can leave the sum a block over.
        let excess = config.reach() - i64::from(world_radius);
        if excess > 0 {
            config.max_distance -= excess as i32;
        }

        if config.max_distance < MIN_MAX_DISTANCE {
            let limit = world_radius - MIN_MAX_DISTANCE;
            config.max_distance = MIN_MAX_DISTANCE;
            config.center_x = config.center_x.clamp(-limit, limit);
            config.center_z = config.center_z.clamp(-limit, limit);
        }

        adjustments.push(Adjustment::ScaledToBorder {
            factor,
            before,
            after: config,
        });
    }

    if config.max_distance > world_radius {
        adjustments.push(Adjustment::MaxDistanceCapped {
            from: config.max_distance,
            to: world_radius,
        });
        config.max_distance = world_radius;
    }

    // Shrinking max_distance may have pushed the ratio out of range again.
    clamp_min_distance(&mut config, &mut adjustments);

    Ok(Validated {
        config,
        adjustments,
    })
}

fn clamp_min_distance(config: &mut SpawnConfig, adjustments: &mut Vec<Adjustment>) {
    let limit = config.min_distance_limit();
    if config.min_distance > limit {
        adjustments.push(Adjustment::MinDistanceClamped {
            from: config.min_distance,
            to: limit,
        });
        config.min_distance = limit;
    }
}
