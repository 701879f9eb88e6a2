//! Per-player spawn records.

use crate::selector::SpawnSelection;
use serde::{Deserialize, Serialize};
use spawnrand_common::{BlockPos, BlockType};

/// Marker stored when the player had no bed spawn.
pub const NO_BED_SPAWN: &str = "null";

/// Formats a bed spawn as `x_y_z`, or [`NO_BED_SPAWN`].
#[must_use]
pub fn bed_spawn_marker(bed_spawn: Option<BlockPos>) -> String {
    bed_spawn.map_or_else(
        || NO_BED_SPAWN.to_string(),
        |pos| format!("{}_{}_{}", pos.x, pos.y, pos.z),
    )
}

fn no_bed_spawn() -> String {
    NO_BED_SPAWN.to_string()
}

/// Stored spawn state for one player.
///
/// A record created only to hold the override flag has no location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSpawnRecord {
    /// Display name at assignment time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Assigned X
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<i32>,
    /// Assigned Y (feet)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<i32>,
    /// Assigned Z
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<i32>,
    /// Block under the assigned location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standing_on: Option<BlockType>,
    /// Bed spawn at assignment time, see [`bed_spawn_marker`]
    #[serde(default = "no_bed_spawn")]
    pub bed_spawn_location: String,
    /// Re-apply the stored location on the next curation
    #[serde(default)]
    pub override_world_spawn: bool,
}

impl Default for PlayerSpawnRecord {
    fn default() -> Self {
        Self {
            name: None,
            x: None,
            y: None,
            z: None,
            standing_on: None,
            bed_spawn_location: no_bed_spawn(),
            override_world_spawn: false,
        }
    }
}

impl PlayerSpawnRecord {
    /// Creates a record for a freshly selected spawn.
    #[must_use]
    pub fn assigned(
        name: impl Into<String>,
        selection: &SpawnSelection,
        bed_spawn: Option<BlockPos>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            x: Some(selection.position.x),
            y: Some(selection.position.y),
            z: Some(selection.position.z),
            standing_on: Some(selection.standing_on.clone()),
            bed_spawn_location: bed_spawn_marker(bed_spawn),
            override_world_spawn: false,
        }
    }

    /// Stored location, if one was ever assigned.
    #[must_use]
    pub fn location(&self) -> Option<BlockPos> {
        Some(BlockPos::new(self.x?, self.y?, self.z?))
    }

    /// Sets the override flag.
    pub fn set_override(&mut self, value: bool) {
        self.override_world_spawn = value;
    }
}
