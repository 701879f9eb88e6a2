//! Spawn curation: one entry point per host event.
//!
//! The host forwards spawn, respawn and death notifications as plain values.
//! Each spawn-type handler returns the location the player should appear at,
//! which is the host's own location whenever curation does not apply or
//! fails.

use crate::config::{validate, SpawnConfig};
use crate::record::PlayerSpawnRecord;
use crate::safety::SafetyRules;
use crate::selector::SpawnSelector;
use crate::settings::{ConfigStore, SpawnSettings};
use crate::store::PlayerRecordStore;
use crate::world::WorldQuery;
use spawnrand_common::{BlockPos, PlayerId, SpawnError, SpawnResult};
use tracing::{debug, error, info, warn};

/// What the host knows about the player at event time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerContext {
    /// Stable player id
    pub id: PlayerId,
    /// Display name
    pub name: String,
    /// Whether the host has seen this player before
    pub has_played_before: bool,
    /// Bed spawn currently set by the host
    pub bed_spawn: Option<BlockPos>,
}

impl PlayerContext {
    /// Context for a player joining for the first time.
    #[must_use]
    pub fn first_join(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            has_played_before: false,
            bed_spawn: None,
        }
    }

    /// Same player on a later visit.
    #[must_use]
    pub fn returning(mut self) -> Self {
        self.has_played_before = true;
        self
    }

    /// Sets the current bed spawn.
    #[must_use]
    pub fn with_bed_spawn(mut self, bed_spawn: Option<BlockPos>) -> Self {
        self.bed_spawn = bed_spawn;
        self
    }
}

/// Assigns and re-applies random spawns.
#[derive(Debug)]
pub struct SpawnCurator<S, C> {
    config: SpawnConfig,
    rules: SafetyRules,
    selector: SpawnSelector,
    records: S,
    config_store: C,
}

impl<S: PlayerRecordStore, C: ConfigStore> SpawnCurator<S, C> {
    /// Creates a curator from loaded settings.
    pub fn new(settings: &SpawnSettings, records: S, config_store: C) -> Self {
        Self {
            config: settings.spawn,
            rules: SafetyRules::new(settings.danger_blocks.iter().map(String::as_str)),
            selector: SpawnSelector::new().with_max_attempts(settings.max_attempts),
            records,
            config_store,
        }
    }

    /// Replaces the selector, keeping the configured attempt cap.
    #[must_use]
    pub fn with_selector(mut self, selector: SpawnSelector) -> Self {
        let max_attempts = self.selector.max_attempts();
        self.selector = selector.with_max_attempts(max_attempts);
        self
    }

    /// Current spawn area.
    #[must_use]
    pub const fn config(&self) -> &SpawnConfig {
        &self.config
    }

    /// Safety rules in use.
    #[must_use]
    pub const fn rules(&self) -> &SafetyRules {
        &self.rules
    }

    /// Player record store.
    #[must_use]
    pub const fn records(&self) -> &S {
        &self.records
    }

    /// Configuration store.
    #[must_use]
    pub const fn config_store(&self) -> &C {
        &self.config_store
    }

    /// Handles a join spawn. Returns the location to use.
    pub fn on_spawn_request<W: WorldQuery + ?Sized>(
        &mut self,
        world: &W,
        player: &PlayerContext,
        location: BlockPos,
    ) -> BlockPos {
        if world.environment().is_excluded() {
            return location;
        }
        self.curate_or_keep(world, player, location)
    }

    /// Handles a respawn. Returns the location to use.
    pub fn on_respawn_request<W: WorldQuery + ?Sized>(
        &mut self,
        world: &W,
        player: &PlayerContext,
        location: BlockPos,
    ) -> BlockPos {
        self.set_override(player.id, true);

        if world.environment().is_excluded() {
            return location;
        }
        self.curate_or_keep(world, player, location)
    }

    /// Handles a death: the next respawn favours the stored location.
    pub fn on_death(&mut self, player: &PlayerContext) {
        self.set_override(player.id, true);
        debug!(player = %player.id, "Spawn override armed on death");
    }

    /// Decides the spawn location, surfacing why curation did not apply.
    pub fn curate<W: WorldQuery + ?Sized>(
        &mut self,
        world: &W,
        player: &PlayerContext,
        location: BlockPos,
    ) -> SpawnResult<BlockPos> {
        self.refresh_config(world.world_border_radius())?;

        let record = self.records.get(player.id);
        let override_spawn = record.as_ref().is_some_and(|r| r.override_world_spawn);
        let mut location = location;

        if !player.has_played_before && record.is_none() {
            let selection = self.selector.select(&self.config, world, &self.rules)?;
            info!(
                player = %player.id,
                name = %player.name,
                position = %selection.position,
                standing_on = %selection.standing_on,
                attempts = selection.attempts,
                "Assigned random spawn"
            );
            self.records.set(
                player.id,
                PlayerSpawnRecord::assigned(&player.name, &selection, player.bed_spawn),
            );
            location = selection.position;
        } else if player.bed_spawn.is_none() && override_spawn {
            match record.and_then(|r| r.location()) {
                Some(stored) => {
                    debug!(player = %player.id, position = %stored, "Reusing stored spawn");
                    location = stored;
                },
                None => debug!(player = %player.id, "Override set but no stored spawn"),
            }
        }

        self.set_override(player.id, false);
        Ok(location)
    }

    fn curate_or_keep<W: WorldQuery + ?Sized>(
        &mut self,
        world: &W,
        player: &PlayerContext,
        location: BlockPos,
    ) -> BlockPos {
        match self.curate(world, player, location) {
            Ok(curated) => curated,
            Err(e @ SpawnError::WorldUnusable { .. }) => {
                warn!(player = %player.id, "Skipping spawn curation: {e}");
                location
            },
            Err(e) => {
                error!(player = %player.id, "Spawn curation failed: {e}");
                location
            },
        }
    }

    /// Validates the spawn area against the world and saves corrections.
    fn refresh_config(&mut self, world_radius: i32) -> SpawnResult<()> {
        let validated = validate(self.config, world_radius)?;
        if !validated.changed() {
            return Ok(());
        }

        for adjustment in &validated.adjustments {
            info!(world_radius, "Spawn config corrected: {adjustment}");
        }
        self.config = validated.config;

        if let Err(e) = self.config_store.save_spawn_config(&self.config) {
            error!("Failed to save corrected spawn config: {e}");
        }
        Ok(())
    }

    /// Sets a player's override flag, creating a bare record if needed.
    fn set_override(&mut self, id: PlayerId, value: bool) {
        let mut record = self.records.get(id).unwrap_or_default();
        record.set_override(value);
        self.records.set(id, record);

        if let Err(e) = self.records.save() {
            error!(player = %id, "Failed to save player data: {e}");
        }
    }
}
