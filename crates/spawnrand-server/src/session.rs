//! Host session: turns named player events into curator calls.

use anyhow::{anyhow, Result};
use spawnrand_common::{BlockPos, PlayerId};
use spawnrand_core::{
    ConfigStore, PlayerContext, PlayerRecordStore, PlayerSpawnRecord, SpawnCurator,
    TomlRecordStore, WorldQuery,
};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// Event that placed a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Joined the world
    Join,
    /// Respawned after death
    Respawn,
}

/// Where a player ended up after an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Player name
    pub name: String,
    /// Player id
    pub id: PlayerId,
    /// What happened
    pub placement: Placement,
    /// Final location
    pub position: BlockPos,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self.placement {
            Placement::Join => "joined",
            Placement::Respawn => "respawned",
        };
        write!(f, "{} {verb} at {}", self.name, self.position)
    }
}

/// Named players that already have a stored spawn.
pub fn known_players(records: &TomlRecordStore) -> Vec<(String, PlayerId)> {
    records
        .iter()
        .filter_map(|(id, record)| record.name.clone().map(|name| (name, id)))
        .collect()
}

/// A world, a curator and the players seen so far.
pub struct Session<W, S, C> {
    world: W,
    curator: SpawnCurator<S, C>,
    roster: BTreeMap<String, PlayerId>,
}

impl<W: WorldQuery, S: PlayerRecordStore, C: ConfigStore> Session<W, S, C> {
    /// Creates a session with no known players.
    pub fn new(world: W, curator: SpawnCurator<S, C>) -> Self {
        Self {
            world,
            curator,
            roster: BTreeMap::new(),
        }
    }

    /// Adds players seen in earlier sessions.
    #[must_use]
    pub fn with_roster(mut self, players: impl IntoIterator<Item = (String, PlayerId)>) -> Self {
        self.roster.extend(players);
        self
    }

    /// The curator driven by this session.
    pub const fn curator(&self) -> &SpawnCurator<S, C> {
        &self.curator
    }

    /// Host spawn point: on top of the origin column.
    pub fn world_spawn(&self) -> BlockPos {
        BlockPos::new(0, self.world.highest_surface_y(0, 0) + 1, 0)
    }

    /// A player joins. Unknown names join for the first time.
    pub fn join(&mut self, name: &str) -> Outcome {
        let player = match self.resolve(name) {
            Some((name, id)) => PlayerContext::first_join(id, name).returning(),
            None => {
                let id = PlayerId::new();
                self.roster.insert(name.to_string(), id);
                debug!(player = %id, name, "New player");
                PlayerContext::first_join(id, name)
            },
        };

        let host_location = self.world_spawn();
        let position = self
            .curator
            .on_spawn_request(&self.world, &player, host_location);
        Outcome {
            name: player.name,
            id: player.id,
            placement: Placement::Join,
            position,
        }
    }

    /// A known player dies.
    pub fn death(&mut self, player: &str) -> Result<PlayerId> {
        let (name, id) = self.require(player)?;
        self.curator.on_death(&PlayerContext::first_join(id, name).returning());
        Ok(id)
    }

    /// A known player respawns, at `bed` if one is set.
    pub fn respawn(&mut self, player: &str, bed: Option<BlockPos>) -> Result<Outcome> {
        let (name, id) = self.require(player)?;
        let player = PlayerContext::first_join(id, name)
            .returning()
            .with_bed_spawn(bed);

        let host_location = bed.unwrap_or_else(|| self.world_spawn());
        let position = self
            .curator
            .on_respawn_request(&self.world, &player, host_location);
        Ok(Outcome {
            name: player.name,
            id,
            placement: Placement::Respawn,
            position,
        })
    }

    /// Joins `players` new players, then runs `deaths` death and respawn
    /// rounds for each of them.
    pub fn simulate(&mut self, players: usize, deaths: usize) -> Vec<Outcome> {
        let mut names = Vec::with_capacity(players);
        let mut n = 1;
        while names.len() < players {
            let name = format!("player-{n}");
            if !self.roster.contains_key(&name) {
                names.push(name);
            }
            n += 1;
        }

        let mut outcomes: Vec<Outcome> = names.iter().map(|name| self.join(name)).collect();

        for _ in 0..deaths {
            for name in &names {
                // Every name was joined above.
                if let Ok(outcome) = self
                    .death(name)
                    .and_then(|_| self.respawn(name, None))
                {
                    outcomes.push(outcome);
                }
            }
        }
        outcomes
    }

    /// Stored records of every known player, by name.
    pub fn records(&self) -> Vec<(String, PlayerId, Option<PlayerSpawnRecord>)> {
        self.roster
            .iter()
            .map(|(name, id)| (name.clone(), *id, self.curator.records().get(*id)))
            .collect()
    }

    /// Finds a player by name, or by id.
    fn resolve(&self, player: &str) -> Option<(String, PlayerId)> {
        if let Some(id) = self.roster.get(player) {
            return Some((player.to_string(), *id));
        }
        let id: PlayerId = player.parse().ok()?;
        self.roster
            .iter()
            .find(|(_, known)| **known == id)
            .map(|(name, _)| (name.clone(), id))
    }

    fn require(&self, player: &str) -> Result<(String, PlayerId)> {
        self.resolve(player)
            .ok_or_else(|| anyhow!("unknown player {player:?}, join first"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spawnrand_core::{
        MemoryConfigStore, MemoryRecordStore, SpawnConfig, SpawnSelector, SpawnSettings,
    };
    use spawnrand_world::FlatWorld;

    type TestSession = Session<FlatWorld, MemoryRecordStore, MemoryConfigStore>;

    fn session() -> TestSession {
        let settings = SpawnSettings {
            spawn: SpawnConfig::new(0, 0, 100, 1000),
            ..SpawnSettings::default()
        };
        let curator =
            SpawnCurator::new(&settings, MemoryRecordStore::new(), MemoryConfigStore::new())
                .with_selector(SpawnSelector::with_seed(5));
        Session::new(FlatWorld::new(64, 10_000.0), curator)
    }

    fn distance(pos: BlockPos) -> f64 {
        f64::from(pos.x).hypot(f64::from(pos.z))
    }

    #[test]
    fn test_first_join_assigns_spawn() {
        let mut session = session();
        assert_eq!(session.world_spawn(), BlockPos::new(0, 65, 0));

        let outcome = session.join("Steve");
        let d = distance(outcome.position);
        assert!(d > 100.0 && d < 1000.0, "distance {d}");
        assert_eq!(outcome.position.y, 65);
        assert_eq!(outcome.to_string(), format!("Steve joined at {}", outcome.position));

        let record = session.curator().records().get(outcome.id).expect("record");
        assert_eq!(record.location(), Some(outcome.position));
        assert_eq!(record.name.as_deref(), Some("Steve"));
    }

    #[test]
    fn test_returning_join_keeps_host_location() {
        let mut session = session();
        let first = session.join("Steve");
        let second = session.join("Steve");

        assert_eq!(first.id, second.id);
        assert_eq!(second.position, session.world_spawn());
    }

    #[test]
    fn test_respawn_after_death_reuses_spawn() {
        let mut session = session();
        let joined = session.join("Alex");

        session.death("Alex").expect("death");
        let respawned = session.respawn("Alex", None).expect("respawn");

        assert_eq!(respawned.position, joined.position);
        assert_eq!(respawned.placement, Placement::Respawn);
        let record = session.curator().records().get(joined.id).expect("record");
        assert!(!record.override_world_spawn);
    }

    #[test]
    fn test_bed_wins_over_stored_spawn() {
        let mut session = session();
        session.join("Alex");
        session.death("Alex").expect("death");

        let bed = BlockPos::new(12, 65, -4);
        let respawned = session.respawn("Alex", Some(bed)).expect("respawn");
        assert_eq!(respawned.position, bed);
    }

    #[test]
    fn test_players_resolve_by_id() {
        let mut session = session();
        let joined = session.join("Alex");

        let id = session.death(&joined.id.to_string()).expect("death by id");
        assert_eq!(id, joined.id);
    }

    #[test]
    fn test_unknown_player_is_rejected() {
        let mut session = session();
        assert!(session.death("Nobody").is_err());
        assert!(session.respawn("Nobody", None).is_err());
    }

    #[test]
    fn test_simulate_respawns_at_joined_spawns() {
        let mut session = session().with_roster([("player-1".to_string(), PlayerId::new())]);
        let outcomes = session.simulate(3, 2);

        assert_eq!(outcomes.len(), 9);
        let joins: Vec<_> = outcomes
            .iter()
            .filter(|o| o.placement == Placement::Join)
            .collect();
        assert_eq!(joins.len(), 3);
        assert!(joins.iter().all(|o| o.name != "player-1"));

        for respawn in outcomes.iter().filter(|o| o.placement == Placement::Respawn) {
            let join = joins.iter().find(|o| o.id == respawn.id).expect("joined");
            assert_eq!(respawn.position, join.position);
        }
        assert_eq!(session.records().len(), 4);
    }
}
