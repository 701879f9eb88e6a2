//! Player record persistence.
//!
//! This module provides:
//! - [`PlayerRecordStore`], the seam the curator reads and writes through
//! - [`MemoryRecordStore`] for hosts that keep records elsewhere and for tests
//! - [`TomlRecordStore`], a TOML file keyed by player id

use crate::record::PlayerSpawnRecord;
use spawnrand_common::{PersistenceError, PersistenceResult, PlayerId};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Default player data file name.
pub const PLAYER_DATA_FILE_NAME: &str = "playerData.toml";

/// Key/value storage of spawn records, one per player.
pub trait PlayerRecordStore {
    /// Whether a record exists for the player.
    fn has(&self, id: PlayerId) -> bool;

    /// Returns a copy of the player's record.
    fn get(&self, id: PlayerId) -> Option<PlayerSpawnRecord>;

    /// Inserts or replaces the player's record.
    fn set(&mut self, id: PlayerId, record: PlayerSpawnRecord);

    /// Writes pending changes to durable storage.
    fn save(&mut self) -> PersistenceResult<()>;
}

/// In-memory record store.
#[derive(Debug, Default, Clone)]
pub struct MemoryRecordStore {
    records: BTreeMap<PlayerId, PlayerSpawnRecord>,
    saves: usize,
}

impl MemoryRecordStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of [`PlayerRecordStore::save`] calls so far.
    #[must_use]
    pub const fn save_count(&self) -> usize {
        self.saves
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl PlayerRecordStore for MemoryRecordStore {
    fn has(&self, id: PlayerId) -> bool {
        self.records.contains_key(&id)
    }

    fn get(&self, id: PlayerId) -> Option<PlayerSpawnRecord> {
        self.records.get(&id).cloned()
    }

    fn set(&mut self, id: PlayerId, record: PlayerSpawnRecord) {
        self.records.insert(id, record);
    }

    fn save(&mut self) -> PersistenceResult<()> {
        self.saves += 1;
        Ok(())
    }
}

/// Record store backed by a TOML file.
///
/// Every player is a table named by the hyphenated id. Tables whose name is
/// not a valid id are kept untouched on save.
#[derive(Debug)]
pub struct TomlRecordStore {
    path: PathBuf,
    records: BTreeMap<String, PlayerSpawnRecord>,
    dirty: bool,
}

impl TomlRecordStore {
    /// Opens the store at `path`, creating an empty file if it is missing.
    pub fn open(path: impl AsRef<Path>) -> PersistenceResult<Self> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, "")?;
            info!("Created player data file {:?}", path);
            return Ok(Self {
                path,
                records: BTreeMap::new(),
                dirty: false,
            });
        }

        let contents = fs::read_to_string(&path)?;
        let records: BTreeMap<String, PlayerSpawnRecord> =
            toml::from_str(&contents).map_err(|e| PersistenceError::Parse(e.to_string()))?;

        for key in records.keys() {
            if key.parse::<PlayerId>().is_err() {
                warn!("Ignoring player data entry with invalid id: {key}");
            }
        }

        info!("Loaded {} player records from {:?}", records.len(), path);
        Ok(Self {
            path,
            records,
            dirty: false,
        })
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether there are unsaved changes.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Iterates over all records with a valid player id.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &PlayerSpawnRecord)> {
        self.records
            .iter()
            .filter_map(|(key, record)| key.parse().ok().map(|id| (id, record)))
    }

    /// Serializes all records to TOML.
    pub fn to_toml(&self) -> PersistenceResult<String> {
        toml::to_string_pretty(&self.records)
            .map_err(|e| PersistenceError::Serialization(e.to_string()))
    }
}

impl PlayerRecordStore for TomlRecordStore {
    fn has(&self, id: PlayerId) -> bool {
        self.records.contains_key(&id.to_string())
    }

    fn get(&self, id: PlayerId) -> Option<PlayerSpawnRecord> {
        self.records.get(&id.to_string()).cloned()
    }

    fn set(&mut self, id: PlayerId, record: PlayerSpawnRecord) {
        self.records.insert(id.to_string(), record);
        self.dirty = true;
    }

    fn save(&mut self) -> PersistenceResult<()> {
        if !self.dirty {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = self.to_toml()?;
        fs::write(&self.path, contents)?;
        self.dirty = false;

        debug!("Saved {} player records to {:?}", self.records.len(), self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spawnrand_common::BlockPos;

    fn assigned(x: i32, y: i32, z: i32) -> PlayerSpawnRecord {
        PlayerSpawnRecord {
            name: Some("Alex".to_string()),
            x: Some(x),
            y: Some(y),
            z: Some(z),
            standing_on: Some("grass_block".into()),
            ..PlayerSpawnRecord::default()
        }
    }

    #[test]
    fn test_memory_store_set_get() {
        let mut store = MemoryRecordStore::new();
        let id = PlayerId::new();
        assert!(!store.has(id));
        assert!(store.is_empty());

        store.set(id, assigned(1, 2, 3));
        assert!(store.has(id));
        assert_eq!(store.len(), 1);
        assert_eq!(
            store.get(id).and_then(|r| r.location()),
            Some(BlockPos::new(1, 2, 3))
        );

        store.save().expect("save");
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn test_toml_store_bootstraps_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("plugins").join("SpawnRand").join(PLAYER_DATA_FILE_NAME);

        let store = TomlRecordStore::open(&path).expect("open");
        assert!(path.exists());
        assert_eq!(store.iter().count(), 0);
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_toml_store_skips_clean_save() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(PLAYER_DATA_FILE_NAME);
        let id = PlayerId::new();

        let mut store = TomlRecordStore::open(&path).expect("open");
        store.save().expect("clean save");
        assert_eq!(fs::read_to_string(&path).expect("read"), "");

        store.set(id, assigned(1, 64, 1));
        assert!(store.is_dirty());
        store.save().expect("save");
        assert!(!store.is_dirty());

        // Nothing changed since, so an outside edit survives.
        fs::write(&path, "# edited\n").expect("edit");
        store.save().expect("clean save");
        assert_eq!(fs::read_to_string(&path).expect("read"), "# edited\n");
    }

    #[test]
    fn test_toml_store_persists_records() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(PLAYER_DATA_FILE_NAME);
        let id = PlayerId::new();

        let mut store = TomlRecordStore::open(&path).expect("open");
        let mut record = assigned(-120, 70, 4410);
        record.set_override(true);
        store.set(id, record.clone());
        assert!(store.is_dirty());
        store.save().expect("save");
        assert!(!store.is_dirty());

        let reopened = TomlRecordStore::open(&path).expect("reopen");
        assert!(reopened.has(id));
        assert_eq!(reopened.get(id), Some(record));
        assert_eq!(reopened.path(), path.as_path());
    }

    #[test]
    fn test_toml_store_keeps_unknown_entries() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(PLAYER_DATA_FILE_NAME);
        fs::write(&path, "[legacy]\noverrideWorldSpawn = false\n").expect("write");

        let mut store = TomlRecordStore::open(&path).expect("open");
        assert_eq!(store.iter().count(), 0);
        store.set(PlayerId::new(), assigned(0, 64, 0));
        store.save().expect("save");

        let contents = fs::read_to_string(&path).expect("read");
        assert!(contents.contains("[legacy]"));
    }

    #[test]
    fn test_toml_store_rejects_corrupt_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(PLAYER_DATA_FILE_NAME);
        fs::write(&path, "this is = = not toml").expect("write");

        let err = TomlRecordStore::open(&path).expect_err("should fail");
        assert!(matches!(err, PersistenceError::Parse(_)));
    }
}
