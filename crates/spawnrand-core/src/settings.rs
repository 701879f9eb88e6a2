//! Settings persistence.
//!
//! This module provides:
//! - Load/save of [`SpawnSettings`] as TOML
//! - Writing the default settings when the file does not exist yet
//! - [`ConfigStore`], through which corrected spawn areas are written back

use crate::config::SpawnConfig;
use crate::selector::DEFAULT_MAX_ATTEMPTS;
use serde::{Deserialize, Serialize};
use spawnrand_common::{PersistenceError, PersistenceResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Default settings file name.
pub const SETTINGS_FILE_NAME: &str = "config.toml";

/// Ground blocks players are never placed on unless configured otherwise.
pub const DEFAULT_DANGER_BLOCKS: &[&str] = &[
    "lava",
    "water",
    "magma_block",
    "cactus",
    "fire",
    "soul_fire",
    "campfire",
    "soul_campfire",
    "sweet_berry_bush",
    "powder_snow",
    "pointed_dripstone",
];

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

/// Complete plugin settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnSettings {
    /// Ground deny-list
    #[serde(default, alias = "dangerBlock")]
    pub danger_blocks: Vec<String>,
    /// Candidate cap for the selector
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Spawn area
    #[serde(default, alias = "Spawnrand")]
    pub spawn: SpawnConfig,
}

impl Default for SpawnSettings {
    fn default() -> Self {
        Self {
            danger_blocks: DEFAULT_DANGER_BLOCKS.iter().map(ToString::to_string).collect(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            spawn: SpawnConfig::new(0, 0, 500, 2000),
        }
    }
}

impl SpawnSettings {
    /// Serializes to TOML string.
    pub fn to_toml(&self) -> PersistenceResult<String> {
        toml::to_string_pretty(self).map_err(|e| PersistenceError::Serialization(e.to_string()))
    }

    /// Deserializes from TOML string.
    pub fn from_toml(toml: &str) -> PersistenceResult<Self> {
        toml::from_str(toml).map_err(|e| PersistenceError::Parse(e.to_string()))
    }
}

/// Durable home of the spawn area configuration.
pub trait ConfigStore {
    /// Persists a corrected spawn area.
    fn save_spawn_config(&mut self, config: &SpawnConfig) -> PersistenceResult<()>;
}

/// Config store that keeps the last saved value in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryConfigStore {
    saved: Option<SpawnConfig>,
    writes: usize,
}

impl MemoryConfigStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last saved configuration.
    #[must_use]
    pub const fn saved(&self) -> Option<SpawnConfig> {
        self.saved
    }

    /// Number of writes so far.
    #[must_use]
    pub const fn writes(&self) -> usize {
        self.writes
    }
}

impl ConfigStore for MemoryConfigStore {
    fn save_spawn_config(&mut self, config: &SpawnConfig) -> PersistenceResult<()> {
        self.saved = Some(*config);
        self.writes += 1;
        Ok(())
    }
}

/// Manager for the settings file.
#[derive(Debug)]
pub struct SettingsManager {
    /// Current settings.
    settings: SpawnSettings,
    /// Path to settings file.
    settings_path: PathBuf,
}

impl SettingsManager {
    /// Creates a settings manager for `path` holding default settings.
    #[must_use]
    pub fn with_path(path: impl AsRef<Path>) -> Self {
        Self {
            settings: SpawnSettings::default(),
            settings_path: path.as_ref().to_path_buf(),
        }
    }

    /// Creates a manager and loads `path`, writing defaults if it is missing.
    pub fn open(path: impl AsRef<Path>) -> PersistenceResult<Self> {
        let mut manager = Self::with_path(path);
        manager.load()?;
        Ok(manager)
    }

    /// Returns the current settings path.
    #[must_use]
    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    /// Returns a reference to the current settings.
    #[must_use]
    pub fn settings(&self) -> &SpawnSettings {
        &self.settings
    }

    /// Loads settings from file.
    pub fn load(&mut self) -> PersistenceResult<()> {
        if !self.settings_path.exists() {
            info!("Settings file not found, writing defaults");
            self.settings = SpawnSettings::default();
            return self.save();
        }

        let contents = fs::read_to_string(&self.settings_path)?;
        self.settings = SpawnSettings::from_toml(&contents)?;

        info!("Settings loaded from {:?}", self.settings_path);
        Ok(())
    }

    /// Saves settings to file.
    pub fn save(&self) -> PersistenceResult<()> {
        if let Some(parent) = self.settings_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let toml = self.settings.to_toml()?;
        fs::write(&self.settings_path, toml)?;

        info!("Settings saved to {:?}", self.settings_path);
        Ok(())
    }
}

impl ConfigStore for SettingsManager {
    fn save_spawn_config(&mut self, config: &SpawnConfig) -> PersistenceResult<()> {
        self.settings.spawn = *config;
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = SpawnSettings::default();
        assert_eq!(settings.spawn, SpawnConfig::new(0, 0, 500, 2000));
        assert!(settings.danger_blocks.iter().any(|b| b == "lava"));
        assert_eq!(settings.max_attempts, DEFAULT_MAX_ATTEMPTS);
    }

    #[test]
    fn test_missing_fields_are_zero() {
        let settings = SpawnSettings::from_toml("[spawn]\nmax_distance = 3000\n").expect("parse");
        assert_eq!(settings.spawn, SpawnConfig::new(0, 0, 0, 3000));
        assert!(settings.danger_blocks.is_empty());
        assert_eq!(settings.max_attempts, DEFAULT_MAX_ATTEMPTS);
    }

    #[test]
    fn test_original_key_names_accepted() {
        let text = r#"
            dangerBlock = ["LAVA", "CACTUS"]

            [Spawnrand]
            centerX = 100
            centerZ = -200
            minDistance = 300
            maxDistance = 1500
        "#;
        let settings = SpawnSettings::from_toml(text).expect("parse");
        assert_eq!(settings.spawn, SpawnConfig::new(100, -200, 300, 1500));
        assert_eq!(settings.danger_blocks, vec!["LAVA", "CACTUS"]);
    }

    #[test]
    fn test_malformed_settings_error() {
        let err = SpawnSettings::from_toml("[spawn]\ncenter_x = \"east\"\n").expect_err("fail");
        assert!(matches!(err, PersistenceError::Parse(_)));
    }

    #[test]
    fn test_manager_writes_defaults_when_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("SpawnRand").join(SETTINGS_FILE_NAME);

        let manager = SettingsManager::open(&path).expect("open");
        assert!(path.exists());
        assert_eq!(manager.settings(), &SpawnSettings::default());
        assert_eq!(manager.settings_path(), path.as_path());
    }

    #[test]
    fn test_manager_persists_corrected_config() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(SETTINGS_FILE_NAME);

        let mut manager = SettingsManager::open(&path).expect("open");
        manager
            .save_spawn_config(&SpawnConfig::new(10, 20, 80, 100))
            .expect("save");

        let reloaded = SettingsManager::open(&path).expect("reopen");
        assert_eq!(reloaded.settings().spawn, SpawnConfig::new(10, 20, 80, 100));
        assert_eq!(reloaded.settings().danger_blocks, manager.settings().danger_blocks);
    }

    #[test]
    fn test_memory_store_counts_writes() {
        let mut store = MemoryConfigStore::new();
        assert_eq!(store.saved(), None);
        store.save_spawn_config(&SpawnConfig::new(0, 0, 1, 100)).expect("save");
        assert_eq!(store.writes(), 1);
        assert_eq!(store.saved(), Some(SpawnConfig::new(0, 0, 1, 100)));
    }
}
