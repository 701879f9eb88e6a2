//! Host configuration.
//!
//! Where the plugin files live and how the simulated world is generated.
//! Loaded from and saved to a TOML file.

use serde::{Deserialize, Serialize};
use spawnrand_core::{PLAYER_DATA_FILE_NAME, SETTINGS_FILE_NAME};
use spawnrand_world::TerrainConfig;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Configuration file name.
pub const CONFIG_FILE: &str = "spawnrand.toml";

/// Host configuration parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding the settings and player data files
    pub data_dir: PathBuf,
    /// Seed for spawn selection (None = random)
    pub selector_seed: Option<u64>,
    /// Generated world
    pub world: TerrainConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("plugins/spawnrand"),
            selector_seed: None,
            world: TerrainConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a specific path.
    /// Returns default config if file doesn't exist or is invalid.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            info!("Config file not found, using defaults");
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    info!("Loaded config from {}", path.display());
                    config
                },
                Err(e) => {
                    warn!("Failed to parse config file: {e}");
                    Self::default()
                },
            },
            Err(e) => {
                warn!("Failed to read config file: {e}");
                Self::default()
            },
        }
    }

    /// Load configuration, writing the defaults first if the file is missing.
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Ok(Self::load_from(path));
        }

        let config = Self::default();
        config.save_to(path)?;
        Ok(config)
    }

    /// Save configuration to a specific path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(path, contents)?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Plugin settings file.
    #[must_use]
    pub fn settings_path(&self) -> PathBuf {
        self.data_dir.join(SETTINGS_FILE_NAME)
    }

    /// Player data file.
    #[must_use]
    pub fn player_data_path(&self) -> PathBuf {
        self.data_dir.join(PLAYER_DATA_FILE_NAME)
    }
}
