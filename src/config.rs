use anyhow::{Context, Result};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::store::SqliteStorage;

const APP_NAME: &str = "todomvc";
const CONFIG_FILE: &str = "config.json";
/// Environment variable that overrides the configured database path.
pub const DB_ENV: &str = "TODOMVC_DB";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Database file. Falls back to the platform data directory when unset.
    #[serde(default)]
    pub database_path: Option<PathBuf>,
}

impl Config {
    /// Load the config file from the user's config directory, then apply `TODOMVC_DB`.
    ///
    /// A missing or unreadable file yields the defaults.
    pub fn load() -> Self {
        let config = match get_config_path().and_then(|path| Self::load_from(&path)) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load config, using defaults: {:#}", e);
                Self::default()
            }
        };
        config.with_env_override(std::env::var(DB_ENV).ok())
    }

    /// Read a config file. A file that does not exist is not an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config = serde_json::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    fn with_env_override(mut self, db: Option<String>) -> Self {
        if let Some(db) = db.filter(|s| !s.trim().is_empty()) {
            self.database_path = Some(PathBuf::from(db));
        }
        self
    }

    /// The database file to open.
    pub fn database_path(&self) -> Result<PathBuf> {
        match &self.database_path {
            Some(path) => Ok(path.clone()),
            None => SqliteStorage::default_path(),
        }
    }

    /// Save the current configuration to the user's config directory.
    pub fn save(&self) -> Result<()> {
        self.save_to(&get_config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }
}

fn get_config_path() -> Result<PathBuf> {
    let mut path =
        config_dir().ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    path.push(APP_NAME);
    path.push(CONFIG_FILE);
    Ok(path)
}
