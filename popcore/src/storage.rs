//! Config store for popcalc
//!
//! Settings live in a single flat JSON file. Loading never fails: a
//! missing, unreadable or malformed file yields defaults. Saving rewrites
//! the whole file and only logs when it cannot.

use crate::settings::{RawSettings, Settings};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_FILENAME: &str = "calc_config.json";

/// Overrides the config file location when set.
pub const CONFIG_ENV: &str = "POPCALC_CONFIG";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("config file not found: {0}")]
    NotFound(PathBuf),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Reads and writes `Settings` at a fixed path.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$POPCALC_CONFIG` if set, else `calc_config.json` in the platform
    /// config directory.
    pub fn default_location() -> Self {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) if !path.is_empty() => Self::new(path),
            _ => Self::new(config_dir("popcalc").join(CONFIG_FILENAME)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Settings on disk, with the built-in defaults for anything missing.
    pub fn load(&self) -> Settings {
        self.load_with_defaults(&Settings::default())
    }

    /// Settings on disk, with `defaults` for anything missing or invalid.
    pub fn load_with_defaults(&self, defaults: &Settings) -> Settings {
        match self.try_load() {
            Ok(raw) => {
                tracing::info!("loaded settings from {:?}", self.path);
                raw.resolve(defaults)
            }
            Err(StorageError::NotFound(path)) => {
                tracing::info!("no settings file at {:?}, using defaults", path);
                defaults.clone()
            }
            Err(e) => {
                tracing::warn!("failed to read settings: {}, using defaults", e);
                defaults.clone()
            }
        }
    }

    pub fn try_load(&self) -> Result<RawSettings> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StorageError::NotFound(self.path.clone()));
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&contents)?)
    }

    /// Write `settings`, logging instead of failing.
    pub fn save(&self, settings: &Settings) {
        if let Err(e) = self.try_save(settings) {
            tracing::warn!("failed to save settings to {:?}: {}", self.path, e);
        }
    }

    pub fn try_save(&self, settings: &Settings) -> Result<()> {
        let contents = serde_json::to_string_pretty(settings)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, contents)?;
        Ok(())
    }
}

/// Get the config directory for an application
pub fn config_dir(app_name: &str) -> PathBuf {
    directories::ProjectDirs::from("", "", app_name)
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}
