// Configuration management for persistent state

use anyhow::{Context, Result};
use serde::{Serialize, de::DeserializeOwned};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::settings::AppSettings;
use crate::updater::{PreferenceStorage, UpdatePreference};

#[cfg(debug_assertions)]
const APP_NAME: &str = "update-notifier-dev";

#[cfg(not(debug_assertions))]
const APP_NAME: &str = "update-notifier";

/// Manages persistent configuration files
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: PathBuf,
}

impl ConfigManager {
    const SETTINGS_FILE: &'static str = "settings.json";
    const UPDATE_FILE: &'static str = "update.json";

    /// Create a new ConfigManager, initializing the config directory if needed
    pub fn new() -> Result<Self> {
        Self::with_config_dir(Self::get_config_dir()?)
    }

    /// Use an explicit config directory, creating it if needed
    pub fn with_config_dir(config_dir: impl Into<PathBuf>) -> Result<Self> {
        let config_dir = config_dir.into();

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir).context("Failed to create config directory")?;
        }

        Ok(Self { config_dir })
    }

    /// Get the platform-specific config directory
    fn get_config_dir() -> Result<PathBuf> {
        dirs::config_dir().map(|p| p.join(APP_NAME)).context("Could not determine config directory")
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Get path to a specific config file
    fn file_path(&self, filename: &str) -> PathBuf {
        self.config_dir.join(filename)
    }

    /// Load data from a JSON file
    fn load_json<T: DeserializeOwned>(&self, filename: &str) -> Result<Option<T>> {
        let path = self.file_path(filename);

        if !path.exists() {
            return Ok(None);
        }

        let data =
            fs::read_to_string(&path).with_context(|| format!("Failed to read {}", filename))?;

        let value: T = serde_json::from_str(&data)
            .with_context(|| format!("Failed to deserialize {}", filename))?;

        Ok(Some(value))
    }

    /// Save data to a JSON file (atomic via temp + rename).
    fn save_json<T: Serialize + ?Sized>(&self, filename: &str, data: &T) -> Result<()> {
        let path = self.file_path(filename);

        let json = serde_json::to_string_pretty(data)
            .with_context(|| format!("Failed to serialize {}", filename))?;

        atomic_write(&path, json.as_bytes())
            .with_context(|| format!("Failed to write {}", filename))?;

        Ok(())
    }

    // =========================================================================
    // Settings
    // =========================================================================

    /// Load application settings from disk
    pub fn load_settings(&self) -> Result<AppSettings> {
        Ok(self.load_json(Self::SETTINGS_FILE)?.unwrap_or_default())
    }

    /// Save application settings to disk
    pub fn save_settings(&self, settings: &AppSettings) -> Result<()> {
        self.save_json(Self::SETTINGS_FILE, settings)
    }

    // =========================================================================
    // Update preferences
    // =========================================================================

    /// Load the update suppression record; a missing file means no suppression
    pub fn load_update_preference(&self) -> Result<UpdatePreference> {
        Ok(self.load_json(Self::UPDATE_FILE)?.unwrap_or_default())
    }

    /// Save the update suppression record
    pub fn save_update_preference(&self, preference: &UpdatePreference) -> Result<()> {
        self.save_json(Self::UPDATE_FILE, preference)
    }
}

impl PreferenceStorage for ConfigManager {
    fn load(&self) -> crate::Result<UpdatePreference> {
        self.load_update_preference().map_err(|e| crate::Error::Persist(format!("{e:#}")))
    }

    fn save(&self, preference: &UpdatePreference) -> crate::Result<()> {
        self.save_update_preference(preference)
            .map_err(|e| crate::Error::Persist(format!("{e:#}")))
    }
}

/// Write `data` to `path` atomically: write to a sibling temp file first, then
/// rename. Readers see either the old content or the new content.
fn atomic_write(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let dir = path.parent().unwrap_or(path);
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    std::io::Write::write_all(&mut tmp, data)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
