//! Application settings with persistence.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Release endpoint queried when no override is configured.
pub const DEFAULT_RELEASE_URL: &str =
    "https://api.github.com/repos/ggagosh/update-notifier/releases/latest";

/// Project page opened from the about dialog.
pub const REPOSITORY_URL: &str = "https://github.com/ggagosh/update-notifier";

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppSettings {
    #[serde(default)]
    pub updates: UpdateSettings,
}

/// Update check settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateSettings {
    /// Run a (throttled) check on startup
    #[serde(default = "default_true")]
    pub auto_check: bool,
    /// Minimum time between non-forced checks
    #[serde(default = "default_check_interval_secs")]
    pub check_interval_secs: u64,
    #[serde(default = "default_release_url")]
    pub release_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub include_prereleases: bool,
}

impl Default for UpdateSettings {
    fn default() -> Self {
        Self {
            auto_check: true,
            check_interval_secs: default_check_interval_secs(),
            release_url: default_release_url(),
            request_timeout_secs: default_request_timeout_secs(),
            include_prereleases: false,
        }
    }
}

impl UpdateSettings {
    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.check_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn default_true() -> bool {
    true
}

fn default_check_interval_secs() -> u64 {
    4 * 60 * 60
}

fn default_release_url() -> String {
    DEFAULT_RELEASE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}
