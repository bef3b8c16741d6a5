//! Durable record of the user's update suppression choices.

use parking_lot::RwLock;

use super::types::{UpdateConfigPatch, UpdatePreference};
use crate::error::Result;

/// Backend that persists the preference record across restarts.
pub trait PreferenceStorage: Send + Sync + 'static {
    fn load(&self) -> Result<UpdatePreference>;
    fn save(&self, preference: &UpdatePreference) -> Result<()>;
}

/// Caches the stored record and writes every change through synchronously.
pub struct UpdatePreferenceStore<S> {
    storage: S,
    current: RwLock<UpdatePreference>,
}

impl<S: PreferenceStorage> UpdatePreferenceStore<S> {
    /// Load the stored record. An unreadable record is logged and replaced by
    /// defaults; it is overwritten on the next save.
    pub fn open(storage: S) -> Self {
        let current = storage.load().unwrap_or_else(|e| {
            log::warn!("Failed to load update preferences, using defaults: {e}");
            UpdatePreference::default()
        });
        Self { storage, current: RwLock::new(current) }
    }

    /// Merge `patch` into the stored record and write it before returning.
    ///
    /// The cached copy only changes once the write succeeded.
    pub fn save_update_config(&self, patch: &UpdateConfigPatch) -> Result<()> {
        if patch.is_empty() {
            log::debug!("Empty update preference patch; nothing to save");
            return Ok(());
        }
        let mut current = self.current.write();
        let mut next = current.clone();
        next.apply(patch);

        self.storage.save(&next)?;
        log::info!(
            "Saved update preferences: never_show_updates={}, ignored_version={:?}",
            next.never_show_updates,
            next.ignored_version
        );
        *current = next;
        Ok(())
    }

    pub fn should_suppress(&self, candidate_version: &str) -> bool {
        self.current.read().suppresses(candidate_version)
    }

    pub fn preference(&self) -> UpdatePreference {
        self.current.read().clone()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}
