//! The injectable update service consumed by the notification workflow.

use std::future::Future;

use super::checker::UpdateChecker;
use super::preferences::{PreferenceStorage, UpdatePreferenceStore};
use super::source::VersionSource;
use super::types::{UpdateConfigPatch, UpdateInfo};
use crate::error::Result;

/// What the notification workflow needs from version checking and preference
/// storage. Tests substitute fakes; the app uses [`DefaultUpdateService`].
pub trait UpdateService: Send + Sync + 'static {
    fn check_for_updates(&self, force_check: bool)
    -> impl Future<Output = Option<UpdateInfo>> + Send;

    fn save_update_config(&self, patch: &UpdateConfigPatch) -> Result<()>;

    fn should_suppress(&self, candidate_version: &str) -> bool;
}

/// Remote checks through an [`UpdateChecker`], decisions through an
/// [`UpdatePreferenceStore`].
pub struct DefaultUpdateService<V, S> {
    checker: UpdateChecker<V>,
    preferences: UpdatePreferenceStore<S>,
}

impl<V: VersionSource, S: PreferenceStorage> DefaultUpdateService<V, S> {
    pub fn new(checker: UpdateChecker<V>, preferences: UpdatePreferenceStore<S>) -> Self {
        Self { checker, preferences }
    }
}

impl<V: VersionSource, S: PreferenceStorage> UpdateService for DefaultUpdateService<V, S> {
    async fn check_for_updates(&self, force_check: bool) -> Option<UpdateInfo> {
        self.checker.check_for_updates(force_check).await
    }

    fn save_update_config(&self, patch: &UpdateConfigPatch) -> Result<()> {
        self.preferences.save_update_config(patch)
    }

    fn should_suppress(&self, candidate_version: &str) -> bool {
        self.preferences.should_suppress(candidate_version)
    }
}
