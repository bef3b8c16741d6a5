//! Decides whether a newer release exists.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use parking_lot::Mutex;
use semver::Version;

use super::source::{GithubReleaseSource, VersionSource};
use super::types::UpdateInfo;
use crate::error::Result;
use crate::helpers::{normalize_tag, parse_version};
use crate::state::UpdateSettings;

/// Queries a [`VersionSource`] and compares against the running version.
///
/// Failures never escape: a check that cannot reach the source or cannot make
/// sense of its answer reports "no update".
pub struct UpdateChecker<V> {
    source: V,
    current_version: Version,
    check_interval: Duration,
    include_prereleases: bool,
    last_checked_at: Mutex<Option<DateTime<Utc>>>,
}

impl UpdateChecker<GithubReleaseSource> {
    pub fn from_settings(settings: &UpdateSettings, current_version: &str) -> Result<Self> {
        let source = GithubReleaseSource::new(
            settings.release_url.clone(),
            settings.request_timeout(),
            current_version,
        )?;
        Ok(Self::new(source, current_version, settings.check_interval())?
            .with_prereleases(settings.include_prereleases))
    }
}

impl<V: VersionSource> UpdateChecker<V> {
    pub fn new(source: V, current_version: &str, check_interval: Duration) -> Result<Self> {
        Ok(Self {
            source,
            current_version: parse_version(current_version)?,
            check_interval,
            include_prereleases: false,
            last_checked_at: Mutex::new(None),
        })
    }

    pub fn with_prereleases(mut self, include: bool) -> Self {
        self.include_prereleases = include;
        self
    }

    pub fn last_checked_at(&self) -> Option<DateTime<Utc>> {
        *self.last_checked_at.lock()
    }

    /// Return the newer release, if any.
    ///
    /// Without `force_check`, a query is skipped when the previous one started
    /// less than the check interval ago.
    pub async fn check_for_updates(&self, force_check: bool) -> Option<UpdateInfo> {
        if !force_check && self.recently_checked() {
            log::debug!("Update check skipped: last check was less than {:?} ago", self.check_interval);
            return None;
        }
        *self.last_checked_at.lock() = Some(Utc::now());

        log::info!("Update check: version={}, forced={force_check}", self.current_version);

        match self.query().await {
            Ok(Some(info)) => {
                log::info!("Update found: v{}", info.version);
                Some(info)
            }
            Ok(None) => None,
            Err(e) => {
                log::debug!("Update check failed: {e}");
                None
            }
        }
    }

    fn recently_checked(&self) -> bool {
        let Some(last) = *self.last_checked_at.lock() else {
            return false;
        };
        let elapsed = Utc::now().signed_duration_since(last);
        if elapsed < TimeDelta::zero() {
            // Clock went backwards; the recorded time means nothing now
            log::debug!("Last update check is in the future ({last}); not throttling");
            return false;
        }
        match TimeDelta::from_std(self.check_interval) {
            Ok(interval) => elapsed < interval,
            // Interval too large to represent: treat as "never re-check"
            Err(_) => true,
        }
    }

    async fn query(&self) -> Result<Option<UpdateInfo>> {
        let release = self.source.fetch_latest().await?;

        if release.draft || (release.prerelease && !self.include_prereleases) {
            log::debug!("Ignoring unpublished or prerelease {}", release.tag);
            return Ok(None);
        }

        let version = normalize_tag(&release.tag);
        let remote = parse_version(version)?;
        if remote <= self.current_version {
            return Ok(None);
        }

        let Some(download_url) = release.download_url() else {
            log::debug!("Release {} has no download location", release.tag);
            return Ok(None);
        };

        Ok(Some(UpdateInfo {
            version: version.to_string(),
            release_notes: release.notes.clone(),
            download_url: download_url.to_string(),
        }))
    }
}
