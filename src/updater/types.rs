//! Type definitions for the update system

use serde::{Deserialize, Serialize};

/// A release newer than the running build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateInfo {
    /// Version number, without a leading `v`
    pub version: String,

    /// Update description and release notes
    pub release_notes: String,

    /// Page to open for downloading the release
    pub download_url: String,
}

/// Release metadata as reported by a version source, before any comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteRelease {
    pub tag: String,
    pub notes: String,
    pub page_url: Option<String>,
    pub asset_urls: Vec<String>,
    pub draft: bool,
    pub prerelease: bool,
}

impl RemoteRelease {
    /// Prefer the release page; fall back to the first downloadable asset.
    pub fn download_url(&self) -> Option<&str> {
        self.page_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .or_else(|| self.asset_urls.first().map(String::as_str))
    }
}

/// Persisted suppression record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePreference {
    /// Never prompt about any update
    #[serde(default)]
    pub never_show_updates: bool,

    /// Never prompt about this one version
    #[serde(default)]
    pub ignored_version: Option<String>,
}

impl UpdatePreference {
    pub fn suppresses(&self, candidate_version: &str) -> bool {
        self.never_show_updates || self.ignored_version.as_deref() == Some(candidate_version)
    }

    /// Apply a partial update; unset fields keep their stored value.
    pub fn apply(&mut self, patch: &UpdateConfigPatch) {
        if let Some(never_show) = patch.never_show_updates {
            self.never_show_updates = never_show;
        }
        if let Some(version) = &patch.ignored_version {
            self.ignored_version = Some(version.clone());
        }
    }
}

/// Partial update of [`UpdatePreference`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateConfigPatch {
    pub never_show_updates: Option<bool>,
    pub ignored_version: Option<String>,
}

impl UpdateConfigPatch {
    pub fn never_show() -> Self {
        Self { never_show_updates: Some(true), ignored_version: None }
    }

    pub fn ignore_version(version: impl Into<String>) -> Self {
        Self { never_show_updates: None, ignored_version: Some(version.into()) }
    }

    pub fn is_empty(&self) -> bool {
        self.never_show_updates.is_none() && self.ignored_version.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn download_url_prefers_release_page() {
        let release = RemoteRelease {
            page_url: Some("https://example.com/releases/v1.2.0".into()),
            asset_urls: vec!["https://example.com/app.zip".into()],
            ..Default::default()
        };
        assert_eq!(release.download_url(), Some("https://example.com/releases/v1.2.0"));

        let assets_only = RemoteRelease { page_url: Some(String::new()), ..release.clone() };
        assert_eq!(assets_only.download_url(), Some("https://example.com/app.zip"));

        assert_eq!(RemoteRelease::default().download_url(), None);
    }

    #[test]
    fn partial_patch_keeps_other_field() {
        let mut preference = UpdatePreference { never_show_updates: true, ignored_version: None };
        preference.apply(&UpdateConfigPatch::ignore_version("2.0"));
        assert!(preference.never_show_updates);
        assert_eq!(preference.ignored_version.as_deref(), Some("2.0"));
    }

    #[test]
    fn suppression_rules() {
        let ignored = UpdatePreference { never_show_updates: false, ignored_version: Some("1.2.0".into()) };
        assert!(ignored.suppresses("1.2.0"));
        assert!(!ignored.suppresses("1.3.0"));

        let never = UpdatePreference { never_show_updates: true, ignored_version: None };
        assert!(never.suppresses("9.9.9"));
        assert!(!UpdatePreference::default().suppresses("1.0.0"));
    }
}
