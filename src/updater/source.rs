//! Remote sources of "latest release" metadata.

use std::future::Future;
use std::time::Duration;

use serde::Deserialize;

use super::types::RemoteRelease;
use crate::error::Result;

/// Given no input, return the latest known release or fail.
pub trait VersionSource: Send + Sync + 'static {
    fn fetch_latest(&self) -> impl Future<Output = Result<RemoteRelease>> + Send;
}

/// GitHub "latest release" endpoint.
#[derive(Debug, Clone)]
pub struct GithubReleaseSource {
    client: reqwest::Client,
    url: String,
}

impl GithubReleaseSource {
    pub fn new(url: impl Into<String>, timeout: Duration, current_version: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(format!("update-notifier/{current_version}"))
            .timeout(timeout)
            .build()?;
        Ok(Self { client, url: url.into() })
    }
}

impl VersionSource for GithubReleaseSource {
    async fn fetch_latest(&self) -> Result<RemoteRelease> {
        let release: GithubRelease = self
            .client
            .get(&self.url)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(release.into())
    }
}

#[derive(Debug, Deserialize)]
struct GithubRelease {
    tag_name: String,
    #[serde(default)]
    body: Option<String>,
    #[serde(default)]
    html_url: Option<String>,
    #[serde(default)]
    assets: Vec<GithubAsset>,
    #[serde(default)]
    draft: bool,
    #[serde(default)]
    prerelease: bool,
}

#[derive(Debug, Deserialize)]
struct GithubAsset {
    browser_download_url: String,
}

impl From<GithubRelease> for RemoteRelease {
    fn from(release: GithubRelease) -> Self {
        RemoteRelease {
            tag: release.tag_name,
            notes: release.body.unwrap_or_default(),
            page_url: release.html_url,
            asset_urls: release.assets.into_iter().map(|a| a.browser_download_url).collect(),
            draft: release.draft,
            prerelease: release.prerelease,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn github_release_json_maps_to_remote_release() {
        let json = r#"{
            "tag_name": "v1.2.0",
            "name": "1.2.0",
            "body": "- Faster listing\n- Fixed crash on empty folders",
            "html_url": "https://github.com/ggagosh/update-notifier/releases/tag/v1.2.0",
            "draft": false,
            "prerelease": false,
            "assets": [
                { "name": "app-linux.zip", "browser_download_url": "https://example.com/app-linux.zip" }
            ]
        }"#;

        let release: RemoteRelease =
            serde_json::from_str::<GithubRelease>(json).expect("should deserialize").into();
        assert_eq!(release.tag, "v1.2.0");
        assert!(release.notes.contains("Faster listing"));
        assert_eq!(release.asset_urls, vec!["https://example.com/app-linux.zip".to_string()]);
        assert_eq!(
            release.download_url(),
            Some("https://github.com/ggagosh/update-notifier/releases/tag/v1.2.0")
        );
    }

    #[test]
    fn null_body_and_missing_flags_default() {
        let json = r#"{ "tag_name": "2.0", "body": null }"#;
        let release: RemoteRelease =
            serde_json::from_str::<GithubRelease>(json).expect("should deserialize").into();
        assert!(release.notes.is_empty());
        assert!(!release.draft);
        assert!(!release.prerelease);
        assert_eq!(release.download_url(), None);
    }
}
