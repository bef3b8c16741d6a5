use serde::{Deserialize, Serialize};

use super::{ButtonView, DialogAction, DialogView};
use crate::state::settings::REPOSITORY_URL;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AboutState {
    pub app_name: String,
    pub version: String,
    pub build: Option<String>,
    pub repository_url: String,
    /// An update check started from this dialog is in flight
    pub checking: bool,
}

impl AboutState {
    pub fn new(app_name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            version: version.into(),
            build: None,
            repository_url: REPOSITORY_URL.to_string(),
            checking: false,
        }
    }

    /// Attach a build identifier; only the short form is shown.
    pub fn with_build(mut self, sha: &str) -> Self {
        let sha = sha.trim();
        self.build = (!sha.is_empty()).then(|| sha.chars().take(7).collect());
        self
    }

    pub fn render(&self) -> DialogView {
        let mut version_line = format!("Version {}", self.version);
        if let Some(build) = &self.build {
            version_line.push_str(&format!(" ({build})"));
        }
        let check_label = if self.checking { "Checking..." } else { "Check for Updates" };
        DialogView {
            title: format!("About {}", self.app_name),
            lines: vec![version_line, self.repository_url.clone()],
            buttons: vec![
                ButtonView::new("View on GitHub", DialogAction::OpenRepository),
                ButtonView::new(check_label, DialogAction::CheckForUpdates)
                    .enabled(!self.checking)
                    .busy(self.checking),
                ButtonView::new("Close", DialogAction::Close),
            ],
            ..Default::default()
        }
    }
}
