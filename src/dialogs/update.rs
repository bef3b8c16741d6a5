use serde::{Deserialize, Serialize};

use super::{ButtonView, CheckboxView, DialogAction, DialogView};
use crate::updater::UpdateInfo;

/// The "new version available" prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateDialogState {
    pub info: UpdateInfo,
    pub never_show: bool,
}

impl UpdateDialogState {
    pub fn render(&self) -> DialogView {
        let notes = if self.info.release_notes.trim().is_empty() {
            "No release notes provided.".to_string()
        } else {
            self.info.release_notes.trim().to_string()
        };
        DialogView {
            title: "New Version Available".to_string(),
            lines: vec![
                format!("Version {} has been released", self.info.version),
                "What's new:".to_string(),
                notes,
            ],
            checkbox: Some(CheckboxView {
                label: "Don't show update notifications again".to_string(),
                checked: self.never_show,
                action: DialogAction::ToggleNeverShow,
            }),
            buttons: vec![
                ButtonView::new("Skip This Version", DialogAction::IgnoreVersion),
                ButtonView::new("Later", DialogAction::Later),
                ButtonView::new("Update Now", DialogAction::Download),
            ],
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_version_notes_and_checkbox() {
        let state = UpdateDialogState {
            info: UpdateInfo {
                version: "1.2.0".into(),
                release_notes: "  Faster search\n".into(),
                download_url: "https://example.com".into(),
            },
            never_show: true,
        };
        let view = state.render();
        assert_eq!(view.lines[0], "Version 1.2.0 has been released");
        assert_eq!(view.lines[2], "Faster search");
        assert!(view.checkbox.as_ref().unwrap().checked);
        assert!(view.button(DialogAction::Download).is_some());
    }
}
