//! Status messages for UI feedback, derived from events.

use crate::state::events::AppEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub level: StatusLevel,
    pub text: String,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self { level: StatusLevel::Info, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { level: StatusLevel::Error, text: text.into() }
    }

    /// Status line to show for an event, if any.
    pub fn from_event(event: &AppEvent) -> Option<Self> {
        let message = match event {
            AppEvent::UpdateCheckStarted { .. } => Self::info("Checking for updates..."),
            AppEvent::UpdateAvailable { version } => {
                Self::info(format!("Version {version} is available"))
            }
            // Suppressed versions look exactly like "no update" to the user
            AppEvent::UpdateNotFound | AppEvent::UpdateSuppressed { .. } => {
                Self::info("You are running the latest version")
            }
            AppEvent::UpdateIgnored { version } => {
                Self::info(format!("Version {version} will not be offered again"))
            }
            AppEvent::UpdatesDisabled => Self::info("Update notifications turned off"),
            AppEvent::DownloadPageOpened { .. } => Self::info("Opened download page"),
            AppEvent::PreferenceSaveFailed { error } => {
                Self::error(format!("Failed to save update preferences: {error}"))
            }
            AppEvent::StaleResultDiscarded
            | AppEvent::UpdateDismissed { .. }
            | AppEvent::DownloadPageFailed { .. }
            | AppEvent::DialogClosed => return None,
        };
        Some(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suppressed_update_reads_as_up_to_date() {
        let suppressed =
            StatusMessage::from_event(&AppEvent::UpdateSuppressed { version: "1.2.0".into() });
        let none = StatusMessage::from_event(&AppEvent::UpdateNotFound);
        assert_eq!(suppressed, none);
    }

    #[test]
    fn save_failure_is_an_error() {
        let message =
            StatusMessage::from_event(&AppEvent::PreferenceSaveFailed { error: "disk full".into() })
                .expect("should produce a message");
        assert_eq!(message.level, StatusLevel::Error);
        assert!(message.text.contains("disk full"));
    }

    #[test]
    fn launch_failure_is_silent() {
        assert!(
            StatusMessage::from_event(&AppEvent::DownloadPageFailed { url: "x".into() }).is_none()
        );
    }
}
