//! Application events for reactive UI updates

/// Events emitted by the update workflow for UI reactivity
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    // Check lifecycle
    UpdateCheckStarted { forced: bool },
    UpdateAvailable { version: String },
    UpdateNotFound,
    UpdateSuppressed { version: String },
    StaleResultDiscarded,

    // User decisions
    UpdateDismissed { version: String },
    UpdateIgnored { version: String },
    UpdatesDisabled,
    DownloadPageOpened { url: String },
    DownloadPageFailed { url: String },
    PreferenceSaveFailed { error: String },

    DialogClosed,
}
