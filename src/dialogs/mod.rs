//! Dialog view state.
//!
//! Each dialog keeps its mutable state in a plain serializable struct and
//! exposes a pure `render` that turns it into a [`DialogView`]. Whatever UI
//! toolkit draws the view only reads that model and reports [`DialogAction`]s
//! back.

pub mod about;
pub mod create_entry;
pub mod file_edit;
pub mod update;

use serde::{Deserialize, Serialize};

pub use about::AboutState;
pub use create_entry::{CreateDirectoryState, CreateFileState};
pub use file_edit::{COMMON_ENCODINGS, FileEditState};
pub use update::UpdateDialogState;

/// How a submit was requested. An explicit confirm click and the equivalent
/// keyboard shortcut submit identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmitTrigger {
    Confirm,
    Shortcut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DialogAction {
    Cancel,
    Create,
    Save,
    ToggleEncodingMenu,
    CheckForUpdates,
    OpenRepository,
    Close,
    Later,
    IgnoreVersion,
    Download,
    ToggleNeverShow,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonView {
    pub label: String,
    pub action: DialogAction,
    pub enabled: bool,
    /// Show a progress indicator instead of an icon
    pub busy: bool,
}

impl ButtonView {
    pub fn new(label: impl Into<String>, action: DialogAction) -> Self {
        Self { label: label.into(), action, enabled: true, busy: false }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn busy(mut self, busy: bool) -> Self {
        self.busy = busy;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckboxView {
    pub label: String,
    pub checked: bool,
    pub action: DialogAction,
}

/// Toolkit-neutral description of a dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogView {
    pub title: String,
    pub lines: Vec<String>,
    pub error: Option<String>,
    pub checkbox: Option<CheckboxView>,
    pub options: Vec<String>,
    pub buttons: Vec<ButtonView>,
}

impl DialogView {
    pub fn button(&self, action: DialogAction) -> Option<&ButtonView> {
        self.buttons.iter().find(|b| b.action == action)
    }
}
