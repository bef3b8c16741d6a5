//! Update system module
//!
//! Checks a release feed for newer versions, remembers which prompts the user
//! asked to suppress, and walks the notification dialog through its states.

mod checker;
mod controller;
mod launcher;
mod notification;
mod preferences;
mod service;
mod source;
mod types;

pub use checker::UpdateChecker;
pub use controller::UpdateController;
pub use launcher::{BrowserLauncher, SystemBrowser};
pub use notification::{CheckTicket, NotificationState, UpdateNotification, UserChoice};
pub use preferences::{PreferenceStorage, UpdatePreferenceStore};
pub use service::{DefaultUpdateService, UpdateService};
pub use source::{GithubReleaseSource, VersionSource};
pub use types::*;
