//! Update notification state machine.
//!
//! ```text
//! Idle → Checking → NoUpdate
//!                 → UpdateAvailable → Dismissed | Suppressed | AcceptedDownload
//! ```
//!
//! Every state returns to `Idle` when the dialog closes. Closing while a check
//! is in flight (or while the prompt is open) starts a new session, so a
//! result that arrives afterwards is discarded as stale. The query itself keeps
//! running, and no new check starts until its result has been handed back.

use serde::{Deserialize, Serialize};

use super::launcher::BrowserLauncher;
use super::service::UpdateService;
use super::types::{UpdateConfigPatch, UpdateInfo};
use crate::dialogs::UpdateDialogState;
use crate::error::{Error, Result};
use crate::state::events::AppEvent;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationState {
    #[default]
    Idle,
    Checking,
    NoUpdate,
    UpdateAvailable(UpdateInfo),
    Dismissed,
    Suppressed,
    AcceptedDownload,
}

impl NotificationState {
    pub fn name(&self) -> &'static str {
        match self {
            NotificationState::Idle => "idle",
            NotificationState::Checking => "checking",
            NotificationState::NoUpdate => "no update",
            NotificationState::UpdateAvailable(_) => "update available",
            NotificationState::Dismissed => "dismissed",
            NotificationState::Suppressed => "suppressed",
            NotificationState::AcceptedDownload => "accepted download",
        }
    }

    /// End of a check cycle; only closing the dialog leaves these.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            NotificationState::NoUpdate
                | NotificationState::Dismissed
                | NotificationState::Suppressed
                | NotificationState::AcceptedDownload
        )
    }
}

/// A button in the update prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserChoice {
    /// Close the prompt; offered again next time unless "never show" is checked
    Later,
    /// Never offer this version again
    IgnoreVersion,
    /// Open the download page
    Download,
}

/// Proof that a check was started in a given session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckTicket {
    session: u64,
    forced: bool,
}

impl CheckTicket {
    pub fn forced(&self) -> bool {
        self.forced
    }
}

#[derive(Debug, Default)]
pub struct UpdateNotification {
    state: NotificationState,
    never_show: bool,
    session: u64,
    /// A query task holds a ticket; cleared only by `finish_check`
    in_flight: bool,
    events: Vec<AppEvent>,
}

impl UpdateNotification {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &NotificationState {
        &self.state
    }

    pub fn is_checking(&self) -> bool {
        self.state == NotificationState::Checking
    }

    /// True from `begin_check` until its ticket comes back, even if the
    /// dialog was closed in between.
    pub fn has_check_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn never_show(&self) -> bool {
        self.never_show
    }

    /// Events produced since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<AppEvent> {
        std::mem::take(&mut self.events)
    }

    /// Start a check cycle.
    ///
    /// Returns `None` while a check is already in flight or the prompt is
    /// open; the trigger is dropped, not queued.
    pub fn begin_check(&mut self, force_check: bool) -> Option<CheckTicket> {
        if self.in_flight {
            log::debug!("Update check already in progress");
            return None;
        }
        match self.state {
            NotificationState::Checking => {
                log::debug!("Update check already in progress");
                return None;
            }
            NotificationState::UpdateAvailable(_) => {
                log::debug!("Update prompt is open; not checking again");
                return None;
            }
            _ => {}
        }

        self.state = NotificationState::Checking;
        self.in_flight = true;
        self.never_show = false;
        self.events.push(AppEvent::UpdateCheckStarted { forced: force_check });
        Some(CheckTicket { session: self.session, forced: force_check })
    }

    /// Apply a check result. Returns false when the result was stale.
    pub fn finish_check<S: UpdateService>(
        &mut self,
        ticket: CheckTicket,
        result: Option<UpdateInfo>,
        service: &S,
    ) -> bool {
        self.in_flight = false;
        if ticket.session != self.session || !self.is_checking() {
            log::debug!("Discarding stale update check result");
            self.events.push(AppEvent::StaleResultDiscarded);
            return false;
        }

        match result {
            None => {
                self.state = NotificationState::NoUpdate;
                self.events.push(AppEvent::UpdateNotFound);
            }
            Some(info) if service.should_suppress(&info.version) => {
                log::info!("Update v{} suppressed by user preference", info.version);
                self.state = NotificationState::NoUpdate;
                self.events.push(AppEvent::UpdateSuppressed { version: info.version });
            }
            Some(info) => {
                self.events.push(AppEvent::UpdateAvailable { version: info.version.clone() });
                self.state = NotificationState::UpdateAvailable(info);
            }
        }
        true
    }

    /// The "don't show again" checkbox.
    pub fn set_never_show(&mut self, checked: bool) {
        self.never_show = checked;
    }

    /// Prompt contents, while an update is being offered.
    pub fn dialog(&self) -> Option<UpdateDialogState> {
        match &self.state {
            NotificationState::UpdateAvailable(info) => {
                Some(UpdateDialogState { info: info.clone(), never_show: self.never_show })
            }
            _ => None,
        }
    }

    /// Act on the user's choice.
    ///
    /// Preference writes happen before this returns. A failed write is
    /// returned to the caller; the prompt still closes.
    pub fn choose<S: UpdateService, L: BrowserLauncher>(
        &mut self,
        choice: UserChoice,
        service: &S,
        launcher: &L,
    ) -> Result<()> {
        let NotificationState::UpdateAvailable(info) = &self.state else {
            return Err(Error::InvalidTransition {
                action: "act on an update prompt",
                state: self.state.name(),
            });
        };
        let info = info.clone();

        match choice {
            UserChoice::Later if self.never_show => {
                self.suppress(service, UpdateConfigPatch::never_show(), AppEvent::UpdatesDisabled)
            }
            UserChoice::Later => {
                self.state = NotificationState::Dismissed;
                self.events.push(AppEvent::UpdateDismissed { version: info.version });
                Ok(())
            }
            UserChoice::IgnoreVersion => {
                let mut patch = UpdateConfigPatch::ignore_version(info.version.clone());
                if self.never_show {
                    patch.never_show_updates = Some(true);
                }
                self.suppress(service, patch, AppEvent::UpdateIgnored { version: info.version })
            }
            UserChoice::Download => {
                let url = info.download_url;
                match launcher.open(&url) {
                    Ok(()) => self.events.push(AppEvent::DownloadPageOpened { url }),
                    Err(e) => {
                        log::debug!("Could not open download page: {e}");
                        self.events.push(AppEvent::DownloadPageFailed { url });
                    }
                }
                self.state = NotificationState::AcceptedDownload;
                if !self.never_show {
                    return Ok(());
                }
                self.save(service, &UpdateConfigPatch::never_show())?;
                self.events.push(AppEvent::UpdatesDisabled);
                Ok(())
            }
        }
    }

    /// Close the dialog and return to `Idle`.
    pub fn close(&mut self) {
        match self.state {
            NotificationState::Idle => return,
            NotificationState::Checking | NotificationState::UpdateAvailable(_) => {
                self.session += 1;
            }
            _ => {}
        }
        self.state = NotificationState::Idle;
        self.never_show = false;
        self.events.push(AppEvent::DialogClosed);
    }

    fn suppress<S: UpdateService>(
        &mut self,
        service: &S,
        patch: UpdateConfigPatch,
        on_saved: AppEvent,
    ) -> Result<()> {
        match self.save(service, &patch) {
            Ok(()) => {
                self.state = NotificationState::Suppressed;
                self.events.push(on_saved);
                Ok(())
            }
            Err(e) => {
                // Nothing was persisted, so this is a plain dismissal
                self.state = NotificationState::Dismissed;
                Err(e)
            }
        }
    }

    fn save<S: UpdateService>(&mut self, service: &S, patch: &UpdateConfigPatch) -> Result<()> {
        service.save_update_config(patch).inspect_err(|e| {
            log::warn!("Failed to save update preferences: {e}");
            self.events.push(AppEvent::PreferenceSaveFailed { error: e.to_string() });
        })
    }
}
