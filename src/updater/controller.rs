//! Drives [`UpdateNotification`] from UI triggers on the tokio runtime.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use super::launcher::{BrowserLauncher, SystemBrowser};
use super::notification::{NotificationState, UpdateNotification, UserChoice};
use super::service::UpdateService;
use crate::dialogs::{AboutState, UpdateDialogState};
use crate::error::Result;
use crate::state::events::AppEvent;

const EVENT_CAPACITY: usize = 64;

struct Shared<S, L> {
    service: S,
    launcher: L,
    notification: Mutex<UpdateNotification>,
    events: broadcast::Sender<AppEvent>,
}

impl<S, L> Shared<S, L> {
    /// Run `f` under the lock, then publish whatever events it produced.
    fn with_notification<R>(&self, f: impl FnOnce(&mut UpdateNotification) -> R) -> R {
        let (result, events) = {
            let mut notification = self.notification.lock();
            let result = f(&mut notification);
            (result, notification.drain_events())
        };
        for event in events {
            // No subscribers is fine
            let _ = self.events.send(event);
        }
        result
    }
}

/// Cheap to clone; all clones share one state machine.
pub struct UpdateController<S, L = SystemBrowser> {
    shared: Arc<Shared<S, L>>,
}

impl<S, L> Clone for UpdateController<S, L> {
    fn clone(&self) -> Self {
        Self { shared: self.shared.clone() }
    }
}

impl<S: UpdateService> UpdateController<S, SystemBrowser> {
    pub fn with_system_browser(service: S) -> Self {
        Self::new(service, SystemBrowser)
    }
}

impl<S: UpdateService, L: BrowserLauncher> UpdateController<S, L> {
    pub fn new(service: S, launcher: L) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            shared: Arc::new(Shared {
                service,
                launcher,
                notification: Mutex::new(UpdateNotification::new()),
                events,
            }),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.shared.events.subscribe()
    }

    pub fn service(&self) -> &S {
        &self.shared.service
    }

    pub fn state(&self) -> NotificationState {
        self.shared.notification.lock().state().clone()
    }

    pub fn is_checking(&self) -> bool {
        self.shared.notification.lock().is_checking()
    }

    /// Start a background check. Returns `None` when one is already running.
    ///
    /// Must be called from within a tokio runtime. The result is applied when
    /// the task finishes, unless the dialog was closed in the meantime.
    pub fn trigger_check(&self, force_check: bool) -> Option<JoinHandle<()>> {
        let ticket = self.shared.with_notification(|n| n.begin_check(force_check))?;
        let shared = self.shared.clone();
        Some(tokio::spawn(async move {
            let result = shared.service.check_for_updates(ticket.forced()).await;
            shared.with_notification(|n| n.finish_check(ticket, result, &shared.service));
        }))
    }

    /// Run a check to completion and return the resulting state.
    pub async fn check_now(&self, force_check: bool) -> NotificationState {
        if let Some(handle) = self.trigger_check(force_check)
            && let Err(e) = handle.await
        {
            log::error!("Update check task failed: {e}");
        }
        self.state()
    }

    pub fn set_never_show(&self, checked: bool) {
        self.shared.with_notification(|n| n.set_never_show(checked));
    }

    pub fn choose(&self, choice: UserChoice) -> Result<()> {
        let shared = &self.shared;
        shared.with_notification(|n| n.choose(choice, &shared.service, &shared.launcher))
    }

    pub fn close(&self) {
        self.shared.with_notification(UpdateNotification::close);
    }

    pub fn update_dialog(&self) -> Option<UpdateDialogState> {
        self.shared.notification.lock().dialog()
    }

    /// About dialog contents. "Check for Updates" stays busy while a check
    /// task is still running, including one whose dialog was closed.
    pub fn about_dialog(
        &self,
        app_name: impl Into<String>,
        version: impl Into<String>,
    ) -> AboutState {
        AboutState {
            checking: self.shared.notification.lock().has_check_in_flight(),
            ..AboutState::new(app_name, version)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tokio::sync::Notify;

    use super::*;
    use crate::dialogs::DialogAction;
    use crate::updater::types::{UpdateConfigPatch, UpdateInfo};

    /// Holds every check until released.
    #[derive(Default)]
    struct GatedService {
        gate: Notify,
        calls: AtomicUsize,
    }

    impl UpdateService for GatedService {
        async fn check_for_updates(&self, _force_check: bool) -> Option<UpdateInfo> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.gate.notified().await;
            Some(UpdateInfo {
                version: "1.2.0".into(),
                release_notes: String::new(),
                download_url: "https://example.com".into(),
            })
        }

        fn save_update_config(&self, _patch: &UpdateConfigPatch) -> Result<()> {
            Ok(())
        }

        fn should_suppress(&self, _candidate_version: &str) -> bool {
            false
        }
    }

    struct NoBrowser;

    impl BrowserLauncher for NoBrowser {
        fn open(&self, _url: &str) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn concurrent_triggers_coalesce() {
        let controller = UpdateController::new(GatedService::default(), NoBrowser);

        let first = controller.trigger_check(true).expect("first check should start");
        assert!(controller.trigger_check(true).is_none());
        assert!(controller.is_checking());

        tokio::task::yield_now().await;
        controller.service().gate.notify_one();
        first.await.unwrap();

        assert_eq!(controller.service().calls.load(Ordering::SeqCst), 1);
        assert!(matches!(controller.state(), NotificationState::UpdateAvailable(_)));
        assert!(controller.update_dialog().is_some());
    }

    #[tokio::test]
    async fn result_after_close_is_discarded() {
        let controller = UpdateController::new(GatedService::default(), NoBrowser);
        let mut events = controller.subscribe();

        let handle = controller.trigger_check(false).unwrap();
        controller.close();
        controller.service().gate.notify_one();
        handle.await.unwrap();

        assert_eq!(controller.state(), NotificationState::Idle);
        assert_eq!(events.recv().await.unwrap(), AppEvent::UpdateCheckStarted { forced: false });
        assert_eq!(events.recv().await.unwrap(), AppEvent::DialogClosed);
        assert_eq!(events.recv().await.unwrap(), AppEvent::StaleResultDiscarded);
    }

    #[tokio::test]
    async fn close_does_not_allow_a_second_query() {
        let controller = UpdateController::new(GatedService::default(), NoBrowser);

        let first = controller.trigger_check(true).expect("first check should start");
        controller.close();
        assert_eq!(controller.state(), NotificationState::Idle);
        assert!(controller.trigger_check(true).is_none());

        controller.service().gate.notify_one();
        first.await.unwrap();
        assert_eq!(controller.service().calls.load(Ordering::SeqCst), 1);
        assert_eq!(controller.state(), NotificationState::Idle);

        // Once the stale result is back a new check may start
        let second = controller.trigger_check(true).expect("check should start again");
        controller.service().gate.notify_one();
        second.await.unwrap();
        assert_eq!(controller.service().calls.load(Ordering::SeqCst), 2);
        assert!(matches!(controller.state(), NotificationState::UpdateAvailable(_)));
    }

    #[tokio::test]
    async fn about_dialog_tracks_running_check() {
        let controller = UpdateController::new(GatedService::default(), NoBrowser);
        let check_enabled = |c: &UpdateController<GatedService, NoBrowser>| {
            let view = c.about_dialog("Files", "1.0.0").render();
            view.button(DialogAction::CheckForUpdates).expect("about has a check button").enabled
        };
        assert!(check_enabled(&controller));

        let handle = controller.trigger_check(true).unwrap();
        assert!(controller.about_dialog("Files", "1.0.0").checking);
        assert!(!check_enabled(&controller));

        controller.service().gate.notify_one();
        handle.await.unwrap();
        assert!(check_enabled(&controller));
    }
}
