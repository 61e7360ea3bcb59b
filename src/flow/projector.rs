//! Result projection: outcome states onto the screen

use super::BookingFlow;
use crate::models::SubmissionOutcome;
use crate::nav::{NavTarget, Navigator};
use crate::notify::{booked_notification, Notifier, NotifyError, APPOINTMENT_CHANNEL};
use std::sync::Arc;

/// Presentation command derived from the current [`SubmissionOutcome`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenUpdate {
    /// No dialog should be showing
    CloseDialog,
    /// Modal progress dialog; not dismissable by outside tap
    ShowProgress,
    /// Failure dialog with a retry affordance
    ShowError { message: String },
    /// Booking confirmed; side effects have fired and the flow is Idle again
    Complete { appointment_id: String },
}

/// Maps outcome transitions onto dialogs and, on success, fires the one-shot
/// side effects: the confirmation notification and navigation to the
/// confirmation view.
pub struct ResultProjector {
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
}

impl ResultProjector {
    pub fn new(notifier: Arc<dyn Notifier>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            notifier,
            navigator,
        }
    }

    /// Project the flow's current outcome onto a presentation command.
    ///
    /// Success is consumed here: notification and navigation fire exactly
    /// once, then the flow returns to Idle. Notification failures are
    /// best-effort and never block the navigation.
    pub fn project(&self, flow: &BookingFlow) -> ScreenUpdate {
        match flow.outcome() {
            SubmissionOutcome::Idle => ScreenUpdate::CloseDialog,
            SubmissionOutcome::Pending => ScreenUpdate::ShowProgress,
            SubmissionOutcome::Failure(message) => ScreenUpdate::ShowError { message },
            SubmissionOutcome::Success(appointment_id) => {
                let draft = flow.form().draft();
                let (title, body) =
                    booked_notification(&draft.formatted_date(), &draft.formatted_time());
                match self.notifier.post(APPOINTMENT_CHANNEL, &title, &body) {
                    Ok(()) => {}
                    Err(NotifyError::PermissionDenied) => {
                        tracing::warn!("notification permission not granted, skipping");
                    }
                    Err(e) => {
                        tracing::warn!("notification delivery failed: {}", e);
                    }
                }
                self.navigator.navigate(NavTarget::AppointmentConfirmation {
                    appointment_id: appointment_id.clone(),
                });
                flow.dismiss_outcome();
                ScreenUpdate::Complete { appointment_id }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AppointmentRecord, BookingOptions, UserDetails};
    use crate::store::{AppointmentStore, StoreError};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct StubStore {
        reply: Result<String, String>,
    }

    #[async_trait]
    impl AppointmentStore for StubStore {
        async fn create(&self, _record: &AppointmentRecord) -> Result<String, StoreError> {
            match &self.reply {
                Ok(id) => Ok(id.clone()),
                Err(message) => Err(StoreError::Rejected {
                    status: 503,
                    message: message.clone(),
                }),
            }
        }
    }

    struct HangingStore;

    #[async_trait]
    impl AppointmentStore for HangingStore {
        async fn create(&self, _record: &AppointmentRecord) -> Result<String, StoreError> {
            std::future::pending::<()>().await;
            unreachable!()
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        posts: Mutex<Vec<(String, String, String)>>,
        deny: bool,
    }

    impl Notifier for RecordingNotifier {
        fn post(&self, channel: &str, title: &str, body: &str) -> Result<(), NotifyError> {
            if self.deny {
                return Err(NotifyError::PermissionDenied);
            }
            self.posts.lock().unwrap().push((
                channel.to_string(),
                title.to_string(),
                body.to_string(),
            ));
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingNavigator {
        targets: Mutex<Vec<NavTarget>>,
    }

    impl Navigator for RecordingNavigator {
        fn navigate(&self, target: NavTarget) {
            self.targets.lock().unwrap().push(target);
        }
    }

    fn user() -> UserDetails {
        UserDetails {
            user_id: "user-1".to_string(),
            email: None,
            display_name: None,
            is_email_verified: false,
            phone_number: None,
            photo_url: None,
        }
    }

    fn flow(reply: Result<String, String>) -> BookingFlow {
        BookingFlow::new(
            BookingOptions::default(),
            user(),
            Arc::new(StubStore { reply }),
        )
    }

    async fn submit_and_settle(flow: &BookingFlow) {
        let mut rx = flow.subscribe_outcome();
        flow.submit().unwrap();
        while !rx.borrow_and_update().is_terminal() {
            rx.changed().await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_idle_and_pending_projections() {
        let flow = flow(Ok("apt-123".to_string()));
        let projector = ResultProjector::new(
            Arc::new(RecordingNotifier::default()),
            Arc::new(RecordingNavigator::default()),
        );

        assert_eq!(projector.project(&flow), ScreenUpdate::CloseDialog);

        let pending = BookingFlow::new(BookingOptions::default(), user(), Arc::new(HangingStore));
        pending.form().select_date(1741564800000);
        pending.submit().unwrap();
        assert_eq!(projector.project(&pending), ScreenUpdate::ShowProgress);
    }

    #[tokio::test]
    async fn test_success_fires_notification_and_navigation_once() {
        let flow = flow(Ok("apt-123".to_string()));
        flow.form().select_date(1741564800000); // 2025-03-10
        flow.form().select_time("02:30 PM");
        submit_and_settle(&flow).await;

        let notifier = Arc::new(RecordingNotifier::default());
        let navigator = Arc::new(RecordingNavigator::default());
        let projector = ResultProjector::new(notifier.clone(), navigator.clone());

        assert_eq!(
            projector.project(&flow),
            ScreenUpdate::Complete {
                appointment_id: "apt-123".to_string()
            }
        );

        let posts = notifier.posts.lock().unwrap();
        assert_eq!(posts.len(), 1);
        let (channel, title, body) = &posts[0];
        assert_eq!(channel, APPOINTMENT_CHANNEL);
        assert_eq!(title, "Appointment Booked");
        assert!(body.contains("10 March 2025"));
        assert!(body.contains("02:30 PM"));

        let targets = navigator.targets.lock().unwrap();
        assert_eq!(
            targets.as_slice(),
            [NavTarget::AppointmentConfirmation {
                appointment_id: "apt-123".to_string()
            }]
        );

        // Success was consumed; the flow is Idle and nothing fires again
        assert_eq!(flow.outcome(), SubmissionOutcome::Idle);
        drop(posts);
        drop(targets);
        assert_eq!(projector.project(&flow), ScreenUpdate::CloseDialog);
        assert_eq!(notifier.posts.lock().unwrap().len(), 1);
        assert_eq!(navigator.targets.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_denied_notification_is_swallowed() {
        let flow = flow(Ok("apt-123".to_string()));
        flow.form().select_date(1741564800000);
        submit_and_settle(&flow).await;

        let notifier = Arc::new(RecordingNotifier {
            posts: Mutex::new(Vec::new()),
            deny: true,
        });
        let navigator = Arc::new(RecordingNavigator::default());
        let projector = ResultProjector::new(notifier, navigator.clone());

        // Navigation still happens; the denial is non-fatal
        assert_eq!(
            projector.project(&flow),
            ScreenUpdate::Complete {
                appointment_id: "apt-123".to_string()
            }
        );
        assert_eq!(navigator.targets.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_failure_projection_shows_message() {
        let flow = flow(Err("network error".to_string()));
        flow.form().select_date(1741564800000);
        submit_and_settle(&flow).await;

        let notifier = Arc::new(RecordingNotifier::default());
        let navigator = Arc::new(RecordingNavigator::default());
        let projector = ResultProjector::new(notifier.clone(), navigator.clone());

        assert_eq!(
            projector.project(&flow),
            ScreenUpdate::ShowError {
                message: "network error".to_string()
            }
        );
        // No side effects on failure
        assert!(notifier.posts.lock().unwrap().is_empty());
        assert!(navigator.targets.lock().unwrap().is_empty());
    }
}
