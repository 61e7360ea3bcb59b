//! Booking flow orchestration
//!
//! [`BookingFlow`] ties the form state holder to the remote store: it
//! validates the draft, issues the single asynchronous create request, and
//! publishes the [`SubmissionOutcome`] transitions the projector observes.

mod projector;

pub use projector::{ResultProjector, ScreenUpdate};

use crate::form::BookingForm;
use crate::models::{BookingOptions, PhotoRef, SubmissionOutcome, UserDetails};
use crate::store::AppointmentStore;
use crate::validation::{validate_draft, ValidationError};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("A booking is already in progress")]
    AlreadyPending,
}

/// Every user intent the presentation layer can forward
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingIntent {
    SelectService(String),
    SelectCenter(String),
    /// Epoch milliseconds from the date picker
    SelectDate(i64),
    /// Formatted value from the time picker, e.g. `02:30 PM`
    SelectTime(String),
    UpdateDescription(String),
    AttachPhoto(PhotoRef),
    ClearPhoto,
    Submit,
    DismissOutcome,
}

/// One booking screen instance: the draft, the signed-in user, and the
/// outcome of the in-flight or completed create request.
pub struct BookingFlow {
    form: BookingForm,
    user: UserDetails,
    store: Arc<dyn AppointmentStore>,
    outcome: watch::Sender<SubmissionOutcome>,
}

impl BookingFlow {
    pub fn new(options: BookingOptions, user: UserDetails, store: Arc<dyn AppointmentStore>) -> Self {
        let (outcome, _) = watch::channel(SubmissionOutcome::Idle);
        Self {
            form: BookingForm::new(options),
            user,
            store,
            outcome,
        }
    }

    pub fn form(&self) -> &BookingForm {
        &self.form
    }

    pub fn user(&self) -> &UserDetails {
        &self.user
    }

    /// Snapshot of the current submission outcome
    pub fn outcome(&self) -> SubmissionOutcome {
        self.outcome.borrow().clone()
    }

    /// Subscribe to outcome transitions. Pending is always published before
    /// the corresponding Success or Failure.
    pub fn subscribe_outcome(&self) -> watch::Receiver<SubmissionOutcome> {
        self.outcome.subscribe()
    }

    /// Whether the submit affordance should be enabled
    pub fn can_submit(&self) -> bool {
        self.form.draft().date.is_some() && !self.outcome.borrow().is_pending()
    }

    /// Route one user intent to the owning part
    pub fn apply(&self, intent: BookingIntent) -> Result<(), SubmitError> {
        match intent {
            BookingIntent::SelectService(option) => self.form.select_service(&option),
            BookingIntent::SelectCenter(option) => self.form.select_center(&option),
            BookingIntent::SelectDate(epoch_millis) => self.form.select_date(epoch_millis),
            BookingIntent::SelectTime(formatted) => self.form.select_time(&formatted),
            BookingIntent::UpdateDescription(text) => self.form.update_description(&text),
            BookingIntent::AttachPhoto(photo) => self.form.update_photo(photo),
            BookingIntent::ClearPhoto => self.form.clear_photo(),
            BookingIntent::Submit => return self.submit(),
            BookingIntent::DismissOutcome => self.dismiss_outcome(),
        }
        Ok(())
    }

    /// Start the booking: transition to Pending and issue the create request
    /// on a spawned task. Only the date is required; a date-bearing draft is
    /// always submittable. Fire-and-forget for the caller; the result arrives
    /// through the outcome channel. No automatic retry.
    pub fn submit(&self) -> Result<(), SubmitError> {
        let draft = self.form.draft();
        validate_draft(&draft)?;
        if self.outcome.borrow().is_pending() {
            return Err(SubmitError::AlreadyPending);
        }
        let record = draft
            .to_record(&self.user.user_id)
            .ok_or(ValidationError::DateMissing)?;

        // Pending must be observable before any terminal outcome
        self.outcome.send_replace(SubmissionOutcome::Pending);

        let store = Arc::clone(&self.store);
        let outcome = self.outcome.clone();
        tokio::spawn(async move {
            match store.create(&record).await {
                Ok(id) => {
                    tracing::info!("appointment created: {}", id);
                    outcome.send_replace(SubmissionOutcome::Success(id));
                }
                Err(e) => {
                    tracing::error!("appointment create failed: {}", e);
                    outcome.send_replace(SubmissionOutcome::Failure(e.user_message()));
                }
            }
        });

        Ok(())
    }

    /// Dismiss a terminal outcome, returning to Idle so the user can retry.
    /// The draft is untouched. Pending cannot be dismissed.
    pub fn dismiss_outcome(&self) {
        self.outcome.send_if_modified(|outcome| {
            if outcome.is_terminal() {
                *outcome = SubmissionOutcome::Idle;
                true
            } else {
                false
            }
        });
    }
}
