//! Local notification contract
//!
//! Delivery is best-effort and permission-gated: callers log and swallow
//! [`NotifyError::PermissionDenied`], they never surface it.

use rand::Rng;
use thiserror::Error;

/// Channel the booking confirmation is posted on
pub const APPOINTMENT_CHANNEL: &str = "appointment_channel";

const BOOKED_TITLE: &str = "Appointment Booked";

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notification permission not granted")]
    PermissionDenied,

    #[error("notification delivery failed: {0}")]
    Delivery(String),
}

pub trait Notifier: Send + Sync {
    /// Post one notification. Fire-and-forget from the flow's perspective.
    fn post(&self, channel: &str, title: &str, body: &str) -> Result<(), NotifyError>;
}

/// Title and body for the booked-appointment notification
pub fn booked_notification(formatted_date: &str, formatted_time: &str) -> (String, String) {
    (
        BOOKED_TITLE.to_string(),
        format!(
            "Appointment Booked on {} at {}",
            formatted_date, formatted_time
        ),
    )
}

/// Delivers notifications to the structured log, with a random notification
/// id so repeated bookings stay distinguishable.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn post(&self, channel: &str, title: &str, body: &str) -> Result<(), NotifyError> {
        let notification_id: u32 = rand::thread_rng().gen();
        tracing::info!(
            notification_id,
            channel,
            title,
            "notification: {}",
            body
        );
        Ok(())
    }
}
