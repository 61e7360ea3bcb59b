//! Navigation contract
//!
//! Opaque to the booking flow; only used to move to the confirmation view
//! once a booking succeeds.

/// Destinations the booking flow can request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavTarget {
    AppointmentConfirmation { appointment_id: String },
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, target: NavTarget);
}

/// Logs the requested destination; stands in for a real navigation shell
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, target: NavTarget) {
        tracing::info!("navigate: {:?}", target);
    }
}
