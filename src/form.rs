//! Form state holder for the booking screen
//!
//! Owns the single [`AppointmentDraft`] and exposes one mutation per field.
//! Mutations cannot fail and are idempotent: re-applying the current value
//! does not wake observers.

use crate::models::{parse_display_time, AppointmentDraft, BookingOptions, PhotoRef};
use crate::validation::validate_option;
use chrono::{DateTime, Utc};
use tokio::sync::watch;

/// Holds the in-progress booking draft for one screen instance.
///
/// Mutated only by user intents routed through the owning flow; observable
/// through a watch channel so the presentation layer can reflect every change.
pub struct BookingForm {
    options: BookingOptions,
    draft: watch::Sender<AppointmentDraft>,
}

impl BookingForm {
    /// Create an empty draft, preselecting the first service and center the
    /// way the screen's dropdowns do.
    pub fn new(options: BookingOptions) -> Self {
        let draft = AppointmentDraft {
            service: options.services.first().cloned().unwrap_or_default(),
            center: options.centers.first().cloned().unwrap_or_default(),
            ..AppointmentDraft::default()
        };
        let (tx, _) = watch::channel(draft);
        Self { options, draft: tx }
    }

    /// The option lists this form was created with
    pub fn options(&self) -> &BookingOptions {
        &self.options
    }

    /// Snapshot of the current draft
    pub fn draft(&self) -> AppointmentDraft {
        self.draft.borrow().clone()
    }

    /// Subscribe to draft changes
    pub fn subscribe(&self) -> watch::Receiver<AppointmentDraft> {
        self.draft.subscribe()
    }

    /// Select a service from the offered list. Unknown options are ignored;
    /// the dropdown only offers members, so this guards programmatic callers.
    pub fn select_service(&self, option: &str) {
        if let Err(e) = validate_option("service", option, &self.options.services) {
            tracing::warn!("ignoring selection: {}", e);
            return;
        }
        self.draft.send_if_modified(|d| {
            if d.service == option {
                false
            } else {
                d.service = option.to_string();
                true
            }
        });
    }

    /// Select a center from the offered list
    pub fn select_center(&self, option: &str) {
        if let Err(e) = validate_option("center", option, &self.options.centers) {
            tracing::warn!("ignoring selection: {}", e);
            return;
        }
        self.draft.send_if_modified(|d| {
            if d.center == option {
                false
            } else {
                d.center = option.to_string();
                true
            }
        });
    }

    /// Select the service date from the picker's epoch milliseconds (UTC).
    /// Out-of-range values are ignored; the picker cannot produce them.
    pub fn select_date(&self, epoch_millis: i64) {
        let Some(date) =
            DateTime::<Utc>::from_timestamp_millis(epoch_millis).map(|dt| dt.date_naive())
        else {
            tracing::warn!("ignoring out-of-range date millis: {}", epoch_millis);
            return;
        };
        self.draft.send_if_modified(|d| {
            if d.date == Some(date) {
                false
            } else {
                d.date = Some(date);
                true
            }
        });
    }

    /// Select the service time from the picker's formatted value, e.g.
    /// `02:30 PM`. An unparseable value leaves the field unchanged.
    pub fn select_time(&self, formatted: &str) {
        let Some(time) = parse_display_time(formatted) else {
            tracing::warn!("ignoring unparseable time value: {}", formatted);
            return;
        };
        self.draft.send_if_modified(|d| {
            if d.time == Some(time) {
                false
            } else {
                d.time = Some(time);
                true
            }
        });
    }

    /// Replace the free-text problem description
    pub fn update_description(&self, text: &str) {
        self.draft.send_if_modified(|d| {
            if d.description == text {
                false
            } else {
                d.description = text.to_string();
                true
            }
        });
    }

    /// Attach or replace the photo reference
    pub fn update_photo(&self, photo: PhotoRef) {
        self.draft.send_if_modified(|d| {
            if d.photo.as_ref() == Some(&photo) {
                false
            } else {
                d.photo = Some(photo.clone());
                true
            }
        });
    }

    /// Drop the attached photo, as the screen does before a fresh capture
    pub fn clear_photo(&self) {
        self.draft.send_if_modified(|d| {
            if d.photo.is_none() {
                false
            } else {
                d.photo = None;
                true
            }
        });
    }
}
