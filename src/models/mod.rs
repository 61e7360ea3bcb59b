//! Data models for the booking flow

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Display placeholder when no date has been picked yet
pub const NO_DATE_SELECTED: &str = "No Date Selected";
/// Display placeholder when no time has been picked yet
pub const NO_TIME_SELECTED: &str = "No Time Selected";

const DATE_DISPLAY_FORMAT: &str = "%d %B %Y";
const TIME_DISPLAY_FORMAT: &str = "%I:%M %p";

// =============================================================================
// Booking Options
// =============================================================================

/// The fixed service and center option lists offered by the booking screen.
///
/// Selection is constrained to these lists, so a draft can never hold an
/// option that was not offered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingOptions {
    pub services: Vec<String>,
    pub centers: Vec<String>,
}

impl Default for BookingOptions {
    fn default() -> Self {
        Self {
            services: vec![
                "Car Wash".to_string(),
                "Oil Change".to_string(),
                "Engine Check".to_string(),
                "Tyre Replacement".to_string(),
                "Full Service".to_string(),
            ],
            centers: vec![
                "CarCare Center - Middlesbrough".to_string(),
                "CarCare Center - Stockton".to_string(),
                "CarCare Center - Darlington".to_string(),
            ],
        }
    }
}

// =============================================================================
// Photo Reference
// =============================================================================

/// Opaque local image reference attached to a draft.
///
/// Never decoded here; only carried to upload/display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhotoRef {
    /// Filesystem-backed capture from the camera
    Camera(PathBuf),
    /// Content reference picked from the gallery
    Gallery(String),
}

impl PhotoRef {
    /// The reference as written to the remote store
    pub fn reference(&self) -> String {
        match self {
            PhotoRef::Camera(path) => path.to_string_lossy().into_owned(),
            PhotoRef::Gallery(uri) => uri.clone(),
        }
    }
}

// =============================================================================
// Appointment Draft
// =============================================================================

/// In-progress, unsubmitted booking request data.
///
/// Only `date` is mandatory before submission; every other field may stay at
/// its initial value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppointmentDraft {
    pub service: String,
    pub center: String,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub description: String,
    pub photo: Option<PhotoRef>,
}

impl AppointmentDraft {
    /// Selected date rendered for display, e.g. `10 March 2025`
    pub fn formatted_date(&self) -> String {
        match self.date {
            Some(date) => date.format(DATE_DISPLAY_FORMAT).to_string(),
            None => NO_DATE_SELECTED.to_string(),
        }
    }

    /// Selected time rendered for display, e.g. `02:30 PM`
    pub fn formatted_time(&self) -> String {
        match self.time {
            Some(time) => time.format(TIME_DISPLAY_FORMAT).to_string(),
            None => NO_TIME_SELECTED.to_string(),
        }
    }

    /// Build the wire record, or `None` while no date is selected
    pub fn to_record(&self, user_id: &str) -> Option<AppointmentRecord> {
        self.date?;
        Some(AppointmentRecord {
            service_type: self.service.clone(),
            center: self.center.clone(),
            date: self.formatted_date(),
            time: self.formatted_time(),
            description: self.description.clone(),
            photo_ref: self.photo.as_ref().map(PhotoRef::reference),
            user_id: user_id.to_string(),
        })
    }
}

/// Parse a time string in the display format, e.g. `02:30 PM`
pub fn parse_display_time(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), TIME_DISPLAY_FORMAT).ok()
}

// =============================================================================
// Appointment Record (wire payload)
// =============================================================================

/// The appointment document written to the remote store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentRecord {
    pub service_type: String,
    pub center: String,
    pub date: String,
    pub time: String,
    pub description: String,
    pub photo_ref: Option<String>,
    pub user_id: String,
}

// =============================================================================
// Submission Outcome
// =============================================================================

/// State of the in-flight or completed create request.
///
/// Exactly one variant holds at any instant. Transitions run
/// Idle → Pending → Success/Failure → Idle; nothing else is reachable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Idle,
    Pending,
    /// Remote create succeeded; carries the new document id
    Success(String),
    /// Remote create failed; carries the message shown to the user
    Failure(String),
}

impl SubmissionOutcome {
    pub fn is_pending(&self) -> bool {
        matches!(self, SubmissionOutcome::Pending)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SubmissionOutcome::Success(_) | SubmissionOutcome::Failure(_)
        )
    }
}

// =============================================================================
// User Identity (external, read-only)
// =============================================================================

/// Account details supplied by the authentication collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDetails {
    pub user_id: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub is_email_verified: bool,
    pub phone_number: Option<String>,
    pub photo_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn draft_with(date: &str, time: &str) -> AppointmentDraft {
        AppointmentDraft {
            service: "Car Wash".to_string(),
            center: "CarCare Center - Middlesbrough".to_string(),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").ok(),
            time: parse_display_time(time),
            description: String::new(),
            photo: None,
        }
    }

    #[test]
    fn test_formatted_date_and_time() {
        let draft = draft_with("2025-03-10", "02:30 PM");
        assert_eq!(draft.formatted_date(), "10 March 2025");
        assert_eq!(draft.formatted_time(), "02:30 PM");
    }

    #[test]
    fn test_placeholders_when_unset() {
        let draft = AppointmentDraft::default();
        assert_eq!(draft.formatted_date(), NO_DATE_SELECTED);
        assert_eq!(draft.formatted_time(), NO_TIME_SELECTED);
    }

    #[test]
    fn test_parse_display_time() {
        assert_eq!(
            parse_display_time("02:30 PM"),
            NaiveTime::from_hms_opt(14, 30, 0)
        );
        assert_eq!(
            parse_display_time("12:05 AM"),
            NaiveTime::from_hms_opt(0, 5, 0)
        );
        assert_eq!(parse_display_time("half past two"), None);
    }

    #[test]
    fn test_to_record_requires_date() {
        let mut draft = draft_with("2025-03-10", "02:30 PM");
        let record = draft.to_record("user-1").unwrap();
        assert_eq!(record.service_type, "Car Wash");
        assert_eq!(record.date, "10 March 2025");
        assert_eq!(record.time, "02:30 PM");
        assert_eq!(record.user_id, "user-1");
        assert_eq!(record.photo_ref, None);

        draft.date = None;
        assert!(draft.to_record("user-1").is_none());
    }

    #[test]
    fn test_photo_ref_reference() {
        let camera = PhotoRef::Camera(PathBuf::from("/tmp/carcare_1.jpg"));
        assert_eq!(camera.reference(), "/tmp/carcare_1.jpg");
        let gallery = PhotoRef::Gallery("content://media/external/images/42".to_string());
        assert_eq!(gallery.reference(), "content://media/external/images/42");
    }

    #[test]
    fn test_record_wire_field_names() {
        let record = draft_with("2025-03-10", "02:30 PM")
            .to_record("user-1")
            .unwrap();
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("serviceType").is_some());
        assert!(json.get("photoRef").is_some());
        assert!(json.get("userId").is_some());
    }
}
