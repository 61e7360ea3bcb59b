//! Input validation module

use crate::models::{AppointmentDraft, BookingOptions};
use thiserror::Error;

/// Free-text description cap; matches the remote store's field limit
pub const MAX_DESCRIPTION_LEN: usize = 1000;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("A service date must be selected")]
    DateMissing,

    #[error("Field '{field}' is too long (max {max} characters)")]
    TooLong { field: String, max: usize },

    #[error("'{value}' is not an offered {field}")]
    UnknownOption { field: String, value: String },
}

/// Gate a draft for submission: only the date is mandatory.
///
/// The screen disables the submit affordance while the date is unset, so for
/// UI callers this never fires. Submission stays reachable no matter what the
/// other fields hold.
pub fn validate_draft(draft: &AppointmentDraft) -> Result<(), ValidationError> {
    if draft.date.is_none() {
        return Err(ValidationError::DateMissing);
    }
    Ok(())
}

/// Check the free-text description against the store's field limit.
///
/// Not enforced at submit time; input forms use it to push back before the
/// text lands in the draft.
pub fn validate_description(text: &str) -> Result<(), ValidationError> {
    if text.len() > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: MAX_DESCRIPTION_LEN,
        });
    }
    Ok(())
}

/// Check that a selection is a member of the offered option list
pub fn validate_option(
    field: &str,
    value: &str,
    offered: &[String],
) -> Result<(), ValidationError> {
    if offered.iter().any(|o| o == value) {
        Ok(())
    } else {
        Err(ValidationError::UnknownOption {
            field: field.to_string(),
            value: value.to_string(),
        })
    }
}

/// Validate both dropdown selections against the screen's option lists
pub fn validate_selections(
    draft: &AppointmentDraft,
    options: &BookingOptions,
) -> Result<(), ValidationError> {
    validate_option("service", &draft.service, &options.services)?;
    validate_option("center", &draft.center, &options.centers)?;
    Ok(())
}
