//! Booking request validation and status lifecycle.

use serde::Deserialize;

use crate::error::CoreError;
use crate::types::Date;
use crate::validation::{
    non_blank, parse_future_date, require_length, validate_class_type, validate_email,
    validate_phone, MAX_MESSAGE_LENGTH, MAX_NAME_LENGTH,
};

// ---------------------------------------------------------------------------
// Status constants
// ---------------------------------------------------------------------------

/// Initial status for a new booking request.
pub const STATUS_PENDING: &str = "pending";
/// Studio confirmed the slot with the student.
pub const STATUS_CONFIRMED: &str = "confirmed";
/// Cancelled by either side. Terminal.
pub const STATUS_CANCELLED: &str = "cancelled";

/// All valid booking statuses.
pub const VALID_STATUSES: &[&str] = &[STATUS_PENDING, STATUS_CONFIRMED, STATUS_CANCELLED];

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Raw booking form as posted by the site.
#[derive(Debug, Default, Deserialize)]
pub struct BookingForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub phone: Option<String>,
    #[serde(default)]
    pub class_type: String,
    /// `YYYY-MM-DD`.
    pub preferred_date: Option<String>,
    pub message: Option<String>,
    /// Honeypot field.
    pub website: Option<String>,
}

/// A validated booking ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub class_type: String,
    pub preferred_date: Option<Date>,
    pub message: Option<String>,
}

impl BookingForm {
    /// `true` when the honeypot field was filled in.
    pub fn is_spam(&self) -> bool {
        non_blank(self.website.as_deref()).is_some()
    }

    /// Validate the form relative to `today` (preferred dates may not be past).
    pub fn validate(&self, today: Date) -> Result<NewBooking, CoreError> {
        let name = require_length("name", &self.name, 1, MAX_NAME_LENGTH)?;

        let email = self.email.trim();
        validate_email("email", email)?;

        let phone = non_blank(self.phone.as_deref());
        if let Some(phone) = phone {
            validate_phone(phone)?;
        }

        let class_type = self.class_type.trim().to_lowercase();
        if class_type.is_empty() {
            return Err(CoreError::Validation("class_type is required".into()));
        }
        validate_class_type(&class_type)?;

        let preferred_date = non_blank(self.preferred_date.as_deref())
            .map(|d| parse_future_date("preferred_date", d, today))
            .transpose()?;

        let message = non_blank(self.message.as_deref());
        if let Some(message) = message {
            require_length("message", message, 0, MAX_MESSAGE_LENGTH)?;
        }

        Ok(NewBooking {
            name: name.to_string(),
            email: email.to_lowercase(),
            phone: phone.map(str::to_string),
            class_type,
            preferred_date,
            message: message.map(str::to_string),
        })
    }
}

// ---------------------------------------------------------------------------
// Status rules
// ---------------------------------------------------------------------------

/// Validate that a status string is one of the known statuses.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid booking status '{status}'. Must be one of: {VALID_STATUSES:?}"
        )))
    }
}

/// Returns the statuses that `from_status` may move to.
///
/// - `pending`   -> `confirmed`, `cancelled`
/// - `confirmed` -> `cancelled`
/// - `cancelled` -> (none)
pub fn valid_transitions(from_status: &str) -> &'static [&'static str] {
    match from_status {
        STATUS_PENDING => &[STATUS_CONFIRMED, STATUS_CANCELLED],
        STATUS_CONFIRMED => &[STATUS_CANCELLED],
        _ => &[],
    }
}

/// Validate a status change from `current` to `next`.
pub fn validate_transition(current: &str, next: &str) -> Result<(), CoreError> {
    let allowed = valid_transitions(current);
    if allowed.contains(&next) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Cannot transition booking from '{current}' to '{next}'. Allowed transitions: {allowed:?}"
        )))
    }
}
