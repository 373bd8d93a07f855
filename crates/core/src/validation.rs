//! Field validation helpers for public form submissions.
//!
//! Each helper returns [`CoreError::Validation`] with a message naming the
//! offending field so the API can surface it verbatim.

use chrono::NaiveDate;

use crate::error::CoreError;
use crate::types::Date;

/// Maximum length of a person's name.
pub const MAX_NAME_LENGTH: usize = 100;

/// Maximum length of an email address (RFC 5321 path limit).
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Maximum length of a free-text message.
pub const MAX_MESSAGE_LENGTH: usize = 2000;

/// Phone numbers: digit count bounds (formatting characters excluded).
pub const MIN_PHONE_DIGITS: usize = 7;
pub const MAX_PHONE_LENGTH: usize = 20;

/// Class types offered by the studio, shared by bookings and testimonials.
pub const CLASS_TYPES: &[&str] = &[
    "salsa", "bachata", "kizomba", "zouk", "private", "wedding", "other",
];

/// Trim `value` and check its length is within `[min, max]` characters.
///
/// Returns the trimmed slice on success.
pub fn require_length<'a>(
    field: &str,
    value: &'a str,
    min: usize,
    max: usize,
) -> Result<&'a str, CoreError> {
    let trimmed = value.trim();
    let len = trimmed.chars().count();
    if len < min {
        return Err(CoreError::Validation(if min <= 1 {
            format!("{field} is required")
        } else {
            format!("{field} must be at least {min} characters")
        }));
    }
    if len > max {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {max} characters (got {len})"
        )));
    }
    Ok(trimmed)
}

/// Light-weight email syntax check: one `@`, non-empty local part, a dotted
/// domain without spaces.
pub fn validate_email(field: &str, email: &str) -> Result<(), CoreError> {
    let email = email.trim();
    let invalid = || CoreError::Validation(format!("{field} must be a valid email address"));

    if email.is_empty() || email.len() > MAX_EMAIL_LENGTH || email.contains(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        return Err(invalid());
    }
    Ok(())
}

/// Accepts digits, spaces and `+-()`, with at least [`MIN_PHONE_DIGITS`] digits.
pub fn validate_phone(phone: &str) -> Result<(), CoreError> {
    let phone = phone.trim();
    let allowed = |c: char| c.is_ascii_digit() || " +-()".contains(c);
    let digits = phone.chars().filter(char::is_ascii_digit).count();

    if phone.len() > MAX_PHONE_LENGTH || !phone.chars().all(allowed) || digits < MIN_PHONE_DIGITS {
        return Err(CoreError::Validation(
            "phone must be a valid phone number".into(),
        ));
    }
    Ok(())
}

/// Check that `class_type` is one of [`CLASS_TYPES`].
pub fn validate_class_type(class_type: &str) -> Result<(), CoreError> {
    if CLASS_TYPES.contains(&class_type) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid class_type '{class_type}'. Must be one of: {CLASS_TYPES:?}"
        )))
    }
}

/// Parse a `YYYY-MM-DD` date that must not lie before `today`.
pub fn parse_future_date(field: &str, value: &str, today: Date) -> Result<Date, CoreError> {
    let date = NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| CoreError::Validation(format!("{field} must be a date in YYYY-MM-DD format")))?;
    if date < today {
        return Err(CoreError::Validation(format!("{field} cannot be in the past")));
    }
    Ok(date)
}

/// Treat empty / whitespace-only optional form fields as absent.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
