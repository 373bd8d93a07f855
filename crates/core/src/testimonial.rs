//! Testimonial submission validation and moderation rules.
//!
//! Public submissions arrive as a [`TestimonialForm`], are validated into a
//! [`NewTestimonial`], and start out `pending`. Staff then approve or reject
//! them; only approved testimonials are shown on the site.

use serde::Deserialize;

use crate::error::CoreError;
use crate::validation::{
    non_blank, require_length, validate_class_type, validate_email, MAX_NAME_LENGTH,
};

// ---------------------------------------------------------------------------
// Status constants
// ---------------------------------------------------------------------------

/// Initial status for a newly submitted testimonial.
pub const STATUS_PENDING: &str = "pending";
/// Visible on the public site.
pub const STATUS_APPROVED: &str = "approved";
/// Hidden; kept for the record.
pub const STATUS_REJECTED: &str = "rejected";

/// All valid testimonial statuses.
pub const VALID_STATUSES: &[&str] = &[STATUS_PENDING, STATUS_APPROVED, STATUS_REJECTED];

// ---------------------------------------------------------------------------
// Validation constants
// ---------------------------------------------------------------------------

pub const MIN_RATING: i16 = 1;
pub const MAX_RATING: i16 = 5;

pub const MIN_CONTENT_LENGTH: usize = 10;
pub const MAX_CONTENT_LENGTH: usize = 2000;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Raw testimonial form as posted by the site (JSON or urlencoded).
#[derive(Debug, Default, Deserialize)]
pub struct TestimonialForm {
    #[serde(default)]
    pub student_name: String,
    pub email: Option<String>,
    pub rating: Option<i16>,
    pub class_type: Option<String>,
    #[serde(default)]
    pub content: String,
    /// Honeypot field, hidden from humans. Bots fill it in.
    pub website: Option<String>,
}

/// A validated, normalised testimonial ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTestimonial {
    pub student_name: String,
    pub email: Option<String>,
    pub rating: i16,
    pub class_type: Option<String>,
    pub content: String,
}

impl TestimonialForm {
    /// `true` when the honeypot field was filled in.
    pub fn is_spam(&self) -> bool {
        non_blank(self.website.as_deref()).is_some()
    }

    /// Validate every field and produce the normalised record.
    pub fn validate(&self) -> Result<NewTestimonial, CoreError> {
        let student_name = require_length("student_name", &self.student_name, 1, MAX_NAME_LENGTH)?;

        let email = non_blank(self.email.as_deref());
        if let Some(email) = email {
            validate_email("email", email)?;
        }

        let rating = self
            .rating
            .ok_or_else(|| CoreError::Validation("rating is required".into()))?;
        validate_rating(rating)?;

        let class_type = non_blank(self.class_type.as_deref()).map(str::to_lowercase);
        if let Some(ref ct) = class_type {
            validate_class_type(ct)?;
        }

        let content = require_length(
            "content",
            &self.content,
            MIN_CONTENT_LENGTH,
            MAX_CONTENT_LENGTH,
        )?;

        Ok(NewTestimonial {
            student_name: student_name.to_string(),
            email: email.map(str::to_lowercase),
            rating,
            class_type,
            content: content.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// Validate that a rating is within `[MIN_RATING, MAX_RATING]`.
pub fn validate_rating(rating: i16) -> Result<(), CoreError> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "rating must be between {MIN_RATING} and {MAX_RATING} (got {rating})"
        )))
    }
}

/// Validate that a status string is one of the known statuses.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid testimonial status '{status}'. Must be one of: {VALID_STATUSES:?}"
        )))
    }
}

/// Returns the statuses that `from_status` may move to.
///
/// - `pending`  -> `approved`, `rejected`
/// - `approved` -> `rejected` (unpublish)
/// - `rejected` -> `approved` (reconsider)
pub fn valid_transitions(from_status: &str) -> &'static [&'static str] {
    match from_status {
        STATUS_PENDING => &[STATUS_APPROVED, STATUS_REJECTED],
        STATUS_APPROVED => &[STATUS_REJECTED],
        STATUS_REJECTED => &[STATUS_APPROVED],
        _ => &[],
    }
}

/// Validate a moderation transition from `current` to `next`.
pub fn validate_transition(current: &str, next: &str) -> Result<(), CoreError> {
    if valid_transitions(current).contains(&next) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Cannot move testimonial from '{current}' to '{next}'"
        )))
    }
}

/// Only approved testimonials may be featured on the home page.
pub fn validate_featurable(status: &str, is_featured: bool) -> Result<(), CoreError> {
    if is_featured && status != STATUS_APPROVED {
        return Err(CoreError::Validation(
            "Only approved testimonials can be featured".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn form() -> TestimonialForm {
        TestimonialForm {
            student_name: "  Maria Lopez ".into(),
            email: Some("Maria@Example.com".into()),
            rating: Some(5),
            class_type: Some("Bachata".into()),
            content: "Best bachata classes in town, the instructors are amazing!".into(),
            website: None,
        }
    }

    #[test]
    fn valid_form_is_normalised() {
        let t = form().validate().unwrap();
        assert_eq!(t.student_name, "Maria Lopez");
        assert_eq!(t.email.as_deref(), Some("maria@example.com"));
        assert_eq!(t.class_type.as_deref(), Some("bachata"));
        assert_eq!(t.rating, 5);
    }

    #[test]
    fn optional_fields_may_be_blank() {
        let t = TestimonialForm {
            email: Some("   ".into()),
            class_type: Some(String::new()),
            ..form()
        }
        .validate()
        .unwrap();
        assert_eq!(t.email, None);
        assert_eq!(t.class_type, None);
    }

    #[test]
    fn rating_is_required_and_bounded() {
        assert_matches!(
            TestimonialForm { rating: None, ..form() }.validate(),
            Err(CoreError::Validation(_))
        );
        assert!(TestimonialForm { rating: Some(0), ..form() }.validate().is_err());
        assert!(TestimonialForm { rating: Some(6), ..form() }.validate().is_err());
        assert!(TestimonialForm { rating: Some(1), ..form() }.validate().is_ok());
    }

    #[test]
    fn content_too_short_is_rejected() {
        let err = TestimonialForm { content: "Great!".into(), ..form() }
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("content"));
    }

    #[test]
    fn unknown_class_type_is_rejected() {
        assert!(TestimonialForm { class_type: Some("tango".into()), ..form() }
            .validate()
            .is_err());
    }

    #[test]
    fn honeypot_marks_spam() {
        assert!(!form().is_spam());
        assert!(TestimonialForm { website: Some("http://spam".into()), ..form() }.is_spam());
        assert!(!TestimonialForm { website: Some(" ".into()), ..form() }.is_spam());
    }

    #[test]
    fn moderation_transitions() {
        assert!(validate_transition(STATUS_PENDING, STATUS_APPROVED).is_ok());
        assert!(validate_transition(STATUS_PENDING, STATUS_REJECTED).is_ok());
        assert!(validate_transition(STATUS_APPROVED, STATUS_REJECTED).is_ok());
        assert!(validate_transition(STATUS_REJECTED, STATUS_APPROVED).is_ok());
        assert!(validate_transition(STATUS_APPROVED, STATUS_APPROVED).is_err());
        assert!(validate_transition(STATUS_APPROVED, STATUS_PENDING).is_err());
    }

    #[test]
    fn only_approved_can_be_featured() {
        assert!(validate_featurable(STATUS_APPROVED, true).is_ok());
        assert!(validate_featurable(STATUS_PENDING, true).is_err());
        assert!(validate_featurable(STATUS_PENDING, false).is_ok());
    }

    #[test]
    fn statuses() {
        for s in VALID_STATUSES {
            assert!(validate_status(s).is_ok());
        }
        assert!(validate_status("archived").is_err());
    }
}
