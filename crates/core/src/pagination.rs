//! Pagination defaults and clamping helpers shared by list endpoints.

/// Default page size for the public gallery.
pub const DEFAULT_GALLERY_LIMIT: i64 = 24;

/// Default page size for testimonial and admin listings.
pub const DEFAULT_LIST_LIMIT: i64 = 20;

/// Upper bound for any user-supplied `limit`.
pub const MAX_LIST_LIMIT: i64 = 100;

/// Clamp a user-provided limit to `[1, max]`, falling back to `default`.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_defaults_when_absent() {
        assert_eq!(clamp_limit(None, DEFAULT_GALLERY_LIMIT, MAX_LIST_LIMIT), 24);
    }

    #[test]
    fn limit_is_clamped_to_range() {
        assert_eq!(clamp_limit(Some(0), 20, 100), 1);
        assert_eq!(clamp_limit(Some(-5), 20, 100), 1);
        assert_eq!(clamp_limit(Some(500), 20, 100), 100);
        assert_eq!(clamp_limit(Some(42), 20, 100), 42);
    }

    #[test]
    fn negative_offset_becomes_zero() {
        assert_eq!(clamp_offset(Some(-3)), 0);
        assert_eq!(clamp_offset(None), 0);
        assert_eq!(clamp_offset(Some(48)), 48);
    }
}
