//! Aggregate counts for the metrics endpoint, home page and digests.

use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, Default, FromRow, Serialize)]
pub struct BookingCounts {
    pub total: i64,
    pub pending: i64,
}

#[derive(Debug, Clone, Copy, Default, FromRow, Serialize)]
pub struct TestimonialCounts {
    pub pending: i64,
    pub approved: i64,
    pub rejected: i64,
}

#[derive(Debug, Clone, Copy, Default, FromRow, Serialize)]
pub struct MediaCounts {
    pub total: i64,
    pub instagram: i64,
    pub upload: i64,
}

/// Approved-testimonial rating summary shown on the home page.
#[derive(Debug, Clone, Copy, Default, FromRow, Serialize)]
pub struct RatingSummary {
    pub count: i64,
    pub average_rating: Option<f64>,
}
