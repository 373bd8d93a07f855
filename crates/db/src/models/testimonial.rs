//! Testimonial entity models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use pasos_core::types::{DbId, Timestamp};

/// A row from the `testimonials` table (staff view, includes contact email).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Testimonial {
    pub id: DbId,
    pub student_name: String,
    pub email: Option<String>,
    pub rating: i16,
    pub class_type: Option<String>,
    pub content: String,
    pub status: String,
    pub is_featured: bool,
    pub reviewed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Public projection of an approved testimonial.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PublicTestimonial {
    pub id: DbId,
    pub student_name: String,
    pub rating: i16,
    pub class_type: Option<String>,
    pub content: String,
    pub is_featured: bool,
    pub created_at: Timestamp,
}

/// Query parameters for the staff testimonial list.
#[derive(Debug, Deserialize)]
pub struct TestimonialListParams {
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// DTO for toggling the featured flag.
#[derive(Debug, Deserialize)]
pub struct UpdateFeatured {
    pub is_featured: bool,
}
