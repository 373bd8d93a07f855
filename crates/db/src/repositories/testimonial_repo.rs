//! Repository for the `testimonials` table.

use sqlx::PgPool;
use pasos_core::testimonial::{NewTestimonial, STATUS_APPROVED, STATUS_PENDING};
use pasos_core::types::{DbId, Timestamp};

use crate::models::stats::{RatingSummary, TestimonialCounts};
use crate::models::testimonial::{PublicTestimonial, Testimonial};

/// Column list for `testimonials` queries.
const COLUMNS: &str = "\
    id, student_name, email, rating, class_type, content, status, \
    is_featured, reviewed_at, created_at, updated_at";

/// Columns exposed publicly.
const PUBLIC_COLUMNS: &str =
    "id, student_name, rating, class_type, content, is_featured, created_at";

/// Provides CRUD and moderation queries for testimonials.
pub struct TestimonialRepo;

impl TestimonialRepo {
    /// Insert a new `pending` testimonial, returning the full row.
    pub async fn create(pool: &PgPool, input: &NewTestimonial) -> Result<Testimonial, sqlx::Error> {
        let query = format!(
            "INSERT INTO testimonials \
                (student_name, email, rating, class_type, content, status) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Testimonial>(&query)
            .bind(&input.student_name)
            .bind(&input.email)
            .bind(input.rating)
            .bind(&input.class_type)
            .bind(&input.content)
            .bind(STATUS_PENDING)
            .fetch_one(pool)
            .await
    }

    /// Find a testimonial by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Testimonial>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM testimonials WHERE id = $1");
        sqlx::query_as::<_, Testimonial>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List testimonials for staff, optionally filtered by status, newest first.
    pub async fn list_filtered(
        pool: &PgPool,
        status: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Testimonial>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM testimonials \
             WHERE ($1::TEXT IS NULL OR status = $1) \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Testimonial>(&query)
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Approved testimonials for the public site, newest first.
    pub async fn list_approved(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PublicTestimonial>, sqlx::Error> {
        let query = format!(
            "SELECT {PUBLIC_COLUMNS} FROM testimonials \
             WHERE status = $1 \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, PublicTestimonial>(&query)
            .bind(STATUS_APPROVED)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Featured approved testimonials for the home page.
    pub async fn list_featured(pool: &PgPool, limit: i64) -> Result<Vec<PublicTestimonial>, sqlx::Error> {
        let query = format!(
            "SELECT {PUBLIC_COLUMNS} FROM testimonials \
             WHERE status = $1 AND is_featured = true \
             ORDER BY created_at DESC \
             LIMIT $2"
        );
        sqlx::query_as::<_, PublicTestimonial>(&query)
            .bind(STATUS_APPROVED)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Move a testimonial to `status` and stamp `reviewed_at`.
    ///
    /// Leaving `approved` also clears the featured flag. With `expected`, the
    /// row is only updated while it is still in that status. Returns `None`
    /// if no row matched.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
        expected: Option<&str>,
    ) -> Result<Option<Testimonial>, sqlx::Error> {
        let query = format!(
            "UPDATE testimonials \
             SET status = $2, reviewed_at = NOW(), \
                 is_featured = CASE WHEN $2 = '{STATUS_APPROVED}' THEN is_featured ELSE false END \
             WHERE id = $1 AND ($3::TEXT IS NULL OR status = $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Testimonial>(&query)
            .bind(id)
            .bind(status)
            .bind(expected)
            .fetch_optional(pool)
            .await
    }

    /// Set the featured flag.
    pub async fn set_featured(
        pool: &PgPool,
        id: DbId,
        is_featured: bool,
    ) -> Result<Option<Testimonial>, sqlx::Error> {
        let query = format!(
            "UPDATE testimonials SET is_featured = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Testimonial>(&query)
            .bind(id)
            .bind(is_featured)
            .fetch_optional(pool)
            .await
    }

    /// Testimonials created in `[since, until)`, oldest first.
    pub async fn list_created_between(
        pool: &PgPool,
        since: Timestamp,
        until: Timestamp,
    ) -> Result<Vec<Testimonial>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM testimonials \
             WHERE created_at >= $1 AND created_at < $2 \
             ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, Testimonial>(&query)
            .bind(since)
            .bind(until)
            .fetch_all(pool)
            .await
    }

    /// Per-status counts.
    pub async fn counts(pool: &PgPool) -> Result<TestimonialCounts, sqlx::Error> {
        sqlx::query_as::<_, TestimonialCounts>(
            "SELECT \
                COUNT(*) FILTER (WHERE status = 'pending') AS pending, \
                COUNT(*) FILTER (WHERE status = 'approved') AS approved, \
                COUNT(*) FILTER (WHERE status = 'rejected') AS rejected \
             FROM testimonials",
        )
        .fetch_one(pool)
        .await
    }

    /// Count and average rating of approved testimonials.
    pub async fn rating_summary(pool: &PgPool) -> Result<RatingSummary, sqlx::Error> {
        sqlx::query_as::<_, RatingSummary>(
            "SELECT COUNT(*) AS count, AVG(rating)::FLOAT8 AS average_rating \
             FROM testimonials WHERE status = $1",
        )
        .bind(STATUS_APPROVED)
        .fetch_one(pool)
        .await
    }
}
