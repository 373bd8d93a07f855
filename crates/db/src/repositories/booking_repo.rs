//! Repository for the `bookings` table.

use sqlx::PgPool;
use pasos_core::booking::{NewBooking, STATUS_PENDING};
use pasos_core::types::{DbId, Timestamp};

use crate::models::booking::Booking;
use crate::models::stats::BookingCounts;

/// Column list for `bookings` queries.
const COLUMNS: &str = "\
    id, name, email, phone, class_type, preferred_date, message, status, \
    created_at, updated_at";

/// Provides CRUD operations for bookings.
pub struct BookingRepo;

impl BookingRepo {
    /// Insert a new `pending` booking, returning the full row.
    pub async fn create(pool: &PgPool, input: &NewBooking) -> Result<Booking, sqlx::Error> {
        let query = format!(
            "INSERT INTO bookings \
                (name, email, phone, class_type, preferred_date, message, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.class_type)
            .bind(input.preferred_date)
            .bind(&input.message)
            .bind(STATUS_PENDING)
            .fetch_one(pool)
            .await
    }

    /// Find a booking by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bookings WHERE id = $1");
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List bookings, optionally filtered by status, newest first.
    pub async fn list_filtered(
        pool: &PgPool,
        status: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Booking>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM bookings \
             WHERE ($1::TEXT IS NULL OR status = $1) \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update a booking's status, optionally only while it is still in
    /// `expected`. Returns `None` if no row matched.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
        expected: Option<&str>,
    ) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!(
            "UPDATE bookings SET status = $2 \
             WHERE id = $1 AND ($3::TEXT IS NULL OR status = $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .bind(status)
            .bind(expected)
            .fetch_optional(pool)
            .await
    }

    /// Bookings created in `[since, until)`, oldest first.
    pub async fn list_created_between(
        pool: &PgPool,
        since: Timestamp,
        until: Timestamp,
    ) -> Result<Vec<Booking>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM bookings \
             WHERE created_at >= $1 AND created_at < $2 \
             ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(since)
            .bind(until)
            .fetch_all(pool)
            .await
    }

    /// Total and pending counts.
    pub async fn counts(pool: &PgPool) -> Result<BookingCounts, sqlx::Error> {
        sqlx::query_as::<_, BookingCounts>(
            "SELECT COUNT(*) AS total, \
                    COUNT(*) FILTER (WHERE status = 'pending') AS pending \
             FROM bookings",
        )
        .fetch_one(pool)
        .await
    }
}
