//! Repository for the `events` table.

use sqlx::PgPool;
use pasos_core::types::{DbId, Timestamp};

use crate::models::event::{CreateEvent, Event};

/// Column list for public `events` queries.
const COLUMNS: &str =
    "id, title, slug, description, location, starts_at, ends_at, price_cents, ticket_url";

/// Provides read queries for studio events.
pub struct EventRepo;

impl EventRepo {
    /// Insert an event (seeding and tests).
    pub async fn create(pool: &PgPool, input: &CreateEvent) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO events \
                (title, slug, description, location, starts_at, ends_at, price_cents, is_published) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING id",
        )
        .bind(&input.title)
        .bind(&input.slug)
        .bind(&input.description)
        .bind(&input.location)
        .bind(input.starts_at)
        .bind(input.ends_at)
        .bind(input.price_cents)
        .bind(input.is_published)
        .fetch_one(pool)
        .await
    }

    /// Published events starting at or after `from`, soonest first.
    ///
    /// Pass `None` to include past events as well.
    pub async fn list_published(
        pool: &PgPool,
        from: Option<Timestamp>,
        limit: i64,
    ) -> Result<Vec<Event>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM events \
             WHERE is_published = true \
               AND ($1::TIMESTAMPTZ IS NULL OR starts_at >= $1) \
             ORDER BY starts_at ASC \
             LIMIT $2"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(from)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Find a published event by slug.
    pub async fn find_published_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<Event>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM events WHERE slug = $1 AND is_published = true");
        sqlx::query_as::<_, Event>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }
}
