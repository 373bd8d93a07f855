//! Repository for the `media_items` table (gallery).

use sqlx::{FromRow, PgPool, Row};
use pasos_core::instagram::GalleryItem;
use pasos_core::media::SOURCE_INSTAGRAM;
use pasos_core::types::Timestamp;

use crate::models::media_item::{CreateMediaItem, MediaItem};
use crate::models::stats::MediaCounts;

/// Column list for `media_items` queries.
const COLUMNS: &str = "\
    id, title, caption, media_type, media_url, thumbnail_url, permalink, \
    source, category, instagram_id, is_featured, is_published, display_order, \
    posted_at, created_at, updated_at";

/// Outcome of an Instagram upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Updated,
}

/// Provides gallery queries and Instagram ingestion.
pub struct MediaItemRepo;

impl MediaItemRepo {
    /// Insert a staff-uploaded item.
    pub async fn create_upload(
        pool: &PgPool,
        input: &CreateMediaItem,
    ) -> Result<MediaItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO media_items \
                (title, caption, media_type, media_url, thumbnail_url, source, \
                 category, is_featured, display_order, posted_at) \
             VALUES ($1, $2, $3, $4, $5, 'upload', $6, $7, $8, NOW()) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MediaItem>(&query)
            .bind(&input.title)
            .bind(&input.caption)
            .bind(&input.media_type)
            .bind(&input.media_url)
            .bind(&input.thumbnail_url)
            .bind(&input.category)
            .bind(input.is_featured.unwrap_or(false))
            .bind(input.display_order.unwrap_or(0))
            .fetch_one(pool)
            .await
    }

    /// Insert or refresh an item keyed by its Instagram media id.
    ///
    /// URLs, caption and type are refreshed on conflict (Instagram CDN URLs
    /// expire). Staff curation (`category`, `is_featured`, `is_published`,
    /// `display_order`, `title`) is left untouched on update.
    pub async fn upsert_instagram(
        pool: &PgPool,
        item: &GalleryItem,
    ) -> Result<(MediaItem, UpsertOutcome), sqlx::Error> {
        // `xmax = 0` is true only for freshly inserted tuples.
        let query = format!(
            "INSERT INTO media_items \
                (title, caption, media_type, media_url, thumbnail_url, permalink, \
                 source, category, instagram_id, posted_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             ON CONFLICT ON CONSTRAINT uq_media_items_instagram_id DO UPDATE SET \
                caption = EXCLUDED.caption, \
                media_type = EXCLUDED.media_type, \
                media_url = EXCLUDED.media_url, \
                thumbnail_url = EXCLUDED.thumbnail_url, \
                permalink = EXCLUDED.permalink, \
                posted_at = COALESCE(EXCLUDED.posted_at, media_items.posted_at) \
             RETURNING {COLUMNS}, (xmax = 0) AS inserted"
        );
        let row = sqlx::query(&query)
            .bind(&item.title)
            .bind(&item.caption)
            .bind(item.media_type)
            .bind(&item.media_url)
            .bind(&item.thumbnail_url)
            .bind(&item.permalink)
            .bind(SOURCE_INSTAGRAM)
            .bind(item.category)
            .bind(&item.instagram_id)
            .bind(item.posted_at)
            .fetch_one(pool)
            .await?;

        let outcome = if row.try_get::<bool, _>("inserted")? {
            UpsertOutcome::Inserted
        } else {
            UpsertOutcome::Updated
        };
        Ok((MediaItem::from_row(&row)?, outcome))
    }

    /// Find an item by its Instagram media id.
    pub async fn find_by_instagram_id(
        pool: &PgPool,
        instagram_id: &str,
    ) -> Result<Option<MediaItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM media_items WHERE instagram_id = $1");
        sqlx::query_as::<_, MediaItem>(&query)
            .bind(instagram_id)
            .fetch_optional(pool)
            .await
    }

    /// Published gallery items with optional filters.
    ///
    /// Ordered by `display_order`, then most recently posted.
    pub async fn list_published(
        pool: &PgPool,
        category: Option<&str>,
        source: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<MediaItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM media_items \
             WHERE is_published = true \
               AND ($1::TEXT IS NULL OR category = $1) \
               AND ($2::TEXT IS NULL OR source = $2) \
             ORDER BY display_order ASC, COALESCE(posted_at, created_at) DESC, id DESC \
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, MediaItem>(&query)
            .bind(category)
            .bind(source)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Featured published items for the home page.
    pub async fn list_featured(pool: &PgPool, limit: i64) -> Result<Vec<MediaItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM media_items \
             WHERE is_published = true AND is_featured = true \
             ORDER BY display_order ASC, COALESCE(posted_at, created_at) DESC \
             LIMIT $1"
        );
        sqlx::query_as::<_, MediaItem>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// New items per source created in `[since, until)`: `(instagram, upload)`.
    pub async fn count_created_between(
        pool: &PgPool,
        since: Timestamp,
        until: Timestamp,
    ) -> Result<(i64, i64), sqlx::Error> {
        sqlx::query_as::<_, (i64, i64)>(
            "SELECT \
                COUNT(*) FILTER (WHERE source = 'instagram'), \
                COUNT(*) FILTER (WHERE source = 'upload') \
             FROM media_items \
             WHERE created_at >= $1 AND created_at < $2",
        )
        .bind(since)
        .bind(until)
        .fetch_one(pool)
        .await
    }

    /// Total and per-source counts.
    pub async fn counts(pool: &PgPool) -> Result<MediaCounts, sqlx::Error> {
        sqlx::query_as::<_, MediaCounts>(
            "SELECT COUNT(*) AS total, \
                    COUNT(*) FILTER (WHERE source = 'instagram') AS instagram, \
                    COUNT(*) FILTER (WHERE source = 'upload') AS upload \
             FROM media_items",
        )
        .fetch_one(pool)
        .await
    }
}
