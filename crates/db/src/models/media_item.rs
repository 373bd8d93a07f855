//! Gallery media item models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use pasos_core::types::{DbId, Timestamp};

/// A row from the `media_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MediaItem {
    pub id: DbId,
    pub title: String,
    pub caption: Option<String>,
    pub media_type: String,
    pub media_url: String,
    pub thumbnail_url: Option<String>,
    pub permalink: Option<String>,
    pub source: String,
    pub category: String,
    pub instagram_id: Option<String>,
    pub is_featured: bool,
    pub is_published: bool,
    pub display_order: i32,
    pub posted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for a staff upload.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMediaItem {
    pub title: String,
    pub caption: Option<String>,
    pub media_type: String,
    pub media_url: String,
    pub thumbnail_url: Option<String>,
    pub category: String,
    pub is_featured: Option<bool>,
    pub display_order: Option<i32>,
}

/// Gallery filters (`?category=&source=&limit=&offset=`).
#[derive(Debug, Default, Deserialize)]
pub struct GalleryParams {
    pub category: Option<String>,
    pub source: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
