//! Studio event model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use pasos_core::types::{DbId, Timestamp};

/// A row from the `events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Event {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub location: Option<String>,
    pub starts_at: Timestamp,
    pub ends_at: Option<Timestamp>,
    pub price_cents: Option<i32>,
    pub ticket_url: Option<String>,
}

/// DTO used by seeding and tests.
#[derive(Debug, Clone)]
pub struct CreateEvent {
    pub title: String,
    pub slug: String,
    pub description: String,
    pub location: Option<String>,
    pub starts_at: Timestamp,
    pub ends_at: Option<Timestamp>,
    pub price_cents: Option<i32>,
    pub is_published: bool,
}

/// `GET /events/` query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct EventListParams {
    #[serde(default)]
    pub include_past: bool,
}
