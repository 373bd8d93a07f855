//! Instructor profile model.

use serde::Serialize;
use sqlx::FromRow;
use pasos_core::types::DbId;

/// A row from the `instructors` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Instructor {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub bio: String,
    pub specialties: Vec<String>,
    pub photo_url: Option<String>,
    pub display_order: i32,
}

/// DTO used by seeding and tests.
#[derive(Debug, Clone)]
pub struct CreateInstructor {
    pub name: String,
    pub slug: String,
    pub bio: String,
    pub specialties: Vec<String>,
    pub display_order: i32,
}
