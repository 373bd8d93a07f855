//! Weekly class session model.

use chrono::NaiveTime;
use serde::Serialize;
use sqlx::FromRow;
use pasos_core::types::DbId;

/// A schedule row joined with its instructor's name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ClassSession {
    pub id: DbId,
    pub title: String,
    pub style: String,
    pub level: String,
    pub instructor_id: Option<DbId>,
    pub instructor_name: Option<String>,
    pub day_of_week: i16,
    pub start_time: NaiveTime,
    pub duration_minutes: i32,
    pub room: Option<String>,
}

/// DTO used by seeding and tests.
#[derive(Debug, Clone)]
pub struct CreateClassSession {
    pub title: String,
    pub style: String,
    pub level: String,
    pub instructor_id: Option<DbId>,
    pub day_of_week: i16,
    pub start_time: NaiveTime,
    pub duration_minutes: i32,
    pub room: Option<String>,
}
