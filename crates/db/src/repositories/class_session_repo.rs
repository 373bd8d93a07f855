//! Repository for the `class_sessions` table.

use sqlx::PgPool;
use pasos_core::types::DbId;

use crate::models::class_session::{ClassSession, CreateClassSession};

pub struct ClassSessionRepo;

impl ClassSessionRepo {
    /// Insert a session (seeding and tests).
    pub async fn create(pool: &PgPool, input: &CreateClassSession) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO class_sessions \
                (title, style, level, instructor_id, day_of_week, start_time, \
                 duration_minutes, room) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING id",
        )
        .bind(&input.title)
        .bind(&input.style)
        .bind(&input.level)
        .bind(input.instructor_id)
        .bind(input.day_of_week)
        .bind(input.start_time)
        .bind(input.duration_minutes)
        .bind(&input.room)
        .fetch_one(pool)
        .await
    }

    /// Active sessions with instructor names, ordered by weekday then time.
    ///
    /// Sessions whose instructor is inactive keep their slot but lose the name.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<ClassSession>, sqlx::Error> {
        sqlx::query_as::<_, ClassSession>(
            "SELECT s.id, s.title, s.style, s.level, s.instructor_id, \
                    i.name AS instructor_name, s.day_of_week, s.start_time, \
                    s.duration_minutes, s.room \
             FROM class_sessions s \
             LEFT JOIN instructors i ON i.id = s.instructor_id AND i.is_active = true \
             WHERE s.is_active = true \
             ORDER BY s.day_of_week ASC, s.start_time ASC, s.id ASC",
        )
        .fetch_all(pool)
        .await
    }
}
