//! Repository for the `instructors` table.

use sqlx::PgPool;
use pasos_core::types::DbId;

use crate::models::instructor::{CreateInstructor, Instructor};

const COLUMNS: &str = "id, name, slug, bio, specialties, photo_url, display_order";

pub struct InstructorRepo;

impl InstructorRepo {
    /// Insert an instructor (seeding and tests).
    pub async fn create(pool: &PgPool, input: &CreateInstructor) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO instructors (name, slug, bio, specialties, display_order) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id",
        )
        .bind(&input.name)
        .bind(&input.slug)
        .bind(&input.bio)
        .bind(&input.specialties)
        .bind(input.display_order)
        .fetch_one(pool)
        .await
    }

    /// Active instructors in display order.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<Instructor>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM instructors \
             WHERE is_active = true \
             ORDER BY display_order ASC, name ASC"
        );
        sqlx::query_as::<_, Instructor>(&query).fetch_all(pool).await
    }
}
