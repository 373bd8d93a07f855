//! Repository for the `pricing_packages` table.

use sqlx::PgPool;
use pasos_core::types::DbId;

use crate::models::pricing_package::{CreatePricingPackage, PricingPackage};

const COLUMNS: &str =
    "id, name, description, price_cents, class_count, validity_days, is_featured, display_order";

pub struct PricingPackageRepo;

impl PricingPackageRepo {
    /// Insert a package (seeding and tests).
    pub async fn create(pool: &PgPool, input: &CreatePricingPackage) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO pricing_packages \
                (name, description, price_cents, class_count, validity_days, \
                 is_featured, display_order) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING id",
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.price_cents)
        .bind(input.class_count)
        .bind(input.validity_days)
        .bind(input.is_featured)
        .bind(input.display_order)
        .fetch_one(pool)
        .await
    }

    /// Active packages in display order, cheapest first within a slot.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<PricingPackage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM pricing_packages \
             WHERE is_active = true \
             ORDER BY display_order ASC, price_cents ASC"
        );
        sqlx::query_as::<_, PricingPackage>(&query).fetch_all(pool).await
    }
}
