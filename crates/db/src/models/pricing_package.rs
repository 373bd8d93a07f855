//! Pricing package model.

use serde::Serialize;
use sqlx::FromRow;
use pasos_core::types::DbId;

/// A row from the `pricing_packages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PricingPackage {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub price_cents: i32,
    /// `None` means unlimited classes.
    pub class_count: Option<i32>,
    pub validity_days: Option<i32>,
    pub is_featured: bool,
    pub display_order: i32,
}

/// DTO used by seeding and tests.
#[derive(Debug, Clone)]
pub struct CreatePricingPackage {
    pub name: String,
    pub description: String,
    pub price_cents: i32,
    pub class_count: Option<i32>,
    pub validity_days: Option<i32>,
    pub is_featured: bool,
    pub display_order: i32,
}
