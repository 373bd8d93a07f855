//! Booking entity models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use pasos_core::types::{Date, DbId, Timestamp};

/// A row from the `bookings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Booking {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub class_type: String,
    pub preferred_date: Option<Date>,
    pub message: Option<String>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Query parameters for listing bookings.
#[derive(Debug, Deserialize)]
pub struct BookingListParams {
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// DTO for changing a booking's status.
#[derive(Debug, Deserialize)]
pub struct UpdateBookingStatus {
    pub status: String,
}
