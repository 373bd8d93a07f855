//! Booking creation and status management handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;

use pasos_core::booking::{self, BookingForm};
use pasos_core::error::CoreError;
use pasos_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use pasos_core::types::DbId;
use pasos_db::models::booking::{BookingListParams, UpdateBookingStatus};
use pasos_db::repositories::BookingRepo;
use pasos_notify::alerts::booking_alert;

use crate::error::{AppError, AppResult};
use crate::extract::FormOrJson;
use crate::handlers::{accepted_spam, spawn_studio_alert};
use crate::middleware::admin::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /booking/create/
// ---------------------------------------------------------------------------

/// Create a booking request. The studio is alerted by email when SMTP is
/// configured; delivery failures never fail the request.
pub async fn create_booking(
    State(state): State<AppState>,
    FormOrJson(form): FormOrJson<BookingForm>,
) -> AppResult<impl IntoResponse> {
    if form.is_spam() {
        tracing::info!("Booking honeypot triggered, discarding");
        return Ok(accepted_spam());
    }

    let input = form.validate(Utc::now().date_naive())?;
    let booking = BookingRepo::create(&state.pool, &input).await?;

    tracing::info!(
        booking_id = booking.id,
        class_type = %booking.class_type,
        "Booking created",
    );

    spawn_studio_alert(&state, booking_alert(booking.id, &input));

    Ok((StatusCode::CREATED, Json(DataResponse { data: booking })).into_response())
}

// ---------------------------------------------------------------------------
// GET /admin/bookings
// ---------------------------------------------------------------------------

pub async fn list_bookings(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<BookingListParams>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref s) = params.status {
        booking::validate_status(s)?;
    }

    let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let offset = clamp_offset(params.offset);

    let bookings =
        BookingRepo::list_filtered(&state.pool, params.status.as_deref(), limit, offset).await?;

    Ok(Json(DataResponse { data: bookings }))
}

// ---------------------------------------------------------------------------
// PUT /admin/bookings/{id}/status
// ---------------------------------------------------------------------------

/// Move a booking through its workflow. `cancelled` is terminal.
pub async fn update_booking_status(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBookingStatus>,
) -> AppResult<impl IntoResponse> {
    booking::validate_status(&input.status)?;

    let current = BookingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Booking",
            id,
        }))?;

    booking::validate_transition(&current.status, &input.status)?;

    let updated = BookingRepo::update_status(&state.pool, id, &input.status, Some(&current.status))
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(format!(
                "Booking {id} was modified concurrently, retry"
            )))
        })?;

    tracing::info!(
        booking_id = id,
        from = %current.status,
        to = %updated.status,
        "Booking status updated",
    );

    Ok(Json(DataResponse { data: updated }))
}
