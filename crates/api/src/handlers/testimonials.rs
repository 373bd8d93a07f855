//! Testimonial submission and moderation handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use pasos_core::error::CoreError;
use pasos_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use pasos_core::testimonial::{self, TestimonialForm, STATUS_APPROVED, STATUS_REJECTED};
use pasos_core::types::DbId;
use pasos_db::models::testimonial::{TestimonialListParams, UpdateFeatured};
use pasos_db::repositories::TestimonialRepo;
use pasos_notify::alerts::testimonial_alert;

use crate::error::{AppError, AppResult};
use crate::extract::FormOrJson;
use crate::handlers::{accepted_spam, spawn_studio_alert};
use crate::middleware::admin::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /testimonials/submit/
// ---------------------------------------------------------------------------

/// Submit a testimonial for moderation.
///
/// Honeypot hits are answered with 202 and dropped.
pub async fn submit_testimonial(
    State(state): State<AppState>,
    FormOrJson(form): FormOrJson<TestimonialForm>,
) -> AppResult<impl IntoResponse> {
    if form.is_spam() {
        tracing::info!("Testimonial honeypot triggered, discarding");
        return Ok(accepted_spam());
    }

    let input = form.validate()?;
    let created = TestimonialRepo::create(&state.pool, &input).await?;

    tracing::info!(
        testimonial_id = created.id,
        rating = created.rating,
        "Testimonial submitted",
    );

    spawn_studio_alert(&state, testimonial_alert(created.id, &input));

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })).into_response())
}

// ---------------------------------------------------------------------------
// GET /admin/testimonials
// ---------------------------------------------------------------------------

/// List testimonials with an optional status filter. Admin only.
pub async fn list_testimonials(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<TestimonialListParams>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref s) = params.status {
        testimonial::validate_status(s)?;
    }

    let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let offset = clamp_offset(params.offset);

    let items =
        TestimonialRepo::list_filtered(&state.pool, params.status.as_deref(), limit, offset)
            .await?;

    Ok(Json(DataResponse { data: items }))
}

// ---------------------------------------------------------------------------
// POST /admin/testimonials/{id}/approve | /reject
// ---------------------------------------------------------------------------

pub async fn approve_testimonial(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    moderate(&state, id, STATUS_APPROVED).await
}

pub async fn reject_testimonial(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    moderate(&state, id, STATUS_REJECTED).await
}

async fn moderate(
    state: &AppState,
    id: DbId,
    next: &'static str,
) -> AppResult<impl IntoResponse> {
    let current = TestimonialRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Testimonial",
            id,
        }))?;

    testimonial::validate_transition(&current.status, next)?;

    let updated = TestimonialRepo::set_status(&state.pool, id, next, Some(&current.status))
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(format!(
                "Testimonial {id} was modified concurrently, retry"
            )))
        })?;

    tracing::info!(
        testimonial_id = id,
        from = %current.status,
        to = next,
        "Testimonial moderated",
    );

    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// PUT /admin/testimonials/{id}/featured
// ---------------------------------------------------------------------------

/// Toggle the featured flag. Only approved testimonials can be featured.
pub async fn set_featured(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateFeatured>,
) -> AppResult<impl IntoResponse> {
    let current = TestimonialRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Testimonial",
            id,
        }))?;

    testimonial::validate_featurable(&current.status, input.is_featured)?;

    let updated = TestimonialRepo::set_featured(&state.pool, id, input.is_featured)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Testimonial",
            id,
        }))?;

    tracing::info!(
        testimonial_id = id,
        is_featured = input.is_featured,
        "Testimonial featured flag updated",
    );

    Ok(Json(DataResponse { data: updated }))
}
