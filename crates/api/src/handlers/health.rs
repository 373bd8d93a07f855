//! Liveness, readiness and metrics endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use pasos_core::types::Timestamp;
use pasos_db::models::stats::{BookingCounts, MediaCounts, TestimonialCounts};
use pasos_db::repositories::{BookingRepo, MediaItemRepo, TestimonialRepo};

use crate::error::AppResult;
use crate::state::AppState;

/// Liveness response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
}

/// GET /health -- the process is up. Never touches the database.
pub async fn liveness() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize)]
pub struct ReadinessChecks {
    pub database: bool,
    pub manifest: bool,
    pub email_configured: bool,
}

#[derive(Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub checks: ReadinessChecks,
    pub timestamp: Timestamp,
}

/// GET /api/health/ -- dependency checks. 503 when the database is down.
///
/// A missing manifest or SMTP config only degrades the report.
pub async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    let database = match pasos_db::health_check(&state.pool).await {
        Ok(()) => true,
        Err(e) => {
            tracing::error!(error = %e, "Readiness database check failed");
            false
        }
    };
    let checks = ReadinessChecks {
        database,
        manifest: state.assets.has_manifest() || state.assets.is_dev(),
        email_configured: state.mailer.is_some(),
    };

    let healthy = checks.database && checks.manifest && checks.email_configured;
    let status_code = if checks.database {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(ReadinessResponse {
            status: if healthy { "ok" } else { "degraded" },
            version: env!("CARGO_PKG_VERSION"),
            checks,
            timestamp: Utc::now(),
        }),
    )
}

#[derive(Serialize)]
pub struct MetricsResponse {
    pub uptime_seconds: u64,
    pub requests_served: u64,
    pub bookings: BookingCounts,
    pub testimonials: TestimonialCounts,
    pub media: MediaCounts,
}

/// GET /api/metrics/ -- process counters and content totals.
pub async fn metrics(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let bookings = BookingRepo::counts(&state.pool).await?;
    let testimonials = TestimonialRepo::counts(&state.pool).await?;
    let media = MediaItemRepo::counts(&state.pool).await?;

    Ok(Json(MetricsResponse {
        uptime_seconds: state.metrics.uptime_seconds(),
        requests_served: state.metrics.requests_served(),
        bookings,
        testimonials,
        media,
    }))
}
