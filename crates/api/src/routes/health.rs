use axum::routing::get;
use axum::Router;

use crate::handlers::health;
use crate::state::AppState;

/// Monitoring routes (root level, NOT under `/api/v1`).
///
/// ```text
/// GET /health, /health/   -> liveness
/// GET /api/health/        -> readiness
/// GET /api/metrics/       -> metrics
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::liveness))
        .route("/health/", get(health::liveness))
        .route("/api/health/", get(health::readiness))
        .route("/api/metrics/", get(health::metrics))
}
