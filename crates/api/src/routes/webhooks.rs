use axum::routing::get;
use axum::Router;

use crate::handlers::webhooks;
use crate::state::AppState;

/// Mounted at `/webhooks`.
///
/// ```text
/// GET  /instagram/   -> verify_subscription
/// POST /instagram/   -> receive_update
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/instagram/",
        get(webhooks::verify_subscription).post(webhooks::receive_update),
    )
}
