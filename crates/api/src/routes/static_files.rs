use std::path::Path;

use axum::routing::get;
use axum::Router;
use tower_http::services::ServeDir;

use crate::handlers::static_files;
use crate::state::AppState;

/// ```text
/// GET /sw.js       -> service_worker
/// GET /offline/    -> offline
/// GET /static/*    -> files under `static_dir`
/// ```
pub fn router(static_dir: &Path) -> Router<AppState> {
    Router::new()
        .route("/sw.js", get(static_files::service_worker))
        .route("/offline/", get(static_files::offline))
        .nest_service("/static", ServeDir::new(static_dir))
}
