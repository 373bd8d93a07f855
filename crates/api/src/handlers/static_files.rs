//! Service worker and offline page passthroughs.

use axum::extract::State;
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::http::{HeaderName, StatusCode};
use axum::response::{Html, IntoResponse, Response};

use crate::state::AppState;

const SERVICE_WORKER_FILE: &str = "sw.js";
const OFFLINE_FILE: &str = "offline.html";

/// Shown when `offline.html` has not been deployed.
pub const FALLBACK_OFFLINE_HTML: &str = "<!doctype html>\n\
<html lang=\"en\">\n\
<head><meta charset=\"utf-8\"><meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
<title>Offline | Pasos Dance Studio</title></head>\n\
<body><main><h1>You are offline</h1>\n\
<p>Check your connection and try again. Class times and bookings will be back as soon as you are.</p>\n\
</main></body>\n\
</html>\n";

/// GET /sw.js -- served from the site root so it can control every path.
pub async fn service_worker(State(state): State<AppState>) -> Response {
    let path = state.config.static_dir.join(SERVICE_WORKER_FILE);
    match tokio::fs::read(&path).await {
        Ok(bytes) => (
            StatusCode::OK,
            [
                (CONTENT_TYPE, "application/javascript"),
                (HeaderName::from_static("service-worker-allowed"), "/"),
                (CACHE_CONTROL, "no-cache"),
            ],
            bytes,
        )
            .into_response(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Service worker not found");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

/// GET /offline/ -- the page the service worker falls back to.
pub async fn offline(State(state): State<AppState>) -> Html<String> {
    let path = state.config.static_dir.join(OFFLINE_FILE);
    match tokio::fs::read_to_string(&path).await {
        Ok(html) => Html(html),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "Offline page missing, using fallback");
            Html(FALLBACK_OFFLINE_HTML.to_string())
        }
    }
}
