pub mod bookings;
pub mod health;
pub mod pages;
pub mod static_files;
pub mod testimonials;
pub mod webhooks;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use pasos_core::digest::DigestEmail;

use crate::response::DataResponse;
use crate::state::AppState;

/// Reply to a honeypot hit exactly like a queued submission, without storing it.
fn accepted_spam() -> Response {
    (
        StatusCode::ACCEPTED,
        Json(DataResponse {
            data: json!({ "received": true }),
        }),
    )
        .into_response()
}

/// Email the studio in the background. Never blocks or fails the request.
fn spawn_studio_alert(state: &AppState, email: DigestEmail) {
    let Some(mailer) = state.mailer.clone() else {
        return;
    };
    tokio::spawn(async move {
        if let Err(e) = mailer.notify_studio(&email).await {
            tracing::warn!(error = %e, subject = %email.subject, "Failed to send studio alert");
        }
    });
}
