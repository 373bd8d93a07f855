//! Instagram webhook: subscription handshake and media change deliveries.

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use pasos_core::error::CoreError;
use pasos_core::instagram::{VerificationQuery, WebhookPayload};
use pasos_core::signature::verify_hub_signature;
use pasos_instagram::ingest::ingest_refs;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Header carrying `sha256=<hex>` of the raw body.
pub const SIGNATURE_HEADER: &str = "x-hub-signature-256";

// ---------------------------------------------------------------------------
// GET /webhooks/instagram/
// ---------------------------------------------------------------------------

/// Echo `hub.challenge` when the subscription request carries our verify token.
pub async fn verify_subscription(
    State(state): State<AppState>,
    Query(query): Query<VerificationQuery>,
) -> AppResult<impl IntoResponse> {
    let expected = state.instagram.verify_token.as_deref().unwrap_or_default();
    match query.accept(expected) {
        Some(challenge) => {
            tracing::info!("Instagram webhook subscription verified");
            Ok((
                StatusCode::OK,
                [(CONTENT_TYPE, "text/plain; charset=utf-8")],
                challenge.to_string(),
            ))
        }
        None => {
            tracing::warn!(mode = ?query.mode, "Instagram webhook verification rejected");
            Err(AppError::Core(CoreError::Forbidden(
                "Webhook verification failed".into(),
            )))
        }
    }
}

// ---------------------------------------------------------------------------
// POST /webhooks/instagram/
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct WebhookReceipt {
    pub received: usize,
    pub ingested: usize,
}

/// Verify the payload signature and ingest every media change.
///
/// Deliveries are rejected with 403 unless an app secret is configured and
/// the signature matches. Per-item failures are logged and skipped so Meta
/// does not retry the whole batch.
pub async fn receive_update(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    let Some(secret) = state.instagram.app_secret.as_deref() else {
        tracing::warn!("Instagram webhook delivery rejected: no app secret configured");
        return Err(AppError::Core(CoreError::Forbidden(
            "Webhook signature secret not configured".into(),
        )));
    };

    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if !verify_hub_signature(secret, &body, signature) {
        tracing::warn!("Instagram webhook signature mismatch");
        return Err(AppError::Core(CoreError::Forbidden(
            "Invalid webhook signature".into(),
        )));
    }

    let payload: WebhookPayload = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("Malformed webhook payload: {e}")))?;

    let refs = payload.media_refs();
    if refs.is_empty() {
        tracing::debug!(object = %payload.object, "Instagram webhook without media changes");
        return Ok(Json(DataResponse {
            data: WebhookReceipt {
                received: 0,
                ingested: 0,
            },
        }));
    }

    let report = ingest_refs(&state.pool, state.instagram_client.as_deref(), refs).await;

    tracing::info!(
        received = report.received,
        ingested = report.ingested,
        skipped = report.skipped,
        "Instagram webhook processed",
    );

    Ok(Json(DataResponse {
        data: WebhookReceipt {
            received: report.received,
            ingested: report.ingested,
        },
    }))
}
