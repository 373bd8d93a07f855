//! Static bearer-token guard for the moderation API.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use pasos_core::error::CoreError;
use pasos_core::signature::secrets_match;

use crate::error::AppError;
use crate::state::AppState;

/// Requires `Authorization: Bearer <ADMIN_API_TOKEN>`.
///
/// Rejects with 401 when the header is missing or the token is wrong, and
/// with 403 when no admin token is configured at all.
///
/// ```ignore
/// async fn admin_only(_admin: RequireAdmin) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RequireAdmin;

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(expected) = state.config.admin_api_token.as_deref() else {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin API is disabled".into(),
            )));
        };

        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        if !secrets_match(token.trim(), expected) {
            tracing::warn!(path = %parts.uri.path(), "Rejected admin request with bad token");
            return Err(AppError::Core(CoreError::Unauthorized(
                "Invalid admin token".into(),
            )));
        }

        Ok(RequireAdmin)
    }
}
