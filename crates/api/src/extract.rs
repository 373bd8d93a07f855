//! Request body extractors.

use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::{Form, Json};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// Deserializes a body posted either as JSON or as
/// `application/x-www-form-urlencoded`, chosen by `Content-Type`.
///
/// Site forms post urlencoded bodies; scripts and tests post JSON.
///
/// ```ignore
/// async fn submit(FormOrJson(form): FormOrJson<BookingForm>) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug)]
pub struct FormOrJson<T>(pub T);

impl<S, T> FromRequest<S> for FormOrJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("application/json") {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            Ok(FormOrJson(value))
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            Ok(FormOrJson(value))
        } else {
            Err(AppError::UnsupportedMediaType(
                "Expected application/json or application/x-www-form-urlencoded".into(),
            ))
        }
    }
}
