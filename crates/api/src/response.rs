//! Shared response envelope.
//!
//! Pages, submissions and admin endpoints all answer `{ "data": ... }`.
//! Errors use `{ "error", "code" }` (see [`crate::error::AppError`]).

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: booking }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
