use crate::types::DbId;

/// Domain-level error shared by the API, the CLI and the repository helpers.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// Lookup by a natural key (slug, Instagram media id) found nothing.
    #[error("Entity not found: {entity} '{key}'")]
    NotFoundByKey { entity: &'static str, key: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
