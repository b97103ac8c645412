use crate::types::DbId;

/// Domain-level error type shared across the workspace.
///
/// The API layer maps these onto HTTP statuses; the client maps HTTP error
/// bodies back into field-level or general form errors.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// An entity lookup by numeric id found nothing.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// A student lookup by formatted id found nothing.
    #[error("Student '{0}' not found")]
    StudentNotFound(String),

    /// Input failed a validation rule. The message is user-facing.
    #[error("{0}")]
    Validation(String),

    /// A uniqueness or state conflict. The message is user-facing and, for
    /// duplicate keys, contains the phrase "already exists" which the client
    /// classifier relies on.
    #[error("{0}")]
    Conflict(String),

    /// Missing or invalid credentials.
    #[error("{0}")]
    Unauthorized(String),

    /// Authenticated but not allowed.
    #[error("{0}")]
    Forbidden(String),

    /// An internal failure whose details must not reach the user.
    #[error("{0}")]
    Internal(String),
}
