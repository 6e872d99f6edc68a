use crate::types::DbId;

/// Domain-level errors. All variants are recoverable/user-facing; the API
/// layer maps them onto HTTP statuses. Persistence failures are not
/// represented here -- they surface as infrastructure errors one layer up.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// Self-request, self-block, self-purchase.
    #[error("{0}")]
    SelfReference(String),

    /// Interaction refused because a block exists in either direction.
    #[error("{0}")]
    Blocked(String),

    /// An already-exists class error (pending request, existing friendship,
    /// duplicate block, duplicate alliance name).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Transition attempted from a state that does not permit it.
    #[error("{0}")]
    InvalidState(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
