use sea_orm::DbErr;
use thiserror::Error;

/// Failure taxonomy for domain operations.
///
/// Handlers map these onto HTTP statuses: `Validation` -> 400,
/// `NotFound` -> 404, `Conflict` -> 409, `Db` -> 500.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Malformed or out-of-range input, rejected before any write.
    #[error("{0}")]
    Validation(String),

    /// A referenced student, class, user, or record does not exist.
    #[error("{0}")]
    NotFound(String),

    /// A write collided with a uniqueness constraint.
    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Db(#[from] DbErr),
}
