use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Failure taxonomy shared by every service operation.
///
/// The HTTP layer maps each variant to a status code; the message is what the
/// client sees, except for `Persistence` and `Internal` which are logged and replaced.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Conflict(String),

    #[error("external service failure: {0}")]
    ExternalService(String),

    #[error("database error: {0}")]
    Persistence(#[from] DbErr),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Maps a unique-constraint violation to `Conflict(message)`, anything else to
    /// `Persistence`.
    pub fn conflict_or_persistence(err: DbErr, message: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => AppError::Conflict(message.to_string()),
            _ => AppError::Persistence(err),
        }
    }
}
