use thiserror::Error;
use tracing::error;

use crate::database::DatabaseError;
use crate::filter::FilterError;

/// Closed set of outcomes a service call can fail with. Store internals never
/// leak past this type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Internal(String),
}

impl ServiceError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ServiceError::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ServiceError::NotFound(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ServiceError::Internal(message.into())
    }

    /// Replace the message of a NotFound so callers see the resource they
    /// asked about, not the parent that failed the ownership chain.
    pub fn hide_as(self, message: &str) -> Self {
        match self {
            ServiceError::NotFound(_) => ServiceError::NotFound(message.to_string()),
            other => other,
        }
    }
}

impl From<FilterError> for ServiceError {
    fn from(err: FilterError) -> Self {
        ServiceError::BadRequest(err.to_string())
    }
}

impl From<DatabaseError> for ServiceError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound(msg) => ServiceError::NotFound(msg),
            DatabaseError::Filter(e) => e.into(),
            other => {
                error!("Database error: {}", other);
                ServiceError::Internal("internal server error".to_string())
            }
        }
    }
}

/// Map a repository lookup failure, renaming "no rows" to `message`.
pub fn lookup(err: DatabaseError, message: &str) -> ServiceError {
    ServiceError::from(err).hide_as(message)
}
