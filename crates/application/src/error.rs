//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// External service error
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Operation rejected before reaching a provider
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<domain::AqiError> for ApplicationError {
    fn from(err: domain::AqiError) -> Self {
        Self::Domain(DomainError::from(err))
    }
}
