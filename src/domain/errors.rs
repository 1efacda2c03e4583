//! Domain errors for the issue synchronizer.

use thiserror::Error;

/// Domain-level errors that can occur while synchronizing an issue.
///
/// A missing edit target is deliberately absent from this enum: the page
/// locator reports it as `None` and the run still succeeds.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The target database or the runtime configuration cannot support a sync.
    /// Fatal; re-running without fixing the configuration fails the same way.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A store API call failed (network, non-2xx status, undecodable body).
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::SerializationError(err.to_string())
    }
}
