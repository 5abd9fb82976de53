//! Domain errors for the BDI agent.

use thiserror::Error;

/// Domain-level errors raised by capability adapters and the reasoning cycle.
///
/// Probe and metrics failures are absorbed by the belief store; action
/// failures are recorded per intention. Only errors that escape both of those
/// policies reach the control loop.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("Unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("Invalid metrics record: {0}")]
    InvalidRecord(String),

    #[error("Invalid belief snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Action failed: {0}")]
    ActionFailed(String),

    #[error("Task panicked: {0}")]
    Panicked(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<reqwest::Error> for DomainError {
    fn from(err: reqwest::Error) -> Self {
        DomainError::Http(err.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::SerializationError(err.to_string())
    }
}

impl From<std::io::Error> for DomainError {
    fn from(err: std::io::Error) -> Self {
        DomainError::ActionFailed(err.to_string())
    }
}
