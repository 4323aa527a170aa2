//! Record store error types.

use fintrack_shared::AppError;
use thiserror::Error;

/// Result type alias using `StoreError`.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised while talking to a record store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The request never produced a response.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The store answered with a non-success HTTP status.
    #[error("Store responded with status {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Body or reason text.
        message: String,
    },

    /// The store answered but reported the request as unsuccessful.
    #[error("Store rejected the request: {0}")]
    Rejected(String),

    /// A payload could not be encoded or decoded.
    #[error("Malformed payload: {0}")]
    Payload(#[from] serde_json::Error),

    /// The store is missing required configuration.
    #[error("Store misconfigured: {0}")]
    Configuration(String),

    /// The store is unreachable for another reason.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Configuration(msg) => Self::Configuration(msg),
            other => Self::Store(other.to_string()),
        }
    }
}
