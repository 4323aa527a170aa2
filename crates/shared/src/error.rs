//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The record store rejected or failed a request.
    #[error("Record store error: {0}")]
    Store(String),

    /// Configuration could not be loaded or is incomplete.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the stable error code for this error.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Store(_) => "STORE_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns a message that is safe to show to the user.
    ///
    /// Store and internal failures are collapsed into a generic message; the
    /// detailed cause belongs in the logs.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::NotFound(what) => format!("{what} could not be found"),
            Self::Validation(msg) => msg.clone(),
            Self::Store(_) | Self::Internal(_) => "Something went wrong, please try again".to_string(),
            Self::Configuration(_) => "The application is not configured correctly".to_string(),
        }
    }
}
