//! Goal error types.

use fintrack_shared::types::AmountError;
use thiserror::Error;

/// Goal-related errors.
#[derive(Debug, Error)]
pub enum GoalError {
    /// Amount is not a number.
    #[error(transparent)]
    InvalidAmount(#[from] AmountError),

    /// Deadline is not a `YYYY-MM-DD` date.
    #[error("Invalid deadline: {0:?}")]
    InvalidDeadline(String),

    /// Goal name is empty.
    #[error("Goal name cannot be empty")]
    EmptyName,
}
