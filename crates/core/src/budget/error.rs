//! Budget error types.

use fintrack_shared::types::{AmountError, MonthTokenError, ParseIdError};
use thiserror::Error;

/// Budget-related errors.
#[derive(Debug, Error)]
pub enum BudgetError {
    /// Amount is not a number.
    #[error(transparent)]
    InvalidAmount(#[from] AmountError),

    /// Amount cannot be negative.
    #[error("Amount cannot be negative")]
    NegativeAmount,

    /// Month is not a `YYYY-MM` token.
    #[error(transparent)]
    InvalidMonth(#[from] MonthTokenError),

    /// Category reference is not an integer.
    #[error(transparent)]
    InvalidCategory(#[from] ParseIdError),
}
