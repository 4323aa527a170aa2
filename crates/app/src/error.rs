//! View-level errors.
//!
//! Views never hand store or repository errors to their callers. The cause
//! is logged where it happens and the caller receives a short message fit
//! for display.

use fintrack_core::budget::BudgetError;
use fintrack_core::goal::GoalError;
use fintrack_shared::AppError;
use thiserror::Error;

/// A page failed to load its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LoadError {
    /// Budgets, transactions or categories could not be fetched.
    #[error("Failed to load budget data")]
    BudgetData,

    /// Goals could not be fetched.
    #[error("Failed to load goals")]
    Goals,
}

/// A user action on a page failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    /// The store call behind the action failed.
    #[error("Failed to {action} {noun}")]
    Action {
        /// Verb of the action, e.g. `create`.
        action: &'static str,
        /// Thing acted on, e.g. `budget`.
        noun: &'static str,
    },

    /// The submitted form could not be read.
    #[error("{0}")]
    Invalid(String),
}

impl ViewError {
    pub(crate) const fn action(action: &'static str, noun: &'static str) -> Self {
        Self::Action { action, noun }
    }
}

impl From<BudgetError> for ViewError {
    fn from(err: BudgetError) -> Self {
        Self::Invalid(err.to_string())
    }
}

impl From<GoalError> for ViewError {
    fn from(err: GoalError) -> Self {
        Self::Invalid(err.to_string())
    }
}

impl From<LoadError> for AppError {
    fn from(err: LoadError) -> Self {
        Self::Store(err.to_string())
    }
}

impl From<ViewError> for AppError {
    fn from(err: ViewError) -> Self {
        match err {
            ViewError::Action { .. } => Self::Store(err.to_string()),
            ViewError::Invalid(msg) => Self::Validation(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(LoadError::BudgetData.to_string(), "Failed to load budget data");
        assert_eq!(
            ViewError::action("delete", "budget").to_string(),
            "Failed to delete budget"
        );
    }

    #[test]
    fn test_into_app_error() {
        let app: AppError = ViewError::Invalid("Invalid amount: abc".into()).into();
        assert_eq!(app.error_code(), "VALIDATION_ERROR");
        assert_eq!(app.user_message(), "Invalid amount: abc");

        let app: AppError = LoadError::Goals.into();
        assert_eq!(app.user_message(), "Something went wrong, please try again");
    }
}
