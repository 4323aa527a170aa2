//! Monthly budgets reconciled against spending.

pub mod error;
pub mod reconcile;
pub mod service;
pub mod types;


pub use error::BudgetError;
pub use reconcile::compute_spent;
pub use service::{BudgetService, compare_names};
pub use types::{
    Budget, BudgetStatus, BudgetSummary, NewBudget, OVER_BUDGET_THRESHOLD, ReconciledBudget,
    StatusBand, WARNING_THRESHOLD,
};
