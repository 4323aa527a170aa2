//! Page-level views for Fintrack.
//!
//! Each view owns its loaded data behind `&mut self`, loads through the
//! repositories of a record store it was handed explicitly, and derives
//! everything else on demand. Store failures are logged here and turned
//! into short display messages.

pub mod budgets;
pub mod demo;
pub mod display;
pub mod error;
pub mod goals;

pub use budgets::{BudgetRow, BudgetsView};
pub use error::{LoadError, ViewError};
pub use goals::GoalsView;
