//! Savings goals and their progress.

pub mod error;
pub mod service;
pub mod types;

pub use error::GoalError;
pub use service::GoalService;
pub use types::{Goal, GoalProgress, NewGoal};
