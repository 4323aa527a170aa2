//! Common types used across the application.

pub mod id;
pub mod money;
pub mod month;

pub use id::*;
pub use money::{AmountError, Currency, format_amount, parse_amount};
pub use month::{MonthToken, MonthTokenError};
