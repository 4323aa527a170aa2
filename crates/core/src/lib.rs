//! Core business logic for Fintrack.
//!
//! This crate contains pure business logic with ZERO store or network
//! dependencies. All domain types, validation rules, and calculations live
//! here.
//!
//! # Modules
//!
//! - `category` - Income/expense categories and id-keyed lookup
//! - `transaction` - Income and expense transactions
//! - `budget` - Monthly budgets reconciled against spending
//! - `goal` - Savings goals and their progress

pub mod budget;
pub mod category;
pub mod goal;
pub mod serde_ext;
pub mod transaction;

pub use category::{Category, CategoryIndex, EntryKind};
pub use transaction::Transaction;
