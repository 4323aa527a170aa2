//! Record store layer.
//!
//! This crate provides:
//! - The `RecordStore` contract every backend implements
//! - Filters, field projections, and per-record batch outcomes
//! - An in-memory backend and an HTTP backend for a hosted record store
//! - Repository abstractions mapping records to domain types

pub mod entity;
pub mod error;
pub mod filter;
pub mod http;
pub mod memory;
pub mod outcome;
pub mod record;
pub mod repositories;
pub mod store;

use std::sync::Arc;

use fintrack_shared::config::{StoreConfig, StoreKind};

pub use entity::{EntityType, FieldSpec};
pub use error::{StoreError, StoreResult};
pub use filter::{Condition, Filter, Operator};
pub use http::HttpRecordStore;
pub use memory::MemoryStore;
pub use outcome::{BatchOutcome, FieldError, RecordOutcome};
pub use record::Record;
pub use repositories::{
    BudgetRepository, CategoryRepository, GoalRepository, RepositoryError, TransactionRepository,
};
pub use store::RecordStore;

/// Builds the record store described by `config`.
///
/// # Errors
///
/// Returns an error if an HTTP store is configured without a base URL or
/// the HTTP client cannot be built.
pub fn connect(config: &StoreConfig) -> StoreResult<Arc<dyn RecordStore>> {
    match config.kind {
        StoreKind::Memory => Ok(Arc::new(MemoryStore::new())),
        StoreKind::Http => Ok(Arc::new(HttpRecordStore::from_config(config)?)),
    }
}
