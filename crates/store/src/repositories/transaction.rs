//! Transaction repository.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use fintrack_core::category::EntryKind;
use fintrack_core::transaction::{NewTransaction, Transaction};
use fintrack_shared::types::TransactionId;
use serde_json::Value;

use super::{EntityTable, RepoResult};
use crate::entity::{EntityType, FieldSpec};
use crate::filter::{Condition, Filter, Operator};
use crate::record::to_record;
use crate::store::RecordStore;

fn day(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// `start <= date < end + 1 day`, falling back to `date <= end` on the last
/// representable day.
fn date_window(start: NaiveDate, end: NaiveDate) -> Filter {
    let lower = Condition::new("date", Operator::GreaterThanOrEqualTo, day(start));
    let upper = match end.succ_opt() {
        Some(next) => Condition::new("date", Operator::LessThan, day(next)),
        None => Condition::new("date", Operator::LessThanOrEqualTo, day(end)),
    };
    Filter::none().and(lower).and(upper)
}

/// Fields fetched for transactions.
pub const TRANSACTION_FIELDS: FieldSpec = FieldSpec::new(&[
    "type",
    "amount",
    "category",
    "description",
    "date",
    "notes",
    "created_at",
]);

/// Transaction repository for transaction record operations.
#[derive(Clone)]
pub struct TransactionRepository {
    table: EntityTable,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            table: EntityTable::new(store, EntityType::Transaction, TRANSACTION_FIELDS),
        }
    }

    /// Lists every transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails.
    pub async fn list(&self) -> RepoResult<Vec<Transaction>> {
        self.table.list(&Filter::none()).await
    }

    /// Gets a transaction by id, or `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails or the record is malformed.
    pub async fn get(&self, id: TransactionId) -> RepoResult<Option<Transaction>> {
        self.table.get(id.record()).await
    }

    /// Creates a transaction stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails or rejects the record.
    pub async fn create(&self, input: &NewTransaction) -> RepoResult<Transaction> {
        let mut record = to_record(input)?;
        record.insert(
            "created_at".to_string(),
            Value::from(Utc::now().to_rfc3339()),
        );
        self.table.create(record).await
    }

    /// Replaces every editable field of a transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails or rejects the record.
    pub async fn update(&self, id: TransactionId, input: &NewTransaction) -> RepoResult<Transaction> {
        self.table.update(id.record(), to_record(input)?).await
    }

    /// Deletes a transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails or rejects the delete.
    pub async fn delete(&self, id: TransactionId) -> RepoResult<()> {
        self.table.delete(id.record()).await
    }

    /// Lists transactions dated within `[start, end]`, both inclusive.
    ///
    /// The upper bound is the day after `end`, exclusive, so dates stored
    /// with a time of day still match on the last day.
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails.
    pub async fn in_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> RepoResult<Vec<Transaction>> {
        self.table.list(&date_window(start, end)).await
    }

    /// Lists transactions filed under a category name.
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails.
    pub async fn by_category(&self, category: &str) -> RepoResult<Vec<Transaction>> {
        self.table.list(&Filter::equals("category", category)).await
    }

    /// Lists transactions of one kind.
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails.
    pub async fn by_kind(&self, kind: EntryKind) -> RepoResult<Vec<Transaction>> {
        self.table
            .list(&Filter::equals("type", kind.as_str()))
            .await
    }
}
