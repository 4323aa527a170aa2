//! Repository abstractions for record access.
//!
//! Repositories map untyped store records to domain types, hiding the
//! record store from the rest of the application. Each repository holds a
//! shared handle to the store it was constructed with.

pub mod budget;
pub mod category;
pub mod goal;
pub mod transaction;

use std::sync::Arc;

use fintrack_core::goal::GoalError;
use fintrack_shared::AppError;
use fintrack_shared::types::RecordId;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::entity::{EntityType, FieldSpec};
use crate::error::StoreError;
use crate::filter::Filter;
use crate::outcome::BatchOutcome;
use crate::record::{ID_FIELD, Record, from_record, record_id};
use crate::store::RecordStore;

pub use budget::BudgetRepository;
pub use category::CategoryRepository;
pub use goal::GoalRepository;
pub use transaction::TransactionRepository;

/// Result type alias using `RepositoryError`.
pub type RepoResult<T> = Result<T, RepositoryError>;

/// Error types for repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// No record with this id exists.
    #[error("{entity} with id {id} not found")]
    NotFound {
        /// Entity type looked up.
        entity: EntityType,
        /// Missing id.
        id: RecordId,
    },

    /// The store refused every record of the request.
    #[error("{entity} request rejected: {}", .errors.join("; "))]
    Rejected {
        /// Entity type written.
        entity: EntityType,
        /// Messages collected from the failed records.
        errors: Vec<String>,
    },

    /// Invalid goal input.
    #[error(transparent)]
    Goal(#[from] GoalError),

    /// The store could not be reached or answered with an error.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A record could not be mapped to or from a domain type.
    #[error("Record mapping failed: {0}")]
    Record(#[from] serde_json::Error),
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { .. } => Self::NotFound(err.to_string()),
            RepositoryError::Rejected { .. } | RepositoryError::Goal(_) => {
                Self::Validation(err.to_string())
            }
            RepositoryError::Store(store) => store.into(),
            RepositoryError::Record(_) => Self::Internal(err.to_string()),
        }
    }
}

/// Decodes fetched records, skipping and logging the ones that do not map.
fn decode_all<T: DeserializeOwned>(entity: EntityType, records: Vec<Record>) -> Vec<T> {
    records
        .into_iter()
        .filter_map(|record| {
            let id = record_id(&record);
            match from_record(record) {
                Ok(value) => Some(value),
                Err(err) => {
                    warn!(%entity, ?id, error = %err, "skipping malformed record");
                    None
                }
            }
        })
        .collect()
}

/// Logs every failed record of a batch and returns the stored records of
/// the successful ones. Fails only when no record succeeded.
fn settle(entity: EntityType, action: &str, outcome: BatchOutcome) -> RepoResult<Vec<Record>> {
    let failed: Vec<String> = outcome
        .failures()
        .flat_map(|failure| failure.describe())
        .collect();
    let failures = outcome.failures().count();

    if failures > 0 {
        error!(%entity, action, failures, "failed to {action} {failures} {}", entity.plural());
        for message in &failed {
            error!(%entity, action, "{message}");
        }
    }

    if outcome.is_success() {
        Ok(outcome.into_records())
    } else {
        Err(RepositoryError::Rejected {
            entity,
            errors: failed,
        })
    }
}

/// Typed access to one entity type of a record store.
#[derive(Clone)]
pub(crate) struct EntityTable {
    store: Arc<dyn RecordStore>,
    entity: EntityType,
    fields: FieldSpec,
}

impl EntityTable {
    pub(crate) fn new(store: Arc<dyn RecordStore>, entity: EntityType, fields: FieldSpec) -> Self {
        Self {
            store,
            entity,
            fields,
        }
    }

    pub(crate) async fn list<T: DeserializeOwned>(&self, filter: &Filter) -> RepoResult<Vec<T>> {
        let records = self
            .store
            .fetch_all(self.entity, self.fields, filter)
            .await?;
        Ok(decode_all(self.entity, records))
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, id: RecordId) -> RepoResult<Option<T>> {
        match self.store.fetch_by_id(self.entity, id, self.fields).await? {
            Some(record) => Ok(Some(from_record(record)?)),
            None => Ok(None),
        }
    }

    pub(crate) async fn require<T: DeserializeOwned>(&self, id: RecordId) -> RepoResult<T> {
        self.get(id).await?.ok_or(RepositoryError::NotFound {
            entity: self.entity,
            id,
        })
    }

    pub(crate) async fn create<T: DeserializeOwned>(&self, record: Record) -> RepoResult<T> {
        let outcome = self.store.create(self.entity, vec![record]).await?;
        let stored = self.single(settle(self.entity, "create", outcome)?)?;
        info!(entity = %self.entity, id = ?record_id(&stored), "record created");
        Ok(from_record(stored)?)
    }

    pub(crate) async fn update<T: DeserializeOwned>(
        &self,
        id: RecordId,
        mut record: Record,
    ) -> RepoResult<T> {
        record.insert(ID_FIELD.to_string(), Value::from(id.get()));
        let outcome = self.store.update(self.entity, vec![record]).await?;
        let stored = self.single(settle(self.entity, "update", outcome)?)?;
        info!(entity = %self.entity, %id, "record updated");
        Ok(from_record(stored)?)
    }

    pub(crate) async fn delete(&self, id: RecordId) -> RepoResult<()> {
        let outcome = self.store.delete(self.entity, vec![id]).await?;
        settle(self.entity, "delete", outcome)?;
        info!(entity = %self.entity, %id, "record deleted");
        Ok(())
    }

    fn single(&self, records: Vec<Record>) -> RepoResult<Record> {
        records
            .into_iter()
            .next()
            .ok_or_else(|| RepositoryError::Rejected {
                entity: self.entity,
                errors: vec!["store returned no record".to_string()],
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::RecordOutcome;
    use serde_json::json;

    #[derive(Debug, serde::Deserialize)]
    struct Named {
        name: String,
    }

    fn record(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_decode_all_skips_malformed_records() {
        let decoded: Vec<Named> = decode_all(
            EntityType::Category,
            vec![
                record(json!({"id": 1, "name": "Rent"})),
                record(json!({"id": 2})),
                record(json!({"id": 3, "name": "Salary"})),
            ],
        );
        let names: Vec<_> = decoded.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, ["Rent", "Salary"]);
    }

    #[test]
    fn test_settle_keeps_partial_success() {
        let outcome = BatchOutcome::new(vec![
            RecordOutcome::failed("duplicate"),
            RecordOutcome::ok(Some(record(json!({"id": 9})))),
        ]);
        let records = settle(EntityType::Budget, "create", outcome).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_settle_rejects_when_nothing_succeeded() {
        let outcome = BatchOutcome::new(vec![
            RecordOutcome::failed("invalid").with_field_error("amount", "must be a number"),
        ]);
        let err = settle(EntityType::Budget, "create", outcome).unwrap_err();
        assert_eq!(
            err.to_string(),
            "budget request rejected: invalid; amount: must be a number"
        );
    }

    #[test]
    fn test_into_app_error() {
        let app: AppError = RepositoryError::NotFound {
            entity: EntityType::Goal,
            id: RecordId(4),
        }
        .into();
        assert_eq!(app.error_code(), "NOT_FOUND");
        assert_eq!(app.to_string(), "Not found: goal with id 4 not found");
    }
}
