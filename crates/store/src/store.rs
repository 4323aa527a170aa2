//! The record store contract.

use async_trait::async_trait;
use fintrack_shared::types::RecordId;

use crate::entity::{EntityType, FieldSpec};
use crate::error::StoreResult;
use crate::filter::Filter;
use crate::outcome::BatchOutcome;
use crate::record::Record;

/// A store of records keyed by entity type and integer id.
///
/// Implementations are shared behind `Arc<dyn RecordStore>` and handed to
/// repositories explicitly.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetches every record of `entity` matching `filter`.
    async fn fetch_all(
        &self,
        entity: EntityType,
        fields: FieldSpec,
        filter: &Filter,
    ) -> StoreResult<Vec<Record>>;

    /// Fetches one record, or `None` if no record has that id.
    async fn fetch_by_id(
        &self,
        entity: EntityType,
        id: RecordId,
        fields: FieldSpec,
    ) -> StoreResult<Option<Record>>;

    /// Creates records; the store assigns ids.
    async fn create(&self, entity: EntityType, records: Vec<Record>) -> StoreResult<BatchOutcome>;

    /// Updates the fields present on each record, identified by its `id`.
    async fn update(&self, entity: EntityType, records: Vec<Record>) -> StoreResult<BatchOutcome>;

    /// Deletes records by id.
    async fn delete(&self, entity: EntityType, ids: Vec<RecordId>) -> StoreResult<BatchOutcome>;
}
