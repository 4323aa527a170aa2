//! In-process record store.
//!
//! Used for tests, seeding, and running without a hosted backend. Records
//! live in one ordered table per entity type and ids are assigned
//! sequentially starting at 1.

use std::collections::BTreeMap;

use async_trait::async_trait;
use dashmap::DashMap;
use fintrack_shared::types::RecordId;
use serde_json::Value;
use tracing::debug;

use crate::entity::{EntityType, FieldSpec};
use crate::error::StoreResult;
use crate::filter::Filter;
use crate::outcome::{BatchOutcome, RecordOutcome};
use crate::record::{ID_FIELD, Record, project, record_id};
use crate::store::RecordStore;

#[derive(Debug, Default)]
struct Table {
    last_id: i64,
    rows: BTreeMap<RecordId, Record>,
}

/// Record store held in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: DashMap<EntityType, Table>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records held for `entity`.
    #[must_use]
    pub fn count(&self, entity: EntityType) -> usize {
        self.tables.get(&entity).map_or(0, |t| t.rows.len())
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn fetch_all(
        &self,
        entity: EntityType,
        fields: FieldSpec,
        filter: &Filter,
    ) -> StoreResult<Vec<Record>> {
        let Some(table) = self.tables.get(&entity) else {
            return Ok(Vec::new());
        };

        Ok(table
            .rows
            .values()
            .filter(|row| filter.matches(row))
            .map(|row| project(row, fields))
            .collect())
    }

    async fn fetch_by_id(
        &self,
        entity: EntityType,
        id: RecordId,
        fields: FieldSpec,
    ) -> StoreResult<Option<Record>> {
        Ok(self
            .tables
            .get(&entity)
            .and_then(|table| table.rows.get(&id).map(|row| project(row, fields))))
    }

    async fn create(&self, entity: EntityType, records: Vec<Record>) -> StoreResult<BatchOutcome> {
        let mut table = self.tables.entry(entity).or_default();

        let results = records
            .into_iter()
            .map(|mut record| {
                table.last_id += 1;
                let id = RecordId(table.last_id);
                record.insert(ID_FIELD.to_string(), Value::from(id.get()));
                table.rows.insert(id, record.clone());
                debug!(%entity, %id, "created record");
                RecordOutcome::ok(Some(record))
            })
            .collect();

        Ok(BatchOutcome::new(results))
    }

    async fn update(&self, entity: EntityType, records: Vec<Record>) -> StoreResult<BatchOutcome> {
        let mut table = self.tables.entry(entity).or_default();

        let results = records
            .into_iter()
            .map(|changes| {
                let Some(id) = record_id(&changes) else {
                    return RecordOutcome::failed("Record has no id")
                        .with_field_error(ID_FIELD, "required");
                };
                let Some(row) = table.rows.get_mut(&id) else {
                    return RecordOutcome::failed(format!("{entity} {id} not found"));
                };

                for (field, value) in changes {
                    if field != ID_FIELD {
                        row.insert(field, value);
                    }
                }
                debug!(%entity, %id, "updated record");
                RecordOutcome::ok(Some(row.clone()))
            })
            .collect();

        Ok(BatchOutcome::new(results))
    }

    async fn delete(&self, entity: EntityType, ids: Vec<RecordId>) -> StoreResult<BatchOutcome> {
        let mut table = self.tables.entry(entity).or_default();

        let results = ids
            .into_iter()
            .map(|id| match table.rows.remove(&id) {
                Some(_) => {
                    debug!(%entity, %id, "deleted record");
                    RecordOutcome::ok(None)
                }
                None => RecordOutcome::failed(format!("{entity} {id} not found")),
            })
            .collect();

        Ok(BatchOutcome::new(results))
    }
}
