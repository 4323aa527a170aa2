//! Category repository.

use std::sync::Arc;

use fintrack_core::category::{Category, EntryKind, NewCategory};
use fintrack_shared::types::CategoryId;

use super::{EntityTable, RepoResult};
use crate::entity::{EntityType, FieldSpec};
use crate::filter::Filter;
use crate::record::to_record;
use crate::store::RecordStore;

/// Fields fetched for categories.
pub const CATEGORY_FIELDS: FieldSpec = FieldSpec::new(&["name", "type", "color", "icon"]);

/// Category repository for category record operations.
#[derive(Clone)]
pub struct CategoryRepository {
    table: EntityTable,
}

impl CategoryRepository {
    /// Creates a new category repository.
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            table: EntityTable::new(store, EntityType::Category, CATEGORY_FIELDS),
        }
    }

    /// Lists every category.
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails.
    pub async fn list(&self) -> RepoResult<Vec<Category>> {
        self.table.list(&Filter::none()).await
    }

    /// Gets a category by id, or `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails or the record is malformed.
    pub async fn get(&self, id: CategoryId) -> RepoResult<Option<Category>> {
        self.table.get(id.record()).await
    }

    /// Creates a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails or rejects the record.
    pub async fn create(&self, input: &NewCategory) -> RepoResult<Category> {
        self.table.create(to_record(input)?).await
    }

    /// Replaces a category's fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails or rejects the record.
    pub async fn update(&self, id: CategoryId, input: &NewCategory) -> RepoResult<Category> {
        self.table.update(id.record(), to_record(input)?).await
    }

    /// Deletes a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails or rejects the delete.
    pub async fn delete(&self, id: CategoryId) -> RepoResult<()> {
        self.table.delete(id.record()).await
    }

    /// Lists categories of one kind.
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails.
    pub async fn by_kind(&self, kind: EntryKind) -> RepoResult<Vec<Category>> {
        self.table
            .list(&Filter::equals("type", kind.as_str()))
            .await
    }

    /// Lists income categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails.
    pub async fn income(&self) -> RepoResult<Vec<Category>> {
        self.by_kind(EntryKind::Income).await
    }

    /// Lists expense categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails.
    pub async fn expense(&self) -> RepoResult<Vec<Category>> {
        self.by_kind(EntryKind::Expense).await
    }
}
