//! Budget repository.

use std::sync::Arc;

use fintrack_core::budget::{Budget, NewBudget};
use fintrack_shared::types::{BudgetId, CategoryId, MonthToken};
use rust_decimal::Decimal;

use super::{EntityTable, RepoResult};
use crate::entity::{EntityType, FieldSpec};
use crate::filter::{Condition, Filter, Operator};
use crate::record::{Record, to_record};
use crate::store::RecordStore;

/// Fields fetched for budgets.
pub const BUDGET_FIELDS: FieldSpec = FieldSpec::new(&["amount", "month", "spent", "category_id"]);

/// Budget repository for budget record operations.
#[derive(Clone)]
pub struct BudgetRepository {
    table: EntityTable,
}

impl BudgetRepository {
    /// Creates a new budget repository.
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            table: EntityTable::new(store, EntityType::Budget, BUDGET_FIELDS),
        }
    }

    /// Lists every budget.
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails.
    pub async fn list(&self) -> RepoResult<Vec<Budget>> {
        self.table.list(&Filter::none()).await
    }

    /// Gets a budget by id, or `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails or the record is malformed.
    pub async fn get(&self, id: BudgetId) -> RepoResult<Option<Budget>> {
        self.table.get(id.record()).await
    }

    /// Creates a budget with nothing spent.
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails or rejects the record.
    pub async fn create(&self, input: &NewBudget) -> RepoResult<Budget> {
        let mut record = to_record(input)?;
        record.insert("spent".to_string(), serde_json::to_value(Decimal::ZERO)?);
        self.table.create(record).await
    }

    /// Replaces a budget's amount, month and category. The stored spent
    /// amount is left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails or rejects the record.
    pub async fn update(&self, id: BudgetId, input: &NewBudget) -> RepoResult<Budget> {
        self.table.update(id.record(), to_record(input)?).await
    }

    /// Deletes a budget.
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails or rejects the delete.
    pub async fn delete(&self, id: BudgetId) -> RepoResult<()> {
        self.table.delete(id.record()).await
    }

    /// Lists budgets for a month.
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails.
    pub async fn by_month(&self, month: MonthToken) -> RepoResult<Vec<Budget>> {
        self.table
            .list(&Filter::equals("month", month.to_string()))
            .await
    }

    /// Lists budgets referencing a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails.
    pub async fn by_category(&self, category_id: CategoryId) -> RepoResult<Vec<Budget>> {
        self.table
            .list(&Filter::equals("category_id", category_id.get()))
            .await
    }

    /// Finds the first budget for a category and month.
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails.
    pub async fn by_category_and_month(
        &self,
        category_id: CategoryId,
        month: MonthToken,
    ) -> RepoResult<Option<Budget>> {
        let filter = Filter::equals("category_id", category_id.get()).and(Condition::new(
            "month",
            Operator::EqualTo,
            month.to_string(),
        ));
        let budgets: Vec<Budget> = self.table.list(&filter).await?;
        Ok(budgets.into_iter().next())
    }

    /// Overwrites the stored spent amount of an existing budget.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no budget has this id, or an
    /// error if the store request fails.
    pub async fn update_spent_amount(&self, id: BudgetId, spent: Decimal) -> RepoResult<Budget> {
        self.table.require::<Budget>(id.record()).await?;

        let mut record = Record::new();
        record.insert("spent".to_string(), serde_json::to_value(spent)?);
        self.table.update(id.record(), record).await
    }
}
