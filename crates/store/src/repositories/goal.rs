//! Savings goal repository.

use std::sync::Arc;

use chrono::Utc;
use fintrack_core::goal::{Goal, GoalProgress, GoalService, NewGoal};
use fintrack_shared::types::GoalId;
use serde_json::Value;

use super::{EntityTable, RepoResult};
use crate::entity::{EntityType, FieldSpec};
use crate::filter::Filter;
use crate::record::to_record;
use crate::store::RecordStore;

/// Fields fetched for goals.
pub const GOAL_FIELDS: FieldSpec = FieldSpec::new(&[
    "name",
    "target_amount",
    "current_amount",
    "deadline",
    "created_at",
]);

/// Goal repository for savings goal record operations.
#[derive(Clone)]
pub struct GoalRepository {
    table: EntityTable,
}

impl GoalRepository {
    /// Creates a new goal repository.
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            table: EntityTable::new(store, EntityType::Goal, GOAL_FIELDS),
        }
    }

    /// Lists every goal.
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails.
    pub async fn list(&self) -> RepoResult<Vec<Goal>> {
        self.table.list(&Filter::none()).await
    }

    /// Gets a goal by id, or `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails or the record is malformed.
    pub async fn get(&self, id: GoalId) -> RepoResult<Option<Goal>> {
        self.table.get(id.record()).await
    }

    /// Creates a goal stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails or rejects the record.
    pub async fn create(&self, input: &NewGoal) -> RepoResult<Goal> {
        let mut record = to_record(input)?;
        record.insert(
            "created_at".to_string(),
            Value::from(Utc::now().to_rfc3339()),
        );
        self.table.create(record).await
    }

    /// Replaces a goal's fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails or rejects the record.
    pub async fn update(&self, id: GoalId, input: &NewGoal) -> RepoResult<Goal> {
        self.table.update(id.record(), to_record(input)?).await
    }

    /// Deletes a goal.
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails or rejects the delete.
    pub async fn delete(&self, id: GoalId) -> RepoResult<()> {
        self.table.delete(id.record()).await
    }

    /// Goals still being saved for.
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails.
    pub async fn active(&self) -> RepoResult<Vec<Goal>> {
        let goals = self.list().await?;
        Ok(GoalService::active(&goals).into_iter().cloned().collect())
    }

    /// Goals whose target has been reached.
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails.
    pub async fn completed(&self) -> RepoResult<Vec<Goal>> {
        let goals = self.list().await?;
        Ok(GoalService::completed(&goals).into_iter().cloned().collect())
    }

    /// Adds `amount` (form text) to a goal's current amount.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no goal has this id,
    /// `RepositoryError::Goal` if `amount` is not a number, or an error if
    /// the store request fails.
    pub async fn add_funds(&self, id: GoalId, amount: &str) -> RepoResult<Goal> {
        let goal: Goal = self.table.require(id.record()).await?;
        let funded = GoalService::add_funds(&goal, amount)?;
        self.update(id, &funded.to_input()).await
    }

    /// Progress of a goal towards its target.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no goal has this id, or an
    /// error if the store request fails.
    pub async fn progress(&self, id: GoalId) -> RepoResult<GoalProgress> {
        let goal: Goal = self.table.require(id.record()).await?;
        Ok(GoalService::progress(&goal))
    }
}
