//! Savings goals page.

use std::sync::Arc;

use fintrack_core::goal::{Goal, GoalProgress, GoalService, NewGoal};
use fintrack_shared::types::GoalId;
use fintrack_store::{GoalRepository, RecordStore, RepositoryError};
use rust_decimal::Decimal;
use tracing::{debug, error, info};

use crate::error::{LoadError, ViewError};

/// Controller for the goals page.
pub struct GoalsView {
    goals: GoalRepository,
    loaded: Vec<Goal>,
    error: Option<LoadError>,
}

impl GoalsView {
    /// Creates an empty view over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            goals: GoalRepository::new(store),
            loaded: Vec::new(),
            error: None,
        }
    }

    /// Fetches every goal, keeping the previous list on failure.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Goals` if the fetch fails.
    pub async fn load(&mut self) -> Result<(), LoadError> {
        self.error = None;
        match self.goals.list().await {
            Ok(goals) => {
                debug!(goals = goals.len(), "goals loaded");
                self.loaded = goals;
                Ok(())
            }
            Err(err) => {
                error!(error = %err, "goals loading error");
                self.error = Some(LoadError::Goals);
                Err(LoadError::Goals)
            }
        }
    }

    /// The error of the last load, if it failed.
    #[must_use]
    pub const fn error(&self) -> Option<LoadError> {
        self.error
    }

    /// Every loaded goal.
    #[must_use]
    pub fn goals(&self) -> &[Goal] {
        &self.loaded
    }

    /// Goals still being saved for.
    #[must_use]
    pub fn active(&self) -> Vec<&Goal> {
        GoalService::active(&self.loaded)
    }

    /// Goals whose target has been reached.
    #[must_use]
    pub fn completed(&self) -> Vec<&Goal> {
        GoalService::completed(&self.loaded)
    }

    /// Progress of a loaded goal.
    #[must_use]
    pub fn progress(goal: &Goal) -> GoalProgress {
        GoalService::progress(goal)
    }

    /// Sum of current amounts across every goal.
    #[must_use]
    pub fn total_saved(&self) -> Decimal {
        self.loaded.iter().map(|g| g.current_amount).sum()
    }

    /// Creates a goal and reloads.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::Action` if the store call fails.
    pub async fn add_goal(&mut self, input: &NewGoal) -> Result<&'static str, ViewError> {
        let result = self.goals.create(input).await.map(|_| ());
        self.finish(result, "create").await?;
        Ok("Goal created successfully")
    }

    /// Creates a goal from form text and reloads.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::Invalid` for unreadable input and
    /// `ViewError::Action` if the store call fails.
    pub async fn submit_goal_form(
        &mut self,
        name: &str,
        target: &str,
        current: &str,
        deadline: &str,
    ) -> Result<&'static str, ViewError> {
        let input = NewGoal::parse(name, target, current, deadline)?;
        self.add_goal(&input).await
    }

    /// Updates a goal and reloads.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::Action` if the store call fails.
    pub async fn update_goal(
        &mut self,
        id: GoalId,
        input: &NewGoal,
    ) -> Result<&'static str, ViewError> {
        let result = self.goals.update(id, input).await.map(|_| ());
        self.finish(result, "update").await?;
        Ok("Goal updated successfully")
    }

    /// Deletes a goal and reloads.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::Action` if the store call fails.
    pub async fn delete_goal(&mut self, id: GoalId) -> Result<&'static str, ViewError> {
        let result = self.goals.delete(id).await;
        self.finish(result, "delete").await?;
        Ok("Goal deleted successfully")
    }

    /// Adds funds (form text) to a goal and reloads.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::Invalid` if the amount is not a number and
    /// `ViewError::Action` if the goal is missing or the store call fails.
    pub async fn add_funds(&mut self, id: GoalId, amount: &str) -> Result<&'static str, ViewError> {
        let result = match self.goals.add_funds(id, amount).await {
            Err(RepositoryError::Goal(invalid)) => return Err(invalid.into()),
            other => other.map(|_| ()),
        };
        self.finish(result, "add funds to").await?;
        Ok("Funds added successfully")
    }

    async fn finish(
        &mut self,
        result: Result<(), RepositoryError>,
        action: &'static str,
    ) -> Result<(), ViewError> {
        if let Err(err) = result {
            error!(action, error = %err, "failed to {action} goal");
            return Err(ViewError::action(action, "goal"));
        }
        info!(action, "goal saved");
        // A failed reload is already recorded on the view.
        let _ = self.load().await;
        Ok(())
    }
}
