//! Budgets page.
//!
//! Loads budgets, transactions and categories together, reconciles every
//! budget against the month's spending, and exposes the selected month's
//! budgets with their summary. Mutations go straight to the store and are
//! followed by a full reload.

use std::sync::Arc;

use fintrack_core::budget::{
    Budget, BudgetService, BudgetSummary, NewBudget, ReconciledBudget, StatusBand,
};
use fintrack_core::category::{Category, CategoryIndex, icon_for};
use fintrack_core::transaction::Transaction;
use fintrack_shared::types::{BudgetId, CategoryId, MonthToken};
use fintrack_store::{
    BudgetRepository, CategoryRepository, RecordStore, RepositoryError, TransactionRepository,
};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, error, info};

use crate::display::month_label;
use crate::error::{LoadError, ViewError};

/// One budget as presented on the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetRow {
    /// Budget id.
    pub id: BudgetId,
    /// Category name, or `Unknown`.
    pub category: String,
    /// Icon tag for the category.
    pub icon: &'static str,
    /// Spending limit.
    pub amount: Decimal,
    /// Reconciled spending.
    pub spent: Decimal,
    /// `amount - spent`.
    pub remaining: Decimal,
    /// Spending as a percentage of the limit, rounded to two places.
    pub progress_pct: Decimal,
    /// Presentation band.
    pub band: StatusBand,
}

#[derive(Debug, Default)]
struct Snapshot {
    budgets: Vec<Budget>,
    transactions: Vec<Transaction>,
    categories: Vec<Category>,
}

/// Controller for the budgets page.
pub struct BudgetsView {
    budgets: BudgetRepository,
    transactions: TransactionRepository,
    categories: CategoryRepository,
    selected_month: MonthToken,
    data: Snapshot,
    reconciled: Vec<ReconciledBudget>,
    error: Option<LoadError>,
    loaded: bool,
}

impl BudgetsView {
    /// Creates an empty view over `store` showing `month`.
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>, month: MonthToken) -> Self {
        Self {
            budgets: BudgetRepository::new(Arc::clone(&store)),
            transactions: TransactionRepository::new(Arc::clone(&store)),
            categories: CategoryRepository::new(store),
            selected_month: month,
            data: Snapshot::default(),
            reconciled: Vec::new(),
            error: None,
            loaded: false,
        }
    }

    /// Fetches budgets, transactions and categories concurrently.
    ///
    /// Any failure aborts the whole load and leaves the previously loaded
    /// data in place.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::BudgetData` if any of the three fetches fails.
    pub async fn load(&mut self) -> Result<(), LoadError> {
        self.error = None;

        let fetched = tokio::try_join!(
            self.budgets.list(),
            self.transactions.list(),
            self.categories.list(),
        );

        match fetched {
            Ok((budgets, transactions, categories)) => {
                debug!(
                    budgets = budgets.len(),
                    transactions = transactions.len(),
                    categories = categories.len(),
                    "budget data loaded"
                );
                self.data = Snapshot {
                    budgets,
                    transactions,
                    categories,
                };
                self.reconciled = self.reconcile();
                self.loaded = true;
                Ok(())
            }
            Err(err) => {
                error!(error = %err, "budgets loading error");
                self.error = Some(LoadError::BudgetData);
                Err(LoadError::BudgetData)
            }
        }
    }

    fn reconcile(&self) -> Vec<ReconciledBudget> {
        let Snapshot {
            budgets,
            transactions,
            categories,
        } = &self.data;

        if budgets.is_empty() || categories.is_empty() {
            return Vec::new();
        }
        BudgetService::reconcile(budgets, categories, transactions)
    }

    /// Whether a load has completed successfully.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// The error of the last load, if it failed.
    #[must_use]
    pub const fn error(&self) -> Option<LoadError> {
        self.error
    }

    /// Month currently shown.
    #[must_use]
    pub const fn selected_month(&self) -> MonthToken {
        self.selected_month
    }

    /// Shows another month. No reload is needed.
    pub fn select_month(&mut self, month: MonthToken) {
        self.selected_month = month;
    }

    /// Steps back one month.
    pub fn previous_month(&mut self) {
        self.selected_month = self.selected_month.prev();
    }

    /// Steps forward one month.
    pub fn next_month(&mut self) {
        self.selected_month = self.selected_month.next();
    }

    /// Heading for the selected month, e.g. `March 2024`.
    #[must_use]
    pub fn month_label(&self) -> String {
        month_label(self.selected_month)
    }

    /// Message shown when the selected month has no budgets.
    #[must_use]
    pub fn empty_message(&self) -> String {
        format!("No budgets for {}", self.month_label())
    }

    /// Categories as last loaded.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.data.categories
    }

    /// Every budget, reconciled and sorted by category name.
    ///
    /// Empty while either budgets or categories are empty.
    #[must_use]
    pub fn reconciled(&self) -> &[ReconciledBudget] {
        &self.reconciled
    }

    /// Reconciled budgets of the selected month.
    #[must_use]
    pub fn month_budgets(&self) -> Vec<&ReconciledBudget> {
        BudgetService::for_month(&self.reconciled, self.selected_month)
    }

    /// Totals over the selected month's budgets.
    #[must_use]
    pub fn summary(&self) -> BudgetSummary {
        BudgetService::summarize(self.month_budgets().into_iter().map(|r| &r.budget))
    }

    /// Display name of a category reference, `Unknown` if it does not resolve.
    #[must_use]
    pub fn category_name(&self, id: Option<CategoryId>) -> &str {
        CategoryIndex::new(&self.data.categories).display_name(id)
    }

    /// Icon tag for a category name.
    #[must_use]
    pub fn category_icon(name: &str) -> &'static str {
        icon_for(name)
    }

    /// The selected month's budgets as display rows.
    #[must_use]
    pub fn rows(&self) -> Vec<BudgetRow> {
        let index = CategoryIndex::new(&self.data.categories);
        self.month_budgets()
            .into_iter()
            .map(|r| {
                let category = index.display_name(r.budget.category_id).to_string();
                BudgetRow {
                    id: r.budget.id,
                    icon: icon_for(&category),
                    category,
                    amount: r.budget.amount,
                    spent: r.budget.spent,
                    remaining: r.status.remaining,
                    progress_pct: r.status.progress_pct.round_dp(2),
                    band: r.status.band,
                }
            })
            .collect()
    }

    /// Creates a budget and reloads.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::Action` if the store call fails.
    pub async fn add_budget(&mut self, input: &NewBudget) -> Result<&'static str, ViewError> {
        let result = self.budgets.create(input).await.map(|_| ());
        self.finish(result, "create").await?;
        Ok("Budget created successfully")
    }

    /// Creates a budget from form text and reloads.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::Invalid` for unreadable input and
    /// `ViewError::Action` if the store call fails.
    pub async fn submit_budget_form(
        &mut self,
        amount: &str,
        month: &str,
        category_id: &str,
    ) -> Result<&'static str, ViewError> {
        let input = NewBudget::parse(amount, month, category_id)?;
        self.add_budget(&input).await
    }

    /// Updates a budget and reloads.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::Action` if the store call fails.
    pub async fn update_budget(
        &mut self,
        id: BudgetId,
        input: &NewBudget,
    ) -> Result<&'static str, ViewError> {
        let result = self.budgets.update(id, input).await.map(|_| ());
        self.finish(result, "update").await?;
        Ok("Budget updated successfully")
    }

    /// Deletes a budget and reloads.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::Action` if the store call fails.
    pub async fn delete_budget(&mut self, id: BudgetId) -> Result<&'static str, ViewError> {
        let result = self.budgets.delete(id).await;
        self.finish(result, "delete").await?;
        Ok("Budget deleted successfully")
    }

    async fn finish(
        &mut self,
        result: Result<(), RepositoryError>,
        action: &'static str,
    ) -> Result<(), ViewError> {
        if let Err(err) = result {
            error!(action, error = %err, "failed to {action} budget");
            return Err(ViewError::action(action, "budget"));
        }
        info!(action, "budget {action}d");
        // A failed reload is already recorded on the view.
        let _ = self.load().await;
        Ok(())
    }
}
