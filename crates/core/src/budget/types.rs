//! Budget data types.

use fintrack_shared::types::{BudgetId, CategoryId, MonthToken, coerce_id, parse_amount};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::error::BudgetError;
use crate::serde_ext;

/// Progress above which a budget is shown as a warning.
pub const WARNING_THRESHOLD: Decimal = dec!(80);

/// Progress above which an aggregate is shown as over budget.
pub const OVER_BUDGET_THRESHOLD: Decimal = dec!(100);

/// A budget record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    /// Budget ID.
    pub id: BudgetId,
    /// Spending limit for the month.
    pub amount: Decimal,
    /// Month the budget applies to.
    pub month: MonthToken,
    /// Stored spent amount. Not authoritative; see `compute_spent`.
    #[serde(default)]
    pub spent: Decimal,
    /// Referenced category.
    #[serde(default, deserialize_with = "serde_ext::lookup_id")]
    pub category_id: Option<CategoryId>,
}

/// Input for creating or updating a budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewBudget {
    /// Spending limit.
    pub amount: Decimal,
    /// Month the budget applies to.
    pub month: MonthToken,
    /// Referenced category.
    pub category_id: CategoryId,
}

impl NewBudget {
    /// Builds budget input from form text, coercing each field.
    ///
    /// # Errors
    ///
    /// Returns a `BudgetError` if the amount is not a non-negative number,
    /// the month is not `YYYY-MM`, or the category is not an integer id.
    pub fn parse(amount: &str, month: &str, category_id: &str) -> Result<Self, BudgetError> {
        let amount = parse_amount(amount)?;
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(BudgetError::NegativeAmount);
        }

        Ok(Self {
            amount,
            month: month.parse()?,
            category_id: CategoryId::new(coerce_id(category_id)?),
        })
    }
}

/// Presentation band of a budget's progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusBand {
    /// Comfortably within budget.
    Normal,
    /// Past the warning threshold.
    Warning,
    /// Spending exceeds the limit.
    OverBudget,
}

impl StatusBand {
    /// Classifies a progress percentage.
    #[must_use]
    pub fn from_progress(progress_pct: Decimal) -> Self {
        if progress_pct > OVER_BUDGET_THRESHOLD {
            Self::OverBudget
        } else if progress_pct > WARNING_THRESHOLD {
            Self::Warning
        } else {
            Self::Normal
        }
    }
}

/// Derived status of a single budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetStatus {
    /// `spent / amount * 100`, not clamped; 0 when the amount is 0.
    pub progress_pct: Decimal,
    /// `amount - spent`; negative when over budget.
    pub remaining: Decimal,
    /// Whether spending exceeds the amount.
    pub is_over_budget: bool,
    /// Presentation band.
    pub band: StatusBand,
}

/// A budget with its reconciled spending and resolved category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconciledBudget {
    /// The budget, with `spent` replaced by the reconciled amount.
    pub budget: Budget,
    /// Name of the referenced category, if it resolved.
    pub category_name: Option<String>,
    /// Derived status.
    pub status: BudgetStatus,
}

impl ReconciledBudget {
    /// Key used when sorting by category; unresolved categories sort first.
    #[must_use]
    pub fn sort_key(&self) -> &str {
        self.category_name.as_deref().unwrap_or("")
    }
}

/// Totals over the budgets of one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BudgetSummary {
    /// Sum of budget amounts.
    pub total_budgeted: Decimal,
    /// Sum of spent amounts.
    pub total_spent: Decimal,
    /// `total_budgeted - total_spent`.
    pub remaining: Decimal,
    /// `total_spent / total_budgeted * 100`; 0 when nothing is budgeted.
    pub overall_progress_pct: Decimal,
    /// Number of budgets summarised.
    pub budget_count: usize,
    /// Number of budgets whose spending exceeds their amount.
    pub over_budget_count: usize,
}

impl BudgetSummary {
    /// Presentation band of the overall progress.
    #[must_use]
    pub fn band(&self) -> StatusBand {
        StatusBand::from_progress(self.overall_progress_pct)
    }
}
