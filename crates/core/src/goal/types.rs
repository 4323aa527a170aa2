//! Goal data types.

use chrono::{DateTime, NaiveDate, Utc};
use fintrack_shared::types::{GoalId, parse_amount};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::GoalError;
use crate::serde_ext;

/// A savings goal record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    /// Goal ID.
    pub id: GoalId,
    /// Goal name.
    pub name: String,
    /// Amount to save.
    pub target_amount: Decimal,
    /// Amount saved so far.
    #[serde(default)]
    pub current_amount: Decimal,
    /// Date the goal should be reached by.
    #[serde(default, deserialize_with = "serde_ext::opt_date")]
    pub deadline: Option<NaiveDate>,
    /// When the record was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Goal {
    /// Returns true once the saved amount reaches the target.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.current_amount >= self.target_amount
    }

    /// Input that would recreate this goal as-is.
    #[must_use]
    pub fn to_input(&self) -> NewGoal {
        NewGoal {
            name: self.name.clone(),
            target_amount: self.target_amount,
            current_amount: self.current_amount,
            deadline: self.deadline,
        }
    }
}

/// Input for creating or replacing a goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewGoal {
    /// Goal name.
    pub name: String,
    /// Amount to save.
    pub target_amount: Decimal,
    /// Amount already saved.
    pub current_amount: Decimal,
    /// Target date.
    pub deadline: Option<NaiveDate>,
}

impl NewGoal {
    /// Builds goal input from form text.
    ///
    /// A blank or non-numeric current amount counts as zero; a blank
    /// deadline means none.
    ///
    /// # Errors
    ///
    /// Returns a `GoalError` for an empty name, a non-numeric target, or a
    /// malformed deadline.
    pub fn parse(name: &str, target: &str, current: &str, deadline: &str) -> Result<Self, GoalError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GoalError::EmptyName);
        }

        let deadline = match deadline.trim() {
            "" => None,
            raw => Some(
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .map_err(|_| GoalError::InvalidDeadline(raw.to_string()))?,
            ),
        };

        Ok(Self {
            name: name.to_string(),
            target_amount: parse_amount(target)?,
            current_amount: parse_amount(current).unwrap_or(Decimal::ZERO),
            deadline,
        })
    }
}

/// Derived progress of a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalProgress {
    /// `current / target * 100`, clamped to `[0, 100]`.
    pub progress_pct: Decimal,
    /// `target - current`, never below zero.
    pub remaining: Decimal,
    /// Whether the target has been reached.
    pub is_completed: bool,
}
