//! Goal progress calculations.

use fintrack_shared::types::parse_amount;
use rust_decimal::Decimal;

use super::error::GoalError;
use super::types::{Goal, GoalProgress};

/// Goal service for business logic.
pub struct GoalService;

impl GoalService {
    /// Calculates progress towards a goal.
    ///
    /// A zero target is complete as soon as the current amount is
    /// non-negative.
    #[must_use]
    pub fn progress(goal: &Goal) -> GoalProgress {
        let is_completed = goal.is_completed();

        let progress_pct = if goal.target_amount > Decimal::ZERO {
            (goal.current_amount / goal.target_amount * Decimal::ONE_HUNDRED)
                .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
        } else if is_completed {
            Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        };

        GoalProgress {
            progress_pct,
            remaining: (goal.target_amount - goal.current_amount).max(Decimal::ZERO),
            is_completed,
        }
    }

    /// Adds `amount` (form text) to the goal's current amount.
    ///
    /// # Errors
    ///
    /// Returns `GoalError::InvalidAmount` if `amount` is not a number.
    pub fn add_funds(goal: &Goal, amount: &str) -> Result<Goal, GoalError> {
        let amount = parse_amount(amount)?;
        Ok(Goal {
            current_amount: goal.current_amount + amount,
            ..goal.clone()
        })
    }

    /// Goals still being saved for.
    #[must_use]
    pub fn active(goals: &[Goal]) -> Vec<&Goal> {
        goals.iter().filter(|g| !g.is_completed()).collect()
    }

    /// Goals whose target has been reached.
    #[must_use]
    pub fn completed(goals: &[Goal]) -> Vec<&Goal> {
        goals.iter().filter(|g| g.is_completed()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goal::NewGoal;
    use fintrack_shared::types::GoalId;
    use proptest::prelude::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn goal(id: i64, target: Decimal, current: Decimal) -> Goal {
        Goal {
            id: GoalId::new(id),
            name: "Emergency fund".to_string(),
            target_amount: target,
            current_amount: current,
            deadline: None,
            created_at: None,
        }
    }

    #[test]
    fn test_progress_clamped_when_exceeded() {
        let progress = GoalService::progress(&goal(1, dec!(1000), dec!(1200)));

        assert_eq!(progress.progress_pct, dec!(100));
        assert_eq!(progress.remaining, dec!(0));
        assert!(progress.is_completed);
    }

    #[rstest]
    #[case(dec!(1000), dec!(0), dec!(0), dec!(1000), false)]
    #[case(dec!(1000), dec!(250), dec!(25), dec!(750), false)]
    #[case(dec!(8), dec!(1), dec!(12.5), dec!(7), false)]
    #[case(dec!(100000), dec!(99999), dec!(99.999), dec!(1), false)]
    #[case(dec!(1000), dec!(1000), dec!(100), dec!(0), true)]
    #[case(dec!(0), dec!(0), dec!(100), dec!(0), true)]
    #[case(dec!(500), dec!(-50), dec!(0), dec!(550), false)]
    fn test_progress_cases(
        #[case] target: Decimal,
        #[case] current: Decimal,
        #[case] expected_pct: Decimal,
        #[case] expected_remaining: Decimal,
        #[case] completed: bool,
    ) {
        let progress = GoalService::progress(&goal(1, target, current));
        assert_eq!(progress.progress_pct, expected_pct);
        assert_eq!(progress.remaining, expected_remaining);
        assert_eq!(progress.is_completed, completed);
    }

    #[test]
    fn test_add_funds() {
        let updated = GoalService::add_funds(&goal(1, dec!(1000), dec!(250)), "100.50").unwrap();
        assert_eq!(updated.current_amount, dec!(350.50));
        assert_eq!(updated.target_amount, dec!(1000));

        assert!(matches!(
            GoalService::add_funds(&goal(1, dec!(1000), dec!(250)), "a lot"),
            Err(GoalError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_active_and_completed_partition() {
        let goals = vec![
            goal(1, dec!(1000), dec!(200)),
            goal(2, dec!(500), dec!(500)),
            goal(3, dec!(300), dec!(301)),
        ];

        let active: Vec<_> = GoalService::active(&goals).iter().map(|g| g.id.get()).collect();
        let completed: Vec<_> = GoalService::completed(&goals)
            .iter()
            .map(|g| g.id.get())
            .collect();
        assert_eq!(active, [1]);
        assert_eq!(completed, [2, 3]);
    }

    #[test]
    fn test_new_goal_parse() {
        let input = NewGoal::parse(" Vacation ", "2500", "", "2025-06-30").unwrap();
        assert_eq!(input.name, "Vacation");
        assert_eq!(input.target_amount, dec!(2500));
        assert_eq!(input.current_amount, Decimal::ZERO);
        assert_eq!(input.deadline.unwrap().to_string(), "2025-06-30");

        assert!(matches!(
            NewGoal::parse("", "1", "0", ""),
            Err(GoalError::EmptyName)
        ));
        assert!(matches!(
            NewGoal::parse("Car", "1", "0", "June"),
            Err(GoalError::InvalidDeadline(_))
        ));
        assert!(NewGoal::parse("Car", "?", "0", "").is_err());
    }

    proptest! {
        #[test]
        fn prop_progress_bounds(
            target in 0i64..1_000_000,
            current in 0i64..2_000_000,
        ) {
            let progress = GoalService::progress(&goal(1, Decimal::from(target), Decimal::from(current)));

            prop_assert!(progress.progress_pct >= Decimal::ZERO);
            prop_assert!(progress.progress_pct <= Decimal::ONE_HUNDRED);
            prop_assert!(progress.remaining >= Decimal::ZERO);
            prop_assert_eq!(progress.is_completed, current >= target);
            prop_assert_eq!(progress.progress_pct == Decimal::ONE_HUNDRED, current >= target);
        }
    }
}
