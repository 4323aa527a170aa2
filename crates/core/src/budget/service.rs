//! Budget service for status, ordering, and summary calculations.

use std::cmp::Ordering;

use fintrack_shared::types::MonthToken;
use rust_decimal::Decimal;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use super::reconcile::compute_spent;
use super::types::{Budget, BudgetStatus, BudgetSummary, ReconciledBudget, StatusBand};
use crate::category::{Category, CategoryIndex};
use crate::transaction::Transaction;

/// Decomposed and lowercased, keeping combining marks.
fn folded(name: &str) -> String {
    name.nfd().collect::<String>().to_lowercase()
}

/// Base letters only: decomposed, combining marks dropped, lowercased.
fn base_letters(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Compares two display names the way a person would order them.
///
/// Accents and case are ignored first, so `Épargne` sorts among the E's.
/// Ties fall back to accents (unaccented first), then case (lowercase
/// first).
#[must_use]
pub fn compare_names(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(&base_letters(b))
        .then_with(|| folded(a).cmp(&folded(b)))
        .then_with(|| b.cmp(a))
}

fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole > Decimal::ZERO {
        part / whole * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    }
}

/// Budget service for business logic.
pub struct BudgetService;

impl BudgetService {
    /// Derives progress, remaining amount, and band from a budget's
    /// amount and spent.
    ///
    /// Progress is the exact ratio and is not clamped, so a budget
    /// overspent by 20% reports 120. Round it only for display.
    #[must_use]
    pub fn derive_status(budget: &Budget) -> BudgetStatus {
        let progress_pct = percent_of(budget.spent, budget.amount);
        let is_over_budget = budget.spent > budget.amount;

        let band = if is_over_budget {
            StatusBand::OverBudget
        } else {
            StatusBand::from_progress(progress_pct)
        };

        BudgetStatus {
            progress_pct,
            remaining: budget.amount - budget.spent,
            is_over_budget,
            band,
        }
    }

    /// Reconciles every budget against `transactions`, sorted by category
    /// name.
    #[must_use]
    pub fn reconcile(
        budgets: &[Budget],
        categories: &[Category],
        transactions: &[Transaction],
    ) -> Vec<ReconciledBudget> {
        let index = CategoryIndex::new(categories);

        let mut reconciled: Vec<ReconciledBudget> = budgets
            .iter()
            .map(|budget| {
                let budget = Budget {
                    spent: compute_spent(budget, &index, transactions),
                    ..budget.clone()
                };
                ReconciledBudget {
                    category_name: index.resolve(budget.category_id).map(|c| c.name.clone()),
                    status: Self::derive_status(&budget),
                    budget,
                }
            })
            .collect();

        Self::sort_by_category(&mut reconciled);
        reconciled
    }

    /// Stable sort by category name, unresolved categories first.
    pub fn sort_by_category(budgets: &mut [ReconciledBudget]) {
        budgets.sort_by(|a, b| compare_names(a.sort_key(), b.sort_key()));
    }

    /// Budgets for the given month, keeping their order.
    #[must_use]
    pub fn for_month(budgets: &[ReconciledBudget], month: MonthToken) -> Vec<&ReconciledBudget> {
        budgets.iter().filter(|b| b.budget.month == month).collect()
    }

    /// Aggregates amounts and spending across `budgets`.
    #[must_use]
    pub fn summarize<'a>(budgets: impl IntoIterator<Item = &'a Budget>) -> BudgetSummary {
        let mut summary = BudgetSummary::default();

        for budget in budgets {
            summary.total_budgeted += budget.amount;
            summary.total_spent += budget.spent;
            summary.budget_count += 1;
            if budget.spent > budget.amount {
                summary.over_budget_count += 1;
            }
        }

        summary.remaining = summary.total_budgeted - summary.total_spent;
        summary.overall_progress_pct = percent_of(summary.total_spent, summary.total_budgeted);
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::EntryKind;
    use fintrack_shared::types::{BudgetId, CategoryId, TransactionId};
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn budget(id: i64, amount: Decimal, spent: Decimal) -> Budget {
        Budget {
            id: BudgetId::new(id),
            amount,
            month: "2024-03".parse().unwrap(),
            spent,
            category_id: None,
        }
    }

    fn category(id: i64, name: &str) -> Category {
        Category {
            id: CategoryId::new(id),
            name: name.to_string(),
            kind: EntryKind::Expense,
            color: "#3B82F6".to_string(),
            icon: "Circle".to_string(),
        }
    }

    #[test]
    fn test_status_over_budget() {
        let status = BudgetService::derive_status(&budget(1, dec!(500), dec!(600)));

        assert_eq!(status.remaining, dec!(-100));
        assert!(status.is_over_budget);
        assert_eq!(status.progress_pct, dec!(120));
        assert_eq!(status.band, StatusBand::OverBudget);
    }

    #[test]
    fn test_status_zero_amount_has_zero_progress() {
        let status = BudgetService::derive_status(&budget(1, dec!(0), dec!(0)));

        assert_eq!(status.progress_pct, Decimal::ZERO);
        assert_eq!(status.remaining, Decimal::ZERO);
        assert!(!status.is_over_budget);
        assert_eq!(status.band, StatusBand::Normal);
    }

    #[test]
    fn test_status_zero_amount_with_spending_is_over() {
        let status = BudgetService::derive_status(&budget(1, dec!(0), dec!(25)));

        assert_eq!(status.progress_pct, Decimal::ZERO);
        assert!(status.is_over_budget);
        assert_eq!(status.band, StatusBand::OverBudget);
    }

    #[rstest]
    #[case(dec!(0), StatusBand::Normal)]
    #[case(dec!(400), StatusBand::Normal)]
    #[case(dec!(400.02), StatusBand::Warning)]
    #[case(dec!(405), StatusBand::Warning)]
    #[case(dec!(499.99), StatusBand::Warning)]
    #[case(dec!(500), StatusBand::Warning)]
    #[case(dec!(500.01), StatusBand::OverBudget)]
    fn test_status_bands(#[case] spent: Decimal, #[case] expected: StatusBand) {
        let status = BudgetService::derive_status(&budget(1, dec!(500), spent));
        assert_eq!(status.band, expected);
    }

    #[test]
    fn test_summary() {
        let budgets = [
            budget(1, dec!(500), dec!(600)),
            budget(2, dec!(300), dec!(100)),
        ];
        let summary = BudgetService::summarize(&budgets);

        assert_eq!(summary.total_budgeted, dec!(800));
        assert_eq!(summary.total_spent, dec!(700));
        assert_eq!(summary.remaining, dec!(100));
        assert_eq!(summary.overall_progress_pct, dec!(87.5));
        assert_eq!(summary.budget_count, 2);
        assert_eq!(summary.over_budget_count, 1);
        assert_eq!(summary.band(), StatusBand::Warning);
    }

    #[test]
    fn test_summary_band_uses_exact_progress() {
        let over = BudgetService::summarize(&[budget(1, dec!(100000), dec!(100001))]);
        assert_eq!(over.over_budget_count, 1);
        assert!(over.overall_progress_pct > dec!(100));
        assert_eq!(over.band(), StatusBand::OverBudget);

        let warning = BudgetService::summarize(&[budget(1, dec!(1000), dec!(800.04))]);
        assert_eq!(warning.band(), StatusBand::Warning);
    }

    #[test]
    fn test_status_just_past_warning_threshold() {
        let status = BudgetService::derive_status(&budget(1, dec!(1000), dec!(800.04)));
        assert_eq!(status.progress_pct, dec!(80.004));
        assert_eq!(status.band, StatusBand::Warning);
    }

    #[test]
    fn test_summary_of_nothing() {
        let summary = BudgetService::summarize(&[]);
        assert_eq!(summary, BudgetSummary::default());
    }

    #[test]
    fn test_compare_names() {
        assert_eq!(compare_names("Food & Dining", "Transportation"), Ordering::Less);
        assert_eq!(compare_names("bills", "Food"), Ordering::Less);
        assert_eq!(compare_names("", "Anything"), Ordering::Less);
        assert_eq!(compare_names("rent", "Rent"), Ordering::Less);
        assert_eq!(compare_names("Rent", "Rent"), Ordering::Equal);
        assert_eq!(compare_names("Epargne", "Épargne"), Ordering::Less);
        assert_eq!(compare_names("Épargne", "Food"), Ordering::Less);
    }

    #[test]
    fn test_accented_names_sort_among_base_letters() {
        let mut names = ["Transportation", "Épargne", "Food & Dining", "Entertainment"];
        names.sort_by(|a, b| compare_names(a, b));
        assert_eq!(
            names,
            ["Entertainment", "Épargne", "Food & Dining", "Transportation"]
        );
    }

    #[test]
    fn test_reconcile_sorts_by_category_name() {
        let categories = vec![category(1, "Transportation"), category(2, "Food & Dining")];
        let mut a = budget(1, dec!(200), dec!(0));
        a.category_id = Some(CategoryId::new(1));
        let mut b = budget(2, dec!(400), dec!(0));
        b.category_id = Some(CategoryId::new(2));
        let mut orphan = budget(3, dec!(50), dec!(0));
        orphan.category_id = Some(CategoryId::new(99));

        let transactions = vec![Transaction {
            id: TransactionId::new(1),
            kind: EntryKind::Expense,
            amount: dec!(35),
            category: "Transportation".to_string(),
            description: "Bus pass".to_string(),
            date: "2024-03-04".parse().unwrap(),
            notes: String::new(),
            created_at: None,
        }];

        let reconciled = BudgetService::reconcile(&[a, b, orphan], &categories, &transactions);
        let names: Vec<_> = reconciled.iter().map(ReconciledBudget::sort_key).collect();
        assert_eq!(names, ["", "Food & Dining", "Transportation"]);

        assert_eq!(reconciled[0].budget.id, BudgetId::new(3));
        assert_eq!(reconciled[0].category_name, None);
        assert_eq!(reconciled[2].budget.spent, dec!(35));
        assert_eq!(reconciled[2].status.remaining, dec!(165));
    }

    #[test]
    fn test_sort_is_stable_for_equal_names() {
        let categories = vec![category(1, "Shopping")];
        let budgets: Vec<Budget> = (1..=3)
            .map(|id| {
                let mut b = budget(id, dec!(100), dec!(0));
                b.category_id = Some(CategoryId::new(1));
                b
            })
            .collect();

        let reconciled = BudgetService::reconcile(&budgets, &categories, &[]);
        let ids: Vec<_> = reconciled.iter().map(|r| r.budget.id.get()).collect();
        assert_eq!(ids, [1, 2, 3]);
    }

    #[test]
    fn test_for_month_filters() {
        let mut april = budget(2, dec!(100), dec!(0));
        april.month = "2024-04".parse().unwrap();
        let reconciled = BudgetService::reconcile(&[budget(1, dec!(100), dec!(0)), april], &[], &[]);

        let march = BudgetService::for_month(&reconciled, "2024-03".parse().unwrap());
        assert_eq!(march.len(), 1);
        assert_eq!(march[0].budget.id, BudgetId::new(1));
    }
}
