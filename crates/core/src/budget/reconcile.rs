//! Reconciliation of budgets against recorded spending.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::types::Budget;
use crate::category::CategoryIndex;
use crate::transaction::Transaction;

/// Computes how much has been spent against `budget`.
///
/// Spent is the sum of expense transactions whose category name equals the
/// budget's category name (case-sensitive) and whose date lies within the
/// budget's month, both ends inclusive. A budget whose category does not
/// resolve has spent zero.
#[must_use]
pub fn compute_spent(
    budget: &Budget,
    categories: &CategoryIndex<'_>,
    transactions: &[Transaction],
) -> Decimal {
    let Some(category) = categories.resolve(budget.category_id) else {
        return Decimal::ZERO;
    };

    expenses_in_window(&category.name, budget.month.window(), transactions)
}

/// Sums expense amounts for `category_name` dated within `[start, end]`.
#[must_use]
pub fn expenses_in_window(
    category_name: &str,
    (start, end): (NaiveDate, NaiveDate),
    transactions: &[Transaction],
) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.is_expense() && t.category == category_name)
        .filter(|t| t.date >= start && t.date <= end)
        .map(|t| t.amount)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::{Category, EntryKind};
    use fintrack_shared::types::{BudgetId, CategoryId, MonthToken, TransactionId};
    use rust_decimal_macros::dec;

    fn categories() -> Vec<Category> {
        vec![
            Category {
                id: CategoryId::new(1),
                name: "Food & Dining".to_string(),
                kind: EntryKind::Expense,
                color: "#F59E0B".to_string(),
                icon: "Utensils".to_string(),
            },
            Category {
                id: CategoryId::new(2),
                name: "Salary".to_string(),
                kind: EntryKind::Income,
                color: "#10B981".to_string(),
                icon: "Wallet".to_string(),
            },
        ]
    }

    fn tx(id: i64, kind: EntryKind, amount: Decimal, category: &str, date: &str) -> Transaction {
        Transaction {
            id: TransactionId::new(id),
            kind,
            amount,
            category: category.to_string(),
            description: String::new(),
            date: date.parse().unwrap(),
            notes: String::new(),
            created_at: None,
        }
    }

    fn budget(category_id: Option<i64>, month: &str) -> Budget {
        Budget {
            id: BudgetId::new(1),
            amount: dec!(500),
            month: month.parse::<MonthToken>().unwrap(),
            spent: dec!(999),
            category_id: category_id.map(CategoryId::new),
        }
    }

    #[test]
    fn test_sums_matching_expenses_in_month() {
        let categories = categories();
        let index = CategoryIndex::new(&categories);
        let transactions = vec![
            tx(1, EntryKind::Expense, dec!(45.50), "Food & Dining", "2024-03-01"),
            tx(2, EntryKind::Expense, dec!(30.25), "Food & Dining", "2024-03-31"),
            tx(3, EntryKind::Expense, dec!(99), "Food & Dining", "2024-04-01"),
            tx(4, EntryKind::Expense, dec!(12), "Food & Dining", "2024-02-29"),
            tx(5, EntryKind::Income, dec!(200), "Food & Dining", "2024-03-10"),
            tx(6, EntryKind::Expense, dec!(7), "food & dining", "2024-03-10"),
            tx(7, EntryKind::Expense, dec!(60), "Transportation", "2024-03-10"),
        ];

        let spent = compute_spent(&budget(Some(1), "2024-03"), &index, &transactions);
        assert_eq!(spent, dec!(75.75));
    }

    #[test]
    fn test_unresolved_category_is_zero() {
        let categories = categories();
        let index = CategoryIndex::new(&categories);
        let transactions = vec![tx(
            1,
            EntryKind::Expense,
            dec!(45),
            "Food & Dining",
            "2024-03-05",
        )];

        assert_eq!(
            compute_spent(&budget(Some(42), "2024-03"), &index, &transactions),
            Decimal::ZERO
        );
        assert_eq!(
            compute_spent(&budget(None, "2024-03"), &index, &transactions),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_stored_spent_is_ignored() {
        let categories = categories();
        let index = CategoryIndex::new(&categories);
        assert_eq!(
            compute_spent(&budget(Some(1), "2024-03"), &index, &[]),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_leap_february_window() {
        let categories = categories();
        let index = CategoryIndex::new(&categories);
        let transactions = vec![tx(
            1,
            EntryKind::Expense,
            dec!(10),
            "Food & Dining",
            "2024-02-29",
        )];
        assert_eq!(
            compute_spent(&budget(Some(1), "2024-02"), &index, &transactions),
            dec!(10)
        );
    }
}
