//! Income and expense transactions.

use chrono::{DateTime, NaiveDate, Utc};
use fintrack_shared::types::TransactionId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::category::EntryKind;
use crate::serde_ext;

/// A transaction record.
///
/// `amount` is a non-negative magnitude; the direction comes from `kind`.
/// `category` holds the category *name*, not its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction ID.
    pub id: TransactionId,
    /// Income or expense.
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Amount.
    pub amount: Decimal,
    /// Category name.
    #[serde(default)]
    pub category: String,
    /// Short description.
    #[serde(default)]
    pub description: String,
    /// Calendar date the transaction happened on.
    #[serde(deserialize_with = "serde_ext::date")]
    pub date: NaiveDate,
    /// Free-text notes.
    #[serde(default)]
    pub notes: String,
    /// When the record was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Transaction {
    /// Returns true for expense transactions.
    #[must_use]
    pub fn is_expense(&self) -> bool {
        self.kind == EntryKind::Expense
    }

    /// Amount with the sign implied by the kind (expenses negative).
    #[must_use]
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            EntryKind::Income => self.amount,
            EntryKind::Expense => -self.amount,
        }
    }
}

/// Input for creating or fully replacing a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTransaction {
    /// Income or expense.
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Amount.
    pub amount: Decimal,
    /// Category name.
    pub category: String,
    /// Short description.
    pub description: String,
    /// Calendar date.
    pub date: NaiveDate,
    /// Free-text notes; empty when not given.
    pub notes: String,
}

/// Totals over a set of transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CashFlow {
    /// Sum of income amounts.
    pub income: Decimal,
    /// Sum of expense amounts.
    pub expenses: Decimal,
}

impl CashFlow {
    /// Tallies income and expenses.
    #[must_use]
    pub fn of<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Self {
        transactions
            .into_iter()
            .fold(Self::default(), |mut acc, t| {
                match t.kind {
                    EntryKind::Income => acc.income += t.amount,
                    EntryKind::Expense => acc.expenses += t.amount,
                }
                acc
            })
    }

    /// Income minus expenses.
    #[must_use]
    pub fn net(self) -> Decimal {
        self.income - self.expenses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn transaction(kind: EntryKind, amount: Decimal) -> Transaction {
        Transaction {
            id: TransactionId::new(1),
            kind,
            amount,
            category: "Shopping".to_string(),
            description: String::new(),
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            notes: String::new(),
            created_at: None,
        }
    }

    #[test]
    fn test_signed_amount() {
        assert_eq!(
            transaction(EntryKind::Income, dec!(10)).signed_amount(),
            dec!(10)
        );
        assert_eq!(
            transaction(EntryKind::Expense, dec!(10)).signed_amount(),
            dec!(-10)
        );
    }

    #[test]
    fn test_cash_flow() {
        let list = [
            transaction(EntryKind::Income, dec!(2500)),
            transaction(EntryKind::Expense, dec!(120.40)),
            transaction(EntryKind::Expense, dec!(79.60)),
        ];
        let flow = CashFlow::of(&list);
        assert_eq!(flow.income, dec!(2500));
        assert_eq!(flow.expenses, dec!(200.00));
        assert_eq!(flow.net(), dec!(2300));
    }

    #[test]
    fn test_record_with_numeric_amount_and_timestamp_date() {
        let parsed: Transaction = serde_json::from_value(json!({
            "id": 8,
            "type": "expense",
            "amount": 42.15,
            "category": "Food & Dining",
            "description": "Lunch",
            "date": "2024-03-31T23:30:00Z",
        }))
        .unwrap();

        assert!(parsed.is_expense());
        assert_eq!(parsed.amount, dec!(42.15));
        assert_eq!(parsed.date, NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());
        assert_eq!(parsed.notes, "");
        assert!(parsed.created_at.is_none());
    }
}
