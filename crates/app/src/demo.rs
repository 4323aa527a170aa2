//! Demo data for local development and seeding.

use std::sync::Arc;

use chrono::{Days, NaiveDate};
use fintrack_core::budget::NewBudget;
use fintrack_core::category::{EntryKind, NewCategory, icon_for};
use fintrack_core::goal::NewGoal;
use fintrack_core::transaction::NewTransaction;
use fintrack_shared::types::MonthToken;
use fintrack_store::repositories::RepoResult;
use fintrack_store::{
    BudgetRepository, CategoryRepository, GoalRepository, RecordStore, TransactionRepository,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::info;

/// Default categories: name, kind, color.
pub const DEFAULT_CATEGORIES: &[(&str, EntryKind, &str)] = &[
    ("Food & Dining", EntryKind::Expense, "#EF4444"),
    ("Transportation", EntryKind::Expense, "#F59E0B"),
    ("Shopping", EntryKind::Expense, "#8B5CF6"),
    ("Bills & Utilities", EntryKind::Expense, "#3B82F6"),
    ("Healthcare", EntryKind::Expense, "#EC4899"),
    ("Entertainment", EntryKind::Expense, "#10B981"),
    ("Salary", EntryKind::Income, "#22C55E"),
    ("Freelance", EntryKind::Income, "#14B8A6"),
];

/// Monthly limits for the demo budgets.
const BUDGET_LIMITS: &[(&str, Decimal)] = &[
    ("Food & Dining", dec!(600)),
    ("Transportation", dec!(200)),
    ("Shopping", dec!(300)),
    ("Bills & Utilities", dec!(450)),
    ("Entertainment", dec!(150)),
];

/// Demo expenses: category, amount, day of month, description.
const EXPENSES: &[(&str, Decimal, u64, &str)] = &[
    ("Food & Dining", dec!(84.20), 2, "Groceries"),
    ("Food & Dining", dec!(42.50), 9, "Dinner out"),
    ("Food & Dining", dec!(396.75), 16, "Groceries"),
    ("Transportation", dec!(60), 1, "Transit pass"),
    ("Transportation", dec!(38.40), 12, "Fuel"),
    ("Shopping", dec!(129.99), 7, "Running shoes"),
    ("Shopping", dec!(219.00), 21, "Headphones"),
    ("Bills & Utilities", dec!(95.10), 5, "Electricity"),
    ("Bills & Utilities", dec!(60), 5, "Internet"),
    ("Healthcare", dec!(25), 14, "Pharmacy"),
    ("Entertainment", dec!(15.99), 3, "Streaming"),
];

/// Counts of records created by [`seed`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Categories created.
    pub categories: usize,
    /// Transactions created.
    pub transactions: usize,
    /// Budgets created.
    pub budgets: usize,
    /// Goals created.
    pub goals: usize,
}

fn day(month: MonthToken, offset: u64) -> NaiveDate {
    let first = month.first_day();
    first
        .checked_add_days(Days::new(offset.saturating_sub(1)))
        .filter(|d| month.contains(*d))
        .unwrap_or(first)
}

/// Populates `store` with default categories and a month of demo activity.
///
/// # Errors
///
/// Returns an error if any record cannot be created.
pub async fn seed(store: Arc<dyn RecordStore>, month: MonthToken) -> RepoResult<SeedReport> {
    let categories = CategoryRepository::new(Arc::clone(&store));
    let transactions = TransactionRepository::new(Arc::clone(&store));
    let budgets = BudgetRepository::new(Arc::clone(&store));
    let goals = GoalRepository::new(store);
    let mut report = SeedReport::default();

    let mut created = Vec::with_capacity(DEFAULT_CATEGORIES.len());
    for &(name, kind, color) in DEFAULT_CATEGORIES {
        let input = NewCategory::new(name, kind)
            .with_color(color)
            .with_icon(icon_for(name));
        created.push(categories.create(&input).await?);
        report.categories += 1;
    }

    for &(category, amount, offset, description) in EXPENSES {
        transactions
            .create(&NewTransaction {
                kind: EntryKind::Expense,
                amount,
                category: category.to_string(),
                description: description.to_string(),
                date: day(month, offset),
                notes: String::new(),
            })
            .await?;
        report.transactions += 1;
    }
    transactions
        .create(&NewTransaction {
            kind: EntryKind::Income,
            amount: dec!(4200),
            category: "Salary".to_string(),
            description: "Monthly salary".to_string(),
            date: day(month, 25),
            notes: String::new(),
        })
        .await?;
    report.transactions += 1;

    for &(name, amount) in BUDGET_LIMITS {
        let Some(category) = created.iter().find(|c| c.name == name) else {
            continue;
        };
        budgets
            .create(&NewBudget {
                amount,
                month,
                category_id: category.id,
            })
            .await?;
        report.budgets += 1;
    }

    for goal in [
        NewGoal {
            name: "Emergency fund".to_string(),
            target_amount: dec!(10000),
            current_amount: dec!(3500),
            deadline: Some(month.next().next().next().last_day()),
        },
        NewGoal {
            name: "New laptop".to_string(),
            target_amount: dec!(1800),
            current_amount: dec!(1800),
            deadline: None,
        },
    ] {
        goals.create(&goal).await?;
        report.goals += 1;
    }

    info!(
        %month,
        categories = report.categories,
        transactions = report.transactions,
        budgets = report.budgets,
        goals = report.goals,
        "demo data seeded"
    );
    Ok(report)
}
