//! Fintrack budget report.
//!
//! Loads the budgets page for a month and prints each budget with its
//! reconciled spending, followed by the month's totals and goal progress.
//! With the in-memory store the demo data set is seeded first.
//!
//! Usage: cargo run --bin fintrack-report [YYYY-MM]

use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use fintrack_app::display::date_label;
use fintrack_app::{BudgetsView, GoalsView, demo};
use fintrack_core::budget::StatusBand;
use fintrack_core::transaction::CashFlow;
use fintrack_shared::AppConfig;
use fintrack_shared::config::{LoggingConfig, StoreKind};
use fintrack_shared::types::{Currency, MonthToken, format_amount};
use fintrack_store::TransactionRepository;

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));
    let registry = tracing_subscriber::registry().with(filter);

    if logging.json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

const fn band_marker(band: StatusBand) -> &'static str {
    match band {
        StatusBand::Normal => "ok",
        StatusBand::Warning => "warning",
        StatusBand::OverBudget => "OVER",
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    init_tracing(&config.logging);

    let month = match std::env::args().nth(1) {
        Some(raw) => raw.parse::<MonthToken>()?,
        None => MonthToken::current(),
    };

    let store = fintrack_store::connect(&config.store)?;
    info!(kind = ?config.store.kind, %month, "record store ready");

    if config.store.kind == StoreKind::Memory {
        demo::seed(Arc::clone(&store), month).await?;
    }

    let currency = config.display.currency;
    let money = |amount| format_amount(amount, currency);

    let mut budgets = BudgetsView::new(Arc::clone(&store), month);
    budgets.load().await?;

    println!("Budgets for {}", budgets.month_label());
    let rows = budgets.rows();
    if rows.is_empty() {
        println!("  {}", budgets.empty_message());
    }
    for row in &rows {
        println!(
            "  [{:<12}] {:<20} {:>12} of {:>12}  {:>7}%  remaining {:>12}  {}",
            row.icon,
            row.category,
            money(row.spent),
            money(row.amount),
            row.progress_pct,
            money(row.remaining),
            band_marker(row.band),
        );
    }

    let summary = budgets.summary();
    println!();
    println!("  Total budgeted: {}", money(summary.total_budgeted));
    println!("  Total spent:    {}", money(summary.total_spent));
    println!("  Remaining:      {}", money(summary.remaining));
    println!(
        "  Progress:       {}% ({})",
        summary.overall_progress_pct.round_dp(2),
        band_marker(summary.band())
    );
    println!(
        "  Over budget:    {} of {}",
        summary.over_budget_count, summary.budget_count
    );

    let (start, end) = month.window();
    let month_transactions = TransactionRepository::new(Arc::clone(&store))
        .in_date_range(start, end)
        .await?;
    let flow = CashFlow::of(&month_transactions);
    println!();
    println!("Cash flow");
    println!("  Income:   {}", money(flow.income));
    println!("  Expenses: {}", money(flow.expenses));
    println!("  Net:      {}", money(flow.net()));

    let mut goals = GoalsView::new(store);
    goals.load().await?;
    print_goals(&goals, currency);

    Ok(())
}

fn print_goals(goals: &GoalsView, currency: Currency) {
    println!();
    println!("Goals");
    for goal in goals.goals() {
        let progress = GoalsView::progress(goal);
        println!(
            "  {:<20} {:>12} of {:>12}  {:>7}%  due {}{}",
            goal.name,
            format_amount(goal.current_amount, currency),
            format_amount(goal.target_amount, currency),
            progress.progress_pct.round_dp(2),
            date_label(goal.deadline),
            if progress.is_completed { "  (done)" } else { "" },
        );
    }
    println!(
        "  Saved so far: {}",
        format_amount(goals.total_saved(), currency)
    );
}
