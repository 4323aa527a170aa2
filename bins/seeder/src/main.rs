//! Record store seeder for Fintrack development and testing.
//!
//! Seeds the default categories plus a month of demo transactions, budgets
//! and goals into the configured record store.
//!
//! Usage: cargo run --bin seeder [YYYY-MM]

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use fintrack_app::demo;
use fintrack_shared::AppConfig;
use fintrack_shared::config::StoreKind;
use fintrack_shared::types::MonthToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let month = match std::env::args().nth(1) {
        Some(raw) => raw.parse::<MonthToken>()?,
        None => MonthToken::current(),
    };

    if config.store.kind == StoreKind::Memory {
        warn!("store.kind is memory; seeded records are discarded on exit");
    }

    println!("Connecting to record store...");
    let store = fintrack_store::connect(&config.store)?;

    println!("Seeding demo data for {month}...");
    let report = demo::seed(store, month).await?;
    info!(?report, "seeding finished");

    println!("  Categories:   {}", report.categories);
    println!("  Transactions: {}", report.transactions);
    println!("  Budgets:      {}", report.budgets);
    println!("  Goals:        {}", report.goals);
    println!("Seeding complete!");

    Ok(())
}
