//! Formatting helpers shared by the views.

use chrono::NaiveDate;
use fintrack_shared::types::MonthToken;

/// Placeholder shown for a missing date.
pub const MISSING_DATE: &str = "N/A";

/// Long month label, e.g. `March 2024`.
#[must_use]
pub fn month_label(month: MonthToken) -> String {
    month.first_day().format("%B %Y").to_string()
}

/// Short date label, e.g. `Mar 5, 2024`, or `N/A` when absent.
#[must_use]
pub fn date_label(date: Option<NaiveDate>) -> String {
    date.map_or_else(
        || MISSING_DATE.to_string(),
        |d| d.format("%b %-d, %Y").to_string(),
    )
}
