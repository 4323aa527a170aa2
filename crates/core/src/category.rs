//! Income and expense categories.

use std::collections::HashMap;

use fintrack_shared::types::CategoryId;
use serde::{Deserialize, Serialize};

/// Color assigned to a category created without one.
pub const DEFAULT_COLOR: &str = "#3B82F6";

/// Icon assigned to a category created without one.
pub const DEFAULT_ICON: &str = "ShoppingCart";

/// Icon used when a category name has no dedicated icon.
pub const FALLBACK_ICON: &str = "Circle";

/// Name shown for a category reference that cannot be resolved.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// Direction of money flow, shared by categories and transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Money coming in.
    Income,
    /// Money going out.
    Expense,
}

impl EntryKind {
    /// Returns the wire name of this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EntryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(format!("Unknown entry kind: {s}")),
        }
    }
}

/// A category record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category ID.
    pub id: CategoryId,
    /// Display name; transactions reference categories by this name.
    pub name: String,
    /// Whether the category classifies income or expenses.
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Display color.
    #[serde(default = "default_color")]
    pub color: String,
    /// Icon tag.
    #[serde(default = "default_icon")]
    pub icon: String,
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

fn default_icon() -> String {
    DEFAULT_ICON.to_string()
}

/// Input for creating or replacing a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewCategory {
    /// Display name.
    pub name: String,
    /// Income or expense.
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Display color.
    pub color: String,
    /// Icon tag.
    pub icon: String,
}

impl NewCategory {
    /// Creates category input, filling in the default color and icon.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            name: name.into(),
            kind,
            color: default_color(),
            icon: default_icon(),
        }
    }

    /// Overrides the color.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Overrides the icon.
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }
}

/// Returns the icon shown for a well-known category name.
#[must_use]
pub fn icon_for(name: &str) -> &'static str {
    match name {
        "Food & Dining" => "Utensils",
        "Transportation" => "Car",
        "Shopping" => "ShoppingBag",
        "Bills & Utilities" => "Receipt",
        "Healthcare" => "Heart",
        "Entertainment" => "Film",
        _ => FALLBACK_ICON,
    }
}

/// Categories keyed by id for O(1) resolution.
#[derive(Debug, Clone, Default)]
pub struct CategoryIndex<'a> {
    by_id: HashMap<CategoryId, &'a Category>,
}

impl<'a> CategoryIndex<'a> {
    /// Builds an index over `categories`.
    ///
    /// If two categories share an id the first one wins.
    #[must_use]
    pub fn new(categories: &'a [Category]) -> Self {
        let mut by_id = HashMap::with_capacity(categories.len());
        for category in categories {
            by_id.entry(category.id).or_insert(category);
        }
        Self { by_id }
    }

    /// Looks up a category by id.
    #[must_use]
    pub fn get(&self, id: CategoryId) -> Option<&'a Category> {
        self.by_id.get(&id).copied()
    }

    /// Resolves an optional reference to a category.
    #[must_use]
    pub fn resolve(&self, id: Option<CategoryId>) -> Option<&'a Category> {
        id.and_then(|id| self.get(id))
    }

    /// Name of the referenced category, or `"Unknown"`.
    #[must_use]
    pub fn display_name(&self, id: Option<CategoryId>) -> &'a str {
        self.resolve(id).map_or(UNKNOWN_CATEGORY, |c| c.name.as_str())
    }

    /// Number of distinct ids indexed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Returns true if no categories are indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
