//! Entity types and field projections.

use serde::{Deserialize, Serialize};

/// Kinds of records held by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    /// Monthly budgets.
    Budget,
    /// Income and expense categories.
    Category,
    /// Income and expense transactions.
    Transaction,
    /// Savings goals.
    Goal,
}

impl EntityType {
    /// Wire name of the entity type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Budget => "budget",
            Self::Category => "category",
            Self::Transaction => "transaction",
            Self::Goal => "goal",
        }
    }

    /// Plural noun used in log and user-facing messages.
    #[must_use]
    pub const fn plural(self) -> &'static str {
        match self {
            Self::Budget => "budgets",
            Self::Category => "categories",
            Self::Transaction => "transactions",
            Self::Goal => "goals",
        }
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields to return for each record. The `id` field is always returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec(&'static [&'static str]);

impl FieldSpec {
    /// Projection onto the given fields.
    #[must_use]
    pub const fn new(fields: &'static [&'static str]) -> Self {
        Self(fields)
    }

    /// Projection returning every field.
    #[must_use]
    pub const fn all() -> Self {
        Self(&[])
    }

    /// Listed field names; empty means all.
    #[must_use]
    pub const fn fields(&self) -> &'static [&'static str] {
        self.0
    }

    /// Returns true if `field` should be returned.
    #[must_use]
    pub fn includes(&self, field: &str) -> bool {
        field == "id" || self.0.is_empty() || self.0.contains(&field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_spec_includes() {
        let spec = FieldSpec::new(&["name", "type"]);
        assert!(spec.includes("id"));
        assert!(spec.includes("name"));
        assert!(!spec.includes("color"));
        assert!(FieldSpec::all().includes("color"));
    }

    #[test]
    fn test_entity_wire_names() {
        assert_eq!(EntityType::Budget.to_string(), "budget");
        assert_eq!(EntityType::Category.plural(), "categories");
        assert_eq!(
            serde_json::to_string(&EntityType::Transaction).unwrap(),
            "\"transaction\""
        );
    }
}
