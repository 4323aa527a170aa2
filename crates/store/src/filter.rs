//! Query filters.
//!
//! A filter is a list of AND groups; a record matches when every condition
//! of every group matches. An empty filter matches everything.

use std::cmp::Ordering;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::record::Record;

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    /// Field equals the value.
    EqualTo,
    /// Field differs from the value.
    NotEqualTo,
    /// Field is greater than the value.
    GreaterThan,
    /// Field is greater than or equal to the value.
    GreaterThanOrEqualTo,
    /// Field is less than the value.
    LessThan,
    /// Field is less than or equal to the value.
    LessThanOrEqualTo,
}

/// A single field predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    /// Field name.
    pub field_name: String,
    /// Operator.
    pub operator: Operator,
    /// Value to compare against.
    pub value: Value,
}

impl Condition {
    /// Creates a condition.
    #[must_use]
    pub fn new(field: impl Into<String>, operator: Operator, value: impl Into<Value>) -> Self {
        Self {
            field_name: field.into(),
            operator,
            value: value.into(),
        }
    }

    /// Returns true if `record` satisfies this condition.
    ///
    /// A missing field only satisfies `NotEqualTo`.
    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        let Some(actual) = record.get(&self.field_name) else {
            return self.operator == Operator::NotEqualTo;
        };

        match self.operator {
            Operator::EqualTo => compare(actual, &self.value) == Some(Ordering::Equal),
            Operator::NotEqualTo => compare(actual, &self.value) != Some(Ordering::Equal),
            Operator::GreaterThan => compare(actual, &self.value) == Some(Ordering::Greater),
            Operator::GreaterThanOrEqualTo => matches!(
                compare(actual, &self.value),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            Operator::LessThan => compare(actual, &self.value) == Some(Ordering::Less),
            Operator::LessThanOrEqualTo => matches!(
                compare(actual, &self.value),
                Some(Ordering::Less | Ordering::Equal)
            ),
        }
    }
}

fn as_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => Decimal::from_str(&n.to_string())
            .or_else(|_| Decimal::from_scientific(&n.to_string()))
            .ok(),
        Value::String(s) => Decimal::from_str(s).ok(),
        _ => None,
    }
}

/// Orders two JSON values: numerically when both read as numbers,
/// otherwise as strings. Lookup objects compare by their `Id`.
fn compare(actual: &Value, expected: &Value) -> Option<Ordering> {
    let actual = lookup_id(actual).unwrap_or(actual);

    if let (Some(a), Some(b)) = (as_decimal(actual), as_decimal(expected)) {
        return Some(a.cmp(&b));
    }

    match (actual, expected) {
        (Value::String(a), Value::String(b)) => Some(a.as_str().cmp(b.as_str())),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        (Value::Null, Value::Null) => Some(Ordering::Equal),
        _ => None,
    }
}

fn lookup_id(value: &Value) -> Option<&Value> {
    value.as_object()?.get("Id")
}

/// Conditions that must all hold.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AndGroup {
    /// Conditions in the group.
    pub conditions: Vec<Condition>,
}

/// A filter made of AND groups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    /// Groups, all of which must match.
    pub groups: Vec<AndGroup>,
}

impl Filter {
    /// Filter that matches every record.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Filter on `field == value`.
    #[must_use]
    pub fn equals(field: &str, value: impl Into<Value>) -> Self {
        Self::none().and(Condition::new(field, Operator::EqualTo, value))
    }

    /// Filter on `start <= field <= end`.
    #[must_use]
    pub fn between(field: &str, start: impl Into<Value>, end: impl Into<Value>) -> Self {
        Self::none()
            .and(Condition::new(field, Operator::GreaterThanOrEqualTo, start))
            .and(Condition::new(field, Operator::LessThanOrEqualTo, end))
    }

    /// Adds a condition to the first group.
    #[must_use]
    pub fn and(mut self, condition: Condition) -> Self {
        match self.groups.first_mut() {
            Some(group) => group.conditions.push(condition),
            None => self.groups.push(AndGroup {
                conditions: vec![condition],
            }),
        }
        self
    }

    /// Returns true if the filter has no conditions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(|g| g.conditions.is_empty())
    }

    /// Returns true if `record` satisfies every group.
    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        self.groups
            .iter()
            .all(|group| group.conditions.iter().all(|c| c.matches(record)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn record(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[rstest]
    #[case(Operator::EqualTo, json!("2024-03"), true)]
    #[case(Operator::NotEqualTo, json!("2024-03"), false)]
    #[case(Operator::EqualTo, json!("2024-04"), false)]
    #[case(Operator::LessThan, json!("2024-04"), true)]
    #[case(Operator::GreaterThan, json!("2024-02"), true)]
    #[case(Operator::GreaterThanOrEqualTo, json!("2024-03"), true)]
    #[case(Operator::LessThanOrEqualTo, json!("2024-02"), false)]
    fn test_string_conditions(
        #[case] operator: Operator,
        #[case] value: Value,
        #[case] expected: bool,
    ) {
        let row = record(json!({"month": "2024-03"}));
        assert_eq!(Condition::new("month", operator, value).matches(&row), expected);
    }

    #[test]
    fn test_numbers_compare_numerically() {
        let row = record(json!({"amount": "100.50", "category_id": 9}));
        assert!(Condition::new("amount", Operator::GreaterThan, 20).matches(&row));
        assert!(Condition::new("amount", Operator::EqualTo, 100.5).matches(&row));
        assert!(Condition::new("category_id", Operator::EqualTo, 9).matches(&row));
        assert!(Condition::new("category_id", Operator::EqualTo, "9").matches(&row));
    }

    #[test]
    fn test_lookup_objects_compare_by_id() {
        let row = record(json!({"category_id": {"Id": 3, "Name": "Shopping"}}));
        assert!(Filter::equals("category_id", 3).matches(&row));
        assert!(!Filter::equals("category_id", 4).matches(&row));
    }

    #[test]
    fn test_missing_field() {
        let row = record(json!({"name": "x"}));
        assert!(!Filter::equals("type", "expense").matches(&row));
        assert!(Condition::new("type", Operator::NotEqualTo, "expense").matches(&row));
    }

    #[test]
    fn test_between_is_inclusive() {
        let filter = Filter::between("date", "2024-03-01", "2024-03-31");
        assert!(filter.matches(&record(json!({"date": "2024-03-01"}))));
        assert!(filter.matches(&record(json!({"date": "2024-03-31"}))));
        assert!(!filter.matches(&record(json!({"date": "2024-04-01"}))));
        assert_eq!(filter.groups.len(), 1);
        assert_eq!(filter.groups[0].conditions.len(), 2);
    }

    #[test]
    fn test_empty_filter_matches_all() {
        assert!(Filter::none().is_empty());
        assert!(Filter::none().matches(&record(json!({}))));
    }

    #[test]
    fn test_wire_shape() {
        let filter = Filter::equals("type", "income");
        assert_eq!(
            serde_json::to_value(&filter).unwrap(),
            json!({"groups": [{"conditions": [
                {"fieldName": "type", "operator": "EqualTo", "value": "income"}
            ]}]})
        );
    }
}
