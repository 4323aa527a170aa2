//! Per-record results of batch mutations.

use serde::{Deserialize, Serialize};

use crate::record::Record;

/// A validation message attached to one field of a failed record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    /// Label of the offending field.
    pub field_label: String,
    /// Human-readable message.
    pub message: String,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field_label, self.message)
    }
}

/// Result for one record of a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordOutcome {
    /// Whether the store applied the change.
    pub success: bool,
    /// The stored record, for successful creates and updates.
    #[serde(default, rename = "data")]
    pub record: Option<Record>,
    /// Record-level failure message.
    #[serde(default)]
    pub message: Option<String>,
    /// Field-level validation errors.
    #[serde(default)]
    pub errors: Vec<FieldError>,
}

impl RecordOutcome {
    /// A successful outcome carrying the stored record.
    #[must_use]
    pub fn ok(record: Option<Record>) -> Self {
        Self {
            success: true,
            record,
            message: None,
            errors: Vec::new(),
        }
    }

    /// A failed outcome with a record-level message.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            record: None,
            message: Some(message.into()),
            errors: Vec::new(),
        }
    }

    /// Adds a field-level error.
    #[must_use]
    pub fn with_field_error(mut self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.errors.push(FieldError {
            field_label: field.into(),
            message: message.into(),
        });
        self
    }

    /// All messages describing why this record failed.
    #[must_use]
    pub fn describe(&self) -> Vec<String> {
        self.message
            .iter()
            .cloned()
            .chain(self.errors.iter().map(ToString::to_string))
            .collect()
    }
}

/// Results of a batch create, update, or delete, in request order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchOutcome {
    /// One result per submitted record.
    pub results: Vec<RecordOutcome>,
}

impl BatchOutcome {
    /// Wraps per-record results.
    #[must_use]
    pub fn new(results: Vec<RecordOutcome>) -> Self {
        Self { results }
    }

    /// Results that succeeded.
    pub fn successes(&self) -> impl Iterator<Item = &RecordOutcome> {
        self.results.iter().filter(|r| r.success)
    }

    /// Results that failed.
    pub fn failures(&self) -> impl Iterator<Item = &RecordOutcome> {
        self.results.iter().filter(|r| !r.success)
    }

    /// The batch counts as successful when at least one record succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.successes().next().is_some()
    }

    /// Stored records of the successful results.
    #[must_use]
    pub fn into_records(self) -> Vec<Record> {
        self.results
            .into_iter()
            .filter(|r| r.success)
            .filter_map(|r| r.record)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_partial_success_counts_as_success() {
        let record = json!({"id": 1}).as_object().cloned();
        let outcome = BatchOutcome::new(vec![
            RecordOutcome::failed("duplicate"),
            RecordOutcome::ok(record.clone()),
        ]);

        assert!(outcome.is_success());
        assert_eq!(outcome.failures().count(), 1);
        assert_eq!(outcome.into_records(), vec![record.unwrap()]);
    }

    #[test]
    fn test_all_failed_is_failure() {
        let outcome = BatchOutcome::new(vec![RecordOutcome::failed("nope")]);
        assert!(!outcome.is_success());
        assert!(!BatchOutcome::default().is_success());
    }

    #[test]
    fn test_describe_collects_messages() {
        let outcome = RecordOutcome::failed("rejected")
            .with_field_error("amount", "must be a number")
            .with_field_error("month", "required");
        assert_eq!(
            outcome.describe(),
            ["rejected", "amount: must be a number", "month: required"]
        );
    }

    #[test]
    fn test_decodes_wire_shape() {
        let outcome: RecordOutcome = serde_json::from_value(json!({
            "success": false,
            "errors": [{"fieldLabel": "Amount", "message": "Required"}]
        }))
        .unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.describe(), ["Amount: Required"]);
    }
}
