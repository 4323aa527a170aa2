//! Untyped records and conversions to and from domain types.

use fintrack_shared::types::{RecordId, coerce_id};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use crate::entity::FieldSpec;

/// A record as the store sees it: a JSON object keyed by field name.
pub type Record = Map<String, Value>;

/// Name of the identifier field on every record.
pub const ID_FIELD: &str = "id";

/// Reads the record's id, coercing numeric strings.
#[must_use]
pub fn record_id(record: &Record) -> Option<RecordId> {
    match record.get(ID_FIELD)? {
        Value::Number(n) => n.as_i64().map(RecordId),
        Value::String(s) => coerce_id(s).ok().map(RecordId),
        _ => None,
    }
}

/// Serializes a value into a record.
///
/// # Errors
///
/// Returns an error if the value does not serialize to a JSON object.
pub fn to_record<T: Serialize>(value: &T) -> Result<Record, serde_json::Error> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(<serde_json::Error as serde::ser::Error>::custom(format!(
            "expected an object, got {other}"
        ))),
    }
}

/// Deserializes a record into a domain type.
///
/// # Errors
///
/// Returns an error if required fields are missing or mistyped.
pub fn from_record<T: DeserializeOwned>(record: Record) -> Result<T, serde_json::Error> {
    serde_json::from_value(Value::Object(record))
}

/// Keeps only the fields selected by `spec`.
#[must_use]
pub fn project(record: &Record, spec: FieldSpec) -> Record {
    record
        .iter()
        .filter(|(field, _)| spec.includes(field))
        .map(|(field, value)| (field.clone(), value.clone()))
        .collect()
}
