//! Lenient deserializers for values coming back from the record store.
//!
//! Hosted record stores are loose about types: dates arrive either as plain
//! `YYYY-MM-DD` or as full timestamps, and lookup fields arrive either as a
//! bare id or as an object carrying the id and a display name.

use chrono::{DateTime, NaiveDate};
use fintrack_shared::types::coerce_id;
use serde::{Deserialize, Deserializer, de::Error as _};

fn parse_date<E: serde::de::Error>(raw: &str) -> Result<NaiveDate, E> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.date_naive()))
        .or_else(|_| {
            chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.date())
        })
        .map_err(|_| E::custom(format!("invalid date: {raw:?}")))
}

/// Deserializes a calendar date from either a date or a timestamp string.
pub fn date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw)
}

/// Optional variant of [`date`]; empty strings read as `None`.
pub fn opt_date<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error> {
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => parse_date(&raw).map(Some),
        _ => Ok(None),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Lookup {
    Id(i64),
    Text(String),
    Object {
        #[serde(rename = "Id", alias = "id")]
        id: i64,
    },
}

/// Deserializes a lookup reference into its numeric id.
///
/// Accepts `3`, `"3"` and `{"Id": 3, "Name": "Groceries"}`.
pub fn lookup_id<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: From<i64>,
{
    let id = match Option::<Lookup>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(Lookup::Id(id) | Lookup::Object { id }) => id,
        Some(Lookup::Text(text)) if text.trim().is_empty() => return Ok(None),
        Some(Lookup::Text(text)) => coerce_id(&text).map_err(D::Error::custom)?,
    };
    Ok(Some(T::from(id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Row {
        #[serde(deserialize_with = "date")]
        day: NaiveDate,
        #[serde(default, deserialize_with = "lookup_id")]
        owner: Option<i64>,
    }

    fn row(value: serde_json::Value) -> Result<Row, serde_json::Error> {
        serde_json::from_value(value)
    }

    #[test]
    fn test_date_accepts_plain_and_timestamp() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(row(json!({"day": "2024-03-15"})).unwrap().day, expected);
        assert_eq!(
            row(json!({"day": "2024-03-15T22:10:00Z"})).unwrap().day,
            expected
        );
        assert_eq!(
            row(json!({"day": "2024-03-15T08:00:00.000"})).unwrap().day,
            expected
        );
        assert!(row(json!({"day": "15/03/2024"})).is_err());
    }

    #[test]
    fn test_lookup_forms() {
        let base = json!({"day": "2024-03-15"});
        let with = |owner: serde_json::Value| {
            let mut v = base.clone();
            v["owner"] = owner;
            row(v).unwrap().owner
        };

        assert_eq!(with(json!(3)), Some(3));
        assert_eq!(with(json!("3")), Some(3));
        assert_eq!(with(json!({"Id": 3, "Name": "Groceries"})), Some(3));
        assert_eq!(with(json!(null)), None);
        assert_eq!(with(json!("")), None);
        assert_eq!(row(base).unwrap().owner, None);
    }
}
