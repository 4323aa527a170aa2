//! Numeric record IDs.
//!
//! The record store keys every entity by an integer. Typed wrappers keep a
//! `BudgetId` from being passed where a `CategoryId` is expected, while
//! `RecordId` is the untyped form the store itself works with.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when text cannot be coerced into a record ID.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid record id: {0:?}")]
pub struct ParseIdError(pub String);

/// Coerces text into an integer ID.
///
/// Leading and trailing whitespace is ignored and parsing stops at the first
/// non-digit, so `" 42 "` and `"42.0"` both yield `42`.
///
/// # Errors
///
/// Returns `ParseIdError` if the text does not start with an integer.
pub fn coerce_id(text: &str) -> Result<i64, ParseIdError> {
    let trimmed = text.trim();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(digits.len(), |(i, _)| i);

    digits[..end]
        .parse::<i64>()
        .map(|n| sign * n)
        .map_err(|_| ParseIdError(text.to_string()))
}

/// Untyped identifier of a record in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub i64);

impl RecordId {
    /// Returns the inner integer.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for RecordId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        coerce_id(s).map(Self)
    }
}

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Creates an ID from a raw integer.
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Returns the inner integer.
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }

            /// Returns the untyped record ID.
            #[must_use]
            pub const fn record(self) -> RecordId {
                RecordId(self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<RecordId> for $name {
            fn from(id: RecordId) -> Self {
                Self(id.0)
            }
        }

        impl From<$name> for RecordId {
            fn from(id: $name) -> Self {
                Self(id.0)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                coerce_id(s).map(Self)
            }
        }
    };
}

typed_id!(CategoryId, "Unique identifier for a category.");
typed_id!(TransactionId, "Unique identifier for a transaction.");
typed_id!(BudgetId, "Unique identifier for a budget.");
typed_id!(GoalId, "Unique identifier for a savings goal.");
