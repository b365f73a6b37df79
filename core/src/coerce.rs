//! Coercion from raw attribute strings to native values.
//!
//! The rules are deliberately narrow and deterministic:
//!
//! - `INTEGER` parses as base-10 `i64`; anything else (including the empty
//!   string) is a [`CoerceError`] the caller handles per record.
//! - `BOOLEAN` maps exactly the literal `"TRUE"` to 1 and every other
//!   string — `"true"`, `"FALSE"`, `""` — to 0. No ternary state.
//! - `TEXT` and `DATETIME` pass through unchanged.

use thiserror::Error;

use crate::types::{ColumnType, FieldValue};

/// A raw value that could not be converted to its column's declared type.
#[derive(Debug, Error)]
pub enum CoerceError {
    /// The raw string is not a valid base-10 integer.
    #[error("invalid integer literal '{value}'")]
    InvalidInteger {
        /// The offending raw attribute value.
        value: String,
    },
}

/// Converts a raw attribute string into the column's native value.
///
/// # Errors
///
/// Returns [`CoerceError::InvalidInteger`] when an `INTEGER` column carries
/// a value that does not parse, which includes the empty string an export
/// sometimes emits for absent bounties.
///
/// # Examples
///
/// ```
/// use sedump_core::{ColumnType, FieldValue, coerce};
///
/// assert_eq!(coerce(ColumnType::Integer, "42").unwrap(), FieldValue::Integer(42));
/// assert_eq!(coerce(ColumnType::Boolean, "TRUE").unwrap(), FieldValue::Integer(1));
/// assert_eq!(coerce(ColumnType::Boolean, "true").unwrap(), FieldValue::Integer(0));
/// assert!(coerce(ColumnType::Integer, "").is_err());
/// ```
pub fn coerce(ty: ColumnType, raw: &str) -> Result<FieldValue, CoerceError> {
    match ty {
        ColumnType::Integer => raw
            .parse::<i64>()
            .map(FieldValue::Integer)
            .map_err(|_| CoerceError::InvalidInteger {
                value: raw.to_string(),
            }),
        ColumnType::Boolean => Ok(FieldValue::Integer(i64::from(raw == "TRUE"))),
        ColumnType::Text | ColumnType::DateTime => Ok(FieldValue::Text(raw.to_string())),
    }
}
