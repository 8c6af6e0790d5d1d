//! Typed scalar values
//!
//! Rows hold plain text. `Value` is the typed view used where a column's
//! declared type matters: coercing update payloads and rendering results.

use std::fmt;

use serde::Serialize;

use crate::error::{Result, TabulaError};
use crate::schema::ColumnType;

/// A typed scalar
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    Integer(i64),
    Real(f64),
}

impl Value {
    /// Coerce raw text into the type declared for `column`.
    ///
    /// Numeric text is trimmed before parsing; `string` columns take the
    /// text unchanged. A parse failure is a `Coercion` error.
    pub fn coerce(column: &str, raw: &str, ty: ColumnType) -> Result<Value> {
        let parsed = match ty {
            ColumnType::String => return Ok(Value::Text(raw.to_string())),
            ColumnType::Int => raw.trim().parse::<i64>().ok().map(Value::Integer),
            ColumnType::Double => raw.trim().parse::<f64>().ok().map(Value::Real),
        };

        parsed.ok_or_else(|| TabulaError::Coercion {
            column: column.to_string(),
            value: raw.to_string(),
            ty,
        })
    }

    /// Interpret stored text under a declared type, falling back to `Text`
    /// when it does not parse (e.g. the empty seed of a fresh row).
    pub fn from_stored(raw: &str, ty: ColumnType) -> Value {
        match ty {
            ColumnType::String => Value::Text(raw.to_string()),
            _ => Value::coerce("", raw, ty).unwrap_or_else(|_| Value::Text(raw.to_string())),
        }
    }

    /// Canonical text form, as stored in a row
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            Value::Integer(i) => write!(f, "{}", i),
            // Integral doubles keep a ".0" so they never read back as ints
            Value::Real(r) if r.is_finite() && r.fract() == 0.0 => write!(f, "{:.1}", r),
            Value::Real(r) => write!(f, "{}", r),
        }
    }
}
