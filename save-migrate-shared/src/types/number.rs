//! Integer coercion for loosely typed legacy counters.

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum NumberError {
    #[error("expected a number, found {0}")]
    NotANumber(String),
}

/// Coerces a legacy numeric field into an integer.
///
/// Empty strings and nulls become zero. Floats are rounded and numeric
/// strings are parsed, since the legacy client stored whatever the input box
/// held.
pub fn coerce_integer(value: &Value) -> Result<i64, NumberError> {
    match value {
        Value::Null => Ok(0),
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|float| float.round() as i64))
            .ok_or_else(|| NumberError::NotANumber(number.to_string())),
        Value::String(text) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(0);
            }
            text.parse::<i64>()
                .ok()
                .or_else(|| text.parse::<f64>().ok().map(|float| float.round() as i64))
                .ok_or_else(|| NumberError::NotANumber(format!("{:?}", text)))
        }
        other => Err(NumberError::NotANumber(other.to_string())),
    }
}
