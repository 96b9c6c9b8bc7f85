//! Coercion of untyped JSON input into typed payload fields
//!
//! Used by the `try_set_*` setters on `Alert` and `Message`. Each helper
//! either returns the typed value or an `InvalidArgument` error naming the
//! rejected field.

use serde_json::Value;
use tracing::debug;

use crate::errors::{PayloadError, Result};

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub(crate) fn reject(field: &'static str, expected: &str, value: &Value) -> PayloadError {
    debug!(field, got = kind(value), "rejected payload field value");
    PayloadError::invalid(field, format!("expected {}, got {}", expected, kind(value)))
}

/// String or null. Null clears the field.
pub(crate) fn optional_string(field: &'static str, value: &Value) -> Result<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        other => Err(reject(field, "a string", other)),
    }
}

/// Array of strings or null. Null clears the field.
pub(crate) fn optional_string_list(
    field: &'static str,
    value: &Value,
) -> Result<Option<Vec<String>>> {
    match value {
        Value::Null => Ok(None),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.clone()),
                other => Err(reject(field, "an array of strings", other)),
            })
            .collect::<Result<Vec<_>>>()
            .map(Some),
        other => Err(reject(field, "an array of strings", other)),
    }
}

fn integral(n: f64) -> Option<i64> {
    if n.is_finite() && n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64 {
        Some(n as i64)
    } else {
        None
    }
}

/// Integer, integral float, or a string holding either. Null is rejected.
pub(crate) fn numeric(field: &'static str, value: &Value) -> Result<i64> {
    let parsed = match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(integral)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(integral))
        }
        _ => None,
    };
    parsed.ok_or_else(|| reject(field, "an integer", value))
}

/// Non-negative integer (or numeric string); null coerces to zero.
pub(crate) fn counter_or_zero(field: &'static str, value: &Value) -> Result<u32> {
    if value.is_null() {
        return Ok(0);
    }
    let n = numeric(field, value)?;
    u32::try_from(n).map_err(|_| reject(field, "a non-negative integer", value))
}

/// JSON integer only; numeric strings and null are rejected.
pub(crate) fn strict_flag(field: &'static str, value: &Value) -> Result<u32> {
    value
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| reject(field, "a non-negative integer", value))
}
