//! Lenient field decoders for fetch-layer records.
//!
//! Snapshot and series entries come from loosely-typed sources. A missing key,
//! a `null`, or a value of the wrong type decodes to zero (or the empty
//! string) instead of rejecting the record. Numeric strings are parsed.
//!
//! Use with `#[serde(default, deserialize_with = "...")]` so that absent keys
//! also fall back to the default.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Interpret a JSON value as a finite float, or 0.
pub fn value_to_f64(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// Interpret a JSON value as a non-negative whole count, or 0.
///
/// Fractional values are floored; negative values clamp to 0.
pub fn value_to_count(value: &Value) -> u64 {
    let v = value_to_f64(value);
    if v > 0.0 {
        v.floor() as u64
    } else {
        0
    }
}

/// Decode an `f64`, defaulting anything unusable to 0.
pub fn f64_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_f64(&value))
}

/// Decode a `u64` count, defaulting anything unusable to 0.
pub fn count_or_zero<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_count(&value))
}

/// Decode a label. Numbers are stringified; anything else becomes empty.
pub fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

/// Decode a flag. Accepts booleans, non-zero numbers and `"true"`.
pub fn bool_or_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().map(|v| v != 0.0).unwrap_or(false),
        Value::String(s) => s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_pass_through() {
        assert_eq!(value_to_f64(&json!(12.5)), 12.5);
        assert_eq!(value_to_f64(&json!(-3)), -3.0);
    }

    #[test]
    fn numeric_strings_are_parsed() {
        assert_eq!(value_to_f64(&json!(" 42.0 ")), 42.0);
        assert_eq!(value_to_count(&json!("7")), 7);
    }

    #[test]
    fn wrong_types_default_to_zero() {
        assert_eq!(value_to_f64(&json!(null)), 0.0);
        assert_eq!(value_to_f64(&json!("n/a")), 0.0);
        assert_eq!(value_to_f64(&json!([1, 2])), 0.0);
        assert_eq!(value_to_f64(&json!({"v": 1})), 0.0);
    }

    #[test]
    fn counts_floor_and_clamp() {
        assert_eq!(value_to_count(&json!(9.9)), 9);
        assert_eq!(value_to_count(&json!(-4)), 0);
    }
}
