//! Lenient numeric coercion for fund metrics.
//!
//! Fund data arrives from an upstream API that may leave fields empty, send
//! them as strings, or send garbage. Metrics are kept as `Option<f64>` and
//! coerced at the point of use.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Returns `value`, or `fallback` when the value is missing, NaN or zero.
///
/// Zero is treated like a missing value so that a zero NAV can never end up
/// as a divisor.
pub fn numeric_or_default(value: Option<f64>, fallback: f64) -> f64 {
    match value {
        Some(v) if !v.is_nan() && v != 0.0 => v,
        _ => fallback,
    }
}

/// Interprets an arbitrary JSON value as a number, if possible.
pub fn coerce_json_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| !v.is_nan()),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

/// `deserialize_with` helper for metric fields. Never fails: values that are
/// not numeric become `None`.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_json_number(&value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numeric_or_default() {
        assert_eq!(numeric_or_default(Some(12.5), 1.0), 12.5);
        assert_eq!(numeric_or_default(Some(-3.0), 1.0), -3.0);
        assert_eq!(numeric_or_default(None, 1.0), 1.0);
        assert_eq!(numeric_or_default(Some(0.0), 1.0), 1.0);
        assert_eq!(numeric_or_default(Some(f64::NAN), 0.0), 0.0);
    }

    #[test]
    fn test_coerce_json_number() {
        assert_eq!(coerce_json_number(&json!(4.2)), Some(4.2));
        assert_eq!(coerce_json_number(&json!(7)), Some(7.0));
        assert_eq!(coerce_json_number(&json!(" 15.5 ")), Some(15.5));
        assert_eq!(coerce_json_number(&json!("abc")), None);
        assert_eq!(coerce_json_number(&json!("NaN")), None);
        assert_eq!(coerce_json_number(&json!(null)), None);
        assert_eq!(coerce_json_number(&json!([1, 2])), None);
    }
}
