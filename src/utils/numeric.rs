// src/utils/numeric.rs

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserializes an optional number that upstream may send as a JSON number,
/// a numeric string, a boolean or `null`.
///
/// Anything else (objects, arrays, non-numeric strings) becomes `NaN`
/// instead of failing the whole payload, so a single malformed record
/// shows up as a NaN total rather than an unreadable response.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| coerce(&v)))
}

/// Deserializes an optional integer id. Integral numbers and numeric strings
/// are accepted; anything else, including a missing field, is `None`.
pub fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| coerce_id(&v)))
}

/// Record id that must be present for the record to be addressable.
/// Unreadable ids decode as 0, which no upstream record uses.
pub fn lenient_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_i64(deserializer).map(|id| id.unwrap_or(0))
}

fn coerce_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.is_finite())
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn coerce(value: &Value) -> Option<f64> {
    match value {
        Value::Null => None,
        Value::Number(n) => Some(n.as_f64().unwrap_or(f64::NAN)),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Some(0.0)
            } else {
                Some(trimmed.parse().unwrap_or(f64::NAN))
            }
        }
        Value::Array(_) | Value::Object(_) => Some(f64::NAN),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn coerces_like_loose_numeric_conversion() {
        assert_eq!(coerce(&json!(1)), Some(1.0));
        assert_eq!(coerce(&json!("0")), Some(0.0));
        assert_eq!(coerce(&json!(" 2.5 ")), Some(2.5));
        assert_eq!(coerce(&json!(true)), Some(1.0));
        assert_eq!(coerce(&json!(null)), None);
        assert!(coerce(&json!("acertou")).is_some_and(f64::is_nan));
    }

    #[test]
    fn ids_accept_numbers_and_numeric_strings() {
        assert_eq!(coerce_id(&json!(5)), Some(5));
        assert_eq!(coerce_id(&json!("5")), Some(5));
        assert_eq!(coerce_id(&json!(5.0)), Some(5));
        assert_eq!(coerce_id(&json!(5.5)), None);
        assert_eq!(coerce_id(&json!(null)), None);
        assert_eq!(coerce_id(&json!({"id": 5})), None);
    }
}
