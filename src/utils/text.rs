// src/utils/text.rs

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserializes a text field that upstream may send as `null`, a number or
/// a boolean. `null` and structured values become `""`; scalars are
/// rendered as text.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Null) | Some(Value::Array(_)) | Some(Value::Object(_)) | None => {
            String::new()
        }
    })
}
