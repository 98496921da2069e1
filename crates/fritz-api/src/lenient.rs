// Lenient field decoders
//
// The router's JSON is inconsistent about scalar types across pages and
// firmware versions: counters and timestamps arrive as numbers or as
// numeric strings, sometimes empty. These helpers are used through
// `#[serde(deserialize_with = "…")]`.

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

/// Accept `123`, `"123"`, `""` or `null`; absent and empty decode as 0.
pub fn u64_from_any<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(0),
        Some(Value::Number(n)) => n
            .as_u64()
            .ok_or_else(|| de::Error::custom(format!("expected an unsigned integer, got {n}"))),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(0),
        Some(Value::String(s)) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("expected a numeric string, got {s:?}"))),
        Some(other) => Err(de::Error::custom(format!(
            "expected a number or numeric string, got {other}"
        ))),
    }
}

/// Like [`u64_from_any`] but keeps "absent" distinguishable.
pub fn opt_i64_from_any<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("expected an integer, got {n}"))),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("expected a numeric string, got {s:?}"))),
        Some(other) => Err(de::Error::custom(format!(
            "expected a number or numeric string, got {other}"
        ))),
    }
}

/// Render any scalar as text (`3` and `"3"` both become `"3"`).
pub fn opt_string_from_any<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(Value::Bool(b)) => Some(b.to_string()),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(other) => Some(other.to_string()),
    })
}
