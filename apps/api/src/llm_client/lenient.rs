//! Field deserializers for model-produced JSON.
//!
//! Replies are loosely typed: numbers arrive as strings and the reverse,
//! fields come back `null`, single values stand in for lists. These helpers
//! coerce a field to its expected shape instead of failing the whole reply.

use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

fn value_to_string(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(items) => items
            .into_iter()
            .map(value_to_string)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(_) => String::new(),
    }
}

/// Any scalar as text; lists are comma-joined, `null` and objects are empty.
pub fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(value_to_string(Value::deserialize(deserializer)?))
}

/// A non-negative integer, or 0 when the value is not one.
pub fn lenient_u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let number = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    Ok(number.and_then(|n| u32::try_from(n).ok()).unwrap_or(0))
}

/// `null` becomes the default value.
pub fn lenient_struct<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `null` becomes an empty list.
pub fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Entries that fail to deserialize are dropped; the rest are kept in order.
/// Anything other than a list is empty.
pub fn lenient_items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(vec![]);
    };
    Ok(items
        .into_iter()
        .filter_map(|item| {
            serde_json::from_value(item)
                .map_err(|e| debug!("Dropping malformed entry in model reply: {e}"))
                .ok()
        })
        .collect())
}

fn trimmed(items: impl Iterator<Item = String>) -> Vec<String> {
    items
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// A list of strings, or one comma-separated string.
pub fn string_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => trimmed(items.into_iter().map(value_to_string)),
        Value::String(s) => trimmed(s.split(',').map(String::from)),
        _ => vec![],
    })
}

/// A list of strings. A single string is one item and is never split.
pub fn string_items<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => trimmed(items.into_iter().map(value_to_string)),
        Value::String(s) => trimmed(std::iter::once(s)),
        _ => vec![],
    })
}
