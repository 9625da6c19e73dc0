//! Forgiving deserializers for loosely-typed job board records.
//!
//! Job and teacher records come out of a document store where the same field
//! can hold `null`, a string, a number or an embedded JSON string depending on
//! which version of the form wrote it. None of these helpers fail: anything
//! unexpected maps to the field's "absent" value, so one bad record never
//! rejects the request it arrived in.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Accepts `true` or the string `"true"`, everything else is `false`
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(b) => b,
        Value::String(s) => s == "true",
        _ => false,
    })
}

/// Only JSON numbers count; strings, booleans and `null` are absent
pub fn number_or_none<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_f64().filter(|n| n.is_finite()))
}

/// Strings as given; any other JSON type is absent
pub fn text_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// Non-empty text, with numbers rendered as text
///
/// A numeric zero reads as an unset form field and is absent, while the
/// string `"0"` is kept.
pub fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    })
}

/// A list of strings; non-string elements are dropped and a bare string is
/// a one-element list
pub fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                other => {
                    tracing::debug!("Dropping non-string list element: {}", other);
                    None
                }
            })
            .collect(),
        Value::String(s) if s.trim().is_empty() => Vec::new(),
        Value::String(s) => vec![s],
        _ => Vec::new(),
    })
}

/// A list that may also arrive as a JSON-encoded string of that list
pub fn embedded_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    let list = match value {
        Value::Array(_) => serde_json::from_value(value),
        Value::String(s) if s.trim().is_empty() => Ok(Vec::new()),
        Value::String(s) => serde_json::from_str(&s),
        _ => Ok(Vec::new()),
    };

    Ok(list.unwrap_or_else(|e| {
        tracing::warn!("Discarding malformed embedded list: {}", e);
        Vec::new()
    }))
}
