//! Lenient Deserialization
//!
//! Upstream producers are not strict about their schemas. These helpers are
//! used with `#[serde(default, deserialize_with = "...")]` so that a
//! sub-field with an unexpected shape is dropped instead of rejecting the
//! whole payload.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize an optional field, yielding `None` when the value has the wrong shape.
pub fn optional<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// Deserialize an optional list, keeping only the elements that parse.
///
/// A non-array value yields `None`.
pub fn optional_vec<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => Some(
            items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
        ),
        _ => None,
    })
}

/// Like [`optional`] for strings, additionally treating `""` as absent.
pub fn non_empty_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = optional(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}
