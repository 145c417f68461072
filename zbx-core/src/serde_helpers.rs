//! Lenient deserializers for API payloads
//!
//! The server encodes most integers as JSON strings (`"priority": "4"`)
//! while fixtures and some older versions use real numbers. Both forms are
//! accepted:
//! - `4` or `"4"` → 4
//! - `""` or `null` → 0 (fields the server leaves blank)

use serde::de::{DeserializeOwned, Error};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrInt {
    Int(i64),
    UInt(u64),
    String(String),
    Null,
}

/// Deserialize an `i64` from a number, a numeric string, `""` or `null`
///
/// ```ignore
/// #[derive(Deserialize)]
/// struct Trigger {
///     #[serde(default, deserialize_with = "deserialize_i64_lenient")]
///     priority: i64,
/// }
/// ```
pub fn deserialize_i64_lenient<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match StringOrInt::deserialize(deserializer)? {
        StringOrInt::Int(i) => Ok(i),
        StringOrInt::UInt(u) => {
            i64::try_from(u).map_err(|_| D::Error::custom(format!("integer out of range: {}", u)))
        }
        StringOrInt::String(s) if s.trim().is_empty() => Ok(0),
        StringOrInt::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| D::Error::custom(format!("invalid integer: {}", s))),
        StringOrInt::Null => Ok(0),
    }
}

/// Deserialize a non-negative count from a number or a numeric string
///
/// Blank strings and `null` are rejected: a count is never optional.
pub fn deserialize_u64_lenient<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match StringOrInt::deserialize(deserializer)? {
        StringOrInt::Int(i) => {
            u64::try_from(i).map_err(|_| D::Error::custom(format!("negative count: {}", i)))
        }
        StringOrInt::UInt(u) => Ok(u),
        StringOrInt::String(s) => s
            .trim()
            .parse::<u64>()
            .map_err(|_| D::Error::custom(format!("invalid count: {:?}", s))),
        StringOrInt::Null => Err(D::Error::custom("expected a count, got null")),
    }
}

/// Decode an id-keyed result object
///
/// An empty JSON array is accepted as an empty map; the server sends `[]`
/// instead of `{}` when nothing matched.
pub fn keyed_from_value<T: DeserializeOwned>(
    value: serde_json::Value,
) -> Result<BTreeMap<String, T>, serde_json::Error> {
    match value {
        serde_json::Value::Array(ref items) if items.is_empty() => Ok(BTreeMap::new()),
        other => serde_json::from_value(other),
    }
}
