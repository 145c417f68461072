//! Decoded `*.get` results
//!
//! The same method answers with three different shapes depending on the
//! request: a list of records, an object keyed by id when `preservekeys` is
//! set, or a bare count when `countOutput` is set. The count arrives as a
//! JSON string (`"7"`), older servers send a number.

use crate::params::ResultMode;
use crate::serde_helpers;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Record count returned for `countOutput` queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Count(pub u64);

impl<'de> Deserialize<'de> for Count {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_helpers::deserialize_u64_lenient(deserializer).map(Count)
    }
}

impl From<Count> for u64 {
    fn from(count: Count) -> Self {
        count.0
    }
}

/// Result of a `*.get` call, shaped by the request's [`ResultMode`]
#[derive(Debug, Clone, PartialEq)]
pub enum GetResult<T> {
    /// Plain ordered list
    Records(Vec<T>),
    /// Records keyed by primary id
    Keyed(BTreeMap<String, T>),
    /// Number of matching records
    Count(u64),
}

impl<T: DeserializeOwned> GetResult<T> {
    /// Decode a raw `result` value according to the expected shape
    pub fn from_value(
        mode: ResultMode,
        value: serde_json::Value,
    ) -> Result<Self, serde_json::Error> {
        Ok(match mode {
            ResultMode::Records => GetResult::Records(serde_json::from_value(value)?),
            ResultMode::Keyed => GetResult::Keyed(serde_helpers::keyed_from_value(value)?),
            ResultMode::Count => GetResult::Count(serde_json::from_value::<Count>(value)?.0),
        })
    }
}

impl<T> GetResult<T> {
    /// Records in server order; keyed results are returned in id order and
    /// a count yields nothing
    pub fn into_records(self) -> Vec<T> {
        match self {
            GetResult::Records(records) => records,
            GetResult::Keyed(map) => map.into_values().collect(),
            GetResult::Count(_) => Vec::new(),
        }
    }

    /// The count, if this is a count result
    pub fn count(&self) -> Option<u64> {
        match self {
            GetResult::Count(n) => Some(*n),
            _ => None,
        }
    }

    /// Number of records held, or the count for count results
    pub fn len(&self) -> usize {
        match self {
            GetResult::Records(records) => records.len(),
            GetResult::Keyed(map) => map.len(),
            GetResult::Count(n) => usize::try_from(*n).unwrap_or(usize::MAX),
        }
    }

    /// True if no records matched
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
