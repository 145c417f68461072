//! Common query parameters shared by every `*.get` method
//!
//! Every resource query (`trigger.get`, `host.get`, ...) accepts the same set
//! of query-shaping options on top of its own filters. [`GetParameters`]
//! holds that shared set. Resource parameter structs embed it with
//! `#[serde(flatten)]` so both field sets end up in one flat JSON object:
//!
//! ```rust
//! use serde::Serialize;
//! use zbx_core::params::{GetParameters, Output, QueryParams};
//!
//! #[derive(Serialize, Default)]
//! struct HostGetParameters {
//!     #[serde(flatten)]
//!     base: GetParameters,
//!     #[serde(rename = "hostids", skip_serializing_if = "Option::is_none")]
//!     host_ids: Option<Vec<String>>,
//! }
//!
//! impl QueryParams for HostGetParameters {
//!     fn base(&self) -> &GetParameters {
//!         &self.base
//!     }
//! }
//!
//! let params = HostGetParameters {
//!     base: GetParameters::default().with_output(Output::Extend).with_limit(10),
//!     host_ids: Some(vec!["10084".into()]),
//! };
//! let json = serde_json::to_value(&params).unwrap();
//! assert_eq!(json, serde_json::json!({"output": "extend", "limit": 10, "hostids": ["10084"]}));
//! ```
//!
//! Every option is an `Option<_>` and skipped when `None`, so an option the
//! caller did not set never reaches the server and the server default
//! applies. `Some(false)` and `Some(0)` are sent as given.

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Selects which fields the server returns
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// All fields (`"extend"`)
    Extend,
    /// Only the number of matching records (`"count"`)
    Count,
    /// An explicit list of field names
    Fields(Vec<String>),
}

impl Output {
    /// Build a field list from anything string-like
    pub fn fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Output::Fields(fields.into_iter().map(Into::into).collect())
    }
}

impl Serialize for Output {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Output::Extend => serializer.serialize_str("extend"),
            Output::Count => serializer.serialize_str("count"),
            Output::Fields(fields) => fields.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Output {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Keyword(String),
            Fields(Vec<String>),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Keyword(k) if k == "extend" => Ok(Output::Extend),
            Raw::Keyword(k) if k == "count" => Ok(Output::Count),
            Raw::Keyword(k) => Err(de::Error::custom(format!(
                "invalid output selector {:?}, expected \"extend\", \"count\" or a field list",
                k
            ))),
            Raw::Fields(fields) => Ok(Output::Fields(fields)),
        }
    }
}

/// One or several values to match a field against in `filter`/`search`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// A single value
    One(String),
    /// Any of several values
    Many(Vec<String>),
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        FilterValue::One(s.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        FilterValue::One(s)
    }
}

impl From<i64> for FilterValue {
    // The API compares numeric fields as strings anyway.
    fn from(n: i64) -> Self {
        FilterValue::One(n.to_string())
    }
}

impl From<Vec<String>> for FilterValue {
    fn from(v: Vec<String>) -> Self {
        FilterValue::Many(v)
    }
}

impl From<Vec<&str>> for FilterValue {
    fn from(v: Vec<&str>) -> Self {
        FilterValue::Many(v.into_iter().map(str::to_string).collect())
    }
}

/// Sort direction for one `sortfield` entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    /// Ascending
    #[serde(rename = "ASC")]
    Asc,
    /// Descending
    #[serde(rename = "DESC")]
    Desc,
}

/// Query-shaping options accepted by every `*.get` method
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GetParameters {
    /// Fields to return
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Output>,

    /// Exact-match filter: field name to accepted value(s)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<BTreeMap<String, FilterValue>>,

    /// Substring search: field name to searched value(s)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<BTreeMap<String, FilterValue>>,

    /// Match any `search` criterion instead of all of them
    #[serde(rename = "searchByAny", default, skip_serializing_if = "Option::is_none")]
    pub search_by_any: Option<bool>,

    /// Allow `*` wildcards in `search` values
    #[serde(
        rename = "searchWildcardsEnabled",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub search_wildcards_enabled: Option<bool>,

    /// Match `search` values as prefixes only
    #[serde(rename = "startSearch", default, skip_serializing_if = "Option::is_none")]
    pub start_search: Option<bool>,

    /// Invert the `search` criteria
    #[serde(rename = "excludeSearch", default, skip_serializing_if = "Option::is_none")]
    pub exclude_search: Option<bool>,

    /// Fields to sort by, in priority order
    #[serde(rename = "sortfield", default, skip_serializing_if = "Option::is_none")]
    pub sort_field: Option<Vec<String>>,

    /// Direction per `sortfield` entry
    #[serde(rename = "sortorder", default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<Vec<SortOrder>>,

    /// Maximum number of records returned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,

    /// Maximum number of records returned by each `select*` sub-query
    #[serde(rename = "limitSelects", default, skip_serializing_if = "Option::is_none")]
    pub limit_selects: Option<u64>,

    /// Return the number of records instead of the records
    #[serde(rename = "countOutput", default, skip_serializing_if = "Option::is_none")]
    pub count_output: Option<bool>,

    /// Key the result by primary id instead of returning a list
    #[serde(rename = "preservekeys", default, skip_serializing_if = "Option::is_none")]
    pub preserve_keys: Option<bool>,

    /// Only return objects the caller may write to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editable: Option<bool>,
}

impl GetParameters {
    /// Set the output selector
    pub fn with_output(mut self, output: Output) -> Self {
        self.output = Some(output);
        self
    }

    /// Add an exact-match filter on one field
    pub fn with_filter(mut self, field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.filter
            .get_or_insert_with(BTreeMap::new)
            .insert(field.into(), value.into());
        self
    }

    /// Add a substring search on one field
    pub fn with_search(mut self, field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.search
            .get_or_insert_with(BTreeMap::new)
            .insert(field.into(), value.into());
        self
    }

    /// Append a sort key
    pub fn with_sort(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort_field.get_or_insert_with(Vec::new).push(field.into());
        self.sort_order.get_or_insert_with(Vec::new).push(order);
        self
    }

    /// Cap the number of returned records
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Cap the number of records returned by `select*` sub-queries
    pub fn with_limit_selects(mut self, limit: u64) -> Self {
        self.limit_selects = Some(limit);
        self
    }

    /// Ask for a count instead of records
    pub fn with_count_output(mut self, count: bool) -> Self {
        self.count_output = Some(count);
        self
    }

    /// Ask for an id-keyed result
    pub fn with_preserve_keys(mut self, preserve: bool) -> Self {
        self.preserve_keys = Some(preserve);
        self
    }

    /// Restrict to writable objects
    pub fn with_editable(mut self, editable: bool) -> Self {
        self.editable = Some(editable);
        self
    }

    /// True if the server will answer with a scalar count
    pub fn is_count(&self) -> bool {
        self.count_output == Some(true) || self.output == Some(Output::Count)
    }

    /// True if the server will answer with an id-keyed object
    pub fn is_keyed(&self) -> bool {
        self.preserve_keys == Some(true)
    }

    /// The shape the `result` member will have for this query
    pub fn result_mode(&self) -> ResultMode {
        if self.is_count() {
            ResultMode::Count
        } else if self.is_keyed() {
            ResultMode::Keyed
        } else {
            ResultMode::Records
        }
    }
}

/// Shape of a `*.get` result as determined by the request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultMode {
    /// Ordered list of records
    Records,
    /// Object keyed by primary id (`preservekeys`)
    Keyed,
    /// Scalar count (`countOutput` or `output: "count"`); wins over `Keyed`
    Count,
}

/// Access to the embedded [`GetParameters`] of a resource parameter struct
///
/// Implemented by every resource query type so generic code can decide how
/// to decode the response.
pub trait QueryParams: Serialize {
    /// The shared options embedded in this query
    fn base(&self) -> &GetParameters;

    /// Shape the server will answer with
    fn result_mode(&self) -> ResultMode {
        self.base().result_mode()
    }
}

impl QueryParams for GetParameters {
    fn base(&self) -> &GetParameters {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_serializes_to_empty_object() {
        let json = serde_json::to_value(GetParameters::default()).unwrap();
        assert_eq!(json, json!({}));
    }

    #[test]
    fn test_only_set_options_are_sent() {
        let params = GetParameters::default()
            .with_limit(0)
            .with_count_output(false);
        let json = serde_json::to_value(&params).unwrap();

        assert_eq!(json, json!({"limit": 0, "countOutput": false}));
    }

    #[test]
    fn test_each_option_alone() {
        let cases: Vec<(GetParameters, &str)> = vec![
            (GetParameters::default().with_output(Output::Extend), "output"),
            (GetParameters::default().with_filter("status", 0), "filter"),
            (GetParameters::default().with_search("description", "CPU"), "search"),
            (
                GetParameters {
                    search_by_any: Some(true),
                    ..Default::default()
                },
                "searchByAny",
            ),
            (
                GetParameters {
                    search_wildcards_enabled: Some(true),
                    ..Default::default()
                },
                "searchWildcardsEnabled",
            ),
            (
                GetParameters {
                    start_search: Some(true),
                    ..Default::default()
                },
                "startSearch",
            ),
            (
                GetParameters {
                    exclude_search: Some(true),
                    ..Default::default()
                },
                "excludeSearch",
            ),
            (GetParameters::default().with_limit(5), "limit"),
            (GetParameters::default().with_limit_selects(2), "limitSelects"),
            (GetParameters::default().with_count_output(true), "countOutput"),
            (GetParameters::default().with_preserve_keys(true), "preservekeys"),
            (GetParameters::default().with_editable(true), "editable"),
        ];

        for (params, key) in cases {
            let json = serde_json::to_value(&params).unwrap();
            let object = json.as_object().unwrap();
            assert_eq!(object.len(), 1, "{} leaked extra keys: {}", key, json);
            assert!(object.contains_key(key), "{} missing from {}", key, json);
        }
    }

    #[test]
    fn test_sort_serializes_parallel_arrays() {
        let params = GetParameters::default()
            .with_sort("priority", SortOrder::Desc)
            .with_sort("description", SortOrder::Asc);
        let json = serde_json::to_value(&params).unwrap();

        assert_eq!(json["sortfield"], json!(["priority", "description"]));
        assert_eq!(json["sortorder"], json!(["DESC", "ASC"]));
    }

    #[test]
    fn test_output_variants() {
        assert_eq!(serde_json::to_value(Output::Extend).unwrap(), json!("extend"));
        assert_eq!(serde_json::to_value(Output::Count).unwrap(), json!("count"));
        assert_eq!(
            serde_json::to_value(Output::fields(["triggerid", "description"])).unwrap(),
            json!(["triggerid", "description"])
        );

        let parsed: Output = serde_json::from_value(json!("extend")).unwrap();
        assert_eq!(parsed, Output::Extend);
        let parsed: Output = serde_json::from_value(json!(["hostid"])).unwrap();
        assert_eq!(parsed, Output::fields(["hostid"]));
        assert!(serde_json::from_value::<Output>(json!("everything")).is_err());
    }

    #[test]
    fn test_filter_values() {
        let params = GetParameters::default()
            .with_filter("value", 1)
            .with_filter("host", vec!["web01", "web02"]);
        let json = serde_json::to_value(&params).unwrap();

        assert_eq!(json["filter"], json!({"value": "1", "host": ["web01", "web02"]}));
    }

    #[test]
    fn test_result_mode() {
        assert_eq!(GetParameters::default().result_mode(), ResultMode::Records);
        assert_eq!(
            GetParameters::default().with_preserve_keys(true).result_mode(),
            ResultMode::Keyed
        );
        assert_eq!(
            GetParameters::default().with_count_output(true).result_mode(),
            ResultMode::Count
        );
        assert_eq!(
            GetParameters::default().with_output(Output::Count).result_mode(),
            ResultMode::Count
        );
        assert_eq!(
            GetParameters::default()
                .with_count_output(true)
                .with_preserve_keys(true)
                .result_mode(),
            ResultMode::Count
        );
        assert_eq!(
            GetParameters::default().with_count_output(false).result_mode(),
            ResultMode::Records
        );
    }

    #[test]
    fn test_round_trip() {
        let params = GetParameters::default()
            .with_output(Output::fields(["triggerid"]))
            .with_filter("status", 0)
            .with_search("description", "disk")
            .with_sort("lastchange", SortOrder::Desc)
            .with_limit(20)
            .with_preserve_keys(false);

        let json = serde_json::to_string(&params).unwrap();
        let decoded: GetParameters = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, params);
    }
}
