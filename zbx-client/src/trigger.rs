//! `trigger.get` binding
//!
//! Typed parameters and result objects for the trigger resource, plus the
//! [`ZabbixClient::trigger_get`] and [`ZabbixClient::trigger_count`] calls.
//!
//! Enumerated fields (`priority`, `status`, `value`, ...) are kept as raw
//! integers so values added by newer servers still decode. The submodules
//! name the values the API documents.
//!
//! # Examples
//!
//! ```rust,no_run
//! use zbx_client::trigger::{priority, TriggerGetParameters};
//! use zbx_core::{GetParameters, Output};
//!
//! # async fn example(client: zbx_client::ZabbixClient) -> zbx_core::Result<()> {
//! let params = TriggerGetParameters {
//!     base: GetParameters::default()
//!         .with_output(Output::fields(["triggerid", "description", "priority"])),
//!     only_true: Some(true),
//!     min_severity: Some(priority::HIGH),
//!     ..Default::default()
//! };
//!
//! for trigger in client.trigger_get(&params).await?.result.into_records() {
//!     println!("{} {}", trigger.triggerid, trigger.description);
//! }
//! # Ok(())
//! # }
//! ```

use crate::client::{Reply, ZabbixClient};
use serde::{Deserialize, Serialize};
use zbx_core::serde_helpers::deserialize_i64_lenient;
use zbx_core::{Error, GetParameters, GetResult, Output, QueryParams, Result};

/// Method name of the binding
pub const TRIGGER_GET: &str = "trigger.get";

/// Severity levels
pub mod priority {
    /// Not classified
    pub const NOT_CLASSIFIED: i64 = 0;
    /// Information
    pub const INFORMATION: i64 = 1;
    /// Warning
    pub const WARNING: i64 = 2;
    /// Average
    pub const AVERAGE: i64 = 3;
    /// High
    pub const HIGH: i64 = 4;
    /// Disaster
    pub const DISASTER: i64 = 5;

    /// Frontend label of a severity
    pub fn name(priority: i64) -> Option<&'static str> {
        match priority {
            NOT_CLASSIFIED => Some("Not classified"),
            INFORMATION => Some("Information"),
            WARNING => Some("Warning"),
            AVERAGE => Some("Average"),
            HIGH => Some("High"),
            DISASTER => Some("Disaster"),
            _ => None,
        }
    }
}

/// Whether the trigger is evaluated
pub mod status {
    /// Evaluated
    pub const ENABLED: i64 = 0;
    /// Not evaluated
    pub const DISABLED: i64 = 1;
}

/// Current trigger value
pub mod value {
    /// No problem
    pub const OK: i64 = 0;
    /// In the problem state
    pub const PROBLEM: i64 = 1;
}

/// Whether the expression could be evaluated
pub mod state {
    /// Up to date
    pub const NORMAL: i64 = 0;
    /// Expression could not be evaluated
    pub const UNKNOWN: i64 = 1;
}

/// Event generation on repeated problems
pub mod trigger_type {
    /// One problem event per state change
    pub const SINGLE_EVENT: i64 = 0;
    /// A problem event on every failed evaluation
    pub const MULTIPLE_EVENTS: i64 = 1;
}

/// Origin of the trigger
pub mod flags {
    /// Created by hand or from a template
    pub const PLAIN: i64 = 0;
    /// Created by low-level discovery
    pub const DISCOVERED: i64 = 4;
}

/// How the problem is resolved
pub mod recovery_mode {
    /// Resolved when the problem expression is false
    pub const EXPRESSION: i64 = 0;
    /// Resolved by `recovery_expression`
    pub const RECOVERY_EXPRESSION: i64 = 1;
    /// Never resolved automatically
    pub const NONE: i64 = 2;
}

/// Which problems an OK event closes
pub mod correlation_mode {
    /// OK event closes every problem of the trigger
    pub const ALL_PROBLEMS: i64 = 0;
    /// OK event closes problems whose `correlation_tag` value matches
    pub const TAG_VALUES_MATCH: i64 = 1;
}

/// Whether problems may be closed by hand
pub mod manual_close {
    /// Problems close only by recovery
    pub const NOT_ALLOWED: i64 = 0;
    /// Problems may also be closed by hand
    pub const ALLOWED: i64 = 1;
}

fn is_zero(v: &i64) -> bool {
    *v == 0
}

/// Trigger as returned by `trigger.get`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trigger {
    pub triggerid: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub expression: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comments: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub error: String,
    #[serde(default, deserialize_with = "deserialize_i64_lenient", skip_serializing_if = "is_zero")]
    pub flags: i64,
    /// Unix time of the last value change
    #[serde(default, deserialize_with = "deserialize_i64_lenient", skip_serializing_if = "is_zero")]
    pub lastchange: i64,
    /// See [`priority`]
    #[serde(default, deserialize_with = "deserialize_i64_lenient")]
    pub priority: i64,
    /// See [`status`]
    #[serde(default, deserialize_with = "deserialize_i64_lenient")]
    pub status: i64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub templateid: String,
    /// See [`trigger_type`]
    #[serde(rename = "type", default, deserialize_with = "deserialize_i64_lenient")]
    pub trigger_type: i64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,
    /// See [`value`]
    #[serde(default, deserialize_with = "deserialize_i64_lenient")]
    pub value: i64,
    /// See [`state`]
    #[serde(default, deserialize_with = "deserialize_i64_lenient")]
    pub state: i64,
    #[serde(default, deserialize_with = "deserialize_i64_lenient", skip_serializing_if = "is_zero")]
    pub recovery_mode: i64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub recovery_expression: String,
    #[serde(default, deserialize_with = "deserialize_i64_lenient", skip_serializing_if = "is_zero")]
    pub correlation_mode: i64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub correlation_tag: String,
    #[serde(default, deserialize_with = "deserialize_i64_lenient", skip_serializing_if = "is_zero")]
    pub manual_close: i64,
    /// Operational data template
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub opdata: String,
    /// Present with `selectHosts`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hosts: Vec<TriggerHost>,
    /// Present with `selectFunctions`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub functions: Vec<TriggerFunction>,
    /// Present with `selectDependencies`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<TriggerDependency>,
    /// Present with `selectItems`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<TriggerItem>,
}

impl Trigger {
    /// True while the trigger is in the problem state
    pub fn is_problem(&self) -> bool {
        self.value == value::PROBLEM
    }

    /// True if the trigger is evaluated
    pub fn is_enabled(&self) -> bool {
        self.status == status::ENABLED
    }

    /// Frontend label of the severity
    pub fn priority_name(&self) -> Option<&'static str> {
        priority::name(self.priority)
    }
}

/// Host a trigger belongs to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerHost {
    #[serde(default)]
    pub hostid: String,
    /// Technical host name
    #[serde(default)]
    pub host: String,
    /// Visible name
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_i64_lenient")]
    pub status: i64,
}

/// Function used in a trigger expression
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerFunction {
    #[serde(default)]
    pub functionid: String,
    #[serde(default)]
    pub itemid: String,
    #[serde(default)]
    pub function: String,
    #[serde(default)]
    pub parameter: String,
}

/// Trigger this one depends on
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerDependency {
    #[serde(default)]
    pub triggerid: String,
    #[serde(default)]
    pub description: String,
}

/// Item referenced by a trigger expression
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerItem {
    #[serde(default)]
    pub itemid: String,
    #[serde(default)]
    pub hostid: String,
    #[serde(default)]
    pub name: String,
    /// Item key; the server's `key_` spelling is accepted on input
    #[serde(rename = "key", alias = "key_", default)]
    pub key: String,
    #[serde(default)]
    pub lastvalue: String,
    #[serde(default, deserialize_with = "deserialize_i64_lenient")]
    pub lastclock: i64,
    #[serde(default, deserialize_with = "deserialize_i64_lenient")]
    pub state: i64,
    #[serde(default, deserialize_with = "deserialize_i64_lenient")]
    pub status: i64,
}

/// Parameters of `trigger.get`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TriggerGetParameters {
    /// Options shared by every `*.get` method
    #[serde(flatten)]
    pub base: GetParameters,

    /// Only enabled triggers on monitored hosts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(rename = "applicationids", default, skip_serializing_if = "Option::is_none")]
    pub application_ids: Option<Vec<String>>,
    /// Match triggers whose name contains this text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "expandComment", default, skip_serializing_if = "Option::is_none")]
    pub expand_comment: Option<bool>,
    #[serde(rename = "expandExpression", default, skip_serializing_if = "Option::is_none")]
    pub expand_expression: Option<bool>,
    #[serde(rename = "expandDescription", default, skip_serializing_if = "Option::is_none")]
    pub expand_description: Option<bool>,
    #[serde(rename = "expandRecovery", default, skip_serializing_if = "Option::is_none")]
    pub expand_recovery: Option<bool>,
    #[serde(rename = "expandTrigger", default, skip_serializing_if = "Option::is_none")]
    pub expand_trigger: Option<bool>,
    #[serde(rename = "groupids", default, skip_serializing_if = "Option::is_none")]
    pub group_ids: Option<Vec<String>>,
    #[serde(rename = "hostids", default, skip_serializing_if = "Option::is_none")]
    pub host_ids: Option<Vec<String>>,
    /// Only triggers inherited from a template
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inherited: Option<bool>,
    #[serde(rename = "itemids", default, skip_serializing_if = "Option::is_none")]
    pub item_ids: Option<Vec<String>>,
    /// Unix time lower bound on `lastchange`
    #[serde(rename = "lastChangeSince", default, skip_serializing_if = "Option::is_none")]
    pub last_change_since: Option<i64>,
    /// Unix time upper bound on `lastchange`
    #[serde(rename = "lastChangeTill", default, skip_serializing_if = "Option::is_none")]
    pub last_change_till: Option<i64>,
    /// Only triggers on hosts in maintenance
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance: Option<bool>,
    /// Lowest [`priority`] returned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_severity: Option<i64>,
    /// Only enabled triggers on monitored hosts with enabled items
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monitored: Option<bool>,
    /// Only triggers that recently were in the problem state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub only_true: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recovery: Option<bool>,
    /// Skip triggers depending on a trigger in the problem state
    #[serde(rename = "skipDependent", default, skip_serializing_if = "Option::is_none")]
    pub skip_dependent: Option<bool>,
    #[serde(rename = "templateids", default, skip_serializing_if = "Option::is_none")]
    pub template_ids: Option<Vec<String>>,
    #[serde(rename = "triggerids", default, skip_serializing_if = "Option::is_none")]
    pub trigger_ids: Option<Vec<String>>,
    #[serde(rename = "withAcknowledges", default, skip_serializing_if = "Option::is_none")]
    pub with_acknowledges: Option<bool>,
    #[serde(rename = "withLastEventUnack", default, skip_serializing_if = "Option::is_none")]
    pub with_last_event_unack: Option<bool>,
    #[serde(rename = "withRecovery", default, skip_serializing_if = "Option::is_none")]
    pub with_recovery: Option<bool>,
    #[serde(rename = "withUnacknowledged", default, skip_serializing_if = "Option::is_none")]
    pub with_unacknowledged: Option<bool>,

    #[serde(rename = "selectHosts", default, skip_serializing_if = "Option::is_none")]
    pub select_hosts: Option<Output>,
    #[serde(rename = "selectFunctions", default, skip_serializing_if = "Option::is_none")]
    pub select_functions: Option<Output>,
    #[serde(rename = "selectDependencies", default, skip_serializing_if = "Option::is_none")]
    pub select_dependencies: Option<Output>,
    #[serde(rename = "selectItems", default, skip_serializing_if = "Option::is_none")]
    pub select_items: Option<Output>,
}

impl TriggerGetParameters {
    /// Empty query over all visible triggers
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the shared `*.get` options
    pub fn with_base(mut self, base: GetParameters) -> Self {
        self.base = base;
        self
    }

    pub fn with_trigger_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.trigger_ids = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_host_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.host_ids = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_group_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.group_ids = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_min_severity(mut self, priority: i64) -> Self {
        self.min_severity = Some(priority);
        self
    }

    /// Only triggers currently or recently in the problem state
    pub fn problems_only(mut self) -> Self {
        self.only_true = Some(true);
        self.base = self.base.with_filter("value", value::PROBLEM);
        self
    }

    /// Return the hosts of each trigger
    pub fn with_select_hosts(mut self, output: Output) -> Self {
        self.select_hosts = Some(output);
        self
    }

    /// Return the functions of each trigger
    pub fn with_select_functions(mut self, output: Output) -> Self {
        self.select_functions = Some(output);
        self
    }

    /// Return the dependencies of each trigger
    pub fn with_select_dependencies(mut self, output: Output) -> Self {
        self.select_dependencies = Some(output);
        self
    }

    /// Return the items of each trigger
    pub fn with_select_items(mut self, output: Output) -> Self {
        self.select_items = Some(output);
        self
    }
}

impl QueryParams for TriggerGetParameters {
    fn base(&self) -> &GetParameters {
        &self.base
    }
}

impl ZabbixClient {
    /// Retrieve triggers
    ///
    /// The result is keyed by `triggerid` when `preservekeys` is set and a
    /// count when `countOutput` is set; see [`ZabbixClient::get`].
    pub async fn trigger_get(
        &self,
        params: &TriggerGetParameters,
    ) -> Result<Reply<GetResult<Trigger>>> {
        self.get(TRIGGER_GET, params).await
    }

    /// Count the triggers matching `params`
    pub async fn trigger_count(&self, params: &TriggerGetParameters) -> Result<Reply<u64>> {
        let mut params = params.clone();
        params.base.count_output = Some(true);

        let reply = self.get::<_, Trigger>(TRIGGER_GET, &params).await?;
        let status = reply.status;
        match reply.result {
            GetResult::Count(n) => Ok(Reply { result: n, status }),
            _ => Err(Error::decode(status, "expected a count result")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::{client_with, CannedTransport};
    use serde_json::json;
    use std::collections::{BTreeMap, BTreeSet};
    use zbx_core::{ErrorKind, FilterValue, SortOrder};

    fn keys(value: &serde_json::Value) -> BTreeSet<String> {
        value.as_object().unwrap().keys().cloned().collect()
    }

    fn populated_base() -> GetParameters {
        GetParameters {
            output: Some(Output::Extend),
            filter: Some(BTreeMap::from([("value".to_string(), FilterValue::from("1"))])),
            search: Some(BTreeMap::from([(
                "description".to_string(),
                FilterValue::from(vec!["CPU", "load"]),
            )])),
            search_by_any: Some(true),
            search_wildcards_enabled: Some(true),
            start_search: Some(true),
            exclude_search: Some(false),
            sort_field: Some(vec!["priority".to_string()]),
            sort_order: Some(vec![SortOrder::Desc]),
            limit: Some(10),
            limit_selects: Some(2),
            count_output: Some(false),
            preserve_keys: Some(false),
            editable: Some(true),
        }
    }

    fn populated_trigger_params() -> TriggerGetParameters {
        TriggerGetParameters {
            base: GetParameters::default(),
            active: Some(true),
            application_ids: Some(vec!["1".to_string()]),
            description: Some("load".to_string()),
            expand_comment: Some(true),
            expand_expression: Some(true),
            expand_description: Some(true),
            expand_recovery: Some(true),
            expand_trigger: Some(true),
            group_ids: Some(vec!["2".to_string()]),
            host_ids: Some(vec!["10084".to_string()]),
            inherited: Some(false),
            item_ids: Some(vec!["23296".to_string()]),
            last_change_since: Some(1_700_000_000),
            last_change_till: Some(1_700_086_400),
            maintenance: Some(false),
            min_severity: Some(priority::WARNING),
            monitored: Some(true),
            only_true: Some(true),
            recovery: Some(false),
            skip_dependent: Some(true),
            template_ids: Some(vec!["10001".to_string()]),
            trigger_ids: Some(vec!["13491".to_string()]),
            with_acknowledges: Some(false),
            with_last_event_unack: Some(true),
            with_recovery: Some(false),
            with_unacknowledged: Some(true),
            select_hosts: Some(Output::fields(["host"])),
            select_functions: Some(Output::Extend),
            select_dependencies: Some(Output::Count),
            select_items: Some(Output::fields(["key_", "lastvalue"])),
        }
    }

    #[test]
    fn test_default_params_serialize_empty() {
        let value = serde_json::to_value(TriggerGetParameters::default()).unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn test_only_set_options_are_sent() {
        let params = TriggerGetParameters::new()
            .with_base(GetParameters::default().with_limit(5))
            .with_host_ids(["10084"])
            .with_min_severity(priority::HIGH);

        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({"limit": 5, "hostids": ["10084"], "min_severity": 4})
        );
    }

    #[test]
    fn test_false_flags_are_sent() {
        let params = TriggerGetParameters {
            monitored: Some(false),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&params).unwrap(), json!({"monitored": false}));
    }

    #[test]
    fn test_round_trip() {
        let params = TriggerGetParameters {
            base: populated_base(),
            ..populated_trigger_params()
        };

        let encoded = serde_json::to_string(&params).unwrap();
        let decoded: TriggerGetParameters = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, params);
    }

    #[test]
    fn test_base_and_trigger_fields_are_disjoint() {
        let base = keys(&serde_json::to_value(populated_base()).unwrap());
        let trigger = keys(&serde_json::to_value(populated_trigger_params()).unwrap());

        assert_eq!(base.len(), 14);
        assert_eq!(trigger.len(), 30);
        assert!(base.is_disjoint(&trigger), "overlap: {:?}", base.intersection(&trigger).collect::<Vec<_>>());
        assert!(!trigger.contains("output"));
    }

    #[test]
    fn test_problems_only() {
        let params = TriggerGetParameters::new().problems_only();
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({"filter": {"value": "1"}, "only_true": true})
        );
    }

    #[test]
    fn test_result_mode_follows_base() {
        let params = TriggerGetParameters::new()
            .with_base(GetParameters::default().with_preserve_keys(true));
        assert_eq!(params.result_mode(), zbx_core::ResultMode::Keyed);
    }

    #[test]
    fn test_trigger_decodes_string_numbers() {
        let trigger: Trigger = serde_json::from_value(json!({
            "triggerid": "13491",
            "description": "Processor load is too high on {HOST.NAME}",
            "expression": "{12900}>5",
            "priority": "4",
            "status": "0",
            "type": "0",
            "value": "1",
            "state": "0",
            "lastchange": "1700000000",
            "flags": "0",
            "manual_close": "1",
            "url": "",
            "hosts": [{"hostid": "10084", "host": "Zabbix server", "name": "Zabbix server", "status": "0"}],
            "functions": [{"functionid": "12900", "itemid": "23296", "function": "avg", "parameter": "5m"}],
            "dependencies": [{"triggerid": "13000", "description": "Host unreachable"}],
            "items": [{"itemid": "23296", "hostid": "10084", "name": "Load", "key_": "system.cpu.load", "lastvalue": "0.42", "lastclock": "1700000000", "state": "0", "status": "0"}]
        }))
        .unwrap();

        assert_eq!(trigger.priority, priority::HIGH);
        assert_eq!(trigger.priority_name(), Some("High"));
        assert!(trigger.is_problem());
        assert!(trigger.is_enabled());
        assert_eq!(trigger.lastchange, 1_700_000_000);
        assert_eq!(trigger.manual_close, manual_close::ALLOWED);
        assert_eq!(trigger.hosts[0].host, "Zabbix server");
        assert_eq!(trigger.functions[0].function, "avg");
        assert_eq!(trigger.dependencies[0].triggerid, "13000");
        assert_eq!(trigger.items[0].key, "system.cpu.load");
        assert_eq!(trigger.items[0].lastclock, 1_700_000_000);
    }

    #[test]
    fn test_trigger_requires_id() {
        let err = serde_json::from_value::<Trigger>(json!({"description": "x"})).unwrap_err();
        assert!(err.to_string().contains("triggerid"));
    }

    #[test]
    fn test_trigger_omits_empty_optional_fields() {
        let trigger = Trigger {
            triggerid: "1".to_string(),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&trigger).unwrap(),
            json!({
                "triggerid": "1",
                "description": "",
                "expression": "",
                "priority": 0,
                "status": 0,
                "type": 0,
                "value": 0,
                "state": 0
            })
        );
    }

    #[test]
    fn test_item_key_accepts_both_names() {
        let item: TriggerItem = serde_json::from_value(json!({"key": "agent.ping"})).unwrap();
        assert_eq!(item.key, "agent.ping");

        let item: TriggerItem = serde_json::from_value(json!({"key_": "agent.ping"})).unwrap();
        assert_eq!(item.key, "agent.ping");
    }

    #[test]
    fn test_item_key_serializes_as_key() {
        let item = TriggerItem {
            key: "agent.ping".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["key"], "agent.ping");
        assert!(value.get("key_").is_none());
    }

    #[test]
    fn test_priority_names() {
        assert_eq!(priority::name(priority::DISASTER), Some("Disaster"));
        assert_eq!(priority::name(priority::NOT_CLASSIFIED), Some("Not classified"));
        assert_eq!(priority::name(9), None);
    }

    #[tokio::test]
    async fn test_trigger_get_sends_method_and_params() {
        let transport = CannedTransport::ok(
            r#"{"jsonrpc":"2.0","result":[{"triggerid":"1","description":"Test trigger","priority":"2"}],"id":1}"#,
        );
        let client = client_with(transport.clone());

        let reply = client
            .trigger_get(&TriggerGetParameters::new().with_trigger_ids(["1"]))
            .await
            .unwrap();

        assert_eq!(reply.status, 200);
        let triggers = reply.result.into_records();
        assert_eq!(triggers.len(), 1);
        assert_eq!(triggers[0].triggerid, "1");
        assert_eq!(triggers[0].priority, priority::WARNING);

        let sent = transport.last_request();
        assert_eq!(sent["method"], TRIGGER_GET);
        assert_eq!(sent["params"], json!({"triggerids": ["1"]}));
    }

    #[tokio::test]
    async fn test_trigger_get_keyed() {
        let transport = CannedTransport::ok(
            r#"{"jsonrpc":"2.0","result":{"13491":{"triggerid":"13491"},"13492":{"triggerid":"13492"}},"id":1}"#,
        );
        let client = client_with(transport);

        let params = TriggerGetParameters::new()
            .with_base(GetParameters::default().with_preserve_keys(true));
        let reply = client.trigger_get(&params).await.unwrap();

        match reply.result {
            GetResult::Keyed(map) => {
                assert_eq!(map.len(), 2);
                assert_eq!(map["13492"].triggerid, "13492");
            }
            other => panic!("expected keyed result, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_trigger_count_forces_count_output() {
        let transport = CannedTransport::ok(r#"{"jsonrpc":"2.0","result":"7","id":1}"#);
        let client = client_with(transport.clone());

        let reply = client
            .trigger_count(&TriggerGetParameters::new().problems_only())
            .await
            .unwrap();

        assert_eq!(reply.result, 7);
        assert_eq!(transport.last_request()["params"]["countOutput"], true);
    }

    #[tokio::test]
    async fn test_trigger_get_records_shape_mismatch() {
        let transport = CannedTransport::ok(r#"{"jsonrpc":"2.0","result":{"triggerid":"1"},"id":1}"#);
        let client = client_with(transport);

        let err = client
            .trigger_get(&TriggerGetParameters::new())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }
}
