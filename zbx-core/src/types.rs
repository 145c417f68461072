//! JSON-RPC 2.0 envelope types as spoken by the Zabbix API
//!
//! The API is a plain request/response JSON-RPC 2.0 service reached through
//! HTTP POST. It extends the standard request object with one member,
//! `auth`, which carries the session or API token. Methods that run before
//! authentication (`apiinfo.version`, `user.login`) must not send it.
//!
//! # Request IDs
//!
//! The client numbers requests with a monotonically increasing integer. The
//! server echoes the id back; a `null` id only shows up on responses to
//! requests the server could not parse.

use crate::error::JsonRpcErrorData;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// JSON-RPC 2.0 protocol version string
pub const JSONRPC_VERSION: &str = "2.0";

/// JSON-RPC 2.0 request ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Id {
    /// Numeric identifier, what this client always sends
    Number(i64),
    /// String identifier, accepted on responses
    String(String),
    /// Null identifier, sent by the server when it could not read the request
    Null,
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::Number(n) => write!(f, "{}", n),
            Id::String(s) => write!(f, "\"{}\"", s),
            Id::Null => write!(f, "null"),
        }
    }
}

impl From<i64> for Id {
    fn from(n: i64) -> Self {
        Id::Number(n)
    }
}

impl From<u64> for Id {
    /// Casts to i64; ids past i64::MAX wrap
    fn from(n: u64) -> Self {
        Id::Number(n as i64)
    }
}

impl From<&str> for Id {
    fn from(s: &str) -> Self {
        Id::String(s.to_string())
    }
}

/// JSON-RPC 2.0 request message
///
/// `params` is always an object for the Zabbix API, so it is stored as an
/// already-encoded [`serde_json::Value`] produced from a typed parameter
/// struct.
///
/// # Examples
///
/// ```rust
/// use zbx_core::{Id, JsonRpcRequest};
/// use serde_json::json;
///
/// let req = JsonRpcRequest::new("trigger.get", json!({"output": "extend"}), Id::Number(1))
///     .with_auth("0424bd59b807674191e7d77572075f33");
/// assert_eq!(req.jsonrpc, "2.0");
/// assert!(req.auth.is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// Always "2.0"
    pub jsonrpc: String,
    /// Method name in `<resource>.<verb>` form
    pub method: String,
    /// Parameter object
    pub params: serde_json::Value,
    /// Correlation id
    pub id: Id,
    /// Session or API token; omitted for methods that run unauthenticated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<String>,
}

impl JsonRpcRequest {
    /// Create an unauthenticated request
    pub fn new(method: impl Into<String>, params: serde_json::Value, id: Id) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.into(),
            params,
            id,
            auth: None,
        }
    }

    /// Attach an authentication token
    pub fn with_auth(mut self, token: impl Into<String>) -> Self {
        self.auth = Some(token.into());
        self
    }
}

/// JSON-RPC 2.0 response message
///
/// Exactly one of `result` and `error` is expected. `result` keeps a JSON
/// `null` as `Some(Value::Null)` so that "present but null" stays distinct
/// from "missing".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// Always "2.0"; tolerated when missing
    #[serde(default = "default_version")]
    pub jsonrpc: String,
    /// Result of the call, present on success
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub result: Option<serde_json::Value>,
    /// Error object, present on failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcErrorData>,
    /// Id echoed from the request
    #[serde(default = "default_id")]
    pub id: Id,
}

impl JsonRpcResponse {
    /// Create a successful response
    pub fn success(result: serde_json::Value, id: Id) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            result: Some(result),
            error: None,
            id,
        }
    }

    /// Create an error response
    pub fn error(error: JsonRpcErrorData, id: Id) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            result: None,
            error: Some(error),
            id,
        }
    }

    /// True if a `result` member was received
    pub fn is_success(&self) -> bool {
        self.result.is_some()
    }

    /// True if an `error` member was received
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

fn default_version() -> String {
    JSONRPC_VERSION.to_string()
}

fn default_id() -> Id {
    Id::Null
}

// Only called when the key exists, so a JSON null becomes Some(Value::Null).
fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<serde_json::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}
