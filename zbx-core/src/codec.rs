//! Encoding of requests and decoding of responses
//!
//! The codec is transport-agnostic: it turns typed parameters into a request
//! body and turns `(HTTP status, body)` pairs back into typed results. All
//! failure mapping between "the body is garbage", "the server said no" and
//! "the result has the wrong shape" happens here so every transport gets the
//! same error taxonomy.
//!
//! # Examples
//!
//! ```rust
//! use zbx_core::{codec, Id, JsonRpcRequest};
//! use serde_json::json;
//!
//! let params = codec::to_params(&json!({"output": "extend"})).unwrap();
//! let request = JsonRpcRequest::new("host.get", params, Id::Number(1));
//! let body = codec::encode_request(&request).unwrap();
//!
//! let reply = r#"{"jsonrpc":"2.0","result":[],"id":1}"#;
//! let hosts: Vec<serde_json::Value> = codec::decode_result(200, reply).unwrap();
//! assert!(hosts.is_empty());
//! # let _ = body;
//! ```

use crate::error::{Error, Result};
use crate::types::{JsonRpcRequest, JsonRpcResponse};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Check that a method name has the `<resource>.<verb>` shape
///
/// Both halves must be non-empty and consist of ASCII alphanumerics or `_`.
pub fn validate_method(method: &str) -> Result<()> {
    let valid = match method.split_once('.') {
        Some((resource, verb)) => {
            let part_ok = |s: &str| {
                !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
            };
            part_ok(resource) && part_ok(verb)
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(Error::InvalidMethod(method.to_string()))
    }
}

/// Encode a typed parameter struct as the `params` object
///
/// Anything that does not serialize to a JSON object is rejected, the API
/// only accepts named parameters.
pub fn to_params<P: Serialize + ?Sized>(params: &P) -> Result<serde_json::Value> {
    let value = serde_json::to_value(params).map_err(|e| Error::Serialization(e.to_string()))?;
    if !value.is_object() {
        return Err(Error::Serialization(format!(
            "params must serialize to a JSON object, got {}",
            json_type_name(&value)
        )));
    }
    Ok(value)
}

/// Encode a request envelope as a JSON string
pub fn encode_request(request: &JsonRpcRequest) -> Result<String> {
    serde_json::to_string(request).map_err(|e| Error::Serialization(e.to_string()))
}

/// Decode a response body into an envelope
///
/// Fails with [`Error::Decode`] if the body is not JSON, is not an object,
/// or carries neither `result` nor `error`.
pub fn decode_response(status: u16, body: &str) -> Result<JsonRpcResponse> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| Error::decode(status, format!("response is not valid JSON: {}", e)))?;

    if !value.is_object() {
        return Err(Error::decode(
            status,
            format!("response must be a JSON object, got {}", json_type_name(&value)),
        ));
    }

    let response: JsonRpcResponse = serde_json::from_value(value)
        .map_err(|e| Error::decode(status, format!("malformed JSON-RPC envelope: {}", e)))?;

    if !response.is_success() && !response.is_error() {
        return Err(Error::decode(
            status,
            "JSON-RPC envelope has neither result nor error",
        ));
    }

    Ok(response)
}

/// Turn a decoded envelope into the typed result
///
/// An `error` member wins over `result` and becomes [`Error::Api`].
pub fn into_result<R: DeserializeOwned>(status: u16, response: JsonRpcResponse) -> Result<R> {
    if let Some(error) = response.error {
        return Err(Error::Api { status, error });
    }

    let result = response
        .result
        .ok_or_else(|| Error::decode(status, "JSON-RPC envelope has neither result nor error"))?;

    serde_json::from_value(result)
        .map_err(|e| Error::decode(status, format!("unexpected result shape: {}", e)))
}

/// Decode a response body straight into the typed result
pub fn decode_result<R: DeserializeOwned>(status: u16, body: &str) -> Result<R> {
    into_result(status, decode_response(status, body)?)
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
