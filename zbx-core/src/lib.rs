//! Core types for talking to the Zabbix JSON-RPC API
//!
//! This crate is transport-agnostic. It provides:
//!
//! - **Types**: the JSON-RPC 2.0 request/response envelope, including the
//!   Zabbix-specific `auth` member
//! - **Params**: the query-shaping options shared by every `*.get` method,
//!   designed to be flattened into resource-specific parameter structs
//! - **Result**: the three shapes a `*.get` result can take (records, keyed
//!   records, count)
//! - **Codec**: request encoding and response decoding with uniform error
//!   mapping
//! - **Error handling**: the transport / decode / API error taxonomy
//! - **Observability**: `tracing` subscriber and OpenTelemetry bootstrap
//!
//! The `zbx-client` crate builds the HTTP dispatcher and the resource
//! bindings on top of it.
//!
//! # Example
//!
//! ```rust
//! use zbx_core::params::{GetParameters, Output};
//! use zbx_core::{codec, Id, JsonRpcRequest};
//!
//! let params = GetParameters::default().with_output(Output::Extend).with_limit(1);
//! let request = JsonRpcRequest::new("trigger.get", codec::to_params(&params).unwrap(), Id::Number(1));
//! let body = codec::encode_request(&request).unwrap();
//! assert!(body.contains("\"limit\":1"));
//! ```

pub mod codec;
pub mod error;
pub mod observability;
pub mod params;
pub mod result;
pub mod serde_helpers;
pub mod types;

pub use error::{Error, ErrorKind, JsonRpcErrorData, Result, STATUS_NO_RESPONSE};
pub use observability::{init_observability, shutdown_observability, ObservabilityConfig};
pub use params::{FilterValue, GetParameters, Output, QueryParams, ResultMode, SortOrder};
pub use result::{Count, GetResult};
pub use types::{Id, JsonRpcRequest, JsonRpcResponse, JSONRPC_VERSION};
