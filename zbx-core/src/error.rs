//! Error types for zbx
//!
//! Every failed API call ends up as one [`Error`]. The variants fall into
//! three families that callers usually branch on:
//!
//! - **Transport**: no usable HTTP response was obtained (connection refused,
//!   TLS failure, timeout, non-2xx status)
//! - **Decode**: a response arrived but it is not a well-formed JSON-RPC
//!   envelope, or its `result` does not have the requested shape
//! - **Api**: a well-formed envelope carrying a server-reported error
//!
//! Client-side mistakes caught before any I/O (bad method name, parameters
//! that do not serialize to an object, bad configuration) form a fourth,
//! smaller family.
//!
//! # Status codes
//!
//! Each error carries a best-effort numeric status, available through
//! [`Error::status`]. It is the HTTP status of the exchange when one exists
//! and [`STATUS_NO_RESPONSE`] otherwise. Note that an `Api` error normally
//! reports `200`: the RPC failed but the HTTP exchange did not.
//!
//! # Examples
//!
//! ```rust
//! use zbx_core::{Error, ErrorKind, JsonRpcErrorData};
//!
//! let err = Error::Api {
//!     status: 200,
//!     error: JsonRpcErrorData::with_data(-32602, "Invalid params", "No permissions"),
//! };
//! assert_eq!(err.kind(), ErrorKind::Api);
//! assert_eq!(err.status(), 200);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Status reported when the server never answered.
pub const STATUS_NO_RESPONSE: u16 = 0;

/// Result type for zbx operations
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No response obtained from the server
    Transport,
    /// Response obtained but not decodable into the requested shape
    Decode,
    /// Server answered with a JSON-RPC error object
    Api,
    /// Rejected locally before any request was sent
    Client,
}

/// Application-level error type for zbx operations
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Network, TLS or HTTP-level failure
    ///
    /// `status` is set when the server did answer, but with a non-success
    /// HTTP status.
    #[error("Transport error{}: {message}", .status.map(|s| format!(" (HTTP {})", s)).unwrap_or_default())]
    Transport {
        /// HTTP status, if a response was received at all
        status: Option<u16>,
        /// Description of the underlying failure
        message: String,
    },

    /// The transport deadline elapsed before a response arrived
    #[error("Request timeout")]
    Timeout,

    /// The response body is not a valid JSON-RPC envelope or the result has
    /// the wrong shape
    #[error("Decode error (HTTP {status}): {message}")]
    Decode {
        /// HTTP status of the response that failed to decode
        status: u16,
        /// What went wrong while decoding
        message: String,
    },

    /// The server reported a JSON-RPC error
    #[error("API error (HTTP {status}): {error}")]
    Api {
        /// HTTP status of the envelope, usually 200
        status: u16,
        /// Error object exactly as sent by the server
        error: JsonRpcErrorData,
    },

    /// Request parameters could not be encoded as a JSON object
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Method name is empty or not of the `<resource>.<verb>` form
    #[error("Invalid method name: {0:?}")]
    InvalidMethod(String),

    /// Client configuration is unusable (bad URL, bad timeout, ...)
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Transport { .. } | Error::Timeout => ErrorKind::Transport,
            Error::Decode { .. } => ErrorKind::Decode,
            Error::Api { .. } => ErrorKind::Api,
            Error::Serialization(_) | Error::InvalidMethod(_) | Error::Config(_) => {
                ErrorKind::Client
            }
        }
    }

    /// Best-effort status code of the failed exchange
    ///
    /// Returns [`STATUS_NO_RESPONSE`] when no HTTP response was received.
    pub fn status(&self) -> u16 {
        match self {
            Error::Transport { status, .. } => status.unwrap_or(STATUS_NO_RESPONSE),
            Error::Decode { status, .. } | Error::Api { status, .. } => *status,
            Error::Timeout
            | Error::Serialization(_)
            | Error::InvalidMethod(_)
            | Error::Config(_) => STATUS_NO_RESPONSE,
        }
    }

    /// Server error object, if this is an API error
    pub fn api_error(&self) -> Option<&JsonRpcErrorData> {
        match self {
            Error::Api { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Build a decode error for a response with the given status
    pub fn decode(status: u16, message: impl Into<String>) -> Self {
        Error::Decode {
            status,
            message: message.into(),
        }
    }
}

/// JSON-RPC error object as returned by the server
///
/// The Zabbix API always fills all three members: a numeric `code`, a short
/// `message` and a human-readable `data` string with the details.
///
/// Standard codes seen in practice:
/// - `-32700`: Parse error
/// - `-32600`: Invalid request
/// - `-32601`: Method not found
/// - `-32602`: Invalid params (also used for permission problems)
/// - `-32603`: Internal error
/// - `-32500`: Application error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonRpcErrorData {
    /// Numeric error code
    pub code: i32,

    /// Short description, e.g. "Invalid params."
    pub message: String,

    /// Detail string, e.g. "Not authorised."
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl JsonRpcErrorData {
    /// Create an error with code and message only
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// Create an error with a detail string
    ///
    /// ```rust
    /// use zbx_core::JsonRpcErrorData;
    ///
    /// let error = JsonRpcErrorData::with_data(-32602, "Invalid params.", "No permissions to referred object.");
    /// assert_eq!(error.data.as_deref(), Some("No permissions to referred object."));
    /// ```
    pub fn with_data(code: i32, message: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: Some(data.into()),
        }
    }
}

impl std::fmt::Display for JsonRpcErrorData {
    /// Formats as "[code] message: data", dropping the data part when absent
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref data) = self.data {
            write!(f, ": {}", data)?;
        }
        Ok(())
    }
}

impl std::error::Error for JsonRpcErrorData {}
