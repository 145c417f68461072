//! HTTP transport for JSON-RPC envelopes
//!
//! The dispatcher only needs "POST this JSON, give me status and body
//! back". [`Transport`] is that seam; [`HttpTransport`] is the default
//! implementation on top of `reqwest`. Tests and callers with special
//! networking needs can plug in their own.
//!
//! Connection management, TLS and deadlines belong to the transport. A
//! transport must report a missed deadline as [`Error::Timeout`] and every
//! other failure to obtain a response as [`Error::Transport`].

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;
use std::time::Duration;
use zbx_core::{Error, Result};

/// Content type the API expects on requests
pub const JSON_RPC_CONTENT_TYPE: &str = "application/json-rpc";

/// Raw HTTP answer handed back to the dispatcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body, undecoded
    pub body: String,
}

impl TransportResponse {
    /// Build a response
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// True for 2xx statuses
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one encoded request and returns the raw answer
///
/// Implementations must be usable from several tasks at once.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `body` to the API endpoint
    async fn send(&self, body: String) -> Result<TransportResponse>;
}

/// `reqwest`-based transport posting to a fixed endpoint
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpTransport {
    /// Build a transport with its own connection pool
    pub fn new(endpoint: Url, timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self::with_client(client, endpoint))
    }

    /// Reuse an existing `reqwest::Client`
    pub fn with_client(client: reqwest::Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }

    /// Endpoint requests are posted to
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, body: String) -> Result<TransportResponse> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, JSON_RPC_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                Error::Timeout
            } else {
                Error::Transport {
                    status: Some(status),
                    message: format!("failed to read response body: {}", e),
                }
            }
        })?;

        Ok(TransportResponse { status, body })
    }
}

fn map_reqwest_error(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Timeout
    } else {
        Error::Transport {
            status: e.status().map(|s| s.as_u16()),
            message: e.to_string(),
        }
    }
}

/// Resolve the API endpoint from a base URL
///
/// `https://zabbix.example.com` and `https://zabbix.example.com/zabbix/`
/// both gain the `api_jsonrpc.php` path; a URL already pointing at a
/// `.php` script is kept as is.
pub fn endpoint_url(base: &str) -> Result<Url> {
    let mut url =
        Url::parse(base).map_err(|e| Error::Config(format!("invalid API URL {:?}: {}", base, e)))?;

    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(Error::Config(format!(
            "API URL must be http(s), got {:?}",
            base
        )));
    }

    if url.path().ends_with(".php") {
        return Ok(url);
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    url.join("api_jsonrpc.php")
        .map_err(|e| Error::Config(format!("invalid API URL {:?}: {}", base, e)))
}
