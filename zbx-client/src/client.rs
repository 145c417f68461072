//! The request dispatcher
//!
//! [`ZabbixClient`] turns a method name and a typed parameter struct into
//! one JSON-RPC request, posts it through its [`Transport`] and decodes the
//! answer into the type the caller asked for.
//!
//! # Call Lifecycle
//!
//! 1. **Validate**: reject empty or malformed method names before any I/O
//! 2. **Encode**: serialize params as a JSON object, take the next id, attach
//!    the current token unless the method runs unauthenticated
//! 3. **Send**: exactly one POST, no retries
//! 4. **Check**: non-2xx HTTP statuses fail as transport errors
//! 5. **Decode**: `error` becomes [`Error::Api`], `result` is decoded into
//!    the target type, anything else is [`Error::Decode`]
//!
//! # Cloning
//!
//! `ZabbixClient` is cheap to clone and all clones share the transport, the
//! credential provider and the id counter. Calls from different tasks never
//! share request or response state.

use crate::metrics::ClientMetrics;
use crate::request::RequestIdGenerator;
use crate::session::{requires_auth, CredentialProvider};
use crate::transport::Transport;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use zbx_core::{codec, Error, GetResult, JsonRpcRequest, JsonRpcResponse, QueryParams, Result};

/// Successful call result together with the HTTP status it arrived with
#[derive(Debug, Clone, PartialEq)]
pub struct Reply<T> {
    /// Decoded `result` member
    pub result: T,
    /// HTTP status of the response
    pub status: u16,
}

impl<T> Reply<T> {
    /// Drop the status
    pub fn into_inner(self) -> T {
        self.result
    }

    /// Transform the result, keeping the status
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Reply<U> {
        Reply {
            result: f(self.result),
            status: self.status,
        }
    }
}

/// Typed JSON-RPC client for the Zabbix API
#[derive(Clone)]
pub struct ZabbixClient {
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) credentials: Arc<dyn CredentialProvider>,
    pub(crate) ids: RequestIdGenerator,
    pub(crate) metrics: Option<Arc<ClientMetrics>>,
}

impl ZabbixClient {
    /// Start configuring a client for the API at `url`
    pub fn builder(url: impl Into<String>) -> crate::ClientBuilder {
        crate::ClientBuilder::new(url)
    }

    /// Assemble a client from its collaborators
    pub fn from_parts(
        transport: Arc<dyn Transport>,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Self {
        Self {
            transport,
            credentials,
            ids: RequestIdGenerator::new(),
            metrics: None,
        }
    }

    /// Call `method` and decode its `result` into `R`
    ///
    /// ```rust,no_run
    /// # async fn example(client: zbx_client::ZabbixClient) -> zbx_core::Result<()> {
    /// let reply = client
    ///     .call::<_, String>("apiinfo.version", &serde_json::json!({}))
    ///     .await?;
    /// println!("server {} (HTTP {})", reply.result, reply.status);
    /// # Ok(())
    /// # }
    /// ```
    #[tracing::instrument(skip_all, fields(method = %method, id = tracing::field::Empty))]
    pub async fn call<P, R>(&self, method: &str, params: &P) -> Result<Reply<R>>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let start = Instant::now();
        let outcome = match self.exchange(method, params).await {
            Ok((status, response)) => codec::into_result(status, response)
                .map(|result| Reply { result, status }),
            Err(e) => Err(e),
        };
        self.record(method, start, &outcome);
        outcome
    }

    /// Call a `*.get` method, decoding the result in the shape the query asks for
    ///
    /// `countOutput` (or `output: "count"`) yields [`GetResult::Count`],
    /// `preservekeys` yields [`GetResult::Keyed`], anything else
    /// [`GetResult::Records`].
    #[tracing::instrument(skip_all, fields(method = %method, id = tracing::field::Empty))]
    pub async fn get<P, T>(&self, method: &str, params: &P) -> Result<Reply<GetResult<T>>>
    where
        P: QueryParams,
        T: DeserializeOwned,
    {
        let mode = params.result_mode();
        let start = Instant::now();
        let outcome = match self.exchange(method, params).await {
            Ok((status, response)) => codec::into_result::<serde_json::Value>(status, response)
                .and_then(|value| {
                    GetResult::from_value(mode, value)
                        .map(|result| Reply { result, status })
                        .map_err(|e| {
                            Error::decode(
                                status,
                                format!("result does not match {:?} output: {}", mode, e),
                            )
                        })
                }),
            Err(e) => Err(e),
        };
        self.record(method, start, &outcome);
        outcome
    }

    /// Validate, encode, send and parse the envelope of one call
    async fn exchange<P>(&self, method: &str, params: &P) -> Result<(u16, JsonRpcResponse)>
    where
        P: Serialize + ?Sized,
    {
        codec::validate_method(method)?;
        let params = codec::to_params(params)?;

        let id = self.ids.next_id();
        tracing::Span::current().record("id", tracing::field::display(&id));

        let mut request = JsonRpcRequest::new(method, params, id);
        if requires_auth(method) {
            request.auth = self.credentials.token();
        }
        let body = codec::encode_request(&request)?;

        tracing::debug!("Sending request");
        let response = self.transport.send(body).await?;

        if !response.is_success() {
            return Err(Error::Transport {
                status: Some(response.status),
                message: format!("unexpected HTTP status {}", response.status),
            });
        }

        let envelope = codec::decode_response(response.status, &response.body)?;
        if envelope.id != request.id {
            tracing::warn!(expected = %request.id, received = %envelope.id, "Response id mismatch");
        }

        Ok((response.status, envelope))
    }

    fn record<T>(&self, method: &str, start: Instant, outcome: &Result<T>) {
        let duration = start.elapsed().as_secs_f64();

        match outcome {
            Ok(_) => {
                if let Some(ref m) = self.metrics {
                    m.record_request(method, "success", duration);
                }
                tracing::debug!(duration_secs = duration, "Request completed successfully");
            }
            Err(e) => {
                if let Some(ref m) = self.metrics {
                    m.record_request(method, "error", duration);
                    m.record_error(e.kind());
                    if let Some(api) = e.api_error() {
                        m.record_api_error(method, api.code);
                    }
                }
                tracing::error!(error = %e, status = e.status(), duration_secs = duration, "Request failed");
            }
        }
    }
}

impl std::fmt::Debug for ZabbixClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZabbixClient")
            .field("metrics", &self.metrics.is_some())
            .finish_non_exhaustive()
    }
}
