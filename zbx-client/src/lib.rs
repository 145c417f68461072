//! Zabbix JSON-RPC API client over HTTP
//!
//! This crate provides a typed client for the Zabbix API. Every call is one
//! JSON-RPC 2.0 request posted to the frontend's `api_jsonrpc.php`, decoded
//! into the type the caller names.
//!
//! # Core Features
//!
//! - **Generic dispatch**: [`ZabbixClient::call`] for any method,
//!   [`ZabbixClient::get`] for `*.get` methods with count/keyed/list results
//! - **Resource bindings**: typed `trigger.get` in [`trigger`]
//! - **Pluggable seams**: [`Transport`] for the HTTP layer,
//!   [`CredentialProvider`] for the session token
//! - **Uniform errors**: every failure carries its kind and HTTP status
//! - **Observability**: `tracing` spans per call and optional OpenTelemetry
//!   metrics
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use zbx_client::trigger::TriggerGetParameters;
//! use zbx_client::ZabbixClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ZabbixClient::builder("https://zabbix.example.com")
//!         .api_token("0424bd59b807674191e7d77572075f33")
//!         .build()?;
//!
//!     // Generic call
//!     let version: String = client
//!         .call("apiinfo.version", &serde_json::json!({}))
//!         .await?
//!         .into_inner();
//!     println!("API {}", version);
//!
//!     // Typed binding
//!     let problems = client
//!         .trigger_count(&TriggerGetParameters::new().problems_only())
//!         .await?;
//!     println!("{} triggers in problem state", problems.result);
//!
//!     Ok(())
//! }
//! ```

mod client;
mod client_builder;
mod metrics;
mod request;
mod session;
mod transport;
pub mod trigger;

pub use client::{Reply, ZabbixClient};
pub use client_builder::{
    ClientBuilder, ClientConfig, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, ENV_API_TOKEN,
    ENV_TIMEOUT_SECS, ENV_URL,
};
pub use metrics::ClientMetrics;
pub use request::RequestIdGenerator;
pub use session::{requires_auth, CredentialProvider, NoAuth, StaticToken, UNAUTHENTICATED_METHODS};
pub use transport::{endpoint_url, HttpTransport, Transport, TransportResponse, JSON_RPC_CONTENT_TYPE};
pub use trigger::{Trigger, TriggerGetParameters};
