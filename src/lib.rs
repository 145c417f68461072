//! ZBX - typed JSON-RPC client for the Zabbix API
//!
//! This is the convenience crate that re-exports the ZBX sub-crates. Use it
//! if you want a single dependency for the whole client.
//!
//! # Architecture
//!
//! ZBX is organized into modular crates:
//!
//! - **zbx-core**: envelope types, shared `*.get` parameters, result shapes,
//!   codec, error handling, observability
//! - **zbx-client**: HTTP dispatcher, credentials, configuration and the
//!   typed resource bindings
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use zbx::trigger::{priority, TriggerGetParameters};
//! use zbx::{GetParameters, Output, ZabbixClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ZabbixClient::builder("https://zabbix.example.com")
//!         .api_token("0424bd59b807674191e7d77572075f33")
//!         .build()?;
//!
//!     let params = TriggerGetParameters {
//!         base: GetParameters::default()
//!             .with_output(Output::fields(["triggerid", "description"]))
//!             .with_limit(10),
//!         min_severity: Some(priority::HIGH),
//!         only_true: Some(true),
//!         ..Default::default()
//!     };
//!
//!     for trigger in client.trigger_get(&params).await?.result.into_records() {
//!         println!("{}: {}", trigger.triggerid, trigger.description);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub use zbx_client as client;
pub use zbx_core as core;

pub use zbx_client::trigger;
pub use zbx_client::{ClientBuilder, Reply, ZabbixClient};
pub use zbx_core::{Error, ErrorKind, GetParameters, GetResult, Output, Result};
