//! Client builder and environment configuration
//!
//! The `ClientBuilder` provides a fluent API for configuring the client
//! before first use. It allows you to:
//! - Point it at a Zabbix frontend and choose credentials
//! - Set the per-request deadline and user agent
//! - Configure observability (OpenTelemetry) and client metrics
//! - Swap in a custom [`Transport`]
//!
//! # Examples
//!
//! ```rust,no_run
//! use zbx_client::ClientBuilder;
//! use std::time::Duration;
//!
//! # fn example() -> zbx_core::Result<()> {
//! let client = ClientBuilder::new("https://zabbix.example.com")
//!     .api_token("0424bd59b807674191e7d77572075f33")
//!     .timeout(Duration::from_secs(10))
//!     .build()?;
//!
//! // Same thing, read from ZABBIX_URL / ZABBIX_API_TOKEN / ZABBIX_TIMEOUT_SECS
//! let client2 = ClientBuilder::from_env()?.build()?;
//! # Ok(())
//! # }
//! ```

use crate::metrics::ClientMetrics;
use crate::request::RequestIdGenerator;
use crate::session::{CredentialProvider, NoAuth, StaticToken};
use crate::transport::{endpoint_url, HttpTransport, Transport};
use crate::ZabbixClient;
use std::sync::Arc;
use std::time::Duration;
use zbx_core::{Error, Result};

/// Per-request deadline used when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// `User-Agent` sent by the default transport
pub const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Environment variable holding the frontend URL
pub const ENV_URL: &str = "ZABBIX_URL";
/// Environment variable holding the API token
pub const ENV_API_TOKEN: &str = "ZABBIX_API_TOKEN";
/// Environment variable holding the deadline in whole seconds
pub const ENV_TIMEOUT_SECS: &str = "ZABBIX_TIMEOUT_SECS";

/// Connection settings read from the environment
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Frontend or endpoint URL
    pub url: String,
    /// API token, if any
    pub api_token: Option<String>,
    /// Per-request deadline
    pub timeout: Duration,
}

impl ClientConfig {
    /// Read `ZABBIX_URL`, `ZABBIX_API_TOKEN` and `ZABBIX_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let url = lookup(ENV_URL)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| Error::Config(format!("{} is not set", ENV_URL)))?;

        let api_token = lookup(ENV_API_TOKEN).filter(|v| !v.is_empty());

        let timeout = match lookup(ENV_TIMEOUT_SECS) {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    Error::Config(format!("{} must be whole seconds, got {:?}", ENV_TIMEOUT_SECS, raw))
                })?;
                if secs == 0 {
                    return Err(Error::Config(format!("{} must be positive", ENV_TIMEOUT_SECS)));
                }
                Duration::from_secs(secs)
            }
            None => DEFAULT_TIMEOUT,
        };

        Ok(Self {
            url,
            api_token,
            timeout,
        })
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("url", &self.url)
            .field("api_token", &self.api_token.as_ref().map(|_| "***"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Builder for configuring and creating a [`ZabbixClient`]
pub struct ClientBuilder {
    url: String,
    credentials: Option<Arc<dyn CredentialProvider>>,
    timeout: Duration,
    user_agent: String,
    transport: Option<Arc<dyn Transport>>,
    observability_config: Option<zbx_core::ObservabilityConfig>,
    service_name: Option<String>,
    enable_metrics: bool,
}

impl ClientBuilder {
    /// Create a new client builder
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            credentials: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            transport: None,
            observability_config: None,
            service_name: None,
            enable_metrics: false,
        }
    }

    /// Start from [`ClientConfig::from_env`]
    pub fn from_env() -> Result<Self> {
        Ok(Self::from_config(ClientConfig::from_env()?))
    }

    /// Start from an existing configuration
    pub fn from_config(config: ClientConfig) -> Self {
        let builder = Self::new(config.url).timeout(config.timeout);
        match config.api_token {
            Some(token) => builder.api_token(token),
            None => builder,
        }
    }

    /// Authenticate with a fixed API token
    pub fn api_token(self, token: impl Into<String>) -> Self {
        self.credentials(StaticToken::new(token))
    }

    /// Authenticate with a custom credential source
    pub fn credentials(mut self, provider: impl CredentialProvider + 'static) -> Self {
        self.credentials = Some(Arc::new(provider));
        self
    }

    /// Set the per-request deadline (default 30s)
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the `User-Agent` header of the default transport
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Use a custom transport; URL, timeout and user agent are then ignored
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Enable OpenTelemetry observability with custom configuration
    pub fn with_observability(mut self, config: zbx_core::ObservabilityConfig) -> Self {
        self.observability_config = Some(config);
        self
    }

    /// Enable OpenTelemetry observability with default configuration
    pub fn with_default_observability(mut self) -> Self {
        self.observability_config = Some(zbx_core::ObservabilityConfig::default());
        self
    }

    /// Set service name for observability and metrics
    pub fn service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = Some(name.into());
        self
    }

    /// Record client metrics on the global meter provider
    ///
    /// Implied by [`with_observability`](Self::with_observability).
    pub fn with_metrics(mut self, enable: bool) -> Self {
        self.enable_metrics = enable;
        self
    }

    /// Build the client
    pub fn build(self) -> Result<ZabbixClient> {
        if self.timeout.is_zero() {
            return Err(Error::Config("timeout must be positive".to_string()));
        }

        // Initialize observability if configured
        let metrics = if let Some(mut config) = self.observability_config {
            if let Some(name) = self.service_name {
                config.service_name = name;
            }

            zbx_core::init_observability(config.clone())
                .map_err(|e| Error::Config(format!("Failed to initialize observability: {}", e)))?;

            Some(Arc::new(ClientMetrics::new(config.service_name)))
        } else if self.enable_metrics {
            let name = self.service_name.unwrap_or_else(|| "zbx".to_string());
            Some(Arc::new(ClientMetrics::new(name)))
        } else {
            None
        };

        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => {
                let endpoint = endpoint_url(&self.url)?;
                tracing::info!(endpoint = %endpoint, timeout_secs = self.timeout.as_secs_f64(), "Configured Zabbix API client");
                Arc::new(HttpTransport::new(endpoint, self.timeout, &self.user_agent)?)
            }
        };

        let credentials = self
            .credentials
            .unwrap_or_else(|| Arc::new(NoAuth) as Arc<dyn CredentialProvider>);

        Ok(ZabbixClient {
            transport,
            credentials,
            ids: RequestIdGenerator::new(),
            metrics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_builder_defaults() {
        let builder = ClientBuilder::new("https://zabbix.example.com");

        assert_eq!(builder.url, "https://zabbix.example.com");
        assert_eq!(builder.timeout, DEFAULT_TIMEOUT);
        assert!(builder.user_agent.starts_with("zbx-client/"));
        assert!(builder.credentials.is_none());
        assert!(builder.transport.is_none());
        assert!(builder.observability_config.is_none());
        assert!(builder.service_name.is_none());
        assert!(!builder.enable_metrics);
    }

    #[test]
    fn test_builder_chaining() {
        let builder = ClientBuilder::new("https://zabbix.example.com")
            .api_token("secret")
            .timeout(Duration::from_secs(5))
            .user_agent("monitor/1.0")
            .service_name("test-service")
            .with_metrics(true);

        assert!(builder.credentials.is_some());
        assert_eq!(builder.timeout, Duration::from_secs(5));
        assert_eq!(builder.user_agent, "monitor/1.0");
        assert_eq!(builder.service_name, Some("test-service".to_string()));
        assert!(builder.enable_metrics);
    }

    #[test]
    fn test_builder_observability_config() {
        let config = zbx_core::ObservabilityConfig::new("test-client")
            .with_endpoint("http://localhost:4317")
            .with_log_level("debug");

        let builder = ClientBuilder::new("https://zabbix.example.com").with_observability(config);

        let obs_config = builder.observability_config.unwrap();
        assert_eq!(obs_config.service_name, "test-client");
        assert_eq!(obs_config.log_level, "debug");
    }

    #[test]
    fn test_builder_default_observability() {
        let builder = ClientBuilder::new("https://zabbix.example.com").with_default_observability();
        assert_eq!(builder.observability_config.unwrap().service_name, "zbx");
    }

    #[tokio::test]
    async fn test_build_http_client() {
        let client = ClientBuilder::new("https://zabbix.example.com")
            .api_token("secret")
            .build()
            .unwrap();

        assert_eq!(client.credentials.token().as_deref(), Some("secret"));
        assert!(client.metrics.is_none());
    }

    #[tokio::test]
    async fn test_build_with_metrics() {
        let client = ClientBuilder::new("https://zabbix.example.com")
            .with_metrics(true)
            .build()
            .unwrap();
        assert!(client.metrics.is_some());
    }

    #[test]
    fn test_build_without_token_uses_no_auth() {
        let client = ClientBuilder::new("https://zabbix.example.com").build().unwrap();
        assert!(client.credentials.token().is_none());
    }

    #[test]
    fn test_build_rejects_bad_url() {
        let err = ClientBuilder::new("zabbix.example.com").build().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_build_rejects_zero_timeout() {
        let err = ClientBuilder::new("https://zabbix.example.com")
            .timeout(Duration::ZERO)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_config_from_lookup() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_URL, "https://zabbix.example.com"),
            (ENV_API_TOKEN, "secret"),
            (ENV_TIMEOUT_SECS, "12"),
        ]))
        .unwrap();

        assert_eq!(config.url, "https://zabbix.example.com");
        assert_eq!(config.api_token.as_deref(), Some("secret"));
        assert_eq!(config.timeout, Duration::from_secs(12));
        assert!(!format!("{:?}", config).contains("secret"));
    }

    #[test]
    fn test_config_defaults() {
        let config =
            ClientConfig::from_lookup(lookup(&[(ENV_URL, "https://zabbix.example.com")])).unwrap();

        assert!(config.api_token.is_none());
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_config_errors() {
        assert!(matches!(
            ClientConfig::from_lookup(lookup(&[])),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            ClientConfig::from_lookup(lookup(&[
                (ENV_URL, "https://zabbix.example.com"),
                (ENV_TIMEOUT_SECS, "soon"),
            ])),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            ClientConfig::from_lookup(lookup(&[
                (ENV_URL, "https://zabbix.example.com"),
                (ENV_TIMEOUT_SECS, "0"),
            ])),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_from_config() {
        let builder = ClientBuilder::from_config(ClientConfig {
            url: "https://zabbix.example.com".to_string(),
            api_token: Some("secret".to_string()),
            timeout: Duration::from_secs(3),
        });

        assert_eq!(builder.timeout, Duration::from_secs(3));
        assert!(builder.credentials.is_some());
    }
}
