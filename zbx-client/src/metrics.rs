//! Client metrics
//!
//! OpenTelemetry instruments recorded around every API call when metrics
//! are enabled on the [`ClientBuilder`](crate::ClientBuilder):
//!
//! - **zbx.client.requests.total**: calls made, by method and outcome
//! - **zbx.client.request.duration**: call latency in seconds
//! - **zbx.client.errors.total**: failed calls, by error kind
//! - **zbx.client.api_errors.total**: server-reported errors, by code

use opentelemetry::{
    global,
    metrics::{Counter, Histogram, Meter},
    KeyValue,
};
use zbx_core::ErrorKind;

/// Client metrics for monitoring
pub struct ClientMetrics {
    /// Total number of calls
    pub requests_total: Counter<u64>,
    /// Call duration in seconds
    pub request_duration: Histogram<f64>,
    /// Total number of failed calls
    pub errors_total: Counter<u64>,
    /// Total number of JSON-RPC errors reported by the server
    pub api_errors_total: Counter<u64>,
}

impl ClientMetrics {
    /// Create instruments on the global meter provider
    pub fn new(service_name: impl Into<String>) -> Self {
        let name: &'static str = Box::leak(service_name.into().into_boxed_str());
        let meter = global::meter(name);
        Self::new_with_meter(&meter)
    }

    /// Create instruments on a specific meter
    pub fn new_with_meter(meter: &Meter) -> Self {
        Self {
            requests_total: meter
                .u64_counter("zbx.client.requests.total")
                .with_description("Total number of API calls")
                .build(),
            request_duration: meter
                .f64_histogram("zbx.client.request.duration")
                .with_description("API call duration in seconds")
                .build(),
            errors_total: meter
                .u64_counter("zbx.client.errors.total")
                .with_description("Total number of failed API calls")
                .build(),
            api_errors_total: meter
                .u64_counter("zbx.client.api_errors.total")
                .with_description("Total number of JSON-RPC errors returned by the server")
                .build(),
        }
    }

    /// Record a finished call
    pub fn record_request(&self, method: &str, status: &str, duration_secs: f64) {
        let attributes = &[
            KeyValue::new("method", method.to_string()),
            KeyValue::new("status", status.to_string()),
        ];
        self.requests_total.add(1, attributes);
        self.request_duration.record(duration_secs, attributes);
    }

    /// Record a failed call
    pub fn record_error(&self, kind: ErrorKind) {
        self.errors_total
            .add(1, &[KeyValue::new("error_kind", kind_label(kind))]);
    }

    /// Record a server-reported error code
    pub fn record_api_error(&self, method: &str, code: i32) {
        self.api_errors_total.add(
            1,
            &[
                KeyValue::new("method", method.to_string()),
                KeyValue::new("code", i64::from(code)),
            ],
        );
    }
}

/// Stable label for an error kind
pub fn kind_label(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::Transport => "transport",
        ErrorKind::Decode => "decode",
        ErrorKind::Api => "api",
        ErrorKind::Client => "client",
    }
}
