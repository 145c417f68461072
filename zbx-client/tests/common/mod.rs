//! Common test utilities for zbx-client integration tests
//!
//! A `wiremock` server stands in for the Zabbix frontend, so the real
//! `HttpTransport` is exercised end to end.

#![allow(dead_code)]

use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zbx_client::ZabbixClient;

/// Token every test client authenticates with
pub const TEST_TOKEN: &str = "0424bd59b807674191e7d77572075f33";

/// Path the client posts to
pub const API_PATH: &str = "/api_jsonrpc.php";

/// Build a JSON-RPC success envelope
pub fn mock_response(id: u64, result: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "result": result,
        "id": id
    })
}

/// Build a JSON-RPC error envelope
pub fn mock_error_response(id: u64, code: i32, message: &str, data: &str) -> Value {
    json!({
        "jsonrpc": "2.0",
        "error": {
            "code": code,
            "message": message,
            "data": data
        },
        "id": id
    })
}

/// Start a mock frontend
pub async fn start_server() -> MockServer {
    MockServer::start().await
}

/// Client for `server` authenticating with [`TEST_TOKEN`]
pub fn client_for(server: &MockServer) -> ZabbixClient {
    client_with_timeout(server, Duration::from_secs(5))
}

/// Client for `server` with a custom deadline
pub fn client_with_timeout(server: &MockServer, timeout: Duration) -> ZabbixClient {
    ZabbixClient::builder(server.uri())
        .api_token(TEST_TOKEN)
        .timeout(timeout)
        .build()
        .expect("client should build")
}

/// Answer every JSON-RPC POST with `body`
pub async fn mount_envelope(server: &MockServer, body: Value) {
    Mock::given(method("POST"))
        .and(path(API_PATH))
        .and(header("content-type", "application/json-rpc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Answer POSTs whose body contains `partial` with `body`
pub async fn mount_matching(server: &MockServer, partial: Value, body: Value) {
    Mock::given(method("POST"))
        .and(path(API_PATH))
        .and(body_partial_json(partial))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

/// Answer every POST with a raw status and body
pub async fn mount_raw(server: &MockServer, status: u16, body: &str) {
    Mock::given(method("POST"))
        .and(path(API_PATH))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(server)
        .await;
}

/// Bodies of all requests the server received, parsed as JSON
pub async fn received_bodies(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|r| serde_json::from_slice(&r.body).expect("request body should be JSON"))
        .collect()
}
