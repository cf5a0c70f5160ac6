//! Test helpers for hayat-server unit tests.

#![allow(clippy::expect_used, reason = "test setup: panics are the assertion mechanism")]

use axum_test::TestServer;
use hayat_client::{ClientConfig, GenerationClient};
use wiremock::MockServer;

use crate::router::build_router;
use crate::state::AppState;

/// `AppState` whose client talks to `backend` instead of the real Gemini API.
///
/// Video polling runs without delay.
pub fn test_app_state(backend: &MockServer) -> AppState {
    let mut config = ClientConfig::new("test-key");
    config.base_url = format!("{}/v1beta", backend.uri());
    config.poll.interval_secs = 0;
    let client = GenerationClient::from_config(config).expect("failed to build test client");
    AppState::new(client)
}

/// Mock Gemini backend plus an in-process server wired to it.
///
/// Keep the `MockServer` alive for the test duration.
pub async fn test_server() -> (TestServer, MockServer, AppState) {
    let backend = MockServer::start().await;
    let state = test_app_state(&backend);
    let server = TestServer::new(build_router(state.clone())).expect("failed to start test server");
    (server, backend, state)
}

/// Parse an SSE body into `(event, data)` pairs.
pub fn sse_events(body: &str) -> Vec<(String, serde_json::Value)> {
    body.split("\n\n")
        .filter_map(|block| {
            let mut name = None;
            let mut data = String::new();
            for line in block.lines() {
                if let Some(value) = line.strip_prefix("event:") {
                    name = Some(value.trim().to_string());
                } else if let Some(value) = line.strip_prefix("data:") {
                    data.push_str(value.trim_start());
                }
            }
            let name = name?;
            let data = serde_json::from_str(&data).unwrap_or(serde_json::Value::Null);
            Some((name, data))
        })
        .collect()
}
