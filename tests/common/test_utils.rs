use super::mocks::MockUpstreamClient;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response},
};
use claude_chat_proxy::{
    config::UpstreamConfig,
    relay::Relay,
    server::{handlers::AppState, router},
    upstream::AnthropicClient,
};
use serde_json::{Value, json};
use std::sync::Arc;

pub const TEST_API_KEY: &str = "sk-ant-test-0123456789";

/// Router backed by a mock upstream client
pub fn app_with_mock(mock: Arc<MockUpstreamClient>) -> Router {
    let state = AppState {
        relay: Relay::new(mock, &UpstreamConfig::default()),
    };
    router(state)
}

/// Upstream config pointing at a local mock server
pub fn upstream_config(base_url: &str) -> UpstreamConfig {
    UpstreamConfig {
        url: format!("{}/v1/messages", base_url),
        model: "claude-test-model".to_string(),
        ..UpstreamConfig::default()
    }
}

/// Router backed by the real HTTP client
pub fn app_with_upstream(config: &UpstreamConfig) -> Router {
    let client = AnthropicClient::new(config).unwrap();
    let state = AppState {
        relay: Relay::new(Arc::new(client), config),
    };
    router(state)
}

/// `count` alternating user/assistant turns numbered from zero
pub fn history(count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| {
            let role = if i % 2 == 0 { "user" } else { "assistant" };
            json!({"role": role, "content": format!("turn {}", i)})
        })
        .collect()
}

pub fn chat_request(body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
