use super::{sanitize, types::*};
use crate::{Error, Result, config::UpstreamConfig};
use async_trait::async_trait;
use reqwest::{StatusCode, header::CONTENT_TYPE};
use std::time::Duration;
use tracing::{debug, warn};

const API_KEY_HEADER: &str = "x-api-key";
const VERSION_HEADER: &str = "anthropic-version";

#[async_trait]
pub trait UpstreamClient: Send + Sync {
    /// Sends one Messages API call authenticated with the caller's key.
    async fn create_message(&self, api_key: &str, request: MessagesRequest)
    -> Result<MessagesResponse>;
}

pub struct AnthropicClient {
    http: reqwest::Client,
    url: String,
    api_version: String,
}

impl AnthropicClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            url: config.url.clone(),
            api_version: config.api_version.clone(),
        })
    }
}

#[async_trait]
impl UpstreamClient for AnthropicClient {
    async fn create_message(
        &self,
        api_key: &str,
        request: MessagesRequest,
    ) -> Result<MessagesResponse> {
        debug!(
            "Sending {} messages to upstream model {}",
            request.messages.len(),
            request.model
        );

        let response = self
            .http
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .header(API_KEY_HEADER, api_key)
            .header(VERSION_HEADER, &self.api_version)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let is_json = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .is_some_and(|value| value.starts_with("application/json"));
            let body = response.text().await?;

            debug!("Upstream returned status {}", status);
            return Err(Error::upstream(
                status.as_u16(),
                error_message(status, is_json, &body),
            ));
        }

        let body = response.bytes().await?;
        let parsed = serde_json::from_slice::<MessagesResponse>(&body)
            .map_err(|e| Error::internal(format!("invalid upstream response: {}", e)))?;
        debug!("Received {} content blocks", parsed.content.len());

        Ok(parsed)
    }
}

/// Picks the message to report for a failed upstream call: the JSON
/// `error.message` when there is one, the sanitized body text otherwise.
/// Both are capped to the same length.
pub(crate) fn error_message(status: StatusCode, is_json: bool, body: &str) -> String {
    if is_json {
        let detail = serde_json::from_str::<UpstreamErrorBody>(body)
            .ok()
            .and_then(|parsed| parsed.error);
        if let Some(UpstreamErrorDetail {
            error_type,
            message: Some(message),
        }) = detail
        {
            warn!(
                "Upstream error type {} with status {}",
                error_type.as_deref().unwrap_or("unknown"),
                status
            );
            return sanitize::cap(&message);
        }
    }

    sanitize::error_text(status, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_client_creation_with_defaults() {
        let client = AnthropicClient::new(&UpstreamConfig::default()).unwrap();
        assert_eq!(client.url, "https://api.anthropic.com/v1/messages");
        assert_eq!(client.api_version, "2023-06-01");
    }

    #[test]
    fn test_client_creation_with_timeout() {
        let config = UpstreamConfig {
            request_timeout_secs: Some(30),
            ..UpstreamConfig::default()
        };
        assert!(AnthropicClient::new(&config).is_ok());
    }

    #[test]
    fn test_error_message_from_json() {
        let body = r#"{"type":"error","error":{"type":"rate_limit_error","message":"rate limited"}}"#;
        assert_eq!(
            error_message(StatusCode::TOO_MANY_REQUESTS, true, body),
            "rate limited"
        );
    }

    #[test]
    fn test_error_message_from_json_is_capped() {
        let body = serde_json::json!({
            "error": {"type": "invalid_request_error", "message": "x".repeat(1000)}
        })
        .to_string();
        let message = error_message(StatusCode::BAD_REQUEST, true, &body);
        assert_eq!(message.chars().count(), 201);
        assert!(message.ends_with('…'));
    }

    #[test]
    fn test_error_message_json_without_message() {
        let body = r#"{"error":{"type":"overloaded_error"}}"#;
        assert_eq!(
            error_message(StatusCode::SERVICE_UNAVAILABLE, true, body),
            body
        );
    }

    #[test]
    fn test_error_message_ignores_json_when_not_declared() {
        let body = r#"{"error":{"message":"hidden"}}"#;
        assert_eq!(error_message(StatusCode::BAD_REQUEST, false, body), body);
    }

    #[test]
    fn test_error_message_invalid_json_falls_back() {
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, true, "<html>oops</html>"),
            "Bad Gateway"
        );
    }
}
