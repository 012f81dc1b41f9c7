use crate::{
    Error, Result,
    config::UpstreamConfig,
    upstream::{MessagesRequest, Turn, UpstreamClient},
};
use std::sync::Arc;
use tracing::{debug, info};

/// Translates one caller request into one upstream Messages call.
///
/// Holds nothing per request: every call brings its own credential and
/// history, and both are dropped when the call returns.
#[derive(Clone)]
pub struct Relay {
    client: Arc<dyn UpstreamClient>,
    model: String,
    max_tokens: u32,
    history_limit: usize,
}

impl Relay {
    pub fn new(client: Arc<dyn UpstreamClient>, config: &UpstreamConfig) -> Self {
        Self {
            client,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            history_limit: config.history_limit,
        }
    }

    pub async fn chat(
        &self,
        message: Option<&str>,
        api_key: Option<&str>,
        history: Vec<Turn>,
    ) -> Result<String> {
        let (Some(_message), Some(api_key)) = (non_empty(message), non_empty(api_key)) else {
            return Err(Error::missing_fields());
        };

        let received = history.len();
        let request = self.build_request(history);
        info!(
            "Relaying chat with {} of {} history turns",
            request.messages.len(),
            received
        );

        let response = self.client.create_message(api_key, request).await?;
        let text = response
            .first_text()
            .ok_or_else(|| Error::internal("upstream response has no content[0].text"))?;

        debug!("Upstream reply is {} bytes", text.len());
        Ok(text.to_string())
    }

    pub fn build_request(&self, history: Vec<Turn>) -> MessagesRequest {
        MessagesRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            messages: truncate_history(history, self.history_limit),
        }
    }
}

/// Keeps the `limit` most recent turns, in their original order.
pub fn truncate_history(mut history: Vec<Turn>, limit: usize) -> Vec<Turn> {
    if history.len() > limit {
        history.drain(..history.len() - limit);
    }
    history
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
