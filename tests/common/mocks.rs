use async_trait::async_trait;
use claude_chat_proxy::{
    Error, Result,
    upstream::{ContentBlock, MessagesRequest, MessagesResponse, UpstreamClient},
};
use std::sync::{Arc, Mutex};

/// What the mock upstream does when called.
#[derive(Debug, Clone)]
pub enum MockReply {
    Text(String),
    Empty,
    Upstream { status: u16, message: String },
    Unreachable,
    TimedOut,
}

/// Recorded call: credential plus the request body the relay built.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub api_key: String,
    pub request: MessagesRequest,
}

/// Mock upstream client for testing
#[derive(Debug)]
pub struct MockUpstreamClient {
    pub reply: MockReply,
    pub calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockUpstreamClient {
    pub fn new(reply: MockReply) -> Self {
        Self {
            reply,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn replying(text: &str) -> Self {
        Self::new(MockReply::Text(text.to_string()))
    }

    pub fn get_calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl UpstreamClient for MockUpstreamClient {
    async fn create_message(
        &self,
        api_key: &str,
        request: MessagesRequest,
    ) -> Result<MessagesResponse> {
        self.calls.lock().unwrap().push(RecordedCall {
            api_key: api_key.to_string(),
            request,
        });

        match &self.reply {
            MockReply::Text(text) => Ok(MessagesResponse {
                content: vec![ContentBlock {
                    text: Some(text.clone()),
                }],
            }),
            MockReply::Empty => Ok(MessagesResponse { content: vec![] }),
            MockReply::Upstream { status, message } => Err(Error::upstream(*status, message)),
            MockReply::Unreachable => Err(Error::Connectivity),
            MockReply::TimedOut => Err(Error::Timeout),
        }
    }
}
