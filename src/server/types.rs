use crate::upstream::Turn;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const SERVICE_NAME: &str = "Claude Chat Proxy";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub conversation_history: Option<Vec<Turn>>,
}

// Hand-written so the credential can never end up in a log line.
impl fmt::Debug for ChatRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatRequest")
            .field("message", &self.message.as_ref().map(|m| m.len()))
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field(
                "conversation_history",
                &self.conversation_history.as_ref().map(Vec::len),
            )
            .finish()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub status: Option<u16>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}
