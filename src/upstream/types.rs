use serde::{Deserialize, Serialize};

/// One history entry. Its shape belongs to the upstream API, so it is carried
/// through as raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Turn(pub serde_json::Value);

#[derive(Debug, Clone, Serialize)]
pub struct MessagesRequest {
    pub model: String,
    pub max_tokens: u32,
    pub messages: Vec<Turn>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessagesResponse {
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContentBlock {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamErrorBody {
    pub error: Option<UpstreamErrorDetail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamErrorDetail {
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl MessagesResponse {
    /// Text of the first content block, if the upstream sent one.
    pub fn first_text(&self) -> Option<&str> {
        self.content.first().and_then(|block| block.text.as_deref())
    }
}
