use super::types::{ChatRequest, ChatResponse, HealthResponse, SERVICE_NAME};
use crate::{Error, relay::Relay};
use axum::{
    extract::{State, rejection::JsonRejection},
    response::Json,
};
use tracing::{error, warn};

#[derive(Clone)]
pub struct AppState {
    pub relay: Relay,
}

pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, Error> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected chat request body: {}", rejection.body_text());
        Error::validation(format!("Invalid request body: {}", rejection.body_text()))
    })?;

    let history = request.conversation_history.unwrap_or_default();
    let result = state
        .relay
        .chat(
            request.message.as_deref(),
            request.api_key.as_deref(),
            history,
        )
        .await;

    match result {
        Ok(message) => Ok(Json(ChatResponse { message })),
        Err(e) => {
            match &e {
                Error::Validation(_) => warn!("Chat request failed validation: {}", e),
                Error::Upstream { status, .. } => {
                    warn!("Upstream rejected chat request with status {}", status)
                }
                Error::Connectivity | Error::Timeout => error!("Upstream unavailable: {}", e),
                _ => error!("Failed to relay chat request: {}", e),
            }
            Err(e)
        }
    }
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: SERVICE_NAME.to_string(),
    })
}
