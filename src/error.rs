use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::types::ErrorResponse;

pub type Result<T> = std::result::Result<T, Error>;

pub const MISSING_FIELDS_MESSAGE: &str = "Message or API key missing";

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Validation(String),

    #[error("Upstream API error: {message}")]
    Upstream { status: u16, message: String },

    #[error("Unable to connect to upstream API")]
    Connectivity,

    #[error("Upstream API request timed out")]
    Timeout,

    #[error("Server error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        // reqwest only ever puts the URL in its Display output, never headers,
        // so the credential cannot leak through here.
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_connect() {
            Self::Connectivity
        } else {
            let e = e.without_url();
            let mut detail = e.to_string();
            let mut source = std::error::Error::source(&e);
            while let Some(cause) = source {
                detail.push_str(": ");
                detail.push_str(&cause.to_string());
                source = cause.source();
            }
            Self::Internal(detail)
        }
    }
}

impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn missing_fields() -> Self {
        Self::Validation(MISSING_FIELDS_MESSAGE.to_string())
    }

    pub fn upstream(status: u16, msg: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// HTTP status reported to the caller for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            Self::Connectivity => StatusCode::SERVICE_UNAVAILABLE,
            Self::Timeout => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let upstream_status = match &self {
            Self::Upstream { status, .. } => Some(*status),
            _ => None,
        };
        let body = Json(ErrorResponse {
            error: self.to_string(),
            status: upstream_status,
        });
        (status, body).into_response()
    }
}
