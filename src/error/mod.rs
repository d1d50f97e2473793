// Error types for rewrite-relay

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Baidu API credentials missing or malformed: {0}")]
    InvalidCredentials(String),

    #[error("Gemini API error: {0}")]
    GeminiApi(String),

    #[error("Baidu API Error: {0}")]
    TranslationApi(String),

    #[error("Baidu API returned no translation results")]
    EmptyTranslation,

    #[error("Upstream idle for more than {0:?}")]
    IdleTimeout(std::time::Duration),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Config parsing error: {0}")]
    ConfigParsing(#[from] config::ConfigError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ProxyError {
    /// HTTP status used when the error is reported outside of an event stream.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ProxyError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Coarse classification used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ProxyError::InvalidRequest(_) => "validation_error",
            ProxyError::NotFound(_) => "not_found_error",
            ProxyError::Config(_)
            | ProxyError::InvalidCredentials(_)
            | ProxyError::ConfigParsing(_) => "configuration_error",
            ProxyError::GeminiApi(_)
            | ProxyError::TranslationApi(_)
            | ProxyError::EmptyTranslation
            | ProxyError::IdleTimeout(_)
            | ProxyError::Http(_) => "provider_error",
            _ => "internal_error",
        }
    }
}

// Convert ProxyError to HTTP responses for Axum
impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = json!({ "error": self.to_string() });

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ProxyError>;
