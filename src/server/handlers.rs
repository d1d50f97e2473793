// HTTP request handlers

use super::routes::AppState;
use crate::baidu::Direction;
use crate::error::{ProxyError, Result};
use crate::relay::{relay_events, sse_frames};
use crate::utils::logging::sanitize;
use axum::{
    body::Body,
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::{header, StatusCode, Uri},
    response::Response,
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, error, info};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub checks: HashMap<String, HealthCheck>,
    pub timestamp: String,
}

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheck {
    pub status: String,
    pub message: String,
}

impl HealthCheck {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            status: "ok".to_string(),
            message: message.into(),
        }
    }

    fn warning(message: impl Into<String>) -> Self {
        Self {
            status: "warning".to_string(),
            message: message.into(),
        }
    }
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let mut checks = HashMap::new();
    let mut overall_status = HealthStatus::Healthy;

    // Gemini API key
    let gemini_check = if state.gemini_client.has_api_key() {
        HealthCheck::ok(format!("Model: {}", state.gemini_client.model()))
    } else {
        overall_status = HealthStatus::Degraded;
        HealthCheck::warning("GOOGLE_API_KEY is not set")
    };
    checks.insert("gemini".to_string(), gemini_check);

    // Translation credentials
    // Report the source only, never the app id
    let translation_check = match state.baidu_client.credentials().resolve_with_origin() {
        Ok((_, origin)) => HealthCheck::ok(format!("Credentials resolved from {}", origin.as_str())),
        Err(e) => {
            overall_status = HealthStatus::Degraded;
            HealthCheck::warning(e.to_string())
        }
    };
    checks.insert("translation_credentials".to_string(), translation_check);

    // Front-end assets
    let static_files = &state.config.static_files;
    let static_check = if !static_files.enabled {
        HealthCheck::ok("Static file serving disabled")
    } else if std::path::Path::new(&static_files.dir).join("index.html").is_file() {
        HealthCheck::ok(format!("Serving {}", static_files.dir))
    } else {
        HealthCheck::warning(format!("{}/index.html not found", static_files.dir))
    };
    checks.insert("static_files".to_string(), static_check);

    Json(HealthResponse {
        status: overall_status,
        checks,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

#[derive(Debug, Deserialize)]
pub struct RewriteQuery {
    #[serde(default)]
    pub text: Option<String>,
}

/// Handler for `GET /api/rewrite-stream?text=...`
///
/// Validation failures are answered with a plain 400 before any stream is
/// opened. After that the response is always a 200 event stream and upstream
/// failures arrive as its terminal `error` frame.
pub async fn rewrite_stream_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<RewriteQuery>, QueryRejection>,
) -> Result<Response> {
    let Query(query) = query.map_err(|e| ProxyError::InvalidRequest(e.body_text()))?;
    let text = require_text(query.text)?;

    let prompt = state.prompt.build(&text);
    info!(
        "Rewrite stream requested: model={}, text_chars={}",
        state.gemini_client.model(),
        text.chars().count()
    );
    debug!("Prompt (first 200 chars): {}", sanitize(&prompt.chars().take(200).collect::<String>()));

    let client = state.gemini_client.clone();
    let idle_timeout = client.idle_timeout();
    let upstream = async move { client.stream_text(prompt).await };

    let body = Body::from_stream(sse_frames(relay_events(upstream, idle_timeout)));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/event-stream")
        .header(header::CACHE_CONTROL, "no-cache")
        .header(header::CONNECTION, "keep-alive")
        .header("X-Accel-Buffering", "no")
        .body(body)
        .map_err(|e| ProxyError::Internal(format!("Failed to build stream response: {}", e)))
}

#[derive(Debug, Deserialize)]
pub struct TranslateBody {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TranslateResult {
    pub result: String,
}

/// Handler for `POST /api/translate-zh` (English to Chinese)
pub async fn translate_zh_handler(
    State(state): State<AppState>,
    body: std::result::Result<Json<TranslateBody>, JsonRejection>,
) -> Result<Json<TranslateResult>> {
    translate(state, body, Direction::EnToZh).await
}

/// Handler for `POST /api/translate-en` (Chinese to English)
pub async fn translate_en_handler(
    State(state): State<AppState>,
    body: std::result::Result<Json<TranslateBody>, JsonRejection>,
) -> Result<Json<TranslateResult>> {
    translate(state, body, Direction::ZhToEn).await
}

async fn translate(
    state: AppState,
    body: std::result::Result<Json<TranslateBody>, JsonRejection>,
    direction: Direction,
) -> Result<Json<TranslateResult>> {
    let Json(body) = body.map_err(|e| ProxyError::InvalidRequest(e.body_text()))?;
    let text = require_text(body.text)?;

    info!(
        "Translation requested: {} -> {}, text_chars={}",
        direction.from_lang(),
        direction.to_lang(),
        text.chars().count()
    );

    match state.baidu_client.translate_direction(&text, direction).await {
        Ok(result) => Ok(Json(TranslateResult { result })),
        Err(e) => {
            error!("Translation failed ({}): {}", e.kind(), sanitize(&e.to_string()));
            Err(e)
        }
    }
}

/// Unknown `/api/*` paths must not fall through to the front-end.
pub async fn api_not_found_handler(uri: Uri) -> ProxyError {
    ProxyError::NotFound(uri.path().to_string())
}

fn require_text(text: Option<String>) -> Result<String> {
    match text {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(ProxyError::InvalidRequest("No text provided".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_text() {
        assert_eq!(require_text(Some("hi".to_string())).unwrap(), "hi");
        assert!(require_text(None).is_err());
        assert!(require_text(Some(String::new())).is_err());
        assert!(require_text(Some(" \n".to_string())).is_err());
    }

    #[test]
    fn test_health_status_serialization() {
        assert_eq!(serde_json::to_value(HealthStatus::Degraded).unwrap(), "degraded");
    }
}
