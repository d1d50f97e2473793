// HTTP routes configuration

use super::handlers::{
    api_not_found_handler, health_handler, rewrite_stream_handler, translate_en_handler,
    translate_zh_handler,
};
use super::middleware::{compression_layer, cors_layer, request_id_layers};
use crate::baidu::BaiduClient;
use crate::config::AppConfig;
use crate::error::Result;
use crate::gemini::GeminiClient;
use crate::relay::PromptSource;
use axum::{
    routing::{any, get, post},
    Router,
};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub gemini_client: Arc<GeminiClient>,
    pub baidu_client: Arc<BaiduClient>,
    pub prompt: PromptSource,
}

pub fn create_router(
    config: AppConfig,
    gemini_client: GeminiClient,
    baidu_client: BaiduClient,
) -> Result<Router> {
    let state = AppState {
        prompt: PromptSource::from_config(&config.gemini),
        gemini_client: Arc::new(gemini_client),
        baidu_client: Arc::new(baidu_client),
        config,
    };

    let (set_request_id, propagate_request_id) = request_id_layers();

    let mut app = Router::new()
        .route("/health", get(health_handler))
        .route("/api/rewrite-stream", get(rewrite_stream_handler))
        .route("/api/translate-zh", post(translate_zh_handler))
        .route("/api/translate-en", post(translate_en_handler))
        .route("/api/*path", any(api_not_found_handler));

    // Any other path belongs to the single-page front-end
    if state.config.static_files.enabled {
        let dir = PathBuf::from(&state.config.static_files.dir);
        info!("Serving front-end from {}", dir.display());
        let spa = ServeDir::new(&dir).fallback(ServeFile::new(dir.join("index.html")));
        app = app.fallback_service(spa);
    }

    let app = app
        .layer(RequestBodyLimitLayer::new(state.config.performance.max_body_bytes))
        .layer(compression_layer(&state.config.performance))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id)
        .layer(set_request_id)
        .with_state(state);

    Ok(app)
}
