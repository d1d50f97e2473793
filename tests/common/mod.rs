// Shared router harness for integration tests

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use rewrite_relay::baidu::BaiduClient;
use rewrite_relay::config::AppConfig;
use rewrite_relay::gemini::GeminiClient;
use rewrite_relay::server::create_router;
use std::path::Path;
use tempfile::TempDir;
use tower::ServiceExt;

pub const TEST_MODEL: &str = "gemini-test";
pub const TEST_API_KEY: &str = "test-api-key";
pub const GEMINI_PATH: &str = "/v1beta/models/gemini-test:streamGenerateContent";
pub const BAIDU_PATH: &str = "/api/trans/vip/translate";

/// Temp directory holding the credential file and the front-end.
pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let public = dir.path().join("public");
        std::fs::create_dir_all(public.join("assets")).unwrap();
        std::fs::write(public.join("index.html"), "<html>rewrite app</html>").unwrap();
        std::fs::write(public.join("assets").join("app.js"), "console.log('app');").unwrap();
        Self { dir }
    }

    pub fn with_credentials(self) -> Self {
        std::fs::write(
            self.credentials_file(),
            "APP_ID=test-app\nSECRET_KEY=test-secret\n",
        )
        .unwrap();
        self
    }

    pub fn credentials_file(&self) -> std::path::PathBuf {
        self.dir.path().join("BaiduTranslationApiKey.txt")
    }

    pub fn static_dir(&self) -> std::path::PathBuf {
        self.dir.path().join("public")
    }

    pub fn config(&self, upstream_url: &str) -> AppConfig {
        let mut config = AppConfig::default();
        config.gemini.api_base_url = format!("{}/v1beta", upstream_url);
        config.gemini.api_key = Some(TEST_API_KEY.to_string());
        config.gemini.model = TEST_MODEL.to_string();
        config.gemini.prompt_base = Some("Rewrite: ".to_string());
        config.gemini.prompt_file = path_str(&self.dir.path().join("absent-prompt.txt"));
        config.gemini.idle_timeout_seconds = 5;
        config.baidu.api_url = format!("{}{}", upstream_url, BAIDU_PATH);
        config.baidu.credentials_file = path_str(&self.credentials_file());
        config.static_files.dir = path_str(&self.static_dir());
        config
    }
}

pub fn path_str(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

pub fn router(config: AppConfig) -> Router {
    let gemini = GeminiClient::new(&config.gemini, &config.performance).unwrap();
    let baidu = BaiduClient::new(&config.baidu, &config.performance).unwrap();
    create_router(config, gemini, baidu).unwrap()
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}

/// One Gemini SSE event carrying `text`, framed the way Google frames it.
pub fn gemini_event(text: &str) -> String {
    let payload = serde_json::json!({
        "candidates": [{ "content": { "role": "model", "parts": [{ "text": text }] } }]
    });
    format!("data: {}\r\n\r\n", payload)
}
