// Gemini API client for streamed text generation

use super::streaming::{self, ResponseStream};
use super::GenerateContentRequest;
use crate::config::{GeminiConfig, PerformanceConfig};
use crate::error::{ProxyError, Result};
use futures::{Stream, StreamExt};
use reqwest::Client;
use std::pin::Pin;
use std::time::Duration;
use tracing::{debug, warn};

/// Incremental text produced by one streamed generation call.
pub type TextStream = Pin<Box<dyn Stream<Item = Result<String>> + Send>>;

/// Client for the Google Gemini `streamGenerateContent` API.
///
/// Built once at startup and shared read-only between requests; the
/// underlying `reqwest::Client` pools connections per host.
pub struct GeminiClient {
    http_client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Create a new Gemini client.
    ///
    /// A missing API key is not fatal here: every rewrite will report a
    /// configuration error inside its event stream instead.
    pub fn new(config: &GeminiConfig, performance: &PerformanceConfig) -> Result<Self> {
        // Configure HTTP client for optimal streaming performance
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(performance.connection_pool_size)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Some(Duration::from_secs(60)))
            .tcp_nodelay(true)
            .use_rustls_tls()
            .build()
            .map_err(|e| ProxyError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        if config.api_key.is_none() {
            warn!("No Gemini API key configured; set GOOGLE_API_KEY to enable rewrites");
        }

        debug!("Created Gemini HTTP client for model {}", config.model);

        Ok(Self {
            http_client,
            config: config.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    pub fn has_api_key(&self) -> bool {
        self.config.api_key.is_some()
    }

    /// Maximum wait between two upstream events.
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.config.idle_timeout_seconds)
    }

    fn stream_url(&self) -> String {
        format!(
            "{}/models/{}:streamGenerateContent?alt=sse",
            self.config.api_base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Call Gemini `streamGenerateContent` API for SSE streaming.
    ///
    /// Returns a stream of response chunks.
    pub async fn stream_generate_content(
        &self,
        request: GenerateContentRequest,
    ) -> Result<ResponseStream> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| ProxyError::Config("GOOGLE_API_KEY is not set".to_string()))?;

        let request_body = serde_json::to_string(&request)
            .map_err(|e| ProxyError::Internal(format!("Failed to serialize request: {}", e)))?;

        debug!("Calling streamGenerateContent API for model: {}", self.config.model);

        streaming::stream_generate_content(&self.http_client, self.stream_url(), api_key, request_body)
            .await
    }

    /// Stream the visible text of a single-prompt generation.
    ///
    /// Chunks that carry no text (for example a trailing `finishReason`) are skipped.
    pub async fn stream_text(&self, prompt: String) -> Result<TextStream> {
        let responses = self
            .stream_generate_content(GenerateContentRequest::from_prompt(prompt))
            .await?;

        let texts = responses.filter_map(|chunk| async move {
            match chunk {
                Ok(response) => {
                    let text = response.text();
                    (!text.is_empty()).then_some(Ok(text))
                }
                Err(e) => Some(Err(e)),
            }
        });

        Ok(Box::pin(texts))
    }
}
