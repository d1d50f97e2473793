//! Configuration data structures for rewrite-relay.
//!
//! This module defines the schema for the application settings: the HTTP
//! server, the Gemini rewrite upstream, the Baidu translation upstream, static
//! asset serving and logging.

use serde::{Deserialize, Serialize};

/// The root configuration object for the application.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// HTTP server settings (host, port).
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream Gemini API settings used by the rewrite stream.
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Upstream Baidu translation settings.
    #[serde(default)]
    pub baidu: BaiduConfig,

    /// Front-end asset serving.
    #[serde(default)]
    pub static_files: StaticFilesConfig,

    /// Logging and observability settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Performance and resource management settings.
    #[serde(default)]
    pub performance: PerformanceConfig,
}

/// Settings for the built-in HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The IP address or hostname the server should bind to.
    /// Default: `0.0.0.0`
    #[serde(default = "default_host")]
    pub host: String,

    /// The port number the server should listen on.
    /// Default: `3000`
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Settings for the upstream Gemini API connection.
#[derive(Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Base URL for the Generative Language API.
    /// Default: `https://generativelanguage.googleapis.com/v1beta`
    #[serde(default = "default_gemini_base_url")]
    pub api_base_url: String,

    /// API key sent as `x-goog-api-key`. Usually supplied via `GOOGLE_API_KEY`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Model used for every rewrite.
    /// Default: `gemini-3-pro-preview`
    #[serde(default = "default_model")]
    pub model: String,

    /// Inline prompt prefix. Takes precedence over `prompt_file` when non-empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_base: Option<String>,

    /// File holding the prompt prefix, relative to the working directory.
    /// Default: `GeminiPrompt.txt`
    #[serde(default = "default_prompt_file")]
    pub prompt_file: String,

    /// Upper bound on a whole upstream call, stream included.
    /// Default: `300`
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Upper bound on the wait between two upstream stream events.
    /// Default: `60`
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_seconds: u64,
}

// Custom Debug impl that never logs the API key
impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_base_url", &self.api_base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .field("prompt_base", &self.prompt_base)
            .field("prompt_file", &self.prompt_file)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("idle_timeout_seconds", &self.idle_timeout_seconds)
            .finish()
    }
}

/// Settings for the Baidu general translation API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaiduConfig {
    /// Translation endpoint.
    /// Default: `https://fanyi-api.baidu.com/api/trans/vip/translate`
    #[serde(default = "default_baidu_url")]
    pub api_url: String,

    /// `KEY=value` file holding `APP_ID` and `SECRET_KEY`.
    /// Default: `BaiduTranslationApiKey.txt`
    #[serde(default = "default_credentials_file")]
    pub credentials_file: String,

    /// Request timeout in seconds.
    /// Default: `30`
    #[serde(default = "default_baidu_timeout")]
    pub timeout_seconds: u64,
}

/// Settings for serving the single-page front-end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticFilesConfig {
    /// Whether non-API paths are served from `dir`.
    /// Default: `true`
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Directory containing `index.html` and assets.
    /// Default: `public`
    #[serde(default = "default_static_dir")]
    pub dir: String,
}

/// Settings for application logging and output format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum log level (`trace`, `debug`, `info`, `warn`, `error`).
    /// Default: `info`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format for logs (`pretty`, `json`).
    /// Default: `pretty`
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Whether to mask API keys and request signatures in logs.
    /// Default: `true`
    #[serde(default = "default_true")]
    pub sanitize_tokens: bool,
}

/// Settings for tuning application performance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceConfig {
    /// Maximum number of idle connections kept per upstream host.
    /// Default: `10`
    #[serde(default = "default_pool_size")]
    pub connection_pool_size: usize,

    /// Whether to gzip-compress eligible responses. Event streams are never compressed.
    /// Default: `true`
    #[serde(default = "default_true")]
    pub enable_compression: bool,

    /// Maximum accepted request body size in bytes.
    /// Default: `1048576` (1 MiB)
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_gemini_base_url(),
            api_key: None,
            model: default_model(),
            prompt_base: None,
            prompt_file: default_prompt_file(),
            timeout_seconds: default_timeout(),
            idle_timeout_seconds: default_idle_timeout(),
        }
    }
}

impl Default for BaiduConfig {
    fn default() -> Self {
        Self {
            api_url: default_baidu_url(),
            credentials_file: default_credentials_file(),
            timeout_seconds: default_baidu_timeout(),
        }
    }
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: default_static_dir(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            sanitize_tokens: true,
        }
    }
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            connection_pool_size: default_pool_size(),
            enable_compression: true,
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

// Helper functions for serde defaults
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_model() -> String {
    "gemini-3-pro-preview".to_string()
}

fn default_prompt_file() -> String {
    "GeminiPrompt.txt".to_string()
}

fn default_timeout() -> u64 {
    300
}

fn default_idle_timeout() -> u64 {
    60
}

fn default_baidu_url() -> String {
    "https://fanyi-api.baidu.com/api/trans/vip/translate".to_string()
}

fn default_credentials_file() -> String {
    "BaiduTranslationApiKey.txt".to_string()
}

fn default_baidu_timeout() -> u64 {
    30
}

fn default_static_dir() -> String {
    "public".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_pool_size() -> usize {
    10
}

fn default_max_body_bytes() -> usize {
    1024 * 1024
}
