// Configuration module

mod models;

pub use models::*;

use crate::error::{ProxyError, Result};
use config::{Config, Environment, File};
use std::path::PathBuf;

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. CLI arguments (highest, applied by the caller)
    /// 2. Well-known variables (`GOOGLE_API_KEY`, `GEMINI_PROMPT_BASE`, `PORT`)
    /// 3. Environment variables (`REWRITE_RELAY__SECTION__FIELD`)
    /// 4. Config file
    /// 5. Defaults (lowest)
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let path = config_path
            .map(str::to_string)
            .unwrap_or_else(Self::default_config_path);

        let config = Config::builder()
            // Start with defaults
            .add_source(Config::try_from(&Self::default())?)
            // Load from config file if it exists
            .add_source(File::with_name(&path).required(config_path.is_some()))
            // Override with environment variables (prefix: REWRITE_RELAY__)
            .add_source(
                Environment::with_prefix("REWRITE_RELAY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| ProxyError::Config(e.to_string()))?;

        let mut app_config: AppConfig = config
            .try_deserialize()
            .map_err(|e| ProxyError::Config(e.to_string()))?;

        app_config.apply_well_known_env(|key| std::env::var(key).ok())?;

        Ok(app_config)
    }

    /// Apply the plain variable names the front-end deployment has always used.
    ///
    /// Empty values are ignored so an exported-but-blank variable never wipes
    /// a value coming from the config file.
    pub fn apply_well_known_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_empty("GOOGLE_API_KEY") {
            self.gemini.api_key = Some(key);
        }
        if let Some(prompt) = non_empty("GEMINI_PROMPT_BASE") {
            self.gemini.prompt_base = Some(prompt);
        }
        if let Some(port) = non_empty("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| ProxyError::Config(format!("PORT is not a valid port: {}", port)))?;
        }

        Ok(())
    }

    fn default_config_path() -> String {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".rewrite-relay")
            .join("config.toml")
            .to_string_lossy()
            .to_string()
    }
}
