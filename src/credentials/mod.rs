//! Baidu translation credential resolution.
//!
//! Credentials come from one of two sources, checked in order:
//!
//! 1. A local `KEY=value` file (default `BaiduTranslationApiKey.txt`) holding
//!    `APP_ID` and `SECRET_KEY`.
//! 2. The `BAIDU_APP_ID` and `BAIDU_SECRET_KEY` environment variables.
//!
//! A source only counts when it yields both values; fields are never mixed
//! across sources. Resolution happens on every translation call so an edited
//! file takes effect without a restart.

use crate::error::{ProxyError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use zeroize::Zeroize;

pub const APP_ID_KEY: &str = "APP_ID";
pub const SECRET_KEY_KEY: &str = "SECRET_KEY";
pub const APP_ID_ENV: &str = "BAIDU_APP_ID";
pub const SECRET_KEY_ENV: &str = "BAIDU_SECRET_KEY";

/// App identifier and signing secret for the Baidu translation API.
#[derive(Clone, PartialEq, Eq, Zeroize)]
#[zeroize(drop)]
pub struct TranslationCredentials {
    pub app_id: String,
    pub secret_key: String,
}

// Custom Debug impl that never logs the secret
impl std::fmt::Debug for TranslationCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationCredentials")
            .field("app_id", &self.app_id)
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}

/// Where a resolved credential pair came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialOrigin {
    File,
    Environment,
}

impl CredentialOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialOrigin::File => "file",
            CredentialOrigin::Environment => "environment",
        }
    }
}

impl TranslationCredentials {
    /// Parse newline-separated `KEY=value` pairs.
    ///
    /// Keys and values are trimmed, so CRLF files and `APP_ID = x` both work.
    /// Values may themselves contain `=`. Returns `None` unless both keys carry
    /// a non-empty value.
    pub fn parse(contents: &str) -> Option<Self> {
        let mut app_id = None;
        let mut secret_key = None;

        for line in contents.lines() {
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            match key.trim() {
                APP_ID_KEY => app_id = Some(value.to_string()),
                SECRET_KEY_KEY => secret_key = Some(value.to_string()),
                _ => {}
            }
        }

        Some(Self {
            app_id: app_id?,
            secret_key: secret_key?,
        })
    }

    /// Build from environment-style lookups, requiring both values.
    pub fn from_env<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        Some(Self {
            app_id: value(APP_ID_ENV)?,
            secret_key: value(SECRET_KEY_ENV)?,
        })
    }
}

/// Resolves [`TranslationCredentials`] from a file path and the process environment.
#[derive(Debug, Clone)]
pub struct CredentialResolver {
    file: PathBuf,
}

impl CredentialResolver {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self { file: file.into() }
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Resolve against the real process environment.
    pub fn resolve(&self) -> Result<TranslationCredentials> {
        self.resolve_with_origin().map(|(creds, _)| creds)
    }

    /// Like [`resolve`](Self::resolve), also reporting which source won.
    pub fn resolve_with_origin(&self) -> Result<(TranslationCredentials, CredentialOrigin)> {
        self.resolve_with(|key| std::env::var(key).ok())
    }

    /// Resolve with an injectable environment lookup.
    pub fn resolve_with<F>(&self, env: F) -> Result<(TranslationCredentials, CredentialOrigin)>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(creds) = self.read_file() {
            debug!("Using Baidu credentials from {}", self.file.display());
            return Ok((creds, CredentialOrigin::File));
        }

        if let Some(creds) = TranslationCredentials::from_env(env) {
            debug!("Using Baidu credentials from environment");
            return Ok((creds, CredentialOrigin::Environment));
        }

        Err(ProxyError::InvalidCredentials(format!(
            "set {} and {} in {} or export {} and {}",
            APP_ID_KEY,
            SECRET_KEY_KEY,
            self.file.display(),
            APP_ID_ENV,
            SECRET_KEY_ENV
        )))
    }

    fn read_file(&self) -> Option<TranslationCredentials> {
        match std::fs::read_to_string(&self.file) {
            Ok(contents) => {
                let parsed = TranslationCredentials::parse(&contents);
                if parsed.is_none() {
                    warn!(
                        "Credential file {} is incomplete, falling back to environment",
                        self.file.display()
                    );
                }
                parsed
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!("Error reading {}: {}", self.file.display(), e);
                None
            }
        }
    }
}
