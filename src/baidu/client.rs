// Baidu translation client with request signing

use super::{Direction, TranslateResponse};
use crate::config::{BaiduConfig, PerformanceConfig};
use crate::credentials::{CredentialResolver, TranslationCredentials};
use crate::error::{ProxyError, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error};

/// Request signature: lowercase hex MD5 over `appid + query + salt + secret_key`.
pub fn sign(app_id: &str, query: &str, salt: &str, secret_key: &str) -> String {
    let mut input = String::with_capacity(app_id.len() + query.len() + salt.len() + secret_key.len());
    input.push_str(app_id);
    input.push_str(query);
    input.push_str(salt);
    input.push_str(secret_key);
    format!("{:x}", md5::compute(input.as_bytes()))
}

/// Client for the Baidu general translation API.
pub struct BaiduClient {
    http_client: Client,
    config: BaiduConfig,
    credentials: CredentialResolver,
}

impl BaiduClient {
    pub fn new(config: &BaiduConfig, performance: &PerformanceConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(performance.connection_pool_size)
            .use_rustls_tls()
            .build()
            .map_err(|e| ProxyError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            config: config.clone(),
            credentials: CredentialResolver::new(&config.credentials_file),
        })
    }

    pub fn credentials(&self) -> &CredentialResolver {
        &self.credentials
    }

    /// Translate in one of the two fixed directions.
    pub async fn translate_direction(&self, text: &str, direction: Direction) -> Result<String> {
        self.translate(text, direction.from_lang(), direction.to_lang()).await
    }

    /// Translate `text` between any language pair the provider supports.
    ///
    /// Input and credentials are validated before any network call.
    pub async fn translate(&self, text: &str, from: &str, to: &str) -> Result<String> {
        if text.trim().is_empty() {
            return Err(ProxyError::InvalidRequest("No text provided".to_string()));
        }

        let credentials = self.credentials.resolve()?;
        let salt = chrono::Utc::now().timestamp_millis().to_string();

        self.send(&credentials, text, from, to, &salt).await
    }

    // Transport errors drop the URL: it carries the app id and signature
    async fn send(
        &self,
        credentials: &TranslationCredentials,
        text: &str,
        from: &str,
        to: &str,
        salt: &str,
    ) -> Result<String> {
        let signature = sign(&credentials.app_id, text, salt, &credentials.secret_key);

        debug!("Calling Baidu translate: {} -> {}, {} chars", from, to, text.chars().count());

        let response = self
            .http_client
            .get(&self.config.api_url)
            .query(&[
                ("q", text),
                ("from", from),
                ("to", to),
                ("appid", credentials.app_id.as_str()),
                ("salt", salt),
                ("sign", signature.as_str()),
            ])
            .send()
            .await
            .map_err(|e| ProxyError::Http(e.without_url()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProxyError::Http(e.without_url()))?;

        if !status.is_success() {
            error!("Baidu API error: HTTP {} - Response body: {}", status, body);
            return Err(ProxyError::TranslationApi(format!("HTTP {}", status)));
        }

        let parsed: TranslateResponse = serde_json::from_str(&body).map_err(|e| {
            error!("Failed to parse Baidu response: {}", e);
            ProxyError::TranslationApi(format!("Response parsing error: {}", e))
        })?;

        interpret(parsed)
    }
}

/// Map a decoded response to the joined translation or a uniform error.
pub(crate) fn interpret(response: TranslateResponse) -> Result<String> {
    if let Some(code) = response.error_code() {
        let message = response.error_msg.unwrap_or_else(|| format!("error code {}", code));
        error!("Baidu API returned error {}: {}", code, message);
        return Err(ProxyError::TranslationApi(message));
    }

    let segments = response.trans_result.unwrap_or_default();
    if segments.is_empty() {
        return Err(ProxyError::EmptyTranslation);
    }

    Ok(segments
        .into_iter()
        .map(|segment| segment.dst)
        .collect::<Vec<_>>()
        .join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_sign_matches_published_example() {
        // Worked example from the Baidu Fanyi API documentation
        assert_eq!(
            sign("2015063000000001", "apple", "1435660288", "12345678"),
            "f89f9594663708c1605f3d736d01d2d4"
        );
    }

    #[test]
    fn test_sign_is_md5_of_concatenation() {
        assert_eq!(sign("", "", "", ""), "d41d8cd98f00b204e9800998ecf8427e");
    }

    #[test]
    fn test_interpret_joins_segments_in_order() {
        let response: TranslateResponse = serde_json::from_str(
            r#"{"from":"en","to":"zh","trans_result":[
                {"src":"Hello","dst":"你好"},
                {"src":"World","dst":"世界"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(interpret(response).unwrap(), "你好\n世界");
    }

    #[test]
    fn test_interpret_provider_error() {
        let response: TranslateResponse =
            serde_json::from_str(r#"{"error_code":"54001","error_msg":"Invalid Sign"}"#).unwrap();

        let err = interpret(response).unwrap_err();
        assert!(matches!(err, ProxyError::TranslationApi(_)));
        assert_eq!(err.to_string(), "Baidu API Error: Invalid Sign");
    }

    #[test]
    fn test_interpret_empty_result_is_error() {
        let empty: TranslateResponse =
            serde_json::from_str(r#"{"from":"en","to":"zh","trans_result":[]}"#).unwrap();
        assert!(matches!(interpret(empty).unwrap_err(), ProxyError::EmptyTranslation));

        let missing: TranslateResponse = serde_json::from_str(r#"{"from":"en","to":"zh"}"#).unwrap();
        assert!(matches!(interpret(missing).unwrap_err(), ProxyError::EmptyTranslation));
    }

    #[tokio::test]
    async fn test_blank_text_fails_before_credentials() {
        let config = BaiduConfig {
            credentials_file: "/nonexistent/creds.txt".to_string(),
            ..BaiduConfig::default()
        };
        let client = BaiduClient::new(&config, &PerformanceConfig::default()).unwrap();

        let err = client.translate("   ", "en", "zh").await.unwrap_err();
        assert!(matches!(err, ProxyError::InvalidRequest(_)));
    }

    proptest! {
        #[test]
        fn prop_sign_is_deterministic_lowercase_hex(
            app_id in "[0-9]{1,20}",
            query in "\\PC{0,40}",
            salt in "[0-9]{1,13}",
            secret in "[A-Za-z0-9]{1,20}",
        ) {
            let first = sign(&app_id, &query, &salt, &secret);
            let second = sign(&app_id, &query, &salt, &secret);
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(first.len(), 32);
            prop_assert!(first.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));

            let expected = format!("{:x}", md5::compute(format!("{}{}{}{}", app_id, query, salt, secret)));
            prop_assert_eq!(first, expected);
        }
    }
}
