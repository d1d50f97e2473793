//! Baidu Fanyi general translation API.
//!
//! Requests are plain GETs signed with
//! `md5(appid + q + salt + secret_key)`; responses carry either an
//! `error_code`/`error_msg` pair or a list of translated segments.

mod client;

pub use client::{sign, BaiduClient};

use serde::Deserialize;
use serde_json::Value;

/// Code Baidu documents as "success"; some gateways echo it explicitly.
pub const SUCCESS_CODE: &str = "52000";

/// Translation direction exposed by the HTTP surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    EnToZh,
    ZhToEn,
}

impl Direction {
    pub fn from_lang(self) -> &'static str {
        match self {
            Direction::EnToZh => "en",
            Direction::ZhToEn => "zh",
        }
    }

    pub fn to_lang(self) -> &'static str {
        match self {
            Direction::EnToZh => "zh",
            Direction::ZhToEn => "en",
        }
    }
}

/// Raw response body of the translate endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TranslateResponse {
    #[serde(default)]
    pub from: Option<String>,

    #[serde(default)]
    pub to: Option<String>,

    #[serde(default)]
    pub trans_result: Option<Vec<TranslatedSegment>>,

    /// Sent as a string by the API, but tolerated as a number.
    #[serde(default)]
    pub error_code: Option<Value>,

    #[serde(default)]
    pub error_msg: Option<String>,
}

/// One translated line of the query.
#[derive(Debug, Clone, Deserialize)]
pub struct TranslatedSegment {
    pub src: String,
    pub dst: String,
}

impl TranslateResponse {
    /// Application-level error code, if the response reports a failure.
    pub fn error_code(&self) -> Option<String> {
        let code = match self.error_code.as_ref()? {
            Value::String(s) => s.clone(),
            Value::Null => return None,
            other => other.to_string(),
        };
        (code != SUCCESS_CODE).then_some(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_codes() {
        assert_eq!(Direction::EnToZh.from_lang(), "en");
        assert_eq!(Direction::EnToZh.to_lang(), "zh");
        assert_eq!(Direction::ZhToEn.from_lang(), "zh");
        assert_eq!(Direction::ZhToEn.to_lang(), "en");
    }

    #[test]
    fn test_error_code_as_string_or_number() {
        let as_string: TranslateResponse =
            serde_json::from_str(r#"{"error_code":"54001","error_msg":"Invalid Sign"}"#).unwrap();
        assert_eq!(as_string.error_code().as_deref(), Some("54001"));

        let as_number: TranslateResponse =
            serde_json::from_str(r#"{"error_code":52003,"error_msg":"UNAUTHORIZED USER"}"#).unwrap();
        assert_eq!(as_number.error_code().as_deref(), Some("52003"));
    }

    #[test]
    fn test_success_code_is_not_an_error() {
        let response: TranslateResponse = serde_json::from_str(
            r#"{"error_code":"52000","from":"en","to":"zh","trans_result":[{"src":"apple","dst":"苹果"}]}"#,
        )
        .unwrap();
        assert!(response.error_code().is_none());
    }
}
