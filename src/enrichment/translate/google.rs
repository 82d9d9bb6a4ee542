//! Google Translate public endpoint client.

use super::{TranslationError, Translator};
use crate::enrichment::http;
use crate::error::Result;
use reqwest::blocking::Client;
use serde_json::Value;
use std::time::Duration;

/// Default translation endpoint
pub const GOOGLE_TRANSLATE_URL: &str = "https://translate.googleapis.com/translate_a/single";

/// Google translator configuration
#[derive(Debug, Clone)]
pub struct GoogleTranslatorConfig {
    /// Endpoint URL
    pub endpoint: String,
    /// Source language code
    pub source_lang: String,
    /// Target language code
    pub target_lang: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for GoogleTranslatorConfig {
    fn default() -> Self {
        Self {
            endpoint: GOOGLE_TRANSLATE_URL.to_string(),
            source_lang: "en".to_string(),
            target_lang: "pt".to_string(),
            timeout: http::DEFAULT_TIMEOUT,
        }
    }
}

/// Translator backed by the unauthenticated `translate_a/single` endpoint.
pub struct GoogleTranslator {
    client: Client,
    config: GoogleTranslatorConfig,
}

impl GoogleTranslator {
    pub fn new(config: GoogleTranslatorConfig) -> Result<Self> {
        http::validate_base_url(&config.endpoint)?;
        let client = http::build_client(config.timeout)?;
        Ok(Self { client, config })
    }
}

impl Translator for GoogleTranslator {
    fn translate(&self, text: &str) -> std::result::Result<String, TranslationError> {
        let request = self.client.get(&self.config.endpoint).query(&[
            ("client", "gtx"),
            ("sl", self.config.source_lang.as_str()),
            ("tl", self.config.target_lang.as_str()),
            ("dt", "t"),
            ("q", text),
        ]);

        let response = request
            .send()
            .map_err(|e| TranslationError::Network(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(TranslationError::Status(status.as_u16()));
        }
        let body = response
            .text()
            .map_err(|e| TranslationError::Network(e.to_string()))?;

        parse_response(&body)
    }
}

/// Join the translated segments of a `translate_a/single` response.
///
/// The body is a nested array whose first element lists
/// `[translated, original, ...]` segments.
pub(crate) fn parse_response(body: &str) -> std::result::Result<String, TranslationError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| TranslationError::InvalidResponse(e.to_string()))?;

    let segments = value
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TranslationError::InvalidResponse("missing segment list".to_string()))?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if translated.is_empty() {
        return Err(TranslationError::InvalidResponse(
            "no translated segments".to_string(),
        ));
    }
    Ok(translated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_joins_segments() {
        let body = r#"[[["Execução remota. ","Remote execution. ",null,null,10],["Corrija já.","Patch now.",null,null,10]],null,"en"]"#;
        assert_eq!(
            parse_response(body).unwrap(),
            "Execução remota. Corrija já."
        );
    }

    #[test]
    fn test_parse_rejects_unexpected_shape() {
        assert!(matches!(
            parse_response(r#"{"error": "quota"}"#),
            Err(TranslationError::InvalidResponse(_))
        ));
        assert!(matches!(
            parse_response("[null]"),
            Err(TranslationError::InvalidResponse(_))
        ));
        assert!(parse_response("<html>").is_err());
    }

    #[test]
    fn test_default_language_pair() {
        let config = GoogleTranslatorConfig::default();
        assert_eq!(config.source_lang, "en");
        assert_eq!(config.target_lang, "pt");
    }
}
