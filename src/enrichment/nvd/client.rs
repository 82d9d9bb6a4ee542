//! NVD CVE API HTTP client.

use super::response::NvdResponse;
use crate::enrichment::http;
use crate::enrichment::traits::SourceError;
use crate::error::Result;
use crate::model::CveId;
use reqwest::blocking::Client;
use std::time::Duration;

/// Default NVD CVE API endpoint
pub const NVD_API_URL: &str = "https://services.nvd.nist.gov/rest/json/cves/2.0";

/// NVD client configuration.
#[derive(Debug, Clone)]
pub struct NvdClientConfig {
    /// CVE API endpoint
    pub api_base: String,
    /// API key sent in the `apiKey` header
    pub api_key: Option<String>,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for NvdClientConfig {
    fn default() -> Self {
        Self {
            api_base: NVD_API_URL.to_string(),
            api_key: None,
            timeout: http::DEFAULT_TIMEOUT,
        }
    }
}

/// HTTP client for the NVD CVE API.
pub struct NvdClient {
    client: Client,
    config: NvdClientConfig,
}

impl NvdClient {
    /// Create a new NVD client.
    pub fn new(config: NvdClientConfig) -> Result<Self> {
        http::validate_base_url(&config.api_base)?;
        let client = http::build_client(config.timeout)?;
        Ok(Self { client, config })
    }

    /// Whether requests carry an API key.
    #[must_use]
    pub const fn has_api_key(&self) -> bool {
        self.config.api_key.is_some()
    }

    /// Fetch the CVE record for exactly one id.
    pub fn fetch(&self, id: &CveId) -> std::result::Result<NvdResponse, SourceError> {
        let url = format!("{}?cveId={}", self.config.api_base.trim_end_matches('/'), id);
        let mut request = self.client.get(&url);
        if let Some(ref key) = self.config.api_key {
            request = request.header("apiKey", key);
        }

        tracing::debug!("GET {}", url);
        let (status, body) = http::send(request)?;
        decode_response(status, &body)
    }
}

/// Interpret a raw NVD response.
pub(crate) fn decode_response(
    status: u16,
    body: &str,
) -> std::result::Result<NvdResponse, SourceError> {
    http::check_status(status)?;
    serde_json::from_str(body).map_err(|e| SourceError::InvalidResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_defaults() {
        let config = NvdClientConfig::default();
        assert_eq!(config.api_base, NVD_API_URL);
        assert_eq!(config.timeout, Duration::from_secs(25));
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_client_rejects_bad_endpoint() {
        let config = NvdClientConfig {
            api_base: "nvd.local".to_string(),
            ..Default::default()
        };
        assert!(NvdClient::new(config).is_err());
    }

    #[test]
    fn test_decode_rate_limited() {
        assert!(matches!(
            decode_response(429, ""),
            Err(SourceError::RateLimited)
        ));
    }

    #[test]
    fn test_decode_malformed_body() {
        assert!(matches!(
            decode_response(200, "<html>maintenance</html>"),
            Err(SourceError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_decode_server_error() {
        assert!(matches!(
            decode_response(503, "{}"),
            Err(SourceError::Status(503))
        ));
    }

    #[test]
    fn test_decode_ok() {
        let response = decode_response(200, r#"{"totalResults": 0, "vulnerabilities": []}"#).unwrap();
        assert_eq!(response.total_results, Some(0));
        assert!(response.vulnerabilities.is_empty());
    }
}
