//! Configuration types for cve-enrich.

use super::defaults::{
    DEFAULT_OUTPUT_FILE, DEFAULT_RATE_LIMIT_WAIT_SECS, DEFAULT_SOURCE_LANG, DEFAULT_TARGET_LANG,
    DEFAULT_TIMEOUT_SECS,
};
use crate::enrichment::kev::KEV_CATALOG_URL;
use crate::enrichment::translate::{GOOGLE_TRANSLATE_URL, GoogleTranslatorConfig};
use crate::enrichment::{
    CIRCL_API_URL, CirclClientConfig, KevClientConfig, NVD_API_URL, NvdClientConfig, RetryPolicy,
};
use crate::reports::{ReportFormat, ReportLabels};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Top-level configuration, loaded from a YAML file and overridden by
/// command-line flags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// NVD primary source
    pub nvd: NvdConfig,
    /// CIRCL secondary source
    pub circl: CirclConfig,
    /// CISA KEV exploit catalog
    pub kev: KevConfig,
    /// Translation of descriptions and mitigations
    pub translation: TranslationConfig,
    /// Rate-limit retry behavior
    pub retry: RetryConfig,
    /// Shared HTTP settings
    pub http: HttpConfig,
    /// Report output
    pub output: OutputConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_secs)
    }

    /// Settings for the NVD client.
    #[must_use]
    pub fn nvd_client_config(&self) -> NvdClientConfig {
        NvdClientConfig {
            api_base: self.nvd.api_url.clone(),
            api_key: self.nvd.api_key.clone().filter(|k| !k.trim().is_empty()),
            timeout: self.timeout(),
        }
    }

    /// Settings for the CIRCL client.
    #[must_use]
    pub fn circl_client_config(&self) -> CirclClientConfig {
        CirclClientConfig {
            api_base: self.circl.api_url.clone(),
            timeout: self.timeout(),
        }
    }

    /// Settings for the KEV catalog client.
    #[must_use]
    pub fn kev_client_config(&self) -> KevClientConfig {
        KevClientConfig {
            kev_url: self.kev.url.clone(),
            timeout: self.timeout(),
            enabled: self.kev.enabled,
        }
    }

    /// Settings for the translation provider.
    #[must_use]
    pub fn translator_config(&self) -> GoogleTranslatorConfig {
        GoogleTranslatorConfig {
            endpoint: self.translation.endpoint.clone(),
            source_lang: self.translation.source_lang.clone(),
            target_lang: self.translation.target_lang.clone(),
            timeout: self.timeout(),
        }
    }

    /// Rate-limit retry policy.
    #[must_use]
    pub const fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            Duration::from_secs(self.retry.rate_limit_wait_secs),
            self.retry.max_rate_limit_retries,
        )
    }
}

// ============================================================================
// Source Configuration
// ============================================================================

/// NVD CVE API settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct NvdConfig {
    /// CVE API 2.0 endpoint
    pub api_url: String,
    /// API key (also read from `NVD_API_KEY`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Default for NvdConfig {
    fn default() -> Self {
        Self {
            api_url: NVD_API_URL.to_string(),
            api_key: None,
        }
    }
}

/// CIRCL CVE search settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CirclConfig {
    /// Query CIRCL when NVD fails
    pub enabled: bool,
    /// API base; the CVE id is appended as a path segment
    pub api_url: String,
}

impl Default for CirclConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_url: CIRCL_API_URL.to_string(),
        }
    }
}

/// CISA KEV catalog settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct KevConfig {
    /// Download the catalog and flag exploited CVEs
    pub enabled: bool,
    /// Feed URL
    pub url: String,
}

impl Default for KevConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            url: KEV_CATALOG_URL.to_string(),
        }
    }
}

/// Translation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TranslationConfig {
    /// Translate descriptions and mitigations
    pub enabled: bool,
    /// Source language code
    pub source_lang: String,
    /// Target language code
    pub target_lang: String,
    /// Translation endpoint
    pub endpoint: String,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            source_lang: DEFAULT_SOURCE_LANG.to_string(),
            target_lang: DEFAULT_TARGET_LANG.to_string(),
            endpoint: GOOGLE_TRANSLATE_URL.to_string(),
        }
    }
}

/// Rate-limit retry settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct RetryConfig {
    /// Seconds to wait after HTTP 429
    #[schemars(range(min = 1, max = 86400))]
    pub rate_limit_wait_secs: u64,
    /// Give up on NVD after this many waits (unbounded when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_rate_limit_retries: Option<u32>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            rate_limit_wait_secs: DEFAULT_RATE_LIMIT_WAIT_SECS,
            max_rate_limit_retries: None,
        }
    }
}

/// Shared HTTP settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct HttpConfig {
    /// Per-request timeout in seconds
    #[schemars(range(min = 1, max = 86400))]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

// ============================================================================
// Output Configuration
// ============================================================================

/// Report output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Report format
    pub format: ReportFormat,
    /// Output path (`-` for stdout)
    pub file: PathBuf,
    /// Labels for the exploitation column
    pub labels: ReportLabels,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::default(),
            file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            labels: ReportLabels::default(),
        }
    }
}
