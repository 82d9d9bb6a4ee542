//! NVD CVE API 2.0 response types.
//!
//! Only the fields the enrichment uses are modelled.
//! See: <https://nvd.nist.gov/developers/vulnerabilities>

use serde::Deserialize;

/// Top-level response of `GET /rest/json/cves/2.0`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NvdResponse {
    #[serde(default)]
    pub total_results: Option<u64>,
    #[serde(default)]
    pub vulnerabilities: Vec<NvdVulnerability>,
}

/// Wrapper around one CVE item.
#[derive(Debug, Clone, Deserialize)]
pub struct NvdVulnerability {
    pub cve: NvdCve,
}

/// CVE item.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NvdCve {
    pub id: String,
    #[serde(default)]
    pub descriptions: Vec<NvdDescription>,
    #[serde(default)]
    pub metrics: NvdMetrics,
    /// Present when the CVE is also in CISA's KEV catalog
    #[serde(default)]
    pub cisa_required_action: Option<String>,
}

/// Localized description text.
#[derive(Debug, Clone, Deserialize)]
pub struct NvdDescription {
    pub lang: String,
    pub value: String,
}

/// Scoring metrics keyed by CVSS version.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NvdMetrics {
    #[serde(rename = "cvssMetricV40", default)]
    pub cvss_v40: Vec<NvdCvssMetric>,
    #[serde(rename = "cvssMetricV31", default)]
    pub cvss_v31: Vec<NvdCvssMetric>,
    #[serde(rename = "cvssMetricV30", default)]
    pub cvss_v30: Vec<NvdCvssMetric>,
    #[serde(rename = "cvssMetricV2", default)]
    pub cvss_v2: Vec<NvdCvssMetric>,
}

/// One scoring metric entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NvdCvssMetric {
    /// "Primary" (NVD's own) or "Secondary" (CNA-provided)
    #[serde(rename = "type", default)]
    pub metric_type: Option<String>,
    pub cvss_data: NvdCvssData,
}

/// Core CVSS data.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NvdCvssData {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub base_score: Option<f32>,
}
