//! CIRCL CVE search source.
//!
//! The secondary source, queried only when NVD fails. It never supplies
//! remediation guidance, so its records always carry the sentinel
//! mitigation text.
//!
//! See: <https://cve.circl.lu>

pub mod response;

use crate::enrichment::http;
use crate::enrichment::traits::{SourceError, VulnerabilitySource};
use crate::error::Result;
use crate::model::{CveId, ResolvedVulnerability, SourceTag};
use reqwest::blocking::Client;
use response::{CirclDocument, CirclLegacy, CnaContainer, CnaMetric, CveRecord};
use std::time::Duration;

/// Default CIRCL CVE API base
pub const CIRCL_API_URL: &str = "https://cve.circl.lu/api/cve";

/// CIRCL client configuration.
#[derive(Debug, Clone)]
pub struct CirclClientConfig {
    /// API base; the id is appended as a path segment
    pub api_base: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for CirclClientConfig {
    fn default() -> Self {
        Self {
            api_base: CIRCL_API_URL.to_string(),
            timeout: http::DEFAULT_TIMEOUT,
        }
    }
}

/// Secondary vulnerability source backed by CIRCL.
pub struct CirclSource {
    client: Client,
    config: CirclClientConfig,
}

impl CirclSource {
    /// Create a new CIRCL source.
    pub fn new(config: CirclClientConfig) -> Result<Self> {
        http::validate_base_url(&config.api_base)?;
        let client = http::build_client(config.timeout)?;
        Ok(Self { client, config })
    }
}

impl VulnerabilitySource for CirclSource {
    fn lookup(&self, id: &CveId) -> std::result::Result<ResolvedVulnerability, SourceError> {
        let url = format!("{}/{}", self.config.api_base.trim_end_matches('/'), id);
        tracing::debug!("GET {}", url);
        let (status, body) = http::send(self.client.get(&url))?;
        decode_response(id, status, &body)
    }

    fn name(&self) -> &'static str {
        "CIRCL"
    }

    fn tag(&self) -> SourceTag {
        SourceTag::Secondary
    }
}

/// Interpret a raw CIRCL response for `id`.
pub(crate) fn decode_response(
    id: &CveId,
    status: u16,
    body: &str,
) -> std::result::Result<ResolvedVulnerability, SourceError> {
    http::check_status(status)?;
    let document: Option<CirclDocument> =
        serde_json::from_str(body).map_err(|e| SourceError::InvalidResponse(e.to_string()))?;

    match document {
        Some(CirclDocument::Legacy(legacy)) => Ok(map_legacy(id, legacy)),
        Some(CirclDocument::Record(record)) => Ok(map_record(id, record)),
        None => Err(SourceError::NotFound),
    }
}

fn map_legacy(id: &CveId, legacy: CirclLegacy) -> ResolvedVulnerability {
    if !legacy.id.eq_ignore_ascii_case(id.as_str()) {
        tracing::debug!("CIRCL returned {} for {}", legacy.id, id);
    }
    ResolvedVulnerability::new(
        id.clone(),
        legacy.summary.unwrap_or_default(),
        legacy.cvss3.or(legacy.cvss),
        None,
        SourceTag::Secondary,
    )
}

fn map_record(id: &CveId, record: CveRecord) -> ResolvedVulnerability {
    if !record.cve_metadata.cve_id.eq_ignore_ascii_case(id.as_str()) {
        tracing::debug!("CIRCL returned {} for {}", record.cve_metadata.cve_id, id);
    }
    let containers = record.containers;
    let cna = containers.cna.unwrap_or_default();
    let score = record_score(&cna.metrics).or_else(|| {
        containers
            .adp
            .iter()
            .find_map(|adp| record_score(&adp.metrics))
    });
    ResolvedVulnerability::new(
        id.clone(),
        record_description(&cna),
        score,
        None,
        SourceTag::Secondary,
    )
}

fn record_description(cna: &CnaContainer) -> String {
    cna.descriptions
        .iter()
        .find(|d| d.lang.to_lowercase().starts_with("en"))
        .or_else(|| cna.descriptions.first())
        .map(|d| d.value.trim().to_string())
        .unwrap_or_default()
}

/// Newest CVSS version present across all metric entries.
fn record_score(metrics: &[CnaMetric]) -> Option<f32> {
    (0..4).find_map(|version| {
        metrics
            .iter()
            .find_map(|m| m.scores_newest_first()[version])
    })
}
