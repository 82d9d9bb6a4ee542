//! NVD (National Vulnerability Database) source.
//!
//! The primary source: one `cveId` query per identifier, authenticated with
//! an optional API key. Rate limiting surfaces as
//! [`SourceError::RateLimited`](crate::enrichment::SourceError::RateLimited)
//! and is retried by the resolver, never here.
//!
//! See: <https://nvd.nist.gov/developers/vulnerabilities>

mod client;
mod mapper;
pub mod response;

pub use client::{NVD_API_URL, NvdClient, NvdClientConfig};
pub use mapper::map_nvd_response;

use crate::enrichment::traits::{SourceError, VulnerabilitySource};
use crate::error::Result;
use crate::model::{CveId, ResolvedVulnerability, SourceTag};

/// Primary vulnerability source backed by the NVD CVE API.
pub struct NvdSource {
    client: NvdClient,
}

impl NvdSource {
    /// Create a new NVD source.
    pub fn new(config: NvdClientConfig) -> Result<Self> {
        let client = NvdClient::new(config)?;
        if !client.has_api_key() {
            tracing::warn!("No NVD API key configured; NVD will rate limit aggressively");
        }
        Ok(Self { client })
    }
}

impl VulnerabilitySource for NvdSource {
    fn lookup(&self, id: &CveId) -> std::result::Result<ResolvedVulnerability, SourceError> {
        let response = self.client.fetch(id)?;
        map_nvd_response(id, response)
    }

    fn name(&self) -> &'static str {
        "NVD"
    }

    fn tag(&self) -> SourceTag {
        SourceTag::Primary
    }
}
