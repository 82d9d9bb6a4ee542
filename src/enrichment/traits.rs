//! Vulnerability source abstraction.
//!
//! This module provides the `VulnerabilitySource` trait for looking up a
//! single CVE in an external database, along with the typed failure kinds
//! the resolver uses to decide between retry and fallback.

use crate::model::{CveId, ResolvedVulnerability, SourceTag};
use thiserror::Error;

/// Why a single lookup against one source failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The source asked us to slow down (HTTP 429)
    #[error("rate limited")]
    RateLimited,

    /// The request did not complete within the timeout
    #[error("request timed out")]
    Timeout,

    /// Connection-level failure
    #[error("network error: {0}")]
    Network(String),

    /// Non-success HTTP status
    #[error("unexpected status {0}")]
    Status(u16),

    /// Body could not be decoded or lacked required fields
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The source has no entry for this id
    #[error("not found")]
    NotFound,
}

impl SourceError {
    /// Map a transport error from reqwest into a source error.
    pub(crate) fn from_reqwest(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::InvalidResponse(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// A database that can resolve one CVE identifier.
///
/// # Example
///
/// ```ignore
/// use cve_enrich::enrichment::{NoOpSource, VulnerabilitySource};
///
/// // Use NoOpSource when the secondary source is disabled
/// let secondary: Box<dyn VulnerabilitySource> = if config.circl.enabled {
///     Box::new(CirclSource::new(circl_config)?)
/// } else {
///     Box::new(NoOpSource::new(SourceTag::Secondary))
/// };
/// ```
pub trait VulnerabilitySource {
    /// Look up exactly one identifier.
    fn lookup(&self, id: &CveId) -> Result<ResolvedVulnerability, SourceError>;

    /// Human-readable source name (e.g., "NVD").
    fn name(&self) -> &'static str;

    /// Tag stamped on records produced by this source.
    fn tag(&self) -> SourceTag;
}

/// A source that never finds anything.
///
/// Stands in for a source that has been disabled in configuration so the
/// resolver keeps a single code path.
#[derive(Debug, Clone, Copy)]
pub struct NoOpSource {
    tag: SourceTag,
}

impl NoOpSource {
    /// Create a no-op source occupying the given slot.
    #[must_use]
    pub const fn new(tag: SourceTag) -> Self {
        Self { tag }
    }
}

impl VulnerabilitySource for NoOpSource {
    fn lookup(&self, _id: &CveId) -> Result<ResolvedVulnerability, SourceError> {
        Err(SourceError::NotFound)
    }

    fn name(&self) -> &'static str {
        "NoOp"
    }

    fn tag(&self) -> SourceTag {
        self.tag
    }
}
