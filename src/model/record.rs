//! Enriched vulnerability records.

use super::CveId;
use crate::classify::classify;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed mitigation text used when no source supplies remediation guidance.
///
/// It is never sent to the translator.
pub const NO_MITIGATION: &str = "Nenhuma mitigação especificada";

/// Which vulnerability database satisfied a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceTag {
    /// NVD CVE API
    Primary,
    /// CIRCL CVE search
    Secondary,
}

impl SourceTag {
    /// Short label used in reports and logs.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Primary => "NVD",
            Self::Secondary => "CIRCL",
        }
    }
}

impl fmt::Display for SourceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Derived criticality band combining CVSS score and exploitation status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Criticality {
    Critical,
    High,
    Medium,
    Low,
    Unknown,
}

impl Criticality {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Criticality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vulnerability data as returned by one source, before translation and
/// classification.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedVulnerability {
    /// Identifier that was requested
    pub id: CveId,
    /// Free-text description (may be empty)
    pub description: String,
    /// CVSS base score, always within [0, 10]
    pub cvss_score: Option<f32>,
    /// Remediation text, or [`NO_MITIGATION`]
    pub mitigation: String,
    /// Source that produced this data
    pub source: SourceTag,
}

impl ResolvedVulnerability {
    /// Build a resolved vulnerability, discarding out-of-range scores and
    /// defaulting blank mitigation text to the sentinel.
    pub fn new(
        id: CveId,
        description: impl Into<String>,
        cvss_score: Option<f32>,
        mitigation: Option<String>,
        source: SourceTag,
    ) -> Self {
        let mitigation = mitigation
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| NO_MITIGATION.to_string());

        Self {
            id,
            description: description.into(),
            cvss_score: sanitize_score(cvss_score),
            mitigation,
            source,
        }
    }

    /// Whether the mitigation is the fixed "no guidance" sentinel.
    #[must_use]
    pub fn has_no_mitigation(&self) -> bool {
        self.mitigation == NO_MITIGATION
    }
}

fn sanitize_score(score: Option<f32>) -> Option<f32> {
    score.filter(|s| s.is_finite() && (0.0..=10.0).contains(s))
}

/// One row of the enrichment output.
///
/// Records are immutable once built; the criticality is always derived from
/// the score and exploitation flag at construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VulnerabilityRecord {
    id: CveId,
    description: String,
    cvss_score: Option<f32>,
    mitigation: String,
    source: SourceTag,
    exploited: bool,
    criticality: Criticality,
}

impl VulnerabilityRecord {
    /// Finish a resolved vulnerability with (possibly translated) text and
    /// the exploitation flag.
    #[must_use]
    pub fn new(
        resolved: ResolvedVulnerability,
        description: String,
        mitigation: String,
        exploited: bool,
    ) -> Self {
        let criticality = classify(resolved.cvss_score, exploited);
        Self {
            id: resolved.id,
            description,
            cvss_score: resolved.cvss_score,
            mitigation,
            source: resolved.source,
            exploited,
            criticality,
        }
    }

    #[must_use]
    pub const fn id(&self) -> &CveId {
        &self.id
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub const fn cvss_score(&self) -> Option<f32> {
        self.cvss_score
    }

    #[must_use]
    pub fn mitigation(&self) -> &str {
        &self.mitigation
    }

    #[must_use]
    pub const fn source(&self) -> SourceTag {
        self.source
    }

    #[must_use]
    pub const fn exploited(&self) -> bool {
        self.exploited
    }

    #[must_use]
    pub const fn criticality(&self) -> Criticality {
        self.criticality
    }
}

/// Ordered enrichment output, one record per resolved input id.
pub type EnrichmentResult = Vec<VulnerabilityRecord>;
