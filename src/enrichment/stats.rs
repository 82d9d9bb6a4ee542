//! Enrichment statistics and error types.

use crate::model::{CveId, SourceTag};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Statistics from an enrichment run.
///
/// Doubles as the run's log sink: every non-fatal failure (skipped id,
/// degraded catalog, failed translation) is pushed onto `errors` and
/// reported by [`log_summary`](Self::log_summary).
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct EnrichmentStats {
    /// Number of ids handed to the pipeline
    pub ids_requested: usize,
    /// Number of ids that produced a record
    pub ids_resolved: usize,
    /// Number of ids not found in any source
    pub ids_skipped: usize,
    /// Input rows that were not CVE identifiers
    pub ids_invalid: usize,
    /// Records satisfied by the primary source
    pub primary_hits: usize,
    /// Records satisfied by the secondary source
    pub secondary_hits: usize,
    /// Records flagged as actively exploited
    pub exploited_matches: usize,
    /// Times the primary source signalled rate limiting
    pub rate_limit_waits: usize,
    /// Text fields left untranslated because translation failed
    pub translations_degraded: usize,
    /// Whether the exploit catalog degraded to an empty set
    pub catalog_degraded: bool,
    /// Entries in the exploit catalog
    pub catalog_size: usize,
    /// Duration of the run
    #[serde(with = "duration_serde")]
    pub duration: Duration,
    /// Errors encountered during the run
    pub errors: Vec<EnrichmentError>,
}

impl EnrichmentStats {
    /// Create new empty stats
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a record produced by `source`.
    pub fn record_hit(&mut self, source: SourceTag, exploited: bool) {
        self.ids_resolved += 1;
        match source {
            SourceTag::Primary => self.primary_hits += 1,
            SourceTag::Secondary => self.secondary_hits += 1,
        }
        if exploited {
            self.exploited_matches += 1;
        }
    }

    /// Log a summary of the run
    pub fn log_summary(&self) {
        tracing::info!(
            "Enrichment complete: {} ids requested, {} resolved ({} NVD, {} CIRCL), \
             {} skipped, {} actively exploited, {} rate-limit waits in {:?}",
            self.ids_requested,
            self.ids_resolved,
            self.primary_hits,
            self.secondary_hits,
            self.ids_skipped,
            self.exploited_matches,
            self.rate_limit_waits,
            self.duration
        );

        if self.catalog_degraded {
            tracing::warn!("Exploit catalog unavailable: no record was flagged as exploited");
        }
        if self.translations_degraded > 0 {
            tracing::warn!(
                "{} text fields were left untranslated",
                self.translations_degraded
            );
        }

        if self.ids_invalid > 0 {
            tracing::warn!("{} input rows were not CVE identifiers", self.ids_invalid);
        }

        for err in &self.errors {
            tracing::debug!("Enrichment error: {}", err);
        }
    }

    /// Check if there were any errors
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Non-fatal errors recorded during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnrichmentError {
    /// A source failed for an id (the other source may still have answered)
    SourceFailed {
        id: String,
        source: String,
        reason: String,
    },
    /// No source returned data for an id
    NotFoundAnywhere(String),
    /// Input row that is not a CVE identifier
    InvalidId(String),
    /// Exploit catalog could not be loaded
    CatalogUnavailable(String),
    /// Translation failed and the original text was kept
    TranslationFailed(String),
}

impl EnrichmentError {
    pub(crate) fn source_failed(id: &CveId, source: &str, reason: impl fmt::Display) -> Self {
        Self::SourceFailed {
            id: id.to_string(),
            source: source.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for EnrichmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceFailed { id, source, reason } => {
                write!(f, "{source} lookup failed for {id}: {reason}")
            }
            Self::NotFoundAnywhere(id) => write!(f, "{id} not found in any source"),
            Self::InvalidId(token) => write!(f, "Invalid CVE identifier '{token}'"),
            Self::CatalogUnavailable(msg) => write!(f, "Exploit catalog unavailable: {msg}"),
            Self::TranslationFailed(msg) => write!(f, "Translation failed: {msg}"),
        }
    }
}

impl std::error::Error for EnrichmentError {}

/// Serde support for Duration
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_millis().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}
