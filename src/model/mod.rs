//! Core data model: CVE identifiers and enriched vulnerability records.
//!
//! A [`ResolvedVulnerability`] is what a single source returns for one id.
//! The pipeline turns it into an immutable [`VulnerabilityRecord`] once the
//! free-text fields are translated and the exploitation status is known.

mod cve_id;
mod record;

pub use cve_id::{CveId, InvalidCveId};
pub use record::{
    Criticality, EnrichmentResult, NO_MITIGATION, ResolvedVulnerability, SourceTag,
    VulnerabilityRecord,
};
