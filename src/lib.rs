//! **CVE enrichment and criticality classification.**
//!
//! `cve-enrich` takes a list of CVE identifiers and turns each one into a
//! report row: description, CVSS base score, remediation guidance, whether
//! CISA lists it as actively exploited, and a criticality band derived from
//! the two.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: [`CveId`], [`ResolvedVulnerability`] and the immutable
//!   [`VulnerabilityRecord`] that ends up in reports.
//! - **[`enrichment`]**: the NVD primary and CIRCL secondary sources behind
//!   the [`VulnerabilitySource`](enrichment::VulnerabilitySource) trait, the
//!   [`SourceResolver`](enrichment::SourceResolver) that chooses between
//!   them, the CISA KEV catalog, and best-effort translation.
//! - **[`classify`]**: the pure score/exploitation to [`Criticality`] mapping.
//! - **[`pipeline`]**: input reading, the sequential
//!   [`EnrichmentPipeline`](pipeline::EnrichmentPipeline), and output.
//! - **[`reports`]**: CSV and JSON renderers.
//! - **[`config`]**: YAML configuration with validation.
//!
//! ## Example
//!
//! ```no_run
//! use cve_enrich::config::AppConfig;
//! use cve_enrich::model::CveId;
//! use cve_enrich::reports::{CsvReporter, ReportGenerator};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = AppConfig::default();
//!     let mut pipeline = cve_enrich::cli::build_pipeline(&config)?;
//!
//!     let ids = vec![CveId::parse("CVE-2021-44228")?];
//!     let run = pipeline.run(&ids);
//!     run.stats.log_summary();
//!
//!     let csv = CsvReporter::default().generate(&run.result)?;
//!     std::fs::write("output.csv", csv)?;
//!     Ok(())
//! }
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

pub mod classify;
pub mod cli;
pub mod config;
pub mod enrichment;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod reports;

// Re-export main types for convenience
pub use classify::classify;
pub use config::{AppConfig, ConfigError, Validatable};
pub use enrichment::{EnrichmentStats, SourceResolver, VulnerabilitySource};
pub use error::{CveEnrichError, ErrorContext, Result};
pub use model::{CveId, Criticality, ResolvedVulnerability, VulnerabilityRecord};
pub use pipeline::{EnrichmentPipeline, EnrichmentRun};
pub use reports::{ReportFormat, ReportGenerator};
