//! Report generation for enrichment results.
//!
//! Two output formats:
//! - CSV: UTF-8 with byte-order mark, one row per record, for spreadsheets
//! - JSON: pretty-printed array for programmatic use

mod csv;
mod json;

pub use csv::{CSV_HEADER, CsvReporter, format_cvss};
pub use json::JsonReporter;

use crate::error::Result;
use crate::model::VulnerabilityRecord;
use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output format for reports
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// CSV for spreadsheet import
    #[default]
    Csv,
    /// Structured JSON output
    Json,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Text rendered for the exploitation flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ReportLabels {
    /// Label for exploited records
    pub yes: String,
    /// Label for records not in the exploit catalog
    pub no: String,
}

impl Default for ReportLabels {
    fn default() -> Self {
        Self {
            yes: "Sim".to_string(),
            no: "Não".to_string(),
        }
    }
}

impl ReportLabels {
    #[must_use]
    pub fn exploited(&self, exploited: bool) -> &str {
        if exploited { &self.yes } else { &self.no }
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Render every record into one document
    fn generate(&self, records: &[VulnerabilityRecord]) -> Result<String>;

    /// Get the format this generator produces
    fn format(&self) -> ReportFormat;
}

/// Create a generator for `format`.
#[must_use]
pub fn create_reporter(format: ReportFormat, labels: ReportLabels) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Csv => Box::new(CsvReporter::new(labels)),
        ReportFormat::Json => Box::new(JsonReporter::new()),
    }
}
