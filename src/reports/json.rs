//! JSON report generator.

use super::{ReportFormat, ReportGenerator};
use crate::error::{ErrorContext, Result};
use crate::model::{Criticality, VulnerabilityRecord};
use serde::Serialize;

/// JSON report generator
pub struct JsonReporter {
    /// Pretty print output
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: true }
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct JsonRecord<'a> {
    cve: &'a str,
    description: &'a str,
    cvss: Option<f32>,
    mitigation: &'a str,
    exploited: bool,
    criticality: Criticality,
    source: &'static str,
}

impl<'a> From<&'a VulnerabilityRecord> for JsonRecord<'a> {
    fn from(record: &'a VulnerabilityRecord) -> Self {
        Self {
            cve: record.id().as_str(),
            description: record.description(),
            cvss: record.cvss_score(),
            mitigation: record.mitigation(),
            exploited: record.exploited(),
            criticality: record.criticality(),
            source: record.source().label(),
        }
    }
}

impl ReportGenerator for JsonReporter {
    fn generate(&self, records: &[VulnerabilityRecord]) -> Result<String> {
        let rows: Vec<JsonRecord<'_>> = records.iter().map(JsonRecord::from).collect();
        let mut json = if self.pretty {
            serde_json::to_string_pretty(&rows)
        } else {
            serde_json::to_string(&rows)
        }
        .context("rendering JSON report")?;
        json.push('\n');
        Ok(json)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}
