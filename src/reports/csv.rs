//! CSV report generator.
//!
//! Output opens with a UTF-8 byte-order mark so spreadsheet applications
//! pick the right encoding for accented text.

use super::{ReportFormat, ReportGenerator, ReportLabels};
use crate::error::{ErrorContext, Result};
use crate::model::VulnerabilityRecord;
use std::fmt::Write;

/// Header row, in column order.
pub const CSV_HEADER: [&str; 7] = [
    "CVE",
    "Description",
    "CVSS",
    "Mitigation",
    "Active Exploitation (yes/no)",
    "Real Criticality",
    "Source",
];

const BOM: char = '\u{feff}';

/// CSV report generator.
pub struct CsvReporter {
    labels: ReportLabels,
}

impl CsvReporter {
    #[must_use]
    pub const fn new(labels: ReportLabels) -> Self {
        Self { labels }
    }
}

impl Default for CsvReporter {
    fn default() -> Self {
        Self::new(ReportLabels::default())
    }
}

impl ReportGenerator for CsvReporter {
    fn generate(&self, records: &[VulnerabilityRecord]) -> Result<String> {
        let mut content = String::new();
        content.push(BOM);
        content.push_str(&CSV_HEADER.join(","));
        content.push('\n');

        for record in records {
            writeln!(
                content,
                "{},{},{},{},{},{},{}",
                record.id(),
                escape_csv(record.description()),
                record.cvss_score().map(format_cvss).unwrap_or_default(),
                escape_csv(record.mitigation()),
                escape_csv(self.labels.exploited(record.exploited())),
                record.criticality(),
                record.source()
            )
            .context("writing CSV row")?;
        }

        Ok(content)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Csv
    }
}

/// Shortest decimal form of a score: `10`, `7.5`.
#[must_use]
pub fn format_cvss(score: f32) -> String {
    format!("{score}")
}

/// Quote a field when it holds a delimiter, quote, or line break.
fn escape_csv(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
