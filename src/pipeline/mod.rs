//! Pipeline orchestration for enrichment runs.
//!
//! read ids → enrich each in order → render → single write.

mod input;
mod orchestrator;
mod output;

pub use input::{CveList, parse_cve_list, read_cve_list};
pub use orchestrator::{EnrichmentPipeline, EnrichmentRun};
pub use output::{OutputTarget, write_output};

/// Structured pipeline error types for better diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The input file could not be read; nothing was processed
    #[error("Input unreadable: {source}")]
    InputUnreadable {
        #[source]
        source: crate::error::CveEnrichError,
    },

    /// Report generation or output failed
    #[error("Report failed for {target}: {source}")]
    OutputFailed {
        target: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Process exit codes
pub mod exit_codes {
    /// At least one record was written
    pub const SUCCESS: i32 = 0;
    /// The run finished but produced no records
    pub const NO_RECORDS: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 3;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_values() {
        assert_eq!(exit_codes::SUCCESS, 0);
        assert_eq!(exit_codes::NO_RECORDS, 1);
        assert_eq!(exit_codes::ERROR, 3);
    }
}
