//! Unified error types for cve-enrich.
//!
//! Per-id lookup failures never surface here: they are recorded in
//! [`EnrichmentStats`](crate::enrichment::EnrichmentStats) and the id is
//! skipped. This type covers the conditions that stop a run.

use thiserror::Error;

/// Main error type for cve-enrich operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CveEnrichError {
    /// The input id list could not be read
    #[error("Failed to read input: {context}")]
    Input {
        context: String,
        #[source]
        source: InputErrorKind,
    },

    /// A vulnerability source could not be set up
    #[error("Source setup failed: {context}")]
    Source {
        context: String,
        #[source]
        source: SetupErrorKind,
    },

    /// Errors during report generation
    #[error("Report generation failed: {context}")]
    Report {
        context: String,
        #[source]
        source: ReportErrorKind,
    },
}

/// Why the input file was rejected
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum InputErrorKind {
    #[error("file not found")]
    NotFound,

    #[error("file is not valid UTF-8 text: {0}")]
    NotText(String),

    #[error("unreadable workbook: {0}")]
    NotSpreadsheet(String),

    #[error(transparent)]
    Io(std::io::Error),
}

/// Why an HTTP-backed component could not be built
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SetupErrorKind {
    #[error("HTTP client construction failed: {0}")]
    HttpClient(String),

    #[error("invalid endpoint URL: {0}")]
    InvalidEndpoint(String),
}

/// Why a report could not be rendered
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ReportErrorKind {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("formatting failed: {0}")]
    Format(#[from] std::fmt::Error),
}

/// Convenient Result type for cve-enrich operations
pub type Result<T> = std::result::Result<T, CveEnrichError>;

impl CveEnrichError {
    pub fn input(context: impl Into<String>, source: InputErrorKind) -> Self {
        Self::Input {
            context: context.into(),
            source,
        }
    }

    pub fn source_setup(context: impl Into<String>, source: SetupErrorKind) -> Self {
        Self::Source {
            context: context.into(),
            source,
        }
    }

    pub fn report(context: impl Into<String>, source: ReportErrorKind) -> Self {
        Self::Report {
            context: context.into(),
            source,
        }
    }

    fn context_mut(&mut self) -> &mut String {
        match self {
            Self::Input { context, .. }
            | Self::Source { context, .. }
            | Self::Report { context, .. } => context,
        }
    }
}

impl From<serde_json::Error> for CveEnrichError {
    fn from(err: serde_json::Error) -> Self {
        Self::report("", ReportErrorKind::Json(err))
    }
}

impl From<std::fmt::Error> for CveEnrichError {
    fn from(err: std::fmt::Error) -> Self {
        Self::report("", ReportErrorKind::Format(err))
    }
}

/// Extension trait for adding context to errors.
///
/// Context is prepended, so nested calls read outermost-first:
/// `"outer: inner: base"`.
pub trait ErrorContext<T> {
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E: Into<CveEnrichError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let mut err = e.into();
            let existing = err.context_mut();
            *existing = chain_context(&context.into(), existing);
            err
        })
    }
}

fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CveEnrichError::input("ids.csv", InputErrorKind::NotFound);
        assert_eq!(err.to_string(), "Failed to read input: ids.csv");
        assert_eq!(
            std::error::Error::source(&err).map(ToString::to_string),
            Some("file not found".to_string())
        );
    }

    #[test]
    fn test_context_chaining_multiple_levels() {
        fn inner() -> Result<()> {
            Err(CveEnrichError::report("base", ReportErrorKind::Format(std::fmt::Error)))
        }

        match inner().context("middle layer").context("outer layer") {
            Err(CveEnrichError::Report { context, .. }) => {
                assert_eq!(context, "outer layer: middle layer: base");
            }
            other => panic!("Expected Report error, got {other:?}"),
        }
    }

    #[test]
    fn test_context_on_foreign_error() {
        let result: std::result::Result<(), std::fmt::Error> = Err(std::fmt::Error);
        let err = result.context("writing CSV row").unwrap_err();
        assert!(err.to_string().ends_with("writing CSV row"));
    }
}
