//! Enrich command handler.
//!
//! Implements the `enrich` subcommand: read ids, enrich them, write one report.

use crate::config::{AppConfig, Validatable};
use crate::enrichment::{
    BestEffortTranslator, CirclSource, EnrichmentError, GoogleTranslator, KevClient, NoOpSource,
    NvdSource, SourceResolver, VulnerabilitySource,
};
use crate::model::SourceTag;
use crate::pipeline::{
    EnrichmentPipeline, OutputTarget, PipelineError, exit_codes, read_cve_list, write_output,
};
use crate::reports::create_reporter;
use anyhow::{Context, Result, bail};
use std::path::Path;

/// Run the enrich command, returning the process exit code.
pub fn run_enrich(input: &Path, config: &AppConfig) -> Result<i32> {
    let errors = config.validate();
    if !errors.is_empty() {
        let details: Vec<String> = errors.iter().map(ToString::to_string).collect();
        bail!("Invalid configuration:\n  {}", details.join("\n  "));
    }

    let list = read_cve_list(input).map_err(|source| PipelineError::InputUnreadable { source })?;
    if list.ids.is_empty() {
        tracing::warn!("No valid CVE identifiers in {}", input.display());
        return Ok(exit_codes::NO_RECORDS);
    }

    let mut pipeline = build_pipeline(config)?;
    let mut run = pipeline.run(&list.ids);
    run.stats.ids_invalid = list.invalid.len();
    run.stats.errors.extend(
        list.invalid
            .iter()
            .map(|token| EnrichmentError::InvalidId(token.clone())),
    );
    run.stats.log_summary();

    if run.result.is_empty() {
        tracing::warn!("No valid data extracted; no report written");
        return Ok(exit_codes::NO_RECORDS);
    }

    let reporter = create_reporter(config.output.format, config.output.labels.clone());
    let content = reporter
        .generate(&run.result)
        .context("Failed to render report")?;

    let target = OutputTarget::from_path(config.output.file.clone());
    write_output(&content, &target).map_err(|source| PipelineError::OutputFailed {
        target: target.to_string(),
        source,
    })?;

    tracing::info!(
        "{} records saved to {} ({})",
        run.result.len(),
        target,
        reporter.format()
    );
    Ok(exit_codes::SUCCESS)
}

/// Assemble sources, catalog, and translator from configuration.
pub fn build_pipeline(config: &AppConfig) -> Result<EnrichmentPipeline> {
    let primary = NvdSource::new(config.nvd_client_config()).context("Failed to set up NVD")?;

    let secondary: Box<dyn VulnerabilitySource> = if config.circl.enabled {
        Box::new(CirclSource::new(config.circl_client_config()).context("Failed to set up CIRCL")?)
    } else {
        tracing::info!("Secondary source disabled");
        Box::new(NoOpSource::new(SourceTag::Secondary))
    };

    let catalog =
        KevClient::new(&config.kev_client_config()).context("Failed to set up KEV catalog")?;

    let translator = if config.translation.enabled {
        let google = GoogleTranslator::new(config.translator_config())
            .context("Failed to set up translation")?;
        BestEffortTranslator::new(Box::new(google))
    } else {
        tracing::info!("Translation disabled");
        BestEffortTranslator::disabled()
    };

    let resolver = SourceResolver::new(Box::new(primary), secondary, config.retry_policy());
    Ok(EnrichmentPipeline::new(catalog, resolver, translator))
}
