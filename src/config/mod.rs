//! Configuration module for cve-enrich.
//!
//! This module provides:
//! - Type-safe configuration structures for every upstream service
//! - Validation for all configuration values
//! - YAML config file loading and discovery
//! - Example file and JSON schema generation
//!
//! # Configuration File
//!
//! Place a `.cve-enrich.yaml` file in the working directory or
//! `~/.config/cve-enrich/`:
//!
//! ```yaml
//! retry:
//!   rate_limit_wait_secs: 30
//!   max_rate_limit_retries: 10
//! translation:
//!   target_lang: pt
//! output:
//!   file: report.csv
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{
    DEFAULT_OUTPUT_FILE, DEFAULT_RATE_LIMIT_WAIT_SECS, DEFAULT_SOURCE_LANG, DEFAULT_TARGET_LANG,
    DEFAULT_TIMEOUT_SECS, MAX_INTERVAL_SECS,
};
pub use file::{
    ConfigFileError, discover_config_file, generate_example_config, load_config_file,
    load_or_default,
};
pub use types::{
    AppConfig, CirclConfig, HttpConfig, KevConfig, NvdConfig, OutputConfig, RetryConfig,
    TranslationConfig,
};
pub use validation::{ConfigError, Validatable};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// Editors can use it to validate and autocomplete `.cve-enrich.yaml`.
pub fn generate_json_schema() -> serde_json::Result<String> {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema)
}
