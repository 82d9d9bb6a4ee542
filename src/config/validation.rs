//! Configuration validation for cve-enrich.

use super::defaults::MAX_INTERVAL_SECS;
use super::types::{
    AppConfig, CirclConfig, HttpConfig, KevConfig, NvdConfig, OutputConfig, RetryConfig,
    TranslationConfig,
};

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

fn check_interval(field: &str, secs: u64, errors: &mut Vec<ConfigError>) {
    if secs == 0 {
        errors.push(ConfigError::new(field, "must be at least 1 second"));
    } else if secs > MAX_INTERVAL_SECS {
        errors.push(ConfigError::new(
            field,
            format!("{secs} exceeds the maximum of {MAX_INTERVAL_SECS} seconds"),
        ));
    }
}

fn check_url(field: &str, url: &str, errors: &mut Vec<ConfigError>) {
    if !(url.starts_with("https://") || url.starts_with("http://")) {
        errors.push(ConfigError::new(
            field,
            format!("'{url}' must start with http:// or https://"),
        ));
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.nvd.validate());
        errors.extend(self.circl.validate());
        errors.extend(self.kev.validate());
        errors.extend(self.translation.validate());
        errors.extend(self.retry.validate());
        errors.extend(self.http.validate());
        errors.extend(self.output.validate());
        errors
    }
}

impl Validatable for NvdConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        check_url("nvd.api_url", &self.api_url, &mut errors);
        errors
    }
}

impl Validatable for CirclConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.enabled {
            check_url("circl.api_url", &self.api_url, &mut errors);
        }
        errors
    }
}

impl Validatable for KevConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.enabled {
            check_url("kev.url", &self.url, &mut errors);
        }
        errors
    }
}

impl Validatable for TranslationConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if !self.enabled {
            return errors;
        }
        check_url("translation.endpoint", &self.endpoint, &mut errors);
        if self.source_lang.trim().is_empty() {
            errors.push(ConfigError::new(
                "translation.source_lang",
                "must not be empty",
            ));
        }
        if self.target_lang.trim().is_empty() {
            errors.push(ConfigError::new(
                "translation.target_lang",
                "must not be empty",
            ));
        }
        errors
    }
}

impl Validatable for RetryConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        check_interval(
            "retry.rate_limit_wait_secs",
            self.rate_limit_wait_secs,
            &mut errors,
        );
        errors
    }
}

impl Validatable for HttpConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        check_interval("http.timeout_secs", self.timeout_secs, &mut errors);
        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.file.as_os_str().is_empty() {
            errors.push(ConfigError::new("output.file", "must not be empty"));
        }
        if self.labels.yes.trim().is_empty() || self.labels.no.trim().is_empty() {
            errors.push(ConfigError::new("output.labels", "labels must not be empty"));
        } else if self.labels.yes == self.labels.no {
            errors.push(ConfigError::new(
                "output.labels",
                format!("yes and no labels are both '{}'", self.labels.yes),
            ));
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().is_valid());
    }

    #[test]
    fn test_zero_timeout() {
        let mut config = AppConfig::default();
        config.http.timeout_secs = 0;
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "http.timeout_secs");
    }

    #[test]
    fn test_intervals_have_upper_bound() {
        let mut config = AppConfig::default();
        config.retry.rate_limit_wait_secs = u64::MAX;
        config.http.timeout_secs = MAX_INTERVAL_SECS + 1;

        let fields: Vec<String> = config.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(fields, ["retry.rate_limit_wait_secs", "http.timeout_secs"]);

        config.retry.rate_limit_wait_secs = MAX_INTERVAL_SECS;
        config.http.timeout_secs = MAX_INTERVAL_SECS;
        assert!(config.is_valid());
    }

    #[test]
    fn test_bad_url() {
        let mut config = AppConfig::default();
        config.nvd.api_url = "services.nvd.nist.gov".to_string();
        assert!(!config.is_valid());
    }

    #[test]
    fn test_disabled_sections_skip_checks() {
        let mut config = AppConfig::default();
        config.kev.enabled = false;
        config.kev.url = String::new();
        config.translation.enabled = false;
        config.translation.target_lang = String::new();
        assert!(config.is_valid());
    }

    #[test]
    fn test_identical_labels() {
        let mut config = AppConfig::default();
        config.output.labels.no = "Sim".to_string();
        let errors = config.validate();
        assert_eq!(errors[0].field, "output.labels");
    }
}
