//! Locating, reading and generating `.cve-enrich.yaml` files.

use super::defaults::CONFIG_DIR_NAME;
use super::types::AppConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File names tried in each searched directory, in order.
const CONFIG_FILE_NAMES: &[&str] = &[".cve-enrich.yaml", ".cve-enrich.yml", "cve-enrich.yaml"];

/// Pick the configuration file to use.
///
/// An explicit path always wins, even if it does not exist. Otherwise the
/// working directory is searched first, then `cve-enrich/` under the
/// platform config directory.
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return Some(path.to_path_buf());
    }

    if let Ok(cwd) = std::env::current_dir()
        && let Some(path) = find_config_in_dir(&cwd)
    {
        return Some(path);
    }

    dirs::config_dir().and_then(|dir| find_config_in_dir(&dir.join(CONFIG_DIR_NAME)))
}

fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.is_file())
}

/// Why a configuration file could not be used.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },
}

/// Load an `AppConfig` from a YAML file. An empty file yields defaults.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    let content = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ConfigFileError::NotFound(path.to_path_buf())
        } else {
            ConfigFileError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    if content.trim().is_empty() {
        return Ok(AppConfig::default());
    }
    serde_yaml_ng::from_str(&content).map_err(|source| ConfigFileError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the discovered config file, or defaults when there is none.
///
/// A file that exists but cannot be parsed is an error, as is an explicit
/// path that does not exist.
pub fn load_or_default(
    explicit_path: Option<&Path>,
) -> Result<(AppConfig, Option<PathBuf>), ConfigFileError> {
    match discover_config_file(explicit_path) {
        Some(path) => {
            let config = load_config_file(&path)?;
            tracing::debug!("Loaded config from {}", path.display());
            Ok((config, Some(path)))
        }
        None => Ok((AppConfig::default(), None)),
    }
}

/// Generate an example config file content.
#[must_use]
pub fn generate_example_config() -> String {
    let example = AppConfig::default();
    format!(
        r"# cve-enrich configuration
# Place this file at .cve-enrich.yaml in the working directory or
# ~/.config/cve-enrich/cve-enrich.yaml. CLI arguments override it.
#
# The NVD API key is best supplied through the NVD_API_KEY environment
# variable rather than stored here.

{}",
        serde_yaml_ng::to_string(&example).unwrap_or_default()
    )
}
