//! Default values shared by configuration and the command line.

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 25;

/// Default wait after a rate-limit response, in seconds.
pub const DEFAULT_RATE_LIMIT_WAIT_SECS: u64 = 30;

/// Upper bound for the rate-limit wait and the request timeout, in seconds.
pub const MAX_INTERVAL_SECS: u64 = 86_400;

/// Default report file name.
pub const DEFAULT_OUTPUT_FILE: &str = "output.csv";

/// Default translation source language.
pub const DEFAULT_SOURCE_LANG: &str = "en";

/// Default translation target language.
pub const DEFAULT_TARGET_LANG: &str = "pt";

/// Directory name under the user config dir.
pub const CONFIG_DIR_NAME: &str = "cve-enrich";
