//! CVE identifier newtype.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;

static CVE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^CVE-\d{4}-\d{4,}$").expect("CVE pattern is a valid regex")
});

/// Error returned when a token is not a CVE identifier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("'{token}' is not a CVE identifier (expected CVE-YYYY-NNNN)")]
pub struct InvalidCveId {
    /// The rejected token, as given
    pub token: String,
}

/// A validated CVE identifier such as `CVE-2021-44228`.
///
/// Identifiers are normalized on parse: surrounding whitespace, a UTF-8
/// byte-order mark and wrapping quotes are stripped, and the token is
/// upper-cased. The inner string is never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CveId(String);

impl CveId {
    /// Parse and normalize a raw token.
    pub fn parse(raw: &str) -> Result<Self, InvalidCveId> {
        let normalized = normalize(raw);
        if CVE_PATTERN.is_match(&normalized) {
            Ok(Self(normalized))
        } else {
            Err(InvalidCveId {
                token: raw.to_string(),
            })
        }
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn normalize(raw: &str) -> String {
    raw.trim()
        .trim_start_matches('\u{feff}')
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .trim()
        .to_uppercase()
}

impl FromStr for CveId {
    type Err = InvalidCveId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CveId {
    type Error = InvalidCveId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CveId> for String {
    fn from(id: CveId) -> Self {
        id.0
    }
}

impl AsRef<str> for CveId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
