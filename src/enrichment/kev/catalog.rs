//! CISA KEV (Known Exploited Vulnerabilities) catalog data structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// CISA KEV catalog feed document.
///
/// Only the identifier of each entry is required; everything else is
/// informational and tolerated when missing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KevCatalogResponse {
    /// Catalog version
    #[serde(rename = "catalogVersion", default)]
    pub catalog_version: Option<String>,
    /// Date catalog was generated
    #[serde(rename = "dateReleased", default)]
    pub date_released: Option<String>,
    /// List of vulnerabilities
    #[serde(default)]
    pub vulnerabilities: Vec<KevVulnerability>,
}

/// Individual KEV entry from CISA
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KevVulnerability {
    /// CVE ID
    #[serde(rename = "cveID", default)]
    pub cve_id: Option<String>,
    /// Vendor/project name
    #[serde(rename = "vendorProject", default)]
    pub vendor_project: Option<String>,
    /// Product name
    #[serde(default)]
    pub product: Option<String>,
}

/// In-memory snapshot of exploited CVE identifiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KevCatalog {
    /// Normalized CVE IDs
    entries: HashSet<String>,
    /// Catalog version, when the feed declares one
    pub version: Option<String>,
    /// Feed release time, when the feed declares a parseable one
    pub released: Option<DateTime<Utc>>,
}

impl KevCatalog {
    /// Create an empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashSet::new(),
            version: None,
            released: None,
        }
    }

    /// Create from catalog response, skipping entries without an identifier
    #[must_use]
    pub fn from_response(response: KevCatalogResponse) -> Self {
        let entries = response
            .vulnerabilities
            .iter()
            .filter_map(|v| v.cve_id.as_deref())
            .map(normalize_cve_id)
            .filter(|id| !id.is_empty())
            .collect();

        Self {
            entries,
            version: response.catalog_version,
            released: response.date_released.as_deref().and_then(parse_release_date),
        }
    }

    /// Build a catalog directly from identifiers
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            entries: ids
                .into_iter()
                .map(|id| normalize_cve_id(id.as_ref()))
                .collect(),
            ..Self::new()
        }
    }

    /// Check if a CVE ID is in the KEV catalog
    #[must_use]
    pub fn contains(&self, cve_id: &str) -> bool {
        self.entries.contains(&normalize_cve_id(cve_id))
    }

    /// Get entry count
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if catalog is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for KevCatalog {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_release_date(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|date| date.with_timezone(&Utc))
}

/// Normalize CVE ID for consistent lookup
fn normalize_cve_id(cve_id: &str) -> String {
    cve_id.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_cve_id() {
        assert_eq!(normalize_cve_id("cve-2024-1234"), "CVE-2024-1234");
        assert_eq!(normalize_cve_id("  CVE-2024-1234  "), "CVE-2024-1234");
    }

    #[test]
    fn test_from_response_skips_entries_without_id() {
        let response: KevCatalogResponse = serde_json::from_str(
            r#"{
                "title": "CISA Catalog of Known Exploited Vulnerabilities",
                "catalogVersion": "2024.01.15",
                "dateReleased": "2024-01-15T18:00:04.4512Z",
                "count": 3,
                "vulnerabilities": [
                    {"cveID": "CVE-2021-44228", "vendorProject": "Apache", "product": "Log4j2"},
                    {"vendorProject": "Orphan"},
                    {"cveID": "cve-2023-4863"}
                ]
            }"#,
        )
        .unwrap();

        let catalog = KevCatalog::from_response(response);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.version.as_deref(), Some("2024.01.15"));
        assert_eq!(
            catalog.released.map(|d| d.format("%Y-%m-%d").to_string()),
            Some("2024-01-15".to_string())
        );
        assert!(catalog.contains("CVE-2021-44228"));
        assert!(catalog.contains("CVE-2023-4863"));
    }

    #[test]
    fn test_unparseable_release_date_is_dropped() {
        assert!(parse_release_date("15/01/2024").is_none());
        assert!(parse_release_date("2024-01-15T18:00:04Z").is_some());
    }

    #[test]
    fn test_catalog_contains() {
        let catalog = KevCatalog::from_ids(["CVE-2024-1234"]);

        assert!(catalog.contains("CVE-2024-1234"));
        assert!(catalog.contains("cve-2024-1234")); // Case insensitive
        assert!(!catalog.contains("CVE-2024-5678"));
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = KevCatalog::default();
        assert!(catalog.is_empty());
        assert!(!catalog.contains("CVE-2021-44228"));
    }
}
