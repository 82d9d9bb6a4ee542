//! CISA Known Exploited Vulnerabilities (KEV) catalog.
//!
//! The catalog answers one question per record: is this CVE being actively
//! exploited? It is downloaded once per run and kept in memory by the
//! [`KevClient`] that owns it.
//!
//! # Example
//!
//! ```ignore
//! use cve_enrich::enrichment::kev::{KevClient, KevClientConfig};
//!
//! let mut client = KevClient::new(&KevClientConfig::default())?;
//! let catalog = client.load();
//!
//! // Check if a CVE is in the KEV catalog
//! if catalog.value.contains("CVE-2021-44228") {
//!     println!("This CVE is actively exploited!");
//! }
//! ```

mod catalog;
mod client;

pub use catalog::{KevCatalog, KevCatalogResponse, KevVulnerability};
pub use client::{CatalogFeed, HttpCatalogFeed, KEV_CATALOG_URL, KevClient, KevClientConfig};
