//! KEV catalog client.

use super::catalog::{KevCatalog, KevCatalogResponse};
use crate::enrichment::best_effort::{BestEffort, Status};
use crate::enrichment::http;
use crate::error::Result;
use reqwest::blocking::Client;
use std::time::Duration;

/// Default CISA KEV catalog URL
pub const KEV_CATALOG_URL: &str =
    "https://www.cisa.gov/sites/default/files/feeds/known_exploited_vulnerabilities.json";

/// KEV client configuration
#[derive(Debug, Clone)]
pub struct KevClientConfig {
    /// KEV catalog URL
    pub kev_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// When false the catalog is never fetched and stays empty
    pub enabled: bool,
}

impl Default for KevClientConfig {
    fn default() -> Self {
        Self {
            kev_url: KEV_CATALOG_URL.to_string(),
            timeout: http::DEFAULT_TIMEOUT,
            enabled: true,
        }
    }
}

/// Something that can produce the raw KEV feed document.
pub trait CatalogFeed {
    /// Fetch and decode the feed. Errors are rendered as text for logging.
    fn fetch(&self) -> std::result::Result<KevCatalogResponse, String>;
}

/// Fetches the KEV feed over HTTPS.
pub struct HttpCatalogFeed {
    client: Client,
    url: String,
}

impl HttpCatalogFeed {
    /// Create a feed for the configured URL.
    pub fn new(config: &KevClientConfig) -> Result<Self> {
        http::validate_base_url(&config.kev_url)?;
        Ok(Self {
            client: http::build_client(config.timeout)?,
            url: config.kev_url.clone(),
        })
    }
}

impl CatalogFeed for HttpCatalogFeed {
    fn fetch(&self) -> std::result::Result<KevCatalogResponse, String> {
        tracing::debug!("GET {}", self.url);
        let (status, body) = http::send(self.client.get(&self.url)).map_err(|e| e.to_string())?;
        if !(200..300).contains(&status) {
            return Err(format!("KEV feed returned status {status}"));
        }
        serde_json::from_str(&body).map_err(|e| format!("malformed KEV feed: {e}"))
    }
}

/// KEV catalog client.
///
/// Owns the snapshot for one run: the first [`load`](Self::load) fetches,
/// every later call reuses the result. A failed fetch is remembered as an
/// empty degraded catalog and is not retried.
pub struct KevClient {
    feed: Option<Box<dyn CatalogFeed>>,
    catalog: Option<KevCatalog>,
    status: Status,
}

impl KevClient {
    /// Create a client from configuration.
    pub fn new(config: &KevClientConfig) -> Result<Self> {
        if !config.enabled {
            return Ok(Self::disabled());
        }
        Ok(Self::with_feed(Box::new(HttpCatalogFeed::new(config)?)))
    }

    /// Create a client around an arbitrary feed.
    #[must_use]
    pub fn with_feed(feed: Box<dyn CatalogFeed>) -> Self {
        Self {
            feed: Some(feed),
            catalog: None,
            status: Status::Complete,
        }
    }

    /// A client whose catalog is always empty.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            feed: None,
            catalog: None,
            status: Status::Skipped,
        }
    }

    /// Load the KEV catalog, fetching at most once per client.
    pub fn load(&mut self) -> BestEffort<&KevCatalog> {
        if self.catalog.is_none() {
            let (catalog, status) = self.fetch_once();
            self.catalog = Some(catalog);
            self.status = status;
        }

        let status = self.status.clone();
        let catalog = self.catalog.get_or_insert_with(KevCatalog::new);
        BestEffort {
            value: &*catalog,
            status,
        }
    }

    fn fetch_once(&self) -> (KevCatalog, Status) {
        let Some(feed) = self.feed.as_ref() else {
            tracing::info!("Exploit catalog disabled");
            return (KevCatalog::new(), Status::Skipped);
        };

        match feed.fetch() {
            Ok(response) => {
                let catalog = KevCatalog::from_response(response);
                let released = catalog
                    .released
                    .map_or_else(|| "unknown".to_string(), |d| d.format("%Y-%m-%d").to_string());
                tracing::info!(
                    "Loaded exploit catalog {} (released {}) with {} entries",
                    catalog.version.as_deref().unwrap_or("(unversioned)"),
                    released,
                    catalog.len()
                );
                (catalog, Status::Complete)
            }
            Err(reason) => {
                tracing::warn!(
                    "Could not load exploit catalog, continuing without it: {}",
                    reason
                );
                (KevCatalog::new(), Status::Degraded(reason))
            }
        }
    }

    /// Check if a CVE is in the KEV catalog. False until loaded.
    #[must_use]
    pub fn contains(&self, cve_id: &str) -> bool {
        self.catalog.as_ref().is_some_and(|c| c.contains(cve_id))
    }
}
