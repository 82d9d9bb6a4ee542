//! Vulnerability enrichment module.
//!
//! Everything that talks to the outside world lives here: the NVD and CIRCL
//! lookup sources, the CISA KEV catalog, and the translation provider. Each
//! sits behind a small trait so the pipeline can be driven by fakes.
//!
//! # Example
//!
//! ```no_run
//! use cve_enrich::enrichment::{
//!     CirclClientConfig, CirclSource, EnrichmentStats, NvdClientConfig, NvdSource, RetryPolicy,
//!     SourceResolver,
//! };
//! use cve_enrich::model::CveId;
//!
//! let resolver = SourceResolver::new(
//!     Box::new(NvdSource::new(NvdClientConfig::default()).unwrap()),
//!     Box::new(CirclSource::new(CirclClientConfig::default()).unwrap()),
//!     RetryPolicy::default(),
//! );
//!
//! let mut stats = EnrichmentStats::new();
//! let id = CveId::parse("CVE-2021-44228").unwrap();
//! let resolved = resolver.resolve(&id, &mut stats);
//! ```

mod best_effort;
pub mod circl;
mod http;
pub mod kev;
pub mod nvd;
mod resolver;
mod retry;
mod stats;
pub mod translate;
mod traits;

pub use best_effort::{BestEffort, Status};
pub use circl::{CIRCL_API_URL, CirclClientConfig, CirclSource};
pub use http::{DEFAULT_TIMEOUT, USER_AGENT};
pub use kev::{CatalogFeed, KevCatalog, KevClient, KevClientConfig};
pub use nvd::{NVD_API_URL, NvdClientConfig, NvdSource};
pub use resolver::SourceResolver;
pub use retry::{Clock, DEFAULT_RATE_LIMIT_WAIT, RetryOutcome, RetryPolicy, SystemClock};
pub use stats::{EnrichmentError, EnrichmentStats};
pub use translate::{BestEffortTranslator, GoogleTranslator, TranslationError, Translator};
pub use traits::{NoOpSource, SourceError, VulnerabilitySource};
