//! Sequential enrichment of an identifier list.

use crate::enrichment::{
    BestEffort, BestEffortTranslator, EnrichmentError, EnrichmentStats, KevClient,
    SourceResolver,
};
use crate::model::{CveId, EnrichmentResult, VulnerabilityRecord};
use std::time::Instant;

/// Output of one pipeline run.
#[derive(Debug, Clone)]
pub struct EnrichmentRun {
    /// Records in input order, unresolved ids omitted
    pub result: EnrichmentResult,
    /// What happened along the way
    pub stats: EnrichmentStats,
}

/// Drives resolve, translate, and classify for each id in turn.
pub struct EnrichmentPipeline {
    catalog: KevClient,
    resolver: SourceResolver,
    translator: BestEffortTranslator,
}

impl EnrichmentPipeline {
    #[must_use]
    pub const fn new(
        catalog: KevClient,
        resolver: SourceResolver,
        translator: BestEffortTranslator,
    ) -> Self {
        Self {
            catalog,
            resolver,
            translator,
        }
    }

    /// Enrich `ids` in order.
    ///
    /// Ids that no source can resolve are logged and left out. The exploit
    /// catalog is loaded before the first id.
    pub fn run(&mut self, ids: &[CveId]) -> EnrichmentRun {
        let start = Instant::now();
        let mut stats = EnrichmentStats::new();
        stats.ids_requested = ids.len();

        let loaded = self.catalog.load();
        stats.catalog_size = loaded.value.len();
        if let Some(reason) = loaded.degraded_reason() {
            stats.catalog_degraded = true;
            stats
                .errors
                .push(EnrichmentError::CatalogUnavailable(reason.to_string()));
        }

        let mut result = EnrichmentResult::with_capacity(ids.len());
        for (index, id) in ids.iter().enumerate() {
            tracing::debug!("[{}/{}] {}", index + 1, ids.len(), id);
            match self.enrich_one(id, &mut stats) {
                Some(record) => result.push(record),
                None => {
                    tracing::warn!("Skipping {}: not found in any source", id);
                    stats.ids_skipped += 1;
                    stats
                        .errors
                        .push(EnrichmentError::NotFoundAnywhere(id.to_string()));
                }
            }
        }

        stats.duration = start.elapsed();
        EnrichmentRun { result, stats }
    }

    fn enrich_one(
        &self,
        id: &CveId,
        stats: &mut EnrichmentStats,
    ) -> Option<VulnerabilityRecord> {
        let resolved = self.resolver.resolve(id, stats)?;
        let exploited = self.catalog.contains(id.as_str());

        let description = self.translate(&resolved.description, stats);
        let mitigation = self.translate(&resolved.mitigation, stats);
        let record = VulnerabilityRecord::new(resolved, description, mitigation, exploited);

        tracing::info!(
            "{} - {} ({}) via {}",
            record.id(),
            record.criticality(),
            if record.exploited() {
                "exploited"
            } else {
                "not exploited"
            },
            record.source()
        );
        stats.record_hit(record.source(), record.exploited());
        Some(record)
    }

    fn translate(&self, text: &str, stats: &mut EnrichmentStats) -> String {
        let translated: BestEffort<String> = self.translator.translate(text);
        if let Some(reason) = translated.degraded_reason() {
            stats.translations_degraded += 1;
            stats
                .errors
                .push(EnrichmentError::TranslationFailed(reason.to_string()));
        }
        translated.into_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrichment::kev::{CatalogFeed, KevCatalogResponse, KevVulnerability};
    use crate::enrichment::{
        Clock, NoOpSource, RetryPolicy, SourceError, TranslationError, Translator,
        VulnerabilitySource,
    };
    use crate::model::{Criticality, ResolvedVulnerability, SourceTag};
    use std::collections::HashMap;
    use std::time::{Duration, Instant};

    struct StaticFeed(Vec<&'static str>);

    impl CatalogFeed for StaticFeed {
        fn fetch(&self) -> Result<KevCatalogResponse, String> {
            Ok(KevCatalogResponse {
                catalog_version: None,
                date_released: None,
                vulnerabilities: self
                    .0
                    .iter()
                    .map(|id| KevVulnerability {
                        cve_id: Some((*id).to_string()),
                        vendor_project: None,
                        product: None,
                    })
                    .collect(),
            })
        }
    }

    struct BrokenFeed;

    impl CatalogFeed for BrokenFeed {
        fn fetch(&self) -> Result<KevCatalogResponse, String> {
            Err("timed out".to_string())
        }
    }

    struct MapSource(HashMap<&'static str, f32>);

    impl VulnerabilitySource for MapSource {
        fn lookup(&self, id: &CveId) -> Result<ResolvedVulnerability, SourceError> {
            self.0
                .get(id.as_str())
                .map(|score| {
                    ResolvedVulnerability::new(
                        id.clone(),
                        "Remote code execution",
                        Some(*score),
                        Some("Apply updates".to_string()),
                        SourceTag::Primary,
                    )
                })
                .ok_or(SourceError::NotFound)
        }

        fn name(&self) -> &'static str {
            "map"
        }

        fn tag(&self) -> SourceTag {
            SourceTag::Primary
        }
    }

    struct Upper;

    impl Translator for Upper {
        fn translate(&self, text: &str) -> Result<String, TranslationError> {
            Ok(text.to_uppercase())
        }
    }

    struct NoSleep;

    impl Clock for NoSleep {
        fn now(&self) -> Instant {
            Instant::now()
        }

        fn sleep(&self, _duration: Duration) {}
    }

    fn pipeline(feed: Box<dyn CatalogFeed>, translator: BestEffortTranslator) -> EnrichmentPipeline {
        let primary = MapSource(HashMap::from([("CVE-2021-44228", 10.0), ("CVE-2014-0160", 7.5)]));
        let resolver = SourceResolver::with_clock(
            Box::new(primary),
            Box::new(NoOpSource::new(SourceTag::Secondary)),
            RetryPolicy::default(),
            Box::new(NoSleep),
        );
        EnrichmentPipeline::new(KevClient::with_feed(feed), resolver, translator)
    }

    fn ids(raw: &[&str]) -> Vec<CveId> {
        raw.iter().map(|s| CveId::parse(s).unwrap()).collect()
    }

    #[test]
    fn test_run_classifies_and_orders() {
        let mut p = pipeline(
            Box::new(StaticFeed(vec!["CVE-2021-44228"])),
            BestEffortTranslator::disabled(),
        );
        let run = p.run(&ids(&["CVE-2021-44228", "CVE-2014-0160"]));

        assert_eq!(run.result.len(), 2);
        assert_eq!(run.result[0].criticality(), Criticality::Critical);
        assert!(run.result[0].exploited());
        assert_eq!(run.result[1].criticality(), Criticality::Medium);
        assert!(!run.result[1].exploited());
        assert_eq!(run.stats.exploited_matches, 1);
        assert_eq!(run.stats.catalog_size, 1);
    }

    #[test]
    fn test_unresolved_id_is_skipped() {
        let mut p = pipeline(Box::new(StaticFeed(vec![])), BestEffortTranslator::disabled());
        let run = p.run(&ids(&["CVE-2021-44228", "CVE-1999-0001", "CVE-2014-0160"]));

        assert_eq!(run.result.len(), 2);
        assert!(run.result.iter().all(|r| r.id().as_str() != "CVE-1999-0001"));
        assert_eq!(run.stats.ids_skipped, 1);
        assert!(
            run.stats
                .errors
                .contains(&EnrichmentError::NotFoundAnywhere("CVE-1999-0001".to_string()))
        );
    }

    #[test]
    fn test_catalog_failure_degrades() {
        let mut p = pipeline(Box::new(BrokenFeed), BestEffortTranslator::disabled());
        let run = p.run(&ids(&["CVE-2021-44228"]));

        assert_eq!(run.result.len(), 1);
        assert!(!run.result[0].exploited());
        assert_eq!(run.result[0].criticality(), Criticality::High);
        assert!(run.stats.catalog_degraded);
    }

    #[test]
    fn test_text_fields_are_translated() {
        let mut p = pipeline(
            Box::new(StaticFeed(vec![])),
            BestEffortTranslator::new(Box::new(Upper)),
        );
        let run = p.run(&ids(&["CVE-2014-0160"]));

        assert_eq!(run.result[0].description(), "REMOTE CODE EXECUTION");
        assert_eq!(run.result[0].mitigation(), "APPLY UPDATES");
        assert_eq!(run.stats.translations_degraded, 0);
    }
}
