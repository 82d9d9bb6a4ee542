//! Primary/secondary source resolution.

use super::retry::{Clock, RetryPolicy, SystemClock};
use super::stats::{EnrichmentError, EnrichmentStats};
use super::traits::{SourceError, VulnerabilitySource};
use crate::model::{CveId, ResolvedVulnerability, SourceTag};

/// Resolves one identifier against a primary source with a single fallback.
///
/// Rate limiting on the primary is retried under the [`RetryPolicy`]; any
/// other primary failure goes straight to the secondary, which is asked
/// exactly once. A record always comes from one source in full.
pub struct SourceResolver {
    primary: Box<dyn VulnerabilitySource>,
    secondary: Box<dyn VulnerabilitySource>,
    retry: RetryPolicy,
    clock: Box<dyn Clock>,
}

impl SourceResolver {
    /// Create a resolver using the system clock.
    #[must_use]
    pub fn new(
        primary: Box<dyn VulnerabilitySource>,
        secondary: Box<dyn VulnerabilitySource>,
        retry: RetryPolicy,
    ) -> Self {
        Self::with_clock(primary, secondary, retry, Box::new(SystemClock))
    }

    /// Create a resolver with an explicit clock.
    #[must_use]
    pub fn with_clock(
        primary: Box<dyn VulnerabilitySource>,
        secondary: Box<dyn VulnerabilitySource>,
        retry: RetryPolicy,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            primary,
            secondary,
            retry,
            clock,
        }
    }

    /// Resolve `id`, or `None` when neither source has it.
    ///
    /// Failures are recorded on `stats`; nothing is returned as an error.
    pub fn resolve(
        &self,
        id: &CveId,
        stats: &mut EnrichmentStats,
    ) -> Option<ResolvedVulnerability> {
        let outcome = self
            .retry
            .run(self.clock.as_ref(), || self.primary.lookup(id));
        stats.rate_limit_waits += outcome.waits;

        let primary_err = match outcome.result {
            Ok(resolved) => return Some(stamp(resolved, self.primary.tag())),
            Err(e) => e,
        };
        self.note_failure(id, self.primary.name(), &primary_err, stats);

        match self.secondary.lookup(id) {
            Ok(resolved) => {
                tracing::debug!("{} resolved {} after primary failure", self.secondary.name(), id);
                Some(stamp(resolved, self.secondary.tag()))
            }
            Err(e) => {
                self.note_failure(id, self.secondary.name(), &e, stats);
                None
            }
        }
    }

    fn note_failure(
        &self,
        id: &CveId,
        source: &str,
        err: &SourceError,
        stats: &mut EnrichmentStats,
    ) {
        if *err == SourceError::NotFound {
            tracing::debug!("{} has no entry for {}", source, id);
        } else {
            tracing::warn!("{} lookup failed for {}: {}", source, id, err);
        }
        stats
            .errors
            .push(EnrichmentError::source_failed(id, source, err));
    }
}

fn stamp(mut resolved: ResolvedVulnerability, tag: SourceTag) -> ResolvedVulnerability {
    resolved.source = tag;
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrichment::retry::testing::FakeClock;
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;
    use std::rc::Rc;
    use std::time::Duration;

    /// Source that replays a script of responses and counts calls.
    struct Scripted {
        name: &'static str,
        tag: SourceTag,
        script: RefCell<VecDeque<Result<f32, SourceError>>>,
        calls: Rc<Cell<usize>>,
    }

    impl VulnerabilitySource for Scripted {
        fn lookup(&self, id: &CveId) -> Result<ResolvedVulnerability, SourceError> {
            self.calls.set(self.calls.get() + 1);
            let next = self
                .script
                .borrow_mut()
                .pop_front()
                .unwrap_or(Err(SourceError::NotFound));
            next.map(|score| {
                ResolvedVulnerability::new(
                    id.clone(),
                    self.name,
                    Some(score),
                    None,
                    SourceTag::Primary,
                )
            })
        }

        fn name(&self) -> &'static str {
            self.name
        }

        fn tag(&self) -> SourceTag {
            self.tag
        }
    }

    fn scripted(
        name: &'static str,
        tag: SourceTag,
        script: Vec<Result<f32, SourceError>>,
    ) -> (Box<dyn VulnerabilitySource>, Rc<Cell<usize>>) {
        let calls = Rc::new(Cell::new(0));
        let source = Scripted {
            name,
            tag,
            script: RefCell::new(script.into()),
            calls: Rc::clone(&calls),
        };
        (Box::new(source), calls)
    }

    fn resolver(
        primary: Vec<Result<f32, SourceError>>,
        secondary: Vec<Result<f32, SourceError>>,
        retry: RetryPolicy,
    ) -> (SourceResolver, Rc<Cell<usize>>, Rc<Cell<usize>>) {
        let (p, p_calls) = scripted("NVD", SourceTag::Primary, primary);
        let (s, s_calls) = scripted("CIRCL", SourceTag::Secondary, secondary);
        let resolver = SourceResolver::with_clock(p, s, retry, Box::new(FakeClock::new()));
        (resolver, p_calls, s_calls)
    }

    fn id() -> CveId {
        CveId::parse("CVE-2021-44228").unwrap()
    }

    #[test]
    fn test_primary_success_skips_secondary() {
        let (resolver, p_calls, s_calls) =
            resolver(vec![Ok(10.0)], vec![Ok(9.3)], RetryPolicy::default());
        let mut stats = EnrichmentStats::new();

        let resolved = resolver.resolve(&id(), &mut stats).unwrap();

        assert_eq!(resolved.source, SourceTag::Primary);
        assert_eq!(resolved.cvss_score, Some(10.0));
        assert_eq!(p_calls.get(), 1);
        assert_eq!(s_calls.get(), 0);
        assert!(!stats.has_errors());
    }

    #[test]
    fn test_record_takes_tag_of_answering_source() {
        let (p, _) = scripted("CIRCL", SourceTag::Secondary, vec![Ok(9.8)]);
        let (s, s_calls) = scripted("NVD", SourceTag::Primary, vec![]);
        let resolver =
            SourceResolver::with_clock(p, s, RetryPolicy::default(), Box::new(FakeClock::new()));
        let mut stats = EnrichmentStats::new();

        let resolved = resolver.resolve(&id(), &mut stats).unwrap();

        assert_eq!(resolved.source, SourceTag::Secondary);
        assert_eq!(resolved.description, "CIRCL");
        assert_eq!(s_calls.get(), 0);
    }

    #[test]
    fn test_primary_failure_calls_secondary_once() {
        let (resolver, p_calls, s_calls) = resolver(
            vec![Err(SourceError::Timeout)],
            vec![Ok(9.3)],
            RetryPolicy::default(),
        );
        let mut stats = EnrichmentStats::new();

        let resolved = resolver.resolve(&id(), &mut stats).unwrap();

        assert_eq!(resolved.source, SourceTag::Secondary);
        assert_eq!(resolved.description, "CIRCL");
        assert_eq!(p_calls.get(), 1);
        assert_eq!(s_calls.get(), 1);
        assert_eq!(stats.errors.len(), 1);
    }

    #[test]
    fn test_rate_limit_retries_identical_request() {
        let (resolver, p_calls, s_calls) = resolver(
            vec![
                Err(SourceError::RateLimited),
                Err(SourceError::RateLimited),
                Err(SourceError::RateLimited),
                Ok(7.5),
            ],
            vec![],
            RetryPolicy::default(),
        );
        let mut stats = EnrichmentStats::new();

        let resolved = resolver.resolve(&id(), &mut stats).unwrap();

        assert_eq!(resolved.cvss_score, Some(7.5));
        assert_eq!(p_calls.get(), 4);
        assert_eq!(s_calls.get(), 0);
        assert_eq!(stats.rate_limit_waits, 3);
    }

    #[test]
    fn test_retry_stops_on_other_error() {
        let (resolver, p_calls, s_calls) = resolver(
            vec![Err(SourceError::RateLimited), Err(SourceError::Status(500))],
            vec![Ok(5.0)],
            RetryPolicy::default(),
        );
        let mut stats = EnrichmentStats::new();

        let resolved = resolver.resolve(&id(), &mut stats).unwrap();

        assert_eq!(resolved.source, SourceTag::Secondary);
        assert_eq!(p_calls.get(), 2);
        assert_eq!(s_calls.get(), 1);
        assert_eq!(stats.rate_limit_waits, 1);
    }

    #[test]
    fn test_retry_cap_falls_back() {
        let (resolver, p_calls, s_calls) = resolver(
            vec![Err(SourceError::RateLimited); 5],
            vec![Ok(6.1)],
            RetryPolicy::new(Duration::from_secs(1), Some(2)),
        );
        let mut stats = EnrichmentStats::new();

        let resolved = resolver.resolve(&id(), &mut stats).unwrap();

        assert_eq!(resolved.source, SourceTag::Secondary);
        assert_eq!(p_calls.get(), 3);
        assert_eq!(s_calls.get(), 1);
    }

    #[test]
    fn test_both_fail_returns_none() {
        let (resolver, _, s_calls) = resolver(
            vec![Err(SourceError::NotFound)],
            vec![Err(SourceError::Network("reset".to_string()))],
            RetryPolicy::default(),
        );
        let mut stats = EnrichmentStats::new();

        assert!(resolver.resolve(&id(), &mut stats).is_none());
        assert_eq!(s_calls.get(), 1);
        assert_eq!(stats.errors.len(), 2);
    }
}
