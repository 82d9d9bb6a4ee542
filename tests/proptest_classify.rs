//! Property-based tests for criticality classification.
//!
//! The classifier is total: every score, absent or not, maps to exactly one
//! band, and exploitation always wins.

use cve_enrich::classify;
use cve_enrich::model::Criticality;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    #[test]
    fn high_band(score in 8.0f32..=10.0) {
        prop_assert_eq!(classify(Some(score), false), Criticality::High);
    }

    #[test]
    fn medium_band(score in 5.0f32..8.0) {
        prop_assert_eq!(classify(Some(score), false), Criticality::Medium);
    }

    #[test]
    fn low_band(score in 0.0f32..5.0) {
        prop_assert_eq!(classify(Some(score), false), Criticality::Low);
    }

    #[test]
    fn exploited_is_always_critical(score in proptest::option::of(any::<f32>())) {
        prop_assert_eq!(classify(score, true), Criticality::Critical);
    }

    #[test]
    fn never_unknown_with_a_real_score(score in -100.0f32..100.0) {
        prop_assert_ne!(classify(Some(score), false), Criticality::Unknown);
    }

    #[test]
    fn deterministic(score in proptest::option::of(0.0f32..=10.0), exploited in any::<bool>()) {
        prop_assert_eq!(classify(score, exploited), classify(score, exploited));
    }
}

#[test]
fn absent_score_is_unknown() {
    assert_eq!(classify(None, false), Criticality::Unknown);
}

#[test]
fn nan_score_is_unknown() {
    assert_eq!(classify(Some(f32::NAN), false), Criticality::Unknown);
}

#[test]
fn band_edges() {
    assert_eq!(classify(Some(8.0), false), Criticality::High);
    assert_eq!(classify(Some(7.99), false), Criticality::Medium);
    assert_eq!(classify(Some(5.0), false), Criticality::Medium);
    assert_eq!(classify(Some(4.99), false), Criticality::Low);
}
