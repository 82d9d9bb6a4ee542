//! Criticality classification.

use crate::model::Criticality;

/// Scores at or above this are `High` when not exploited.
pub const HIGH_THRESHOLD: f32 = 8.0;
/// Scores at or above this (and below [`HIGH_THRESHOLD`]) are `Medium`.
pub const MEDIUM_THRESHOLD: f32 = 5.0;

/// Map a CVSS score and exploitation status to a criticality band.
///
/// Exploitation overrides any score. A `NaN` score counts as absent.
#[must_use]
pub fn classify(cvss_score: Option<f32>, exploited: bool) -> Criticality {
    if exploited {
        return Criticality::Critical;
    }

    match cvss_score.filter(|s| !s.is_nan()) {
        Some(score) if score >= HIGH_THRESHOLD => Criticality::High,
        Some(score) if score >= MEDIUM_THRESHOLD => Criticality::Medium,
        Some(_) => Criticality::Low,
        None => Criticality::Unknown,
    }
}
