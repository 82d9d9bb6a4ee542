//! Mapper from NVD responses to [`ResolvedVulnerability`].

use super::response::{NvdCve, NvdCvssMetric, NvdDescription, NvdMetrics, NvdResponse};
use crate::enrichment::traits::SourceError;
use crate::model::{CveId, ResolvedVulnerability, SourceTag};

/// Map an NVD response for `id` into a resolved vulnerability.
///
/// An empty vulnerability list means NVD does not know the id.
pub fn map_nvd_response(
    id: &CveId,
    response: NvdResponse,
) -> Result<ResolvedVulnerability, SourceError> {
    let cve = response
        .vulnerabilities
        .into_iter()
        .map(|v| v.cve)
        .find(|cve| cve.id.eq_ignore_ascii_case(id.as_str()))
        .ok_or(SourceError::NotFound)?;

    Ok(map_cve(id, cve))
}

fn map_cve(id: &CveId, cve: NvdCve) -> ResolvedVulnerability {
    ResolvedVulnerability::new(
        id.clone(),
        extract_description(&cve.descriptions),
        extract_base_score(&cve.metrics),
        cve.cisa_required_action,
        SourceTag::Primary,
    )
}

/// Pick the English description, falling back to the first non-empty one.
fn extract_description(descriptions: &[NvdDescription]) -> String {
    descriptions
        .iter()
        .find(|d| d.lang.eq_ignore_ascii_case("en") && !d.value.trim().is_empty())
        .or_else(|| descriptions.iter().find(|d| !d.value.trim().is_empty()))
        .map(|d| d.value.trim().to_string())
        .unwrap_or_default()
}

/// Base score from the newest CVSS version present.
fn extract_base_score(metrics: &NvdMetrics) -> Option<f32> {
    [
        &metrics.cvss_v40,
        &metrics.cvss_v31,
        &metrics.cvss_v30,
        &metrics.cvss_v2,
    ]
    .into_iter()
    .find_map(|entries| preferred_score(entries))
}

/// NVD's own ("Primary") assessment wins over CNA-provided ones.
fn preferred_score(entries: &[NvdCvssMetric]) -> Option<f32> {
    entries
        .iter()
        .filter(|m| m.metric_type.as_deref() == Some("Primary"))
        .chain(entries.iter())
        .find_map(|m| m.cvss_data.base_score)
}
