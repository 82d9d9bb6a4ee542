//! CIRCL CVE search response types.
//!
//! `cve.circl.lu` has served two document shapes over time: the legacy
//! cve-search object (`id`, `summary`, `cvss`) and the CVE JSON 5 record
//! (`cveMetadata`, `containers`). Both are accepted.

use serde::Deserialize;

/// Any document returned by `GET /api/cve/{id}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CirclDocument {
    /// CVE JSON 5 record
    Record(CveRecord),
    /// Legacy cve-search object
    Legacy(CirclLegacy),
}

/// Legacy cve-search document.
#[derive(Debug, Clone, Deserialize)]
pub struct CirclLegacy {
    pub id: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub cvss: Option<f32>,
    #[serde(default)]
    pub cvss3: Option<f32>,
}

/// CVE JSON 5 record.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CveRecord {
    pub cve_metadata: CveMetadata,
    #[serde(default)]
    pub containers: CveContainers,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CveMetadata {
    pub cve_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CveContainers {
    #[serde(default)]
    pub cna: Option<CnaContainer>,
    /// Authorized data publisher containers (e.g. CISA-ADP), which often
    /// carry the only CVSS metrics on recent records
    #[serde(default)]
    pub adp: Vec<CnaContainer>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CnaContainer {
    #[serde(default)]
    pub descriptions: Vec<CnaDescription>,
    #[serde(default)]
    pub metrics: Vec<CnaMetric>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CnaDescription {
    #[serde(default)]
    pub lang: String,
    pub value: String,
}

/// One entry of a container's `metrics`; usually a single version is set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CnaMetric {
    #[serde(rename = "cvssV4_0", default)]
    pub cvss_v4_0: Option<CnaCvss>,
    #[serde(rename = "cvssV3_1", default)]
    pub cvss_v3_1: Option<CnaCvss>,
    #[serde(rename = "cvssV3_0", default)]
    pub cvss_v3_0: Option<CnaCvss>,
    #[serde(rename = "cvssV2_0", default)]
    pub cvss_v2_0: Option<CnaCvss>,
}

impl CnaMetric {
    /// Base scores ordered v4.0, v3.1, v3.0, v2.0.
    #[must_use]
    pub fn scores_newest_first(&self) -> [Option<f32>; 4] {
        [
            &self.cvss_v4_0,
            &self.cvss_v3_1,
            &self.cvss_v3_0,
            &self.cvss_v2_0,
        ]
        .map(|cvss| cvss.as_ref().and_then(|c| c.base_score))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CnaCvss {
    #[serde(default)]
    pub base_score: Option<f32>,
}
