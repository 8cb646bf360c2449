use crate::pagination::{Envelope, PageMeta};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Software inventory item from `GET /software`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Software {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub bundle_identifier: Option<String>,
    #[serde(default)]
    pub generated_cpe: Option<String>,
    #[serde(default)]
    pub host_count: Option<i64>,
    #[serde(default)]
    pub vulnerabilities: Option<Vec<SoftwareVulnerability>>,
    #[serde(default, with = "crate::time::fleet_time")]
    pub counts_updated_at: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::time::fleet_time")]
    pub last_opened_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub release: Option<String>,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub arch: Option<String>,
    #[serde(default)]
    pub extension_id: Option<String>,
    #[serde(default)]
    pub browser: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub installed_path: Option<String>,
}

/// CVE attached to a software item.
///
/// Premium servers add a long tail of exploitation counters; those are kept
/// verbatim in `extra` so they survive into the JSON column.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SoftwareVulnerability {
    pub cve: String,
    #[serde(default)]
    pub details_link: Option<String>,
    #[serde(default)]
    pub cvss_score: Option<f64>,
    #[serde(default)]
    pub epss_probability: Option<f64>,
    #[serde(default)]
    pub cisa_known_exploit: Option<bool>,
    #[serde(default, with = "crate::time::fleet_time")]
    pub cve_published: Option<DateTime<Utc>>,
    #[serde(default)]
    pub resolved_in_version: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct ListSoftwareResponse {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub software: Vec<Software>,
    #[serde(default)]
    pub meta: Option<PageMeta>,
    #[serde(default)]
    pub count: Option<u64>,
}

impl Envelope for ListSoftwareResponse {
    type Record = Software;

    fn into_records(self) -> Vec<Software> {
        self.software
    }

    fn has_next_results(&self) -> Option<bool> {
        self.meta.as_ref().and_then(|m| m.has_next_results)
    }
}
