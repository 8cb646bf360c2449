use super::software::SoftwareVulnerability;
use crate::pagination::{Envelope, PageMeta};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Row of `GET /software/versions`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SoftwareVersion {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub extension_for: Option<String>,
    #[serde(default)]
    pub browser: Option<String>,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub generated_cpe: Option<String>,
    #[serde(default)]
    pub bundle_identifier: Option<String>,
    #[serde(default)]
    pub hosts_count: Option<i64>,
    #[serde(default)]
    pub vulnerabilities: Option<Vec<SoftwareVulnerability>>,
    #[serde(default)]
    pub upgrade_code: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default, with = "crate::time::fleet_time")]
    pub last_opened_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub release: Option<String>,
    #[serde(default)]
    pub arch: Option<String>,
    #[serde(default)]
    pub extension_id: Option<String>,
}

/// The versions endpoint reuses the `software` envelope key.
#[derive(Debug, Deserialize)]
pub struct ListSoftwareVersionsResponse {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub software: Vec<SoftwareVersion>,
    #[serde(default)]
    pub meta: Option<PageMeta>,
    #[serde(default)]
    pub count: Option<u64>,
}

impl Envelope for ListSoftwareVersionsResponse {
    type Record = SoftwareVersion;

    fn into_records(self) -> Vec<SoftwareVersion> {
        self.software
    }

    fn has_next_results(&self) -> Option<bool> {
        self.meta.as_ref().and_then(|m| m.has_next_results)
    }
}
