use crate::pagination::{Envelope, PageMeta};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OsVersion {
    pub os_version_id: u64,
    #[serde(default)]
    pub hosts_count: Option<i64>,
    /// Full name including the version, e.g. `macOS 14.4`.
    pub name: String,
    #[serde(default)]
    pub name_only: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub generated_cpes: Option<Vec<String>>,
    #[serde(default)]
    pub vulnerabilities: Option<Vec<OsVersionVulnerability>>,
    #[serde(default)]
    pub vulnerabilities_count: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OsVersionVulnerability {
    pub cve: String,
    #[serde(default)]
    pub details_link: Option<String>,
    #[serde(default, with = "crate::time::fleet_time")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub cvss_score: Option<f64>,
    #[serde(default)]
    pub epss_probability: Option<f64>,
    #[serde(default)]
    pub cisa_known_exploit: Option<bool>,
    #[serde(default, with = "crate::time::fleet_time")]
    pub cve_published: Option<DateTime<Utc>>,
    #[serde(default)]
    pub cve_description: Option<String>,
    #[serde(default)]
    pub resolved_in_version: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListOsVersionsResponse {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub os_versions: Vec<OsVersion>,
    #[serde(default)]
    pub meta: Option<PageMeta>,
    #[serde(default)]
    pub count: Option<u64>,
}

impl Envelope for ListOsVersionsResponse {
    type Record = OsVersion;

    fn into_records(self) -> Vec<OsVersion> {
        self.os_versions
    }

    fn has_next_results(&self) -> Option<bool> {
        self.meta.as_ref().and_then(|m| m.has_next_results)
    }
}
