use crate::pagination::{Envelope, PageMeta};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Software title: one product across all of its versions.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SoftwareTitle {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub icon_url: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub extension_for: Option<String>,
    #[serde(default)]
    pub browser: Option<String>,
    #[serde(default)]
    pub hosts_count: Option<i64>,
    #[serde(default)]
    pub versions_count: Option<i64>,
    #[serde(default)]
    pub versions: Option<Vec<SoftwareTitleVersion>>,
    #[serde(default)]
    pub software_package: Option<serde_json::Value>,
    #[serde(default)]
    pub app_store_app: Option<serde_json::Value>,
    #[serde(default)]
    pub bundle_identifier: Option<String>,
    #[serde(default, with = "crate::time::fleet_time")]
    pub counts_updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SoftwareTitleVersion {
    pub id: u64,
    #[serde(default)]
    pub version: Option<String>,
    /// CVE identifiers.
    #[serde(default)]
    pub vulnerabilities: Option<Vec<String>>,
    #[serde(default)]
    pub hosts_count: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ListSoftwareTitlesResponse {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub software_titles: Vec<SoftwareTitle>,
    #[serde(default)]
    pub meta: Option<PageMeta>,
    #[serde(default)]
    pub count: Option<u64>,
}

impl Envelope for ListSoftwareTitlesResponse {
    type Record = SoftwareTitle;

    fn into_records(self) -> Vec<SoftwareTitle> {
        self.software_titles
    }

    fn has_next_results(&self) -> Option<bool> {
        self.meta.as_ref().and_then(|m| m.has_next_results)
    }
}
