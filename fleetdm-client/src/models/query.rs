use crate::pagination::Envelope;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Saved query.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SavedQuery {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub author_id: Option<u64>,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub author_email: Option<String>,
    #[serde(default)]
    pub observer_can_run: Option<bool>,
    #[serde(default)]
    pub team_id: Option<u64>,
    #[serde(default)]
    pub automations_enabled: Option<bool>,
    /// Seconds between scheduled runs.
    #[serde(default)]
    pub interval: Option<i64>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub min_osquery_version: Option<String>,
    /// `snapshot`, `differential` or `differential_ignore_removals`.
    #[serde(default)]
    pub logging: Option<String>,
    #[serde(default)]
    pub stats: Option<serde_json::Value>,
    #[serde(default)]
    pub packs: Option<Vec<QueryPack>>,
    #[serde(default, with = "crate::time::fleet_time")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::time::fleet_time")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QueryPack {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub pack_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListQueriesResponse {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub queries: Vec<SavedQuery>,
}

impl Envelope for ListQueriesResponse {
    type Record = SavedQuery;

    fn into_records(self) -> Vec<SavedQuery> {
        self.queries
    }
}
