use crate::pagination::Envelope;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Query pack. Target and schedule fields are only filled in by some servers.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Pack {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub disabled: Option<bool>,
    #[serde(rename = "type", default)]
    pub pack_type: Option<String>,
    #[serde(default)]
    pub team_id: Option<u64>,
    #[serde(default)]
    pub target_count: Option<i64>,
    #[serde(default)]
    pub total_scheduled_queries_count: Option<i64>,
    #[serde(default)]
    pub targets: Option<serde_json::Value>,
    #[serde(default)]
    pub scheduled_queries: Option<Vec<ScheduledQuery>>,
    #[serde(default)]
    pub agent_options: Option<serde_json::Value>,
    #[serde(default)]
    pub host_ids: Option<Vec<u64>>,
    #[serde(default)]
    pub label_ids: Option<Vec<u64>>,
    #[serde(default)]
    pub team_ids: Option<Vec<u64>>,
    #[serde(default, with = "crate::time::fleet_time")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::time::fleet_time")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScheduledQuery {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub interval: Option<i64>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub min_osquery_version: Option<String>,
    #[serde(default)]
    pub logging: Option<String>,
    #[serde(default)]
    pub removed: Option<bool>,
    #[serde(default)]
    pub snapshot: Option<bool>,
    #[serde(default)]
    pub shard: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ListPacksResponse {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub packs: Vec<Pack>,
}

impl Envelope for ListPacksResponse {
    type Record = Pack;

    fn into_records(self) -> Vec<Pack> {
        self.packs
    }
}
