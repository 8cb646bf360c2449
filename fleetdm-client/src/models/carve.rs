use crate::pagination::Envelope;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// File carve session.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Carve {
    pub id: u64,
    #[serde(default, with = "crate::time::fleet_time")]
    pub created_at: Option<DateTime<Utc>>,
    pub host_id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub block_count: Option<i64>,
    #[serde(default)]
    pub block_size: Option<i64>,
    #[serde(default)]
    pub carve_size: Option<i64>,
    #[serde(default)]
    pub carve_id: Option<String>,
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub expired: Option<bool>,
    #[serde(default)]
    pub max_block: Option<i64>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListCarvesResponse {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub carves: Vec<Carve>,
}

impl Envelope for ListCarvesResponse {
    type Record = Carve;

    fn into_records(self) -> Vec<Carve> {
        self.carves
    }
}
