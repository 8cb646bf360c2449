use crate::pagination::Envelope;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Policy {
    pub id: u64,
    pub name: String,
    /// osquery SQL that defines the policy.
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub author_id: Option<u64>,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub author_email: Option<String>,
    /// `None` for global policies.
    #[serde(default)]
    pub team_id: Option<u64>,
    #[serde(default)]
    pub resolution: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub passing_host_count: Option<i64>,
    #[serde(default)]
    pub failing_host_count: Option<i64>,
    #[serde(default)]
    pub critical: Option<bool>,
    #[serde(default)]
    pub calendar_events_enabled: Option<bool>,
    #[serde(default, with = "crate::time::fleet_time")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::time::fleet_time")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct ListPoliciesResponse {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub policies: Vec<Policy>,
}

impl Envelope for ListPoliciesResponse {
    type Record = Policy;

    fn into_records(self) -> Vec<Policy> {
        self.policies
    }
}
