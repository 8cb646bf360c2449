use crate::pagination::Envelope;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Team {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub user_count: Option<i64>,
    #[serde(default)]
    pub host_count: Option<i64>,
    #[serde(default, with = "crate::time::fleet_time")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub agent_options: Option<serde_json::Value>,
    #[serde(default)]
    pub secrets: Option<Vec<TeamSecret>>,
    #[serde(default)]
    pub users: Option<Vec<TeamUser>>,
}

/// Agent enrollment secret.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TeamSecret {
    pub secret: String,
    #[serde(default, with = "crate::time::fleet_time")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub team_id: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TeamUser {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub global_role: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListTeamsResponse {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub teams: Vec<Team>,
}

impl Envelope for ListTeamsResponse {
    type Record = Team;

    fn into_records(self) -> Vec<Team> {
        self.teams
    }
}
