use crate::pagination::Envelope;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Label {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub display_text: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// SQL used for dynamic membership.
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub label_type: Option<String>,
    #[serde(default)]
    pub label_membership_type: Option<String>,
    #[serde(default)]
    pub host_count: Option<i64>,
    #[serde(default)]
    pub built_in: Option<bool>,
    #[serde(default, with = "crate::time::fleet_time")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::time::fleet_time")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct ListLabelsResponse {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub labels: Vec<Label>,
}

impl Envelope for ListLabelsResponse {
    type Record = Label;

    fn into_records(self) -> Vec<Label> {
        self.labels
    }
}
