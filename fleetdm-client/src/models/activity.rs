use crate::pagination::{Envelope, PageMeta};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Audit log entry.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Activity {
    pub id: u64,
    #[serde(default, with = "crate::time::fleet_time")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub actor_full_name: Option<String>,
    /// `None` for activities performed by Fleet itself.
    #[serde(default)]
    pub actor_id: Option<u64>,
    #[serde(default)]
    pub actor_gravatar: Option<String>,
    #[serde(default)]
    pub actor_email: Option<String>,
    #[serde(default)]
    pub actor_type: Option<String>,
    #[serde(rename = "type", default)]
    pub activity_type: Option<String>,
    /// Shape depends on `type`.
    #[serde(default)]
    pub details: Option<serde_json::Value>,
    #[serde(default)]
    pub host_id: Option<u64>,
    #[serde(default)]
    pub host_display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListActivitiesResponse {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub meta: Option<PageMeta>,
    #[serde(default)]
    pub count: Option<u64>,
}

impl Envelope for ListActivitiesResponse {
    type Record = Activity;

    fn into_records(self) -> Vec<Activity> {
        self.activities
    }

    fn has_next_results(&self) -> Option<bool> {
        self.meta.as_ref().and_then(|m| m.has_next_results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_system_activity() {
        let json = r#"{
            "activities": [{
                "id": 12,
                "created_at": "2024-05-01T10:00:00Z",
                "actor_full_name": "",
                "actor_id": null,
                "type": "ran_script",
                "details": {"host_id": 3, "script_name": "fix.sh"}
            }],
            "meta": {"has_next_results": false, "has_previous_results": false}
        }"#;
        let response: ListActivitiesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.has_next_results(), Some(false));

        let records = response.into_records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].actor_id, None);
        assert_eq!(records[0].activity_type.as_deref(), Some("ran_script"));
        assert_eq!(records[0].details.as_ref().unwrap()["script_name"], "fix.sh");

        let row = serde_json::to_value(&records[0]).unwrap();
        assert_eq!(row["type"], "ran_script");
    }
}
