use crate::pagination::Envelope;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// App Store (VPP) app made available to a team.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppStoreApp {
    pub app_store_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub icon_url: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub latest_version: Option<String>,
    #[serde(default)]
    pub bundle_identifier: Option<String>,
    #[serde(default)]
    pub self_service: Option<bool>,
    #[serde(default)]
    pub categories: Option<serde_json::Value>,
    #[serde(default)]
    pub labels_include_any: Option<serde_json::Value>,
    #[serde(default)]
    pub labels_exclude_any: Option<serde_json::Value>,
    #[serde(default, with = "crate::time::fleet_time")]
    pub created_at: Option<DateTime<Utc>>,
}

/// An [`AppStoreApp`] tagged with the team it was listed for.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppStoreAppWithTeam {
    #[serde(flatten)]
    pub app: AppStoreApp,
    pub team_id: u64,
    /// `None` when the team came from a filter rather than the teams listing.
    pub team_name: Option<String>,
}

impl AppStoreAppWithTeam {
    pub fn new(app: AppStoreApp, team_id: u64, team_name: Option<String>) -> Self {
        Self {
            app,
            team_id,
            team_name,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListAppStoreAppsResponse {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub app_store_apps: Vec<AppStoreApp>,
}

impl Envelope for ListAppStoreAppsResponse {
    type Record = AppStoreApp;

    fn into_records(self) -> Vec<AppStoreApp> {
        self.app_store_apps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagged_app_serializes_flat() {
        let json = r#"{"app_store_apps": [{
            "app_store_id": "409183694",
            "name": "Keynote",
            "platform": "darwin",
            "categories": null,
            "created_at": "2024-07-01T00:00:00Z"
        }]}"#;
        let response: ListAppStoreAppsResponse = serde_json::from_str(json).unwrap();
        let app = response.into_records().remove(0);
        let tagged = AppStoreAppWithTeam::new(app, 3, Some("Design".to_string()));

        let row = serde_json::to_value(&tagged).unwrap();
        assert_eq!(row["app_store_id"], "409183694");
        assert_eq!(row["team_id"], 3);
        assert_eq!(row["team_name"], "Design");
        assert!(row["categories"].is_null());
    }
}
