use crate::pagination::{Envelope, PageMeta};
use serde::{Deserialize, Serialize};

/// Installer curated by Fleet.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FleetMaintainedApp {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    /// Set when the app has already been added to the filtered team.
    #[serde(default)]
    pub software_title_id: Option<u64>,
    #[serde(default)]
    pub categories: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct ListFleetMaintainedAppsResponse {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub fleet_maintained_apps: Vec<FleetMaintainedApp>,
    #[serde(default)]
    pub meta: Option<PageMeta>,
}

impl Envelope for ListFleetMaintainedAppsResponse {
    type Record = FleetMaintainedApp;

    fn into_records(self) -> Vec<FleetMaintainedApp> {
        self.fleet_maintained_apps
    }

    fn has_next_results(&self) -> Option<bool> {
        self.meta.as_ref().and_then(|m| m.has_next_results)
    }
}
