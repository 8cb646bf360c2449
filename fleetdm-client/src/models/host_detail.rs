use super::host::HostIssues;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Full host record from `GET /hosts/{id}`.
///
/// Carries every field of [`super::Host`] under the same names plus the
/// nested collections that the list endpoint leaves out.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HostDetail {
    pub id: u64,
    #[serde(default, with = "crate::time::fleet_time")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::time::fleet_time")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::time::fleet_time")]
    pub software_updated_at: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::time::fleet_time")]
    pub detail_updated_at: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::time::fleet_time")]
    pub label_updated_at: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::time::fleet_time")]
    pub policy_updated_at: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::time::fleet_time")]
    pub last_enrolled_at: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::time::fleet_time")]
    pub last_mdm_checked_in_at: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::time::fleet_time")]
    pub last_mdm_enrolled_at: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::time::fleet_time")]
    pub last_restarted_at: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::time::fleet_time")]
    pub seen_time: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::time::fleet_time")]
    pub refetch_critical_queries_until: Option<DateTime<Utc>>,
    #[serde(default)]
    pub refetch_requested: Option<bool>,
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub osquery_version: Option<String>,
    #[serde(default)]
    pub orbit_version: Option<String>,
    #[serde(default)]
    pub fleet_desktop_version: Option<String>,
    #[serde(default)]
    pub scripts_enabled: Option<bool>,
    #[serde(default)]
    pub os_version: Option<String>,
    #[serde(default)]
    pub build: Option<String>,
    #[serde(default)]
    pub platform_like: Option<String>,
    #[serde(default)]
    pub code_name: Option<String>,
    #[serde(default)]
    pub uptime: Option<i64>,
    #[serde(default)]
    pub memory: Option<i64>,
    #[serde(default)]
    pub cpu_type: Option<String>,
    #[serde(default)]
    pub cpu_subtype: Option<String>,
    #[serde(default)]
    pub cpu_brand: Option<String>,
    #[serde(default)]
    pub cpu_physical_cores: Option<i64>,
    #[serde(default)]
    pub cpu_logical_cores: Option<i64>,
    #[serde(default)]
    pub hardware_vendor: Option<String>,
    #[serde(default)]
    pub hardware_model: Option<String>,
    #[serde(default)]
    pub hardware_version: Option<String>,
    #[serde(default)]
    pub hardware_serial: Option<String>,
    #[serde(default)]
    pub computer_name: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub display_text: Option<String>,
    #[serde(default)]
    pub public_ip: Option<String>,
    #[serde(default)]
    pub primary_ip: Option<String>,
    #[serde(default)]
    pub primary_mac: Option<String>,
    #[serde(default)]
    pub distributed_interval: Option<i64>,
    #[serde(default)]
    pub config_tls_refresh: Option<i64>,
    #[serde(default)]
    pub logger_tls_period: Option<i64>,
    #[serde(default)]
    pub team_id: Option<u64>,
    #[serde(default)]
    pub team_name: Option<String>,
    #[serde(default)]
    pub gigs_disk_space_available: Option<f64>,
    #[serde(default)]
    pub percent_disk_space_available: Option<f64>,
    #[serde(default)]
    pub gigs_total_disk_space: Option<f64>,
    #[serde(default)]
    pub disk_encryption_enabled: Option<bool>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub additional: Option<serde_json::Value>,
    #[serde(default)]
    pub issues: Option<HostIssues>,
    #[serde(default)]
    pub batteries: Option<Vec<HostBattery>>,
    #[serde(default)]
    pub geolocation: Option<HostGeolocation>,
    #[serde(default)]
    pub maintenance_window: Option<HostMaintenanceWindow>,
    #[serde(default)]
    pub users: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    pub end_users: Option<Vec<HostEndUser>>,
    #[serde(default)]
    pub labels: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    pub packs: Option<serde_json::Value>,
    #[serde(default)]
    pub policies: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    pub software: Option<Vec<HostSoftware>>,
    #[serde(default)]
    pub mdm: Option<HostMdmDetail>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HostMdmDetail {
    #[serde(default)]
    pub encryption_key_available: Option<bool>,
    #[serde(default)]
    pub enrollment_status: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub connected_to_fleet: Option<bool>,
    #[serde(default)]
    pub server_url: Option<String>,
    #[serde(default)]
    pub device_status: Option<String>,
    #[serde(default)]
    pub pending_action: Option<String>,
    #[serde(default)]
    pub macos_settings: Option<serde_json::Value>,
    #[serde(default)]
    pub macos_setup: Option<serde_json::Value>,
    #[serde(default)]
    pub os_settings: Option<serde_json::Value>,
    #[serde(default)]
    pub profiles: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HostBattery {
    #[serde(default)]
    pub cycle_count: Option<i64>,
    #[serde(default)]
    pub health: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HostGeometry {
    #[serde(rename = "type", default)]
    pub geometry_type: Option<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub coordinates: Vec<f64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HostGeolocation {
    #[serde(default)]
    pub country_iso: Option<String>,
    #[serde(default)]
    pub city_name: Option<String>,
    #[serde(default)]
    pub geometry: Option<HostGeometry>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HostMaintenanceWindow {
    #[serde(default, with = "crate::time::fleet_time")]
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub timezone: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HostOtherEmail {
    pub email: String,
    #[serde(default)]
    pub source: Option<String>,
}

/// End user mapped to the device through the identity provider.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HostEndUser {
    #[serde(default, with = "crate::time::fleet_time")]
    pub idp_info_updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub idp_id: Option<String>,
    #[serde(default)]
    pub idp_username: Option<String>,
    #[serde(default)]
    pub idp_full_name: Option<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub idp_groups: Vec<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub other_emails: Vec<HostOtherEmail>,
}

/// Software item installed on one host.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HostSoftware {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub browser: Option<String>,
    #[serde(default)]
    pub bundle_identifier: Option<String>,
    #[serde(default, with = "crate::time::fleet_time")]
    pub last_opened_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub generated_cpe: Option<String>,
    #[serde(default)]
    pub vulnerabilities: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub installed_paths: Vec<String>,
}

/// Envelope of `GET /hosts/{id}`.
#[derive(Debug, Deserialize)]
pub struct GetHostDetailResponse {
    pub host: HostDetail,
}

impl crate::pagination::Envelope for GetHostDetailResponse {
    type Record = HostDetail;

    fn into_records(self) -> Vec<HostDetail> {
        vec![self.host]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_detail() {
        let json = r#"{"host": {
            "id": 42,
            "hostname": "build-agent",
            "last_mdm_checked_in_at": "0001-01-01T00:00:00Z",
            "disk_encryption_enabled": true,
            "batteries": [{"cycle_count": 120, "health": "Good"}],
            "geolocation": {"country_iso": "US", "city_name": "Austin",
                            "geometry": {"type": "Point", "coordinates": [-97.7, 30.2]}},
            "end_users": [{"idp_username": "jdoe", "idp_groups": null}],
            "software": [{"id": 7, "name": "curl", "installed_paths": null}],
            "policies": [{"id": 1, "response": "fail"}],
            "mdm": null
        }}"#;
        let response: GetHostDetailResponse = serde_json::from_str(json).unwrap();
        let host = response.host;
        assert_eq!(host.id, 42);
        assert!(host.last_mdm_checked_in_at.is_none());
        assert_eq!(host.disk_encryption_enabled, Some(true));
        assert_eq!(host.batteries.as_ref().unwrap()[0].cycle_count, Some(120));
        let geo = host.geolocation.as_ref().unwrap();
        assert_eq!(geo.geometry.as_ref().unwrap().coordinates, vec![-97.7, 30.2]);
        assert!(host.end_users.as_ref().unwrap()[0].idp_groups.is_empty());
        assert!(host.software.as_ref().unwrap()[0].installed_paths.is_empty());
        assert!(host.mdm.is_none());

        let row = serde_json::to_value(&host).unwrap();
        assert!(row["mdm"].is_null());
        assert_eq!(row["geolocation"]["geometry"]["type"], "Point");
    }
}
