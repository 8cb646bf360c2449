use crate::pagination::Envelope;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Host as returned by `GET /hosts`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Host {
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
    pub seen_time: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::time::fleet_time")]
    pub last_restarted_at: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::time::fleet_time")]
    pub refetch_critical_queries_until: Option<DateTime<Utc>>,
    #[serde(default)]
    pub refetch_requested: Option<bool>,
    #[serde(default)]
    pub osquery_host_id: Option<String>,
    #[serde(default)]
    pub node_key: Option<String>,
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub display_text: Option<String>,
    #[serde(default)]
    pub computer_name: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub platform_like: Option<String>,
    #[serde(default)]
    pub os_version: Option<String>,
    #[serde(default)]
    pub build: Option<String>,
    #[serde(default)]
    pub code_name: Option<String>,
    /// Nanoseconds.
    #[serde(default)]
    pub uptime: Option<i64>,
    /// Bytes.
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
    pub primary_ip: Option<String>,
    #[serde(default)]
    pub primary_mac: Option<String>,
    #[serde(default)]
    pub public_ip: Option<String>,
    #[serde(default)]
    pub orbit_version: Option<String>,
    #[serde(default)]
    pub fleet_desktop_version: Option<String>,
    #[serde(default)]
    pub scripts_enabled: Option<bool>,
    #[serde(default)]
    pub osquery_version: Option<String>,
    #[serde(default)]
    pub team_id: Option<u64>,
    #[serde(default)]
    pub team_name: Option<String>,
    #[serde(default)]
    pub distributed_interval: Option<i64>,
    #[serde(default)]
    pub config_tls_refresh: Option<i64>,
    #[serde(default)]
    pub logger_tls_period: Option<i64>,
    #[serde(default)]
    pub pack_stats: Option<serde_json::Value>,
    #[serde(default)]
    pub gigs_disk_space_available: Option<f64>,
    #[serde(default)]
    pub percent_disk_space_available: Option<f64>,
    #[serde(default)]
    pub gigs_total_disk_space: Option<f64>,
    /// `online`, `offline`, `mia` or `new`.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub issues: Option<HostIssues>,
    #[serde(default)]
    pub mdm: Option<HostMdm>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct HostIssues {
    #[serde(default)]
    pub failing_policies_count: i64,
    #[serde(default)]
    pub critical_vulnerabilities_count: Option<i64>,
    #[serde(default)]
    pub total_issues_count: i64,
}

/// MDM summary carried on the host list.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HostMdm {
    #[serde(default)]
    pub enrollment_status: Option<String>,
    #[serde(default)]
    pub dep_profile_error: Option<bool>,
    #[serde(default)]
    pub server_url: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub encryption_key_available: Option<bool>,
    #[serde(default)]
    pub connected_to_fleet: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct ListHostsResponse {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub hosts: Vec<Host>,
}

impl Envelope for ListHostsResponse {
    type Record = Host;

    fn into_records(self) -> Vec<Host> {
        self.hosts
    }
}

/// `GET /hosts/{id}` decoded as the list shape.
#[derive(Debug, Deserialize)]
pub struct GetHostResponse {
    pub host: Host,
}

impl Envelope for GetHostResponse {
    type Record = Host;

    fn into_records(self) -> Vec<Host> {
        vec![self.host]
    }
}
