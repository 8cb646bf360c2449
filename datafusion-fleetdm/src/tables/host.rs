use fleetdm_client::models::{GetHostResponse, ListHostsResponse};

use super::TableDef;
use crate::filter::FilterDef;
use crate::listing::{get_one, paged, GetById, Listing, PagedListing};
use crate::schema::ColumnDef;

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::int("id", "Unique ID of the host."),
    ColumnDef::string("hostname", "Hostname of the host."),
    ColumnDef::string("uuid", "Unique UUID of the host."),
    ColumnDef::string("display_name", "Display name of the host."),
    ColumnDef::string("display_text", "Display text of the host, often the hostname."),
    ColumnDef::string("computer_name", "Computer name of the host."),
    ColumnDef::string("osquery_host_id", "osquery host identifier."),
    ColumnDef::string("node_key", "Node key of the host."),
    ColumnDef::string("status", "Current status of the host (online, offline, mia, new)."),
    ColumnDef::timestamp("seen_time", "Timestamp when the host was last seen by Fleet."),
    ColumnDef::timestamp("created_at", "Timestamp when the host was created in Fleet."),
    ColumnDef::timestamp("updated_at", "Timestamp when the host record was last updated."),
    ColumnDef::timestamp("software_updated_at", "Timestamp when the software inventory was last updated."),
    ColumnDef::timestamp("detail_updated_at", "Timestamp when the host details were last updated."),
    ColumnDef::timestamp("label_updated_at", "Timestamp when the host labels were last updated."),
    ColumnDef::timestamp("policy_updated_at", "Timestamp when the policy status was last updated."),
    ColumnDef::timestamp("last_enrolled_at", "Timestamp when the host last enrolled."),
    ColumnDef::timestamp("last_restarted_at", "Timestamp of the last restart."),
    ColumnDef::boolean("refetch_requested", "Whether a refetch of host details has been requested."),
    ColumnDef::timestamp(
        "refetch_critical_queries_until",
        "Timestamp until which critical queries are refetched.",
    ),
    ColumnDef::string("platform", "Platform of the host (e.g. 'darwin', 'windows', 'linux')."),
    ColumnDef::string("platform_like", "Platform family (e.g. 'darwin')."),
    ColumnDef::string("os_version", "Operating system version."),
    ColumnDef::string("build", "Operating system build."),
    ColumnDef::string("code_name", "Operating system code name."),
    ColumnDef::string("osquery_version", "Version of osquery on the host."),
    ColumnDef::string("orbit_version", "Version of Orbit on the host."),
    ColumnDef::string("fleet_desktop_version", "Version of Fleet Desktop on the host."),
    ColumnDef::boolean("scripts_enabled", "Whether Fleet may run scripts on the host."),
    ColumnDef::int("uptime", "Uptime in nanoseconds."),
    ColumnDef::int("memory", "Physical memory in bytes."),
    ColumnDef::string("cpu_type", "CPU type."),
    ColumnDef::string("cpu_subtype", "CPU subtype."),
    ColumnDef::string("cpu_brand", "CPU brand string."),
    ColumnDef::int("cpu_physical_cores", "Number of physical CPU cores."),
    ColumnDef::int("cpu_logical_cores", "Number of logical CPU cores."),
    ColumnDef::string("hardware_vendor", "Hardware vendor."),
    ColumnDef::string("hardware_model", "Hardware model."),
    ColumnDef::string("hardware_version", "Hardware version."),
    ColumnDef::string("hardware_serial", "Hardware serial number."),
    ColumnDef::string("primary_ip", "Primary IP address."),
    ColumnDef::string("primary_mac", "Primary MAC address."),
    ColumnDef::string("public_ip", "Public IP address."),
    ColumnDef::int("team_id", "ID of the team the host belongs to, if any."),
    ColumnDef::string("team_name", "Name of the team the host belongs to, if any."),
    ColumnDef::int("distributed_interval", "Distributed query interval."),
    ColumnDef::int("config_tls_refresh", "Config TLS refresh interval."),
    ColumnDef::int("logger_tls_period", "Logger TLS period."),
    ColumnDef::json("pack_stats", "Query pack statistics for the host."),
    ColumnDef::float("gigs_disk_space_available", "Available disk space in gigabytes."),
    ColumnDef::float("percent_disk_space_available", "Available disk space in percent."),
    ColumnDef::float("gigs_total_disk_space", "Total disk space in gigabytes."),
    ColumnDef::json("issues", "Issue summary (failing policies, vulnerabilities)."),
    ColumnDef::json("mdm", "MDM information of the host."),
    ColumnDef::server_url(),
];

pub(super) static TABLE: TableDef = TableDef {
    name: "fleetdm_host",
    description: "Hosts managed by FleetDM.",
    columns: COLUMNS,
    filters: &[FilterDef::new("team_id"), FilterDef::new("status")],
    get_by_id: Some(GetById::new("id", "hosts", get_one::<GetHostResponse>)),
    listing: Listing::Paged(PagedListing::new("hosts", 100, paged::<ListHostsResponse>)),
};
