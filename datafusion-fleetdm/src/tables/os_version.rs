use fleetdm_client::models::ListOsVersionsResponse;
use fleetdm_client::OrderDirection;

use super::TableDef;
use crate::filter::FilterDef;
use crate::listing::{paged, Listing, PagedListing};
use crate::schema::ColumnDef;

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::int("os_version_id", "Unique ID of the OS version."),
    ColumnDef::int("hosts_count", "Number of hosts running this OS version."),
    ColumnDef::string("name", "Full name of the OS version (e.g. 'macOS 14.1')."),
    ColumnDef::string("name_only", "OS name without the version (e.g. 'macOS')."),
    ColumnDef::string("version", "Version string of the OS (e.g. '14.1')."),
    ColumnDef::string("platform", "Platform of the OS (e.g. 'darwin', 'windows', 'ubuntu')."),
    ColumnDef::json("generated_cpes", "Generated CPE strings for the OS."),
    ColumnDef::json("vulnerabilities", "Vulnerabilities affecting this OS version."),
    ColumnDef::int("vulnerabilities_count", "Number of known vulnerabilities."),
    ColumnDef::int("team_id", "Filter by team ID. Set in WHERE.").qual(),
    ColumnDef::string("os_name", "Filter by OS name, together with os_version_filter. Set in WHERE.").qual(),
    ColumnDef::string(
        "os_version_filter",
        "Filter by OS version, together with os_name. Set in WHERE.",
    )
    .qual(),
];

pub(super) static TABLE: TableDef = TableDef {
    name: "fleetdm_os_version",
    description: "Operating system versions across managed hosts, with vulnerabilities.",
    columns: COLUMNS,
    filters: &[
        FilterDef::new("team_id"),
        FilterDef::new("platform"),
        FilterDef::new("os_name"),
        FilterDef::renamed("os_version_filter", "os_version"),
    ],
    get_by_id: None,
    listing: Listing::Paged(
        PagedListing::new("os_versions", 10000, paged::<ListOsVersionsResponse>)
            .order_by("hosts_count", OrderDirection::Desc),
    ),
};
