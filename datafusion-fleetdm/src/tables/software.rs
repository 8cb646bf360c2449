use fleetdm_client::models::ListSoftwareResponse;
use fleetdm_client::OrderDirection;

use super::TableDef;
use crate::filter::FilterDef;
use crate::listing::{paged, Listing, PagedListing};
use crate::schema::ColumnDef;

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::int("id", "Unique ID of the software item."),
    ColumnDef::string("name", "Name of the software."),
    ColumnDef::string("version", "Version of the software."),
    ColumnDef::string("source", "Inventory source (e.g. 'apps', 'deb_packages', 'chrome_extensions')."),
    ColumnDef::int("host_count", "Number of hosts with this software installed."),
    ColumnDef::string("generated_cpe", "Generated CPE string of the software."),
    ColumnDef::string("bundle_identifier", "Bundle identifier, for macOS and iOS software."),
    ColumnDef::string("release", "Release, e.g. for RPM packages."),
    ColumnDef::string("vendor", "Vendor, e.g. for RPM packages."),
    ColumnDef::string("arch", "Architecture, e.g. for RPM packages."),
    ColumnDef::string("extension_id", "Extension ID of browser extensions."),
    ColumnDef::string("browser", "Browser of browser extensions."),
    ColumnDef::string("path", "Install path for some software types."),
    ColumnDef::string("installed_path", "Installed path, e.g. for Homebrew packages."),
    ColumnDef::timestamp("last_opened_at", "Timestamp when the software was last opened."),
    ColumnDef::timestamp("counts_updated_at", "Timestamp when host_count was last updated."),
    ColumnDef::json("vulnerabilities", "Vulnerabilities affecting this software."),
    ColumnDef::boolean("vulnerable_only", "Only software with known vulnerabilities. Set in WHERE.").qual(),
    ColumnDef::int("os_id", "Filter by OS ID. Set in WHERE.").qual(),
    ColumnDef::string("os_name", "Filter by OS name. Set in WHERE.").qual(),
    ColumnDef::string("os_version", "Filter by OS version. Set in WHERE.").qual(),
    ColumnDef::int("team_id", "Filter by team ID. Set in WHERE.").qual(),
    ColumnDef::server_url(),
];

pub(super) static TABLE: TableDef = TableDef {
    name: "fleetdm_software",
    description: "Software inventory from FleetDM.",
    columns: COLUMNS,
    filters: &[
        FilterDef::renamed("vulnerable_only", "vulnerable"),
        FilterDef::new("os_id"),
        FilterDef::new("os_name"),
        FilterDef::new("os_version"),
        FilterDef::new("team_id"),
    ],
    get_by_id: None,
    listing: Listing::Paged(
        PagedListing::new("software", 10000, paged::<ListSoftwareResponse>)
            .order_by("id", OrderDirection::Asc),
    ),
};
