use fleetdm_client::models::ListSoftwareVersionsResponse;
use fleetdm_client::OrderDirection;

use super::{require_vulnerable, TableDef};
use crate::filter::FilterDef;
use crate::listing::{paged, Listing, PagedListing};
use crate::schema::ColumnDef;

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::int("id", "Unique ID of the software version."),
    ColumnDef::string("name", "Name of the software."),
    ColumnDef::string("version", "Version of the software."),
    ColumnDef::string("source", "Inventory source (e.g. 'apps', 'deb_packages', 'chrome_extensions')."),
    ColumnDef::int("host_count", "Number of hosts with this version installed.").from_field("hosts_count"),
    ColumnDef::string("generated_cpe", "Generated CPE string of the software."),
    ColumnDef::string("bundle_identifier", "Bundle identifier, for macOS and iOS software."),
    ColumnDef::string("upgrade_code", "Windows installer upgrade code."),
    ColumnDef::string("display_name", "Display name of the software."),
    ColumnDef::string("extension_for", "Application a browser extension belongs to."),
    ColumnDef::string("release", "Release, e.g. for RPM packages."),
    ColumnDef::string("vendor", "Vendor, e.g. for RPM packages."),
    ColumnDef::string("arch", "Architecture, e.g. for RPM packages."),
    ColumnDef::string("extension_id", "Extension ID of browser extensions."),
    ColumnDef::string("browser", "Browser of browser extensions."),
    ColumnDef::timestamp("last_opened_at", "Timestamp when the software was last opened."),
    ColumnDef::json("vulnerabilities", "Vulnerabilities affecting this version."),
    ColumnDef::boolean("vulnerable_only", "Only versions with known vulnerabilities. Set in WHERE.").qual(),
    ColumnDef::int("team_id", "Filter by team ID, 0 for 'No team'. Set in WHERE.").qual(),
    ColumnDef::string("query", "Search keywords matched against name, version and CVE. Set in WHERE.").qual(),
    ColumnDef::int("min_cvss_score", "Minimum CVSS v3 base score of a vulnerability. Set in WHERE.").qual(),
    ColumnDef::int("max_cvss_score", "Maximum CVSS v3 base score of a vulnerability. Set in WHERE.").qual(),
    ColumnDef::boolean("exploit", "Only vulnerabilities exploited in the wild. Set in WHERE.").qual(),
];

pub(super) static TABLE: TableDef = TableDef {
    name: "fleetdm_software_version",
    description: "Software versions inventory from FleetDM.",
    columns: COLUMNS,
    filters: &[
        FilterDef::renamed("vulnerable_only", "vulnerable"),
        FilterDef::new("team_id"),
        FilterDef::new("query"),
        FilterDef::new("min_cvss_score"),
        FilterDef::new("max_cvss_score"),
        FilterDef::new("exploit"),
    ],
    get_by_id: None,
    listing: Listing::Paged(
        PagedListing::new("software/versions", 10000, paged::<ListSoftwareVersionsResponse>)
            .order_by("id", OrderDirection::Asc)
            .params_hook(require_vulnerable),
    ),
};
