use fleetdm_client::models::ListSoftwareTitlesResponse;
use fleetdm_client::OrderDirection;

use super::{require_vulnerable, TableDef};
use crate::filter::FilterDef;
use crate::listing::{paged, Listing, PagedListing};
use crate::schema::ColumnDef;

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::int("id", "Unique ID of the software title."),
    ColumnDef::string("name", "Name of the software title."),
    ColumnDef::string("display_name", "Display name of the software title."),
    ColumnDef::string("icon_url", "URL of the software icon."),
    ColumnDef::string("source", "Inventory source (e.g. 'apps', 'deb_packages', 'chrome_extensions')."),
    ColumnDef::string("extension_for", "Application a browser extension belongs to."),
    ColumnDef::string("browser", "Browser of browser extensions."),
    ColumnDef::int("hosts_count", "Number of hosts with this title installed."),
    ColumnDef::int("versions_count", "Number of distinct versions of this title."),
    ColumnDef::string("bundle_identifier", "Bundle identifier, for macOS and iOS software."),
    ColumnDef::json("versions", "Versions of the title with their vulnerabilities."),
    ColumnDef::json("software_package", "Installer package, when added for install."),
    ColumnDef::json("app_store_app", "App Store app, when the title comes from an app store."),
    ColumnDef::boolean("vulnerable_only", "Only titles with known vulnerabilities. Set in WHERE.").qual(),
    ColumnDef::int("team_id", "Filter by team ID, 0 for 'No team'. Set in WHERE.").qual(),
    ColumnDef::boolean("available_for_install", "Only software available for install. Set in WHERE.").qual(),
    ColumnDef::string("query", "Search keywords matched against title and CVE. Set in WHERE.").qual(),
    ColumnDef::boolean("self_service", "Only self-service software. Set in WHERE.").qual(),
    ColumnDef::boolean("packages_only", "Only install packages, no app store apps. Set in WHERE.").qual(),
    ColumnDef::int("min_cvss_score", "Minimum CVSS v3 base score of a vulnerability. Set in WHERE.").qual(),
    ColumnDef::int("max_cvss_score", "Maximum CVSS v3 base score of a vulnerability. Set in WHERE.").qual(),
    ColumnDef::boolean("exploit", "Only vulnerabilities exploited in the wild. Set in WHERE.").qual(),
    ColumnDef::string(
        "platform",
        "Installable titles for a platform (e.g. 'darwin', 'windows', 'ios'); needs team_id. Set in WHERE.",
    )
    .qual(),
    ColumnDef::boolean(
        "exclude_fleet_maintained_apps",
        "Leave Fleet-maintained apps out. Set in WHERE.",
    )
    .qual(),
];

pub(super) static TABLE: TableDef = TableDef {
    name: "fleetdm_software_title",
    description: "Software titles, each grouping the versions of one piece of software.",
    columns: COLUMNS,
    filters: &[
        FilterDef::renamed("vulnerable_only", "vulnerable"),
        FilterDef::new("team_id"),
        FilterDef::new("available_for_install"),
        FilterDef::new("query"),
        FilterDef::new("self_service"),
        FilterDef::new("packages_only"),
        FilterDef::new("min_cvss_score"),
        FilterDef::new("max_cvss_score"),
        FilterDef::new("exploit"),
        FilterDef::new("platform"),
        FilterDef::new("exclude_fleet_maintained_apps"),
    ],
    get_by_id: None,
    listing: Listing::Paged(
        PagedListing::new("software/titles", 10000, paged::<ListSoftwareTitlesResponse>)
            .order_by("hosts_count", OrderDirection::Desc)
            .params_hook(require_vulnerable),
    ),
};
