use super::TableDef;
use crate::filter::FilterDef;
use crate::listing::Listing;
use crate::schema::ColumnDef;

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::string("app_store_id", "The Apple App Store ID of the app."),
    ColumnDef::string("name", "Name of the app."),
    ColumnDef::string("display_name", "Display name override for the app, if set."),
    ColumnDef::string("icon_url", "URL of the app icon."),
    ColumnDef::string("platform", "Platform for the app (e.g. 'darwin', 'ios', 'ipados')."),
    ColumnDef::string("latest_version", "Latest available version of the app."),
    ColumnDef::string("bundle_identifier", "Bundle identifier of the app."),
    ColumnDef::boolean("self_service", "Whether the app is available as self-service."),
    ColumnDef::json("categories", "Categories the app belongs to."),
    ColumnDef::json("labels_include_any", "Labels to include for targeting."),
    ColumnDef::json("labels_exclude_any", "Labels to exclude for targeting."),
    ColumnDef::timestamp("created_at", "Timestamp when the app was added."),
    ColumnDef::int(
        "team_id",
        "The team this app was listed for. Set in WHERE to query a single team.",
    ),
    ColumnDef::string(
        "team_name",
        "Name of the team this app was listed for. Null when team_id came from WHERE.",
    ),
];

/// Listed per team: the endpoint requires `team_id`, so without one every
/// team is discovered first.
pub(super) static TABLE: TableDef = TableDef {
    name: "fleetdm_app_store_app",
    description: "Apple App Store (VPP) apps available for install, per team.",
    columns: COLUMNS,
    filters: &[FilterDef::new("team_id")],
    get_by_id: None,
    listing: Listing::AppStoreByTeam,
};
