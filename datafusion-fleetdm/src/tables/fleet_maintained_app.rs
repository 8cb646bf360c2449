use fleetdm_client::models::ListFleetMaintainedAppsResponse;

use super::TableDef;
use crate::filter::FilterDef;
use crate::listing::{paged, Listing, PagedListing};
use crate::schema::ColumnDef;

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::int("id", "Unique ID of the Fleet-maintained app."),
    ColumnDef::string("name", "Name of the app."),
    ColumnDef::string("slug", "Slug identifier of the app (e.g. '1password/darwin')."),
    ColumnDef::string("platform", "Platform for the app (e.g. 'darwin', 'windows')."),
    ColumnDef::string("version", "Latest available version of the app."),
    ColumnDef::int(
        "software_title_id",
        "Software title ID when the app has been added to the filtered team.",
    ),
    ColumnDef::json("categories", "Categories the app belongs to."),
    ColumnDef::int(
        "team_id",
        "Filter by team ID; apps then carry software_title_id when already added. Set in WHERE.",
    )
    .qual(),
];

pub(super) static TABLE: TableDef = TableDef {
    name: "fleetdm_fleet_maintained_app",
    description: "Installers packaged and maintained by Fleet.",
    columns: COLUMNS,
    filters: &[FilterDef::new("team_id")],
    get_by_id: None,
    listing: Listing::Paged(PagedListing::new(
        "software/fleet_maintained_apps",
        10000,
        paged::<ListFleetMaintainedAppsResponse>,
    )),
};
