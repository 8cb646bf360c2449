use fleetdm_client::models::ListTeamsResponse;

use super::TableDef;
use crate::filter::FilterDef;
use crate::listing::{paged, Listing, PagedListing};
use crate::schema::ColumnDef;

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::int("id", "Unique ID of the team."),
    ColumnDef::string("name", "Name of the team."),
    ColumnDef::string("description", "Description of the team."),
    ColumnDef::int("user_count", "Number of users in the team."),
    ColumnDef::int("host_count", "Number of hosts assigned to the team."),
    ColumnDef::timestamp("created_at", "Timestamp when the team was created."),
    ColumnDef::json("agent_options", "Agent options configured for the team."),
    ColumnDef::json("secrets", "Enrollment secrets of the team."),
    ColumnDef::json("users", "Users of the team and their roles."),
    ColumnDef::string("query", "Search keywords matched against the team name. Set in WHERE.").qual(),
];

pub(super) static TABLE: TableDef = TableDef {
    name: "fleetdm_team",
    description: "Teams in FleetDM.",
    columns: COLUMNS,
    filters: &[FilterDef::new("query")],
    get_by_id: None,
    listing: Listing::Paged(PagedListing::new("teams", 10000, paged::<ListTeamsResponse>)),
};
