use fleetdm_client::models::ListQueriesResponse;

use super::TableDef;
use crate::filter::FilterDef;
use crate::listing::{paged, Listing, PagedListing};
use crate::schema::ColumnDef;

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::int("id", "Unique ID of the saved query."),
    ColumnDef::string("name", "Name of the saved query."),
    ColumnDef::string("query_sql", "SQL of the saved query.").from_field("query"),
    ColumnDef::string("description", "Description of the saved query."),
    ColumnDef::int("team_id", "ID of the team owning the query. Null for global queries."),
    ColumnDef::int("author_id", "ID of the user who created the query."),
    ColumnDef::string("author_name", "Name of the user who created the query."),
    ColumnDef::string("author_email", "Email of the user who created the query."),
    ColumnDef::boolean("observer_can_run", "Whether observers may run the query."),
    ColumnDef::boolean("automations_enabled", "Whether scheduling is enabled for the query."),
    ColumnDef::int("interval", "Schedule interval in seconds. Null when not scheduled."),
    ColumnDef::string("platform", "Target platforms, comma separated or empty for all."),
    ColumnDef::string("min_osquery_version", "Minimum osquery version required."),
    ColumnDef::string("logging_type", "Result logging type (e.g. snapshot, differential).")
        .from_field("logging"),
    ColumnDef::json("stats", "Execution statistics of the query."),
    ColumnDef::json("packs", "Packs the query belongs to."),
    ColumnDef::timestamp("created_at", "Timestamp when the query was created."),
    ColumnDef::timestamp("updated_at", "Timestamp when the query was last updated."),
    ColumnDef::string(
        "query_text_filter",
        "Search string matched against query name or SQL. Set in WHERE.",
    )
    .qual(),
    ColumnDef::server_url(),
];

pub(super) static TABLE: TableDef = TableDef {
    name: "fleetdm_query",
    description: "Saved queries in FleetDM.",
    columns: COLUMNS,
    filters: &[
        FilterDef::renamed("query_text_filter", "query"),
        FilterDef::new("team_id"),
    ],
    get_by_id: None,
    listing: Listing::Paged(PagedListing::new("queries", 50, paged::<ListQueriesResponse>)),
};
