use fleetdm_client::models::ListPacksResponse;

use super::TableDef;
use crate::listing::{paged, Listing, PagedListing};
use crate::schema::ColumnDef;

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::int("id", "Unique ID of the pack."),
    ColumnDef::string("name", "Name of the pack."),
    ColumnDef::string("description", "Description of the pack."),
    ColumnDef::string("platform", "Target platforms of the pack, comma separated or empty for all."),
    ColumnDef::boolean("disabled", "Whether the pack is disabled."),
    ColumnDef::string("type", "Type of the pack (e.g. 'global', 'team')."),
    ColumnDef::int("team_id", "ID of the team owning the pack. Null for global packs."),
    ColumnDef::int("target_count", "Number of targets of the pack."),
    ColumnDef::int("total_scheduled_queries_count", "Number of scheduled queries in the pack."),
    ColumnDef::timestamp("created_at", "Timestamp when the pack was created."),
    ColumnDef::timestamp("updated_at", "Timestamp when the pack was last updated."),
    ColumnDef::json("targets", "Target hosts, labels and teams."),
    ColumnDef::json("scheduled_queries", "Scheduled queries of the pack."),
    ColumnDef::json("agent_options", "Agent options of the pack."),
    ColumnDef::json("host_ids", "IDs of the targeted hosts."),
    ColumnDef::json("label_ids", "IDs of the targeted labels."),
    ColumnDef::json("team_ids_targeted", "IDs of the targeted teams.").from_field("team_ids"),
    ColumnDef::server_url(),
];

pub(super) static TABLE: TableDef = TableDef {
    name: "fleetdm_pack",
    description: "Query packs in FleetDM.",
    columns: COLUMNS,
    filters: &[],
    get_by_id: None,
    listing: Listing::Paged(PagedListing::new("packs", 50, paged::<ListPacksResponse>)),
};
