use fleetdm_client::models::ListCarvesResponse;
use fleetdm_client::OrderDirection;

use super::TableDef;
use crate::listing::{paged, Listing, PagedListing};
use crate::schema::ColumnDef;

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::int("id", "Unique ID of the carve session."),
    ColumnDef::string("name", "Name of the carve session, typically hostname and timestamp."),
    ColumnDef::int("host_id", "ID of the host the file was carved from."),
    ColumnDef::string("carve_id", "Unique identifier of the carve data."),
    ColumnDef::string("session_id", "osquery session ID of the carve."),
    ColumnDef::string("request_id", "Request ID, often from a distributed query."),
    ColumnDef::int("carve_size", "Total size of the carved file in bytes."),
    ColumnDef::int("block_count", "Number of blocks received for the carve."),
    ColumnDef::int("block_size", "Maximum size of each block in bytes."),
    ColumnDef::int("max_block", "Index of the last block received."),
    ColumnDef::boolean("expired", "Whether the carve session has expired."),
    ColumnDef::string("error", "Error message of the carve session, if any."),
    ColumnDef::timestamp("created_at", "Timestamp when the carve session was created."),
    ColumnDef::server_url(),
];

// expired=true so finished sessions are listed as well.
pub(super) static TABLE: TableDef = TableDef {
    name: "fleetdm_carve",
    description: "File carving sessions in FleetDM.",
    columns: COLUMNS,
    filters: &[],
    get_by_id: None,
    listing: Listing::Paged(
        PagedListing::new("carves", 50, paged::<ListCarvesResponse>)
            .order_by("id", OrderDirection::Desc)
            .fixed_params(&[("expired", "true")]),
    ),
};
