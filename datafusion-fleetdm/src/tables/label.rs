use fleetdm_client::models::ListLabelsResponse;

use super::TableDef;
use crate::listing::{paged, Listing, PagedListing};
use crate::schema::ColumnDef;

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::int("id", "Unique ID of the label."),
    ColumnDef::string("name", "Name of the label."),
    ColumnDef::string("display_text", "Display text of the label, usually its name."),
    ColumnDef::string("description", "Description of the label."),
    ColumnDef::string("query_sql", "SQL query used for dynamic membership.").from_field("query"),
    ColumnDef::string("platform", "Target platform of the label, empty for all."),
    ColumnDef::string("label_type", "Type of the label (e.g. 'regular', 'builtin')."),
    ColumnDef::string("label_membership_type", "Membership type (e.g. 'dynamic', 'manual')."),
    ColumnDef::int("host_count", "Number of hosts with this label."),
    ColumnDef::boolean("built_in", "Whether the label is built in."),
    ColumnDef::timestamp("created_at", "Timestamp when the label was created."),
    ColumnDef::timestamp("updated_at", "Timestamp when the label was last updated."),
    ColumnDef::server_url(),
];

pub(super) static TABLE: TableDef = TableDef {
    name: "fleetdm_label",
    description: "Labels grouping hosts in FleetDM.",
    columns: COLUMNS,
    filters: &[],
    get_by_id: None,
    listing: Listing::Paged(PagedListing::new("labels", 50, paged::<ListLabelsResponse>)),
};
