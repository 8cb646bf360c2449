use fleetdm_client::models::ListActivitiesResponse;
use fleetdm_client::OrderDirection;

use super::TableDef;
use crate::filter::FilterDef;
use crate::listing::{paged, Listing, PagedListing};
use crate::schema::ColumnDef;

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::int("id", "Unique ID of the activity."),
    ColumnDef::timestamp("created_at", "Timestamp when the activity occurred."),
    ColumnDef::string("actor_full_name", "Full name of the actor who performed the activity."),
    ColumnDef::int("actor_id", "ID of the actor (user). Null for system activities."),
    ColumnDef::string("actor_email", "Email of the actor."),
    ColumnDef::string("actor_gravatar", "Gravatar URL for the actor."),
    ColumnDef::string("type", "Type of activity (e.g. 'created_user', 'ran_live_query')."),
    ColumnDef::json("details", "Details specific to the activity type."),
    ColumnDef::int("host_id", "ID of the host related to this activity, if any."),
    ColumnDef::string("host_display_name", "Display name of the host related to this activity, if any."),
];

pub(super) static TABLE: TableDef = TableDef {
    name: "fleetdm_activity",
    description: "Audit log activities in FleetDM.",
    columns: COLUMNS,
    filters: &[FilterDef::new("type")],
    get_by_id: None,
    listing: Listing::Paged(
        PagedListing::new("activities", 50, paged::<ListActivitiesResponse>)
            .order_by("id", OrderDirection::Asc),
    ),
};
