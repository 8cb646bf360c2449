use fleetdm_client::models::ListPoliciesResponse;

use super::TableDef;
use crate::filter::FilterDef;
use crate::listing::{paged, Listing, PagedListing};
use crate::schema::ColumnDef;

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::int("id", "Unique ID of the policy."),
    ColumnDef::string("name", "Name of the policy."),
    ColumnDef::string("query_text", "osquery query defining the policy.").from_field("query"),
    ColumnDef::string("description", "Description of the policy."),
    ColumnDef::string("platform", "Target platform of the policy, empty for all."),
    ColumnDef::int("team_id", "ID of the team owning the policy. Null for global policies."),
    ColumnDef::int("passing_host_count", "Number of hosts passing the policy."),
    ColumnDef::int("failing_host_count", "Number of hosts failing the policy."),
    ColumnDef::string("resolution", "Resolution steps for failing hosts."),
    ColumnDef::int("author_id", "ID of the user who created the policy."),
    ColumnDef::string("author_name", "Name of the user who created the policy."),
    ColumnDef::string("author_email", "Email of the user who created the policy."),
    ColumnDef::boolean("critical", "Whether the policy is marked critical."),
    ColumnDef::boolean("calendar_events_enabled", "Whether calendar events are enabled."),
    ColumnDef::timestamp("created_at", "Timestamp when the policy was created."),
    ColumnDef::timestamp("updated_at", "Timestamp when the policy was last updated."),
    ColumnDef::string(
        "filter_search_query",
        "Search string matched against policy name or query. Set in WHERE.",
    )
    .qual(),
    ColumnDef::server_url(),
];

pub(super) static TABLE: TableDef = TableDef {
    name: "fleetdm_policy",
    description: "Global policies in FleetDM.",
    columns: COLUMNS,
    filters: &[
        FilterDef::renamed("filter_search_query", "query"),
        FilterDef::new("team_id"),
    ],
    get_by_id: None,
    listing: Listing::Paged(PagedListing::new("global/policies", 50, paged::<ListPoliciesResponse>)),
};
