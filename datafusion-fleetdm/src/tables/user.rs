use fleetdm_client::models::ListUsersResponse;

use super::TableDef;
use crate::listing::{paged, Listing, PagedListing};
use crate::schema::ColumnDef;

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::int("id", "Unique ID of the user."),
    ColumnDef::string("name", "Full name of the user."),
    ColumnDef::string("email", "Email address of the user."),
    ColumnDef::string("global_role", "Global role (e.g. admin, maintainer, observer), if any."),
    ColumnDef::boolean("api_only", "Whether the user is API-only."),
    ColumnDef::boolean("sso_enabled", "Whether single sign-on is enabled for the user."),
    ColumnDef::boolean("admin_forced_password_reset", "Whether an admin forced a password reset."),
    ColumnDef::string("gravatar_url", "Gravatar image URL of the user."),
    ColumnDef::timestamp("created_at", "Timestamp when the user was created."),
    ColumnDef::timestamp("updated_at", "Timestamp when the user was last updated."),
    ColumnDef::json("teams", "Teams of the user with the role in each."),
    ColumnDef::server_url(),
];

pub(super) static TABLE: TableDef = TableDef {
    name: "fleetdm_user",
    description: "Users in FleetDM.",
    columns: COLUMNS,
    filters: &[],
    get_by_id: None,
    listing: Listing::Paged(PagedListing::new("users", 50, paged::<ListUsersResponse>)),
};
