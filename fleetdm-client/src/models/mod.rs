//! Typed Fleet resources and their list envelopes.
//!
//! Optional JSON fields are `Option<T>`: `None` means the server sent `null`
//! or left the key out, never a zero value. Nested structures that only ever
//! end up as JSON text are kept as typed structs where their shape is stable
//! and as [`serde_json::Value`] where it varies.

mod activity;
mod app_store_app;
mod carve;
mod fleet_maintained_app;
mod host;
mod host_detail;
mod label;
mod os_version;
mod pack;
mod policy;
mod query;
mod software;
mod software_title;
mod software_version;
mod team;
mod user;

pub use activity::{Activity, ListActivitiesResponse};
pub use app_store_app::{AppStoreApp, AppStoreAppWithTeam, ListAppStoreAppsResponse};
pub use carve::{Carve, ListCarvesResponse};
pub use fleet_maintained_app::{FleetMaintainedApp, ListFleetMaintainedAppsResponse};
pub use host::{GetHostResponse, Host, HostIssues, HostMdm, ListHostsResponse};
pub use host_detail::{
    GetHostDetailResponse, HostBattery, HostDetail, HostEndUser, HostGeolocation, HostGeometry,
    HostMaintenanceWindow, HostMdmDetail, HostOtherEmail, HostSoftware,
};
pub use label::{Label, ListLabelsResponse};
pub use os_version::{ListOsVersionsResponse, OsVersion, OsVersionVulnerability};
pub use pack::{ListPacksResponse, Pack, ScheduledQuery};
pub use policy::{ListPoliciesResponse, Policy};
pub use query::{ListQueriesResponse, QueryPack, SavedQuery};
pub use software::{ListSoftwareResponse, Software, SoftwareVulnerability};
pub use software_title::{ListSoftwareTitlesResponse, SoftwareTitle, SoftwareTitleVersion};
pub use software_version::{ListSoftwareVersionsResponse, SoftwareVersion};
pub use team::{ListTeamsResponse, Team, TeamSecret, TeamUser};
pub use user::{ListUsersResponse, User, UserTeam};

use serde::{Deserialize, Deserializer};

/// Treat an explicit JSON `null` like a missing key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
