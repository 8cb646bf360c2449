use crate::pagination::Envelope;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct User {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// `None` when the user only has team roles.
    #[serde(default)]
    pub global_role: Option<String>,
    #[serde(default)]
    pub api_only: Option<bool>,
    #[serde(default)]
    pub sso_enabled: Option<bool>,
    #[serde(default)]
    pub admin_forced_password_reset: Option<bool>,
    #[serde(default)]
    pub gravatar_url: Option<String>,
    #[serde(default, with = "crate::time::fleet_time")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::time::fleet_time")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub teams: Option<Vec<UserTeam>>,
}

/// Team membership of a user and the role held there.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UserTeam {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListUsersResponse {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub users: Vec<User>,
}

impl Envelope for ListUsersResponse {
    type Record = User;

    fn into_records(self) -> Vec<User> {
        self.users
    }
}
