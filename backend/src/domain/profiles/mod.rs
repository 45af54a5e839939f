//! Self-service account profiles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::intent::{Access, impl_intent};
use crate::domain::{DisplayName, UserId};

mod service;

pub use service::ProfileService;

/// Contact details attached to a login account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub user_id: UserId,
    pub display_name: DisplayName,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// The caller's own profile.
#[derive(Debug, Clone, Copy, Default)]
pub struct GetMyProfileQuery;

/// Partial update of the caller's own profile.
///
/// Absent fields are left unchanged. A blank `phone` or `bio` clears it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMyProfileCommand {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

impl_intent!(GetMyProfileQuery => Profile, Query, Access::Authenticated);
impl_intent!(UpdateMyProfileCommand => Profile, Command, Access::Authenticated);
