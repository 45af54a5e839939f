//! Port abstraction for profile storage adapters and their errors.

use async_trait::async_trait;

use crate::domain::UserId;
use crate::domain::profiles::Profile;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by profile repository adapters.
    pub enum ProfileRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "profile repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "profile repository query failed: {message}",
    }
}

/// Storage for account profiles keyed by user id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Fetch the profile owned by `user_id`.
    async fn find_by_user_id(&self, user_id: &UserId)
    -> Result<Option<Profile>, ProfileRepositoryError>;

    /// Insert or replace a profile.
    async fn save(&self, profile: &Profile) -> Result<Profile, ProfileRepositoryError>;
}
