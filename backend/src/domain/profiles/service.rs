//! Profile handlers.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use super::{GetMyProfileQuery, Profile, UpdateMyProfileCommand};
use crate::domain::dispatch::{HandlerResult, IntentHandler, settle};
use crate::domain::identity::IdentityContext;
use crate::domain::ports::{ProfileRepository, ProfileRepositoryError};
use crate::domain::validation::optional_text;
use crate::domain::{DisplayName, Error, UserId};

fn profile_storage_error(error: ProfileRepositoryError) -> Error {
    match error {
        ProfileRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("profile repository unavailable: {message}"))
        }
        ProfileRepositoryError::Query { message } => {
            Error::internal(format!("profile repository error: {message}"))
        }
    }
}

/// Reads and updates the caller's own profile.
pub struct ProfileService<R: ?Sized> {
    profiles: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R: ?Sized> ProfileService<R> {
    pub fn new(profiles: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { profiles, clock }
    }
}

impl<R> ProfileService<R>
where
    R: ProfileRepository + ?Sized,
{
    async fn load(&self, user_id: &UserId) -> Result<Profile, Error> {
        self.profiles
            .find_by_user_id(user_id)
            .await
            .map_err(profile_storage_error)?
            .ok_or_else(|| Error::not_found("No profile exists for this account"))
    }

    async fn update(
        &self,
        command: UpdateMyProfileCommand,
        user_id: &UserId,
    ) -> Result<Profile, Error> {
        let display_name = command
            .display_name
            .map(DisplayName::new)
            .transpose()
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        let mut profile = self.load(user_id).await?;
        if let Some(display_name) = display_name {
            profile.display_name = display_name;
        }
        if let Some(phone) = command.phone {
            profile.phone = optional_text(Some(phone.as_str()));
        }
        if let Some(bio) = command.bio {
            profile.bio = optional_text(Some(bio.as_str()));
        }
        profile.updated_at = self.clock.utc();
        self.profiles
            .save(&profile)
            .await
            .map_err(profile_storage_error)
    }
}

#[async_trait]
impl<R> IntentHandler<GetMyProfileQuery> for ProfileService<R>
where
    R: ProfileRepository + ?Sized + 'static,
{
    async fn handle(
        &self,
        _intent: GetMyProfileQuery,
        identity: &IdentityContext,
    ) -> HandlerResult<Profile> {
        let outcome = match identity.require_user_id() {
            Ok(user_id) => self.load(user_id).await,
            Err(error) => Err(error),
        };
        settle(outcome, "Profile retrieved")
    }
}

#[async_trait]
impl<R> IntentHandler<UpdateMyProfileCommand> for ProfileService<R>
where
    R: ProfileRepository + ?Sized + 'static,
{
    async fn handle(
        &self,
        intent: UpdateMyProfileCommand,
        identity: &IdentityContext,
    ) -> HandlerResult<Profile> {
        let outcome = match identity.require_user_id() {
            Ok(user_id) => self.update(intent, user_id).await,
            Err(error) => Err(error),
        };
        settle(outcome, "Profile updated")
    }
}
