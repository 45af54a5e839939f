//! Driving port for login/authentication use-cases.
//!
//! Inbound adapters call it to turn submitted credentials into a
//! [`Principal`] without knowing where accounts are stored. HTTP handler
//! tests substitute a mock instead of wiring an account directory.

use async_trait::async_trait;

use crate::domain::identity::Principal;
use crate::domain::{Error, LoginCredentials};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated principal.
    ///
    /// Unknown accounts and wrong passwords both yield `unauthorized` with
    /// the same message.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Principal, Error>;
}
