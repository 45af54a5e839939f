//! In-memory account directory backing the `LoginService` port.
//!
//! Accounts carry a user id and role names; a successful login yields the
//! matching [`Principal`]. Passwords are held in zeroizing buffers and
//! compared in constant time per length.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use zeroize::Zeroizing;

use crate::domain::identity::Principal;
use crate::domain::ports::LoginService;
use crate::domain::{Error, LoginCredentials, UserId};

const INVALID_CREDENTIALS: &str = "invalid credentials";

#[derive(Debug)]
struct Account {
    user_id: UserId,
    password: Zeroizing<String>,
    roles: Vec<String>,
}

/// Login accounts keyed by lower-cased username.
#[derive(Debug, Default)]
pub struct MemoryAccountDirectory {
    accounts: RwLock<HashMap<String, Account>>,
}

impl MemoryAccountDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the account for `username`.
    pub async fn add_account<R, S>(&self, username: &str, password: &str, user_id: UserId, roles: R)
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let account = Account {
            user_id,
            password: Zeroizing::new(password.to_owned()),
            roles: roles.into_iter().map(Into::into).collect(),
        };
        self.accounts
            .write()
            .await
            .insert(username.trim().to_lowercase(), account);
    }
}

#[async_trait]
impl LoginService for MemoryAccountDirectory {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Principal, Error> {
        let accounts = self.accounts.read().await;
        match accounts.get(credentials.username()) {
            Some(account) if credentials.password_matches(&account.password) => Ok(
                Principal::new(account.user_id.clone(), account.roles.iter().cloned()),
            ),
            _ => Err(Error::unauthorized(INVALID_CREDENTIALS)),
        }
    }
}
