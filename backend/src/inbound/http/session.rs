//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Wraps the Actix cookie session so handlers only persist, read, or purge
//! the authenticated [`Principal`].

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::identity::Principal;
use crate::domain::{Error, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const ROLES_KEY: &str = "roles";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated principal in the session cookie.
    pub fn persist_principal(&self, principal: &Principal) -> Result<(), Error> {
        let roles: Vec<&str> = principal.roles().collect();
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, principal.user_id().as_ref())
            .and_then(|()| self.0.insert(ROLES_KEY, roles))
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Principal stored in the session, if any.
    ///
    /// Unreadable or tampered entries yield `None` so the caller is treated as
    /// anonymous.
    pub fn principal(&self) -> Option<Principal> {
        let user_id = match self.0.get::<String>(USER_ID_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(error) => {
                warn!(%error, "unreadable user id in session cookie");
                return None;
            }
        };
        let user_id = match UserId::new(user_id) {
            Ok(id) => id,
            Err(error) => {
                warn!(%error, "invalid user id in session cookie");
                return None;
            }
        };
        match self.0.get::<Vec<String>>(ROLES_KEY) {
            Ok(roles) => Some(Principal::new(user_id, roles.unwrap_or_default())),
            Err(error) => {
                warn!(%error, "unreadable roles in session cookie");
                None
            }
        }
    }

    /// Forget the authenticated principal.
    pub fn purge(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
