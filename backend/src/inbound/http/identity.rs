//! Request extractor producing the caller's [`IdentityContext`].
//!
//! The context is derived from the session cookie on every request. A missing,
//! unreadable or tampered session yields an anonymous caller rather than an
//! error, leaving the decision to the intent's access requirement.

use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::identity::IdentityContext;
use crate::inbound::http::session::SessionContext;

impl FromRequest for IdentityContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let session = SessionContext::from_request(req, payload);
        Box::pin(async move {
            let identity = match session.await {
                Ok(session) => session
                    .principal()
                    .map_or_else(IdentityContext::anonymous, IdentityContext::from_principal),
                Err(error) => {
                    warn!(%error, "session unavailable; treating caller as anonymous");
                    IdentityContext::anonymous()
                }
            };
            Ok(identity)
        })
    }
}
