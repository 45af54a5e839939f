//! Handler contract implemented once per intent.

use async_trait::async_trait;

use crate::domain::identity::IdentityContext;
use crate::domain::intent::Intent;
use crate::domain::{Envelope, Error};

/// Result of handling an intent.
///
/// `Ok` carries every expected outcome, successful or not; `Err` is reserved
/// for faults such as unavailable storage.
pub type HandlerResult<T> = Result<Envelope<T>, Error>;

/// Performs the business operation behind one intent type.
///
/// A service may implement this trait for several intents, but each
/// implementation covers exactly one intent-to-result mapping. The identity is
/// borrowed for the duration of the call only.
#[async_trait]
pub trait IntentHandler<I: Intent>: Send + Sync {
    /// Handle `intent` on behalf of `identity`.
    async fn handle(&self, intent: I, identity: &IdentityContext) -> HandlerResult<I::Output>;
}

/// Fold an internal outcome into the envelope contract.
///
/// Expected errors (validation, not found, conflict, authorisation) become
/// failure envelopes; faults are returned as `Err` so the boundary can log
/// them and answer with a redacted 5xx.
///
/// # Examples
/// ```
/// use school_backend::domain::dispatch::settle;
/// use school_backend::domain::Error;
///
/// let envelope = settle::<u8>(Err(Error::conflict("already enrolled")), "unused")
///     .expect("conflicts are expected outcomes");
/// assert_eq!(envelope.status_code(), 409);
///
/// assert!(settle::<u8>(Err(Error::internal("disk on fire")), "unused").is_err());
/// ```
pub fn settle<T>(outcome: Result<T, Error>, message: &str) -> HandlerResult<T> {
    match outcome {
        Ok(data) => Ok(Envelope::ok(data, message)),
        Err(error) if error.code().is_expected() => Ok(Envelope::from_error(&error)),
        Err(error) => Err(error),
    }
}
