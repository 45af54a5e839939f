//! Type-keyed routing of intents to their handlers.
//!
//! The registration table is built once at startup through a
//! [`RegistryBuilder`] and then frozen inside a [`Dispatcher`]. Dispatch
//! looks the handler up by the exact Rust type of the intent, so the
//! envelope's payload type is known at compile time and no runtime casting
//! leaks to callers.
//!
//! The dispatcher never authorises, never retries and never rewrites the
//! envelope a handler returns. Dropping the future returned by
//! [`Dispatcher::dispatch`] drops the in-flight handler future with it, which
//! is how callers cancel work.

mod handler;
mod registry;

use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, error};

use crate::domain::identity::IdentityContext;
use crate::domain::intent::Intent;
use crate::domain::{Envelope, Error};

pub use handler::{HandlerResult, IntentHandler, settle};
pub use registry::{RegistrationError, RegistryBuilder};

use registry::Registration;

/// Failures raised by the dispatcher itself rather than by a handler's
/// business logic.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// No handler was registered for the intent type.
    #[error("no handler registered for intent {intent}")]
    NoHandlerRegistered { intent: &'static str },
    /// The handler hit an unexpected fault.
    #[error("handler for {intent} failed: {source}")]
    Handler {
        intent: &'static str,
        #[source]
        source: Error,
    },
}

impl DispatchError {
    /// Name of the intent that failed to dispatch.
    pub fn intent(&self) -> &'static str {
        match self {
            Self::NoHandlerRegistered { intent } | Self::Handler { intent, .. } => intent,
        }
    }
}

impl From<DispatchError> for Error {
    fn from(value: DispatchError) -> Self {
        match value {
            DispatchError::NoHandlerRegistered { .. } => Error::internal(value.to_string()),
            DispatchError::Handler { source, .. } => source,
        }
    }
}

/// Routes intents to the handler registered for their exact type.
///
/// Cloning is cheap; every clone shares the same frozen table.
#[derive(Clone)]
pub struct Dispatcher {
    table: Arc<HashMap<TypeId, Registration>>,
}

impl Dispatcher {
    /// Start building a registration table.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    fn from_table(table: HashMap<TypeId, Registration>) -> Self {
        Self {
            table: Arc::new(table),
        }
    }

    /// Whether a handler is registered for intent type `I`.
    pub fn handles<I: Intent>(&self) -> bool {
        self.table.contains_key(&TypeId::of::<I>())
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Names of all registered intents in alphabetical order.
    pub fn registered_intents(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.table.values().map(|entry| entry.name).collect();
        names.sort_unstable();
        names
    }

    /// Route `intent` to its handler and return the handler's envelope
    /// unmodified.
    ///
    /// # Errors
    /// [`DispatchError::NoHandlerRegistered`] when the table has no entry for
    /// `I`; [`DispatchError::Handler`] when the handler reports a fault.
    pub async fn dispatch<I: Intent>(
        &self,
        intent: I,
        identity: &IdentityContext,
    ) -> Result<Envelope<I::Output>, DispatchError> {
        let handler = self.resolve::<I>()?;
        debug!(intent = I::NAME, kind = %I::KIND, "dispatching intent");
        let envelope = handler
            .handle(intent, identity)
            .await
            .map_err(|source| DispatchError::Handler {
                intent: I::NAME,
                source,
            })?;
        debug!(
            intent = I::NAME,
            status = envelope.status_code(),
            success = envelope.is_success(),
            "intent handled"
        );
        Ok(envelope)
    }

    fn resolve<I: Intent>(&self) -> Result<Arc<dyn IntentHandler<I>>, DispatchError> {
        self.table
            .get(&TypeId::of::<I>())
            .and_then(|entry| entry.handler::<I>())
            .ok_or_else(|| {
                error!(intent = I::NAME, "no handler registered for intent");
                DispatchError::NoHandlerRegistered { intent: I::NAME }
            })
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("intents", &self.registered_intents())
            .finish()
    }
}

#[cfg(test)]
mod tests;
