//! Startup-built registration table mapping intent types to handlers.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use super::{Dispatcher, IntentHandler};
use crate::domain::intent::{Intent, IntentKind};

/// Configuration faults detected while building the registration table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    /// A second handler was offered for an intent type.
    #[error("intent {intent} already has a registered handler")]
    DuplicateHandler { intent: &'static str },
    /// Required intents were left without a handler.
    #[error("no handler registered for intents: {}", .intents.join(", "))]
    MissingHandlers { intents: Vec<&'static str> },
}

pub(super) struct Registration {
    pub(super) name: &'static str,
    pub(super) kind: IntentKind,
    // Always an `Arc<dyn IntentHandler<I>>` for the intent keyed by this entry.
    handler: Box<dyn Any + Send + Sync>,
}

impl Registration {
    fn new<I: Intent>(handler: Arc<dyn IntentHandler<I>>) -> Self {
        Self {
            name: I::NAME,
            kind: I::KIND,
            handler: Box::new(handler),
        }
    }

    pub(super) fn handler<I: Intent>(&self) -> Option<Arc<dyn IntentHandler<I>>> {
        self.handler
            .downcast_ref::<Arc<dyn IntentHandler<I>>>()
            .cloned()
    }
}

/// Mutable builder for the registration table.
///
/// The builder is consumed by [`RegistryBuilder::build`], after which the
/// table is frozen inside a [`Dispatcher`] and can no longer change.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use async_trait::async_trait;
/// use school_backend::domain::dispatch::{HandlerResult, IntentHandler, RegistryBuilder};
/// use school_backend::domain::identity::IdentityContext;
/// use school_backend::domain::intent::{Access, Intent, IntentKind};
/// use school_backend::domain::Envelope;
///
/// #[derive(Debug)]
/// struct Ping;
///
/// impl Intent for Ping {
///     type Output = &'static str;
///     const NAME: &'static str = "Ping";
///     const KIND: IntentKind = IntentKind::Query;
///     const ACCESS: Access = Access::Anonymous;
/// }
///
/// struct Pong;
///
/// #[async_trait]
/// impl IntentHandler<Ping> for Pong {
///     async fn handle(&self, _: Ping, _: &IdentityContext) -> HandlerResult<&'static str> {
///         Ok(Envelope::ok("pong", "ok"))
///     }
/// }
///
/// let mut builder = RegistryBuilder::new();
/// builder.require::<Ping>();
/// builder.register::<Ping>(Arc::new(Pong)).expect("first registration");
/// let dispatcher = builder.build().expect("complete table");
/// assert!(dispatcher.handles::<Ping>());
/// ```
#[derive(Default)]
pub struct RegistryBuilder {
    entries: HashMap<TypeId, Registration>,
    required: HashMap<TypeId, &'static str>,
}

impl RegistryBuilder {
    /// Start an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the handler for intent type `I`.
    ///
    /// # Errors
    /// Returns [`RegistrationError::DuplicateHandler`] when `I` already has a
    /// handler.
    pub fn register<I: Intent>(
        &mut self,
        handler: Arc<dyn IntentHandler<I>>,
    ) -> Result<&mut Self, RegistrationError> {
        let key = TypeId::of::<I>();
        if self.entries.contains_key(&key) {
            return Err(RegistrationError::DuplicateHandler { intent: I::NAME });
        }
        self.entries.insert(key, Registration::new(handler));
        Ok(self)
    }

    /// Declare that intent type `I` must have a handler before the table can
    /// be built.
    pub fn require<I: Intent>(&mut self) -> &mut Self {
        self.required.insert(TypeId::of::<I>(), I::NAME);
        self
    }

    /// Freeze the table into a [`Dispatcher`].
    ///
    /// # Errors
    /// Returns [`RegistrationError::MissingHandlers`] naming every required
    /// intent without a handler, in alphabetical order.
    pub fn build(self) -> Result<Dispatcher, RegistrationError> {
        let Self { entries, required } = self;
        let mut missing: Vec<&'static str> = required
            .iter()
            .filter(|(key, _)| !entries.contains_key(key))
            .map(|(_, name)| *name)
            .collect();
        if !missing.is_empty() {
            missing.sort_unstable();
            return Err(RegistrationError::MissingHandlers { intents: missing });
        }

        let commands = entries
            .values()
            .filter(|entry| entry.kind == IntentKind::Command)
            .count();
        info!(
            handlers = entries.len(),
            commands,
            queries = entries.len() - commands,
            "registration table built"
        );
        Ok(Dispatcher::from_table(entries))
    }
}
