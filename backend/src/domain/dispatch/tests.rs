//! Tests for the registration table and dispatcher.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use rstest::{fixture, rstest};
use tokio::sync::Barrier;

use super::*;
use crate::domain::identity::roles;
use crate::domain::intent::{Access, impl_intent};
use crate::domain::{ErrorCode, FailureStatus, UserId};

#[derive(Debug)]
struct EchoQuery(String);
impl_intent!(EchoQuery => String, Query, Access::Anonymous);

#[derive(Debug)]
struct IncrementCommand(u32);
impl_intent!(IncrementCommand => u32, Command, Access::Authenticated);

#[derive(Debug)]
struct WhoAmIQuery;
impl_intent!(WhoAmIQuery => Option<String>, Query, Access::Anonymous);

#[derive(Debug)]
struct UnhandledQuery;
impl_intent!(UnhandledQuery => (), Query, Access::Anonymous);

#[derive(Debug)]
struct WrappedEcho(EchoQuery);
impl_intent!(WrappedEcho => String, Query, Access::Anonymous);

struct Echo;

#[async_trait]
impl IntentHandler<EchoQuery> for Echo {
    async fn handle(&self, intent: EchoQuery, _: &IdentityContext) -> HandlerResult<String> {
        Ok(Envelope::ok(intent.0, "echoed"))
    }
}

#[derive(Default)]
struct Counter {
    calls: AtomicUsize,
}

#[async_trait]
impl IntentHandler<IncrementCommand> for Counter {
    async fn handle(&self, intent: IncrementCommand, _: &IdentityContext) -> HandlerResult<u32> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match intent.0 {
            0 => Ok(Envelope::fail(FailureStatus::Conflict, "nothing to add")),
            u32::MAX => Err(Error::service_unavailable("counter store offline")),
            n => Ok(Envelope::ok(n + 1, "incremented")),
        }
    }
}

struct WhoAmI;

#[async_trait]
impl IntentHandler<WhoAmIQuery> for WhoAmI {
    async fn handle(
        &self,
        _: WhoAmIQuery,
        identity: &IdentityContext,
    ) -> HandlerResult<Option<String>> {
        Ok(Envelope::ok(
            identity.current_user_id().map(ToString::to_string),
            "resolved",
        ))
    }
}

#[fixture]
fn counter() -> Arc<Counter> {
    Arc::new(Counter::default())
}

fn dispatcher_with(counter: Arc<Counter>) -> Dispatcher {
    let mut builder = Dispatcher::builder();
    builder
        .register::<EchoQuery>(Arc::new(Echo))
        .and_then(|b| b.register::<IncrementCommand>(counter))
        .and_then(|b| b.register::<WhoAmIQuery>(Arc::new(WhoAmI)))
        .expect("distinct intents register");
    builder.build().expect("table builds")
}

#[rstest]
#[tokio::test]
async fn routes_each_intent_to_its_own_handler(counter: Arc<Counter>) {
    let dispatcher = dispatcher_with(counter.clone());
    let identity = IdentityContext::anonymous();

    let echoed = dispatcher
        .dispatch(EchoQuery("hello".into()), &identity)
        .await
        .expect("echo dispatches");
    assert_eq!(echoed.data().map(String::as_str), Some("hello"));

    let incremented = dispatcher
        .dispatch(IncrementCommand(41), &identity)
        .await
        .expect("increment dispatches");
    assert_eq!(incremented.into_data(), Some(42));
    assert_eq!(counter.calls.load(Ordering::SeqCst), 1);
}

#[rstest]
#[tokio::test]
async fn failure_envelopes_pass_through_unchanged(counter: Arc<Counter>) {
    let dispatcher = dispatcher_with(counter);
    let envelope = dispatcher
        .dispatch(IncrementCommand(0), &IdentityContext::anonymous())
        .await
        .expect("expected failures are not dispatch errors");
    assert!(!envelope.is_success());
    assert_eq!(envelope.status_code(), 409);
    assert_eq!(envelope.message(), "nothing to add");
}

#[rstest]
#[tokio::test]
async fn handler_faults_surface_as_dispatch_errors(counter: Arc<Counter>) {
    let dispatcher = dispatcher_with(counter);
    let error = dispatcher
        .dispatch(IncrementCommand(u32::MAX), &IdentityContext::anonymous())
        .await
        .expect_err("fault propagates");
    assert_eq!(error.intent(), "IncrementCommand");
    let DispatchError::Handler { source, .. } = &error else {
        panic!("expected handler fault, got {error:?}");
    };
    assert_eq!(source.code(), ErrorCode::ServiceUnavailable);
    assert_eq!(Error::from(error).code(), ErrorCode::ServiceUnavailable);
}

#[rstest]
#[tokio::test]
async fn unregistered_intent_is_a_configuration_error(counter: Arc<Counter>) {
    let dispatcher = dispatcher_with(counter);
    let error = dispatcher
        .dispatch(UnhandledQuery, &IdentityContext::anonymous())
        .await
        .expect_err("no handler");
    assert!(matches!(
        error,
        DispatchError::NoHandlerRegistered { intent: "UnhandledQuery" }
    ));
    assert_eq!(Error::from(error).code(), ErrorCode::InternalError);
}

#[rstest]
#[tokio::test]
async fn lookup_matches_exact_types_only(counter: Arc<Counter>) {
    let dispatcher = dispatcher_with(counter);
    assert!(dispatcher.handles::<EchoQuery>());
    assert!(!dispatcher.handles::<WrappedEcho>());
    let error = dispatcher
        .dispatch(WrappedEcho(EchoQuery("x".into())), &IdentityContext::anonymous())
        .await
        .expect_err("wrapper type has no handler");
    assert_eq!(error.intent(), "WrappedEcho");
}

#[rstest]
fn duplicate_registration_is_rejected(counter: Arc<Counter>) {
    let mut builder = RegistryBuilder::new();
    builder
        .register::<IncrementCommand>(counter.clone())
        .expect("first registration");
    let error = builder
        .register::<IncrementCommand>(counter)
        .err()
        .expect("second registration fails");
    assert_eq!(
        error,
        RegistrationError::DuplicateHandler {
            intent: "IncrementCommand"
        }
    );
}

#[rstest]
fn missing_required_handlers_fail_the_build() {
    let mut builder = RegistryBuilder::new();
    builder
        .require::<UnhandledQuery>()
        .require::<EchoQuery>()
        .require::<IncrementCommand>();
    builder
        .register::<EchoQuery>(Arc::new(Echo))
        .expect("echo registers");
    let error = builder.build().expect_err("two intents missing");
    assert_eq!(
        error,
        RegistrationError::MissingHandlers {
            intents: vec!["IncrementCommand", "UnhandledQuery"]
        }
    );
    assert_eq!(
        error.to_string(),
        "no handler registered for intents: IncrementCommand, UnhandledQuery"
    );
}

#[rstest]
fn frozen_table_reports_its_contents(counter: Arc<Counter>) {
    let dispatcher = dispatcher_with(counter);
    assert_eq!(dispatcher.len(), 3);
    assert!(!dispatcher.is_empty());
    assert_eq!(
        dispatcher.registered_intents(),
        vec!["EchoQuery", "IncrementCommand", "WhoAmIQuery"]
    );
    let clone = dispatcher.clone();
    assert_eq!(clone.registered_intents(), dispatcher.registered_intents());
}

/// Handlers that only complete once two dispatches are in flight together.
struct Rendezvous {
    barrier: Arc<Barrier>,
}

#[async_trait]
impl IntentHandler<WhoAmIQuery> for Rendezvous {
    async fn handle(
        &self,
        _: WhoAmIQuery,
        identity: &IdentityContext,
    ) -> HandlerResult<Option<String>> {
        let before = identity.current_user_id().map(ToString::to_string);
        self.barrier.wait().await;
        let after = identity.current_user_id().map(ToString::to_string);
        assert_eq!(before, after);
        Ok(Envelope::ok(after, "resolved"))
    }
}

#[async_trait]
impl IntentHandler<IncrementCommand> for Rendezvous {
    async fn handle(
        &self,
        intent: IncrementCommand,
        identity: &IdentityContext,
    ) -> HandlerResult<u32> {
        assert!(identity.is_authenticated());
        self.barrier.wait().await;
        Ok(Envelope::ok(intent.0 + 1, "incremented"))
    }
}

#[rstest]
#[tokio::test]
async fn concurrent_dispatches_keep_their_own_identity() {
    let rendezvous = Arc::new(Rendezvous {
        barrier: Arc::new(Barrier::new(2)),
    });
    let mut builder = RegistryBuilder::new();
    builder
        .register::<WhoAmIQuery>(rendezvous.clone())
        .and_then(|b| b.register::<IncrementCommand>(rendezvous))
        .expect("register rendezvous handlers");
    let dispatcher = builder.build().expect("table builds");

    let teacher_id = UserId::random();
    let teacher = IdentityContext::authenticated(teacher_id.clone(), [roles::TEACHER]);
    let anonymous = IdentityContext::anonymous();

    let (query, command) = tokio::time::timeout(Duration::from_secs(5), async {
        futures::join!(
            dispatcher.dispatch(WhoAmIQuery, &anonymous),
            dispatcher.dispatch(IncrementCommand(6), &teacher),
        )
    })
    .await
    .expect("query and command overlap and complete");

    let query = query.expect("anonymous query");
    let command = command.expect("teacher command");
    assert_eq!(query.into_data(), Some(None));
    assert_eq!(command.into_data(), Some(7));
}

struct DropFlag(Arc<AtomicBool>);

impl Drop for DropFlag {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

struct Stalled {
    dropped: Arc<AtomicBool>,
}

#[async_trait]
impl IntentHandler<EchoQuery> for Stalled {
    async fn handle(&self, _: EchoQuery, _: &IdentityContext) -> HandlerResult<String> {
        let _guard = DropFlag(self.dropped.clone());
        std::future::pending::<()>().await;
        Ok(Envelope::ok(String::new(), "unreachable"))
    }
}

#[rstest]
#[tokio::test]
async fn dropping_the_dispatch_future_cancels_the_handler() {
    let dropped = Arc::new(AtomicBool::new(false));
    let mut builder = RegistryBuilder::new();
    builder
        .register::<EchoQuery>(Arc::new(Stalled {
            dropped: dropped.clone(),
        }))
        .expect("register stalled handler");
    let dispatcher = builder.build().expect("table builds");
    let identity = IdentityContext::anonymous();

    let outcome = tokio::time::timeout(
        Duration::from_millis(20),
        dispatcher.dispatch(EchoQuery("slow".into()), &identity),
    )
    .await;

    assert!(outcome.is_err(), "dispatch should time out");
    assert!(dropped.load(Ordering::SeqCst), "handler future was dropped");
}
