//! Bridge from HTTP handlers to the intent dispatcher.
//!
//! Every route builds an intent, hands it to [`dispatch_intent`] and returns
//! the resulting envelope with the HTTP status copied from `statusCode`.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::Serialize;
use tracing::{debug, error};

use crate::domain::identity::IdentityContext;
use crate::domain::intent::Intent;
use crate::domain::{Envelope, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Check the access requirement declared by intent type `I`.
///
/// Routes call this before touching the request body, query string or path,
/// so an unauthorised caller learns nothing about the expected input.
pub fn authorize<I: Intent>(identity: &IdentityContext) -> Result<(), Error> {
    I::ACCESS.check(identity).inspect_err(|denied| {
        debug!(intent = I::NAME, code = %denied.code(), "intent rejected at boundary");
    })
}

/// Authorise `intent` for `identity`, dispatch it and render the envelope.
///
/// Access failures and handler faults surface as [`Error`], which the
/// adapter renders as a failure envelope.
pub async fn dispatch_intent<I>(
    state: &HttpState,
    intent: I,
    identity: &IdentityContext,
) -> ApiResult<HttpResponse>
where
    I: Intent,
    I::Output: Serialize,
{
    authorize::<I>(identity)?;
    let envelope = state
        .dispatcher
        .dispatch(intent, identity)
        .await
        .map_err(|failure| {
            let intent = failure.intent();
            let fault = Error::from(failure);
            error!(
                intent,
                code = %fault.code(),
                trace_id = fault.trace_id().unwrap_or("-"),
                message = fault.message(),
                "intent dispatch failed"
            );
            fault
        })?;
    Ok(respond(&envelope))
}

/// Render an envelope with its status code as the HTTP status.
pub fn respond<T: Serialize>(envelope: &Envelope<T>) -> HttpResponse {
    let status =
        StatusCode::from_u16(envelope.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    HttpResponse::build(status).json(envelope)
}

#[cfg(test)]
mod tests {
    //! Boundary access checks and envelope rendering.
    use std::sync::Arc;

    use super::*;
    use crate::domain::dispatch::{Dispatcher, HandlerResult, IntentHandler};
    use crate::domain::identity::roles;
    use crate::domain::intent::{Access, impl_intent};
    use crate::domain::{FailureStatus, UserId};
    use crate::outbound::memory::MemoryAccountDirectory;
    use actix_web::body::to_bytes;
    use async_trait::async_trait;
    use rstest::rstest;
    use serde_json::{Value, json};

    #[derive(Debug)]
    struct LookupQuery(i64);
    impl_intent!(LookupQuery => String, Query, Access::AnyRole(&[roles::ADMIN]));

    #[derive(Debug)]
    struct OrphanQuery;
    impl_intent!(OrphanQuery => (), Query, Access::Anonymous);

    struct Lookup;

    #[async_trait]
    impl IntentHandler<LookupQuery> for Lookup {
        async fn handle(&self, intent: LookupQuery, _: &IdentityContext) -> HandlerResult<String> {
            match intent.0 {
                1 => Ok(Envelope::ok("Ada".to_owned(), "found")),
                2 => Err(Error::service_unavailable("replica lag")),
                _ => Ok(Envelope::fail(FailureStatus::NotFound, "no such record")),
            }
        }
    }

    fn state() -> HttpState {
        let mut builder = Dispatcher::builder();
        builder
            .register::<LookupQuery>(Arc::new(Lookup))
            .expect("register lookup");
        let dispatcher = builder.build().expect("table");
        HttpState::new(dispatcher, Arc::new(MemoryAccountDirectory::default()))
    }

    fn admin() -> IdentityContext {
        IdentityContext::authenticated(UserId::random(), [roles::ADMIN])
    }

    async fn body_of(response: HttpResponse) -> Value {
        let bytes = to_bytes(response.into_body()).await.expect("body");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[rstest]
    #[actix_web::test]
    async fn success_and_business_failures_copy_status_code() {
        let ok = dispatch_intent(&state(), LookupQuery(1), &admin())
            .await
            .expect("ok response");
        assert_eq!(ok.status(), StatusCode::OK);
        assert_eq!(
            body_of(ok).await,
            json!({"success": true, "statusCode": 200, "message": "found", "data": "Ada"})
        );

        let missing = dispatch_intent(&state(), LookupQuery(9), &admin())
            .await
            .expect("failure envelope is still a response");
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_of(missing).await["success"], json!(false));
    }

    #[rstest]
    #[case(IdentityContext::anonymous(), StatusCode::UNAUTHORIZED)]
    #[case(IdentityContext::authenticated(UserId::random(), [roles::PARENT]), StatusCode::FORBIDDEN)]
    #[actix_web::test]
    async fn access_is_checked_before_dispatch(
        #[case] identity: IdentityContext,
        #[case] expected: StatusCode,
    ) {
        let error = dispatch_intent(&state(), LookupQuery(1), &identity)
            .await
            .expect_err("denied");
        assert_eq!(actix_web::ResponseError::status_code(&error), expected);
    }

    #[rstest]
    #[actix_web::test]
    async fn faults_and_missing_handlers_surface_as_errors() {
        let fault = dispatch_intent(&state(), LookupQuery(2), &admin())
            .await
            .expect_err("fault");
        assert_eq!(
            actix_web::ResponseError::status_code(&fault),
            StatusCode::SERVICE_UNAVAILABLE
        );

        let orphan = dispatch_intent(&state(), OrphanQuery, &IdentityContext::anonymous())
            .await
            .expect_err("no handler");
        assert_eq!(
            actix_web::ResponseError::status_code(&orphan),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
