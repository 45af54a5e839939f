//! Parent registration and parent-student links.
//!
//! ```text
//! POST /api/v1/parents
//! POST /api/v1/parents/links
//! GET  /api/v1/me/children
//! ```

use actix_web::{HttpResponse, get, post, web};

use crate::domain::identity::IdentityContext;
use crate::domain::parents::{CreateParentCommand, GetMyChildrenQuery, LinkParentToStudentCommand};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dispatch::{authorize, dispatch_intent};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{Extracted, accepted};

#[post("/parents")]
pub async fn create_parent(
    state: web::Data<HttpState>,
    identity: IdentityContext,
    payload: Extracted<web::Json<CreateParentCommand>>,
) -> ApiResult<HttpResponse> {
    authorize::<CreateParentCommand>(&identity)?;
    let payload = accepted(payload)?;
    dispatch_intent(&state, payload.into_inner(), &identity).await
}

#[post("/parents/links")]
pub async fn link_parent(
    state: web::Data<HttpState>,
    identity: IdentityContext,
    payload: Extracted<web::Json<LinkParentToStudentCommand>>,
) -> ApiResult<HttpResponse> {
    authorize::<LinkParentToStudentCommand>(&identity)?;
    let payload = accepted(payload)?;
    dispatch_intent(&state, payload.into_inner(), &identity).await
}

/// Students linked to the calling parent.
#[get("/me/children")]
pub async fn my_children(
    state: web::Data<HttpState>,
    identity: IdentityContext,
) -> ApiResult<HttpResponse> {
    dispatch_intent(&state, GetMyChildrenQuery, &identity).await
}
