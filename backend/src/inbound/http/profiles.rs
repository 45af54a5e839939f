//! The caller's own profile.
//!
//! ```text
//! GET /api/v1/me/profile
//! PUT /api/v1/me/profile {"displayName":"Ms Hopper","phone":"","bio":"Maths"}
//! ```

use actix_web::{HttpResponse, get, put, web};

use crate::domain::identity::IdentityContext;
use crate::domain::profiles::{GetMyProfileQuery, UpdateMyProfileCommand};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dispatch::{authorize, dispatch_intent};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{Extracted, accepted};

#[get("/me/profile")]
pub async fn my_profile(
    state: web::Data<HttpState>,
    identity: IdentityContext,
) -> ApiResult<HttpResponse> {
    dispatch_intent(&state, GetMyProfileQuery, &identity).await
}

#[put("/me/profile")]
pub async fn update_my_profile(
    state: web::Data<HttpState>,
    identity: IdentityContext,
    payload: Extracted<web::Json<UpdateMyProfileCommand>>,
) -> ApiResult<HttpResponse> {
    authorize::<UpdateMyProfileCommand>(&identity)?;
    let payload = accepted(payload)?;
    dispatch_intent(&state, payload.into_inner(), &identity).await
}
