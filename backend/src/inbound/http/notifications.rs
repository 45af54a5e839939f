//! Notification delivery and the caller's inbox.
//!
//! ```text
//! POST /api/v1/notifications
//! GET  /api/v1/me/notifications?unreadOnly=true&pageSize=20
//! POST /api/v1/me/notifications/{id}/read
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;

use crate::domain::PageQuery;
use crate::domain::identity::IdentityContext;
use crate::domain::notifications::{
    GetMyNotificationsQuery, MarkNotificationReadCommand, SendNotificationCommand,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dispatch::{authorize, dispatch_intent};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{Extracted, accepted};

/// Query string accepted by `GET /me/notifications`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboxParams {
    #[serde(default)]
    pub unread_only: bool,
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
}

#[post("/notifications")]
pub async fn send_notification(
    state: web::Data<HttpState>,
    identity: IdentityContext,
    payload: Extracted<web::Json<SendNotificationCommand>>,
) -> ApiResult<HttpResponse> {
    authorize::<SendNotificationCommand>(&identity)?;
    let payload = accepted(payload)?;
    dispatch_intent(&state, payload.into_inner(), &identity).await
}

#[get("/me/notifications")]
pub async fn my_notifications(
    state: web::Data<HttpState>,
    identity: IdentityContext,
    params: Extracted<web::Query<InboxParams>>,
) -> ApiResult<HttpResponse> {
    authorize::<GetMyNotificationsQuery>(&identity)?;
    let params = accepted(params)?;
    let query = GetMyNotificationsQuery {
        unread_only: params.unread_only,
        page: PageQuery {
            page_number: params.page_number,
            page_size: params.page_size,
        },
    };
    dispatch_intent(&state, query, &identity).await
}

#[post("/me/notifications/{id}/read")]
pub async fn mark_notification_read(
    state: web::Data<HttpState>,
    identity: IdentityContext,
    id: Extracted<web::Path<i64>>,
) -> ApiResult<HttpResponse> {
    authorize::<MarkNotificationReadCommand>(&identity)?;
    let id = accepted(id)?;
    let command = MarkNotificationReadCommand {
        notification_id: id.into_inner(),
    };
    dispatch_intent(&state, command, &identity).await
}
