//! Attendance marking and listing.
//!
//! ```text
//! POST /api/v1/attendance
//! GET  /api/v1/attendance?studentId=1&courseId=101&from=2024-09-01&to=2024-09-30&pageSize=20
//! ```

use actix_web::{HttpResponse, get, post, web};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::domain::PageQuery;
use crate::domain::attendance::{AttendanceFilter, GetAttendanceQuery, MarkAttendanceCommand};
use crate::domain::identity::IdentityContext;
use crate::inbound::http::ApiResult;
use crate::inbound::http::dispatch::{authorize, dispatch_intent};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{Extracted, accepted};

/// Query string accepted by `GET /attendance`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceListParams {
    pub student_id: Option<i64>,
    pub course_id: Option<i64>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
}

impl From<AttendanceListParams> for GetAttendanceQuery {
    fn from(params: AttendanceListParams) -> Self {
        Self {
            filter: AttendanceFilter {
                student_id: params.student_id,
                course_id: params.course_id,
                from: params.from,
                to: params.to,
            },
            page: PageQuery {
                page_number: params.page_number,
                page_size: params.page_size,
            },
        }
    }
}

#[post("/attendance")]
pub async fn mark_attendance(
    state: web::Data<HttpState>,
    identity: IdentityContext,
    payload: Extracted<web::Json<MarkAttendanceCommand>>,
) -> ApiResult<HttpResponse> {
    authorize::<MarkAttendanceCommand>(&identity)?;
    let payload = accepted(payload)?;
    dispatch_intent(&state, payload.into_inner(), &identity).await
}

#[get("/attendance")]
pub async fn list_attendance(
    state: web::Data<HttpState>,
    identity: IdentityContext,
    params: Extracted<web::Query<AttendanceListParams>>,
) -> ApiResult<HttpResponse> {
    authorize::<GetAttendanceQuery>(&identity)?;
    let params = accepted(params)?;
    let query = GetAttendanceQuery::from(params.into_inner());
    dispatch_intent(&state, query, &identity).await
}
