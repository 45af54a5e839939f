//! Grade recording and grade lookups.
//!
//! ```text
//! POST /api/v1/grades
//! GET  /api/v1/students/{id}/grades?courseId=101
//! GET  /api/v1/me/grades?courseId=101
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;

use crate::domain::grading::{GetMyGradesQuery, GetStudentGradesQuery, RecordGradeCommand};
use crate::domain::identity::IdentityContext;
use crate::inbound::http::ApiResult;
use crate::inbound::http::dispatch::{authorize, dispatch_intent};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{Extracted, accepted};

/// Optional course filter shared by the grade listings.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeListParams {
    pub course_id: Option<i64>,
}

#[post("/grades")]
pub async fn record_grade(
    state: web::Data<HttpState>,
    identity: IdentityContext,
    payload: Extracted<web::Json<RecordGradeCommand>>,
) -> ApiResult<HttpResponse> {
    authorize::<RecordGradeCommand>(&identity)?;
    let payload = accepted(payload)?;
    dispatch_intent(&state, payload.into_inner(), &identity).await
}

#[get("/students/{id}/grades")]
pub async fn student_grades(
    state: web::Data<HttpState>,
    identity: IdentityContext,
    id: Extracted<web::Path<i64>>,
    params: Extracted<web::Query<GradeListParams>>,
) -> ApiResult<HttpResponse> {
    authorize::<GetStudentGradesQuery>(&identity)?;
    let id = accepted(id)?;
    let params = accepted(params)?;
    let query = GetStudentGradesQuery {
        student_id: id.into_inner(),
        course_id: params.course_id,
    };
    dispatch_intent(&state, query, &identity).await
}

/// Grades of the student linked to the caller.
#[get("/me/grades")]
pub async fn my_grades(
    state: web::Data<HttpState>,
    identity: IdentityContext,
    params: Extracted<web::Query<GradeListParams>>,
) -> ApiResult<HttpResponse> {
    authorize::<GetMyGradesQuery>(&identity)?;
    let params = accepted(params)?;
    let query = GetMyGradesQuery {
        course_id: params.course_id,
    };
    dispatch_intent(&state, query, &identity).await
}
