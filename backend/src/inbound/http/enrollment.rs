//! Course enrollment endpoints.
//!
//! ```text
//! POST /api/v1/enrollments
//! POST /api/v1/enrollments/{id}/drop
//! GET  /api/v1/students/{id}/enrollments?activeOnly=true
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;

use crate::domain::enrollment::{
    DropEnrollmentCommand, EnrollStudentCommand, GetStudentEnrollmentsQuery,
};
use crate::domain::identity::IdentityContext;
use crate::inbound::http::ApiResult;
use crate::inbound::http::dispatch::{authorize, dispatch_intent};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{Extracted, accepted};

/// Query string accepted by `GET /students/{id}/enrollments`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentListParams {
    #[serde(default)]
    pub active_only: bool,
}

#[post("/enrollments")]
pub async fn enroll_student(
    state: web::Data<HttpState>,
    identity: IdentityContext,
    payload: Extracted<web::Json<EnrollStudentCommand>>,
) -> ApiResult<HttpResponse> {
    authorize::<EnrollStudentCommand>(&identity)?;
    let payload = accepted(payload)?;
    dispatch_intent(&state, payload.into_inner(), &identity).await
}

#[post("/enrollments/{id}/drop")]
pub async fn drop_enrollment(
    state: web::Data<HttpState>,
    identity: IdentityContext,
    id: Extracted<web::Path<i64>>,
) -> ApiResult<HttpResponse> {
    authorize::<DropEnrollmentCommand>(&identity)?;
    let id = accepted(id)?;
    let command = DropEnrollmentCommand {
        enrollment_id: id.into_inner(),
    };
    dispatch_intent(&state, command, &identity).await
}

#[get("/students/{id}/enrollments")]
pub async fn student_enrollments(
    state: web::Data<HttpState>,
    identity: IdentityContext,
    id: Extracted<web::Path<i64>>,
    params: Extracted<web::Query<EnrollmentListParams>>,
) -> ApiResult<HttpResponse> {
    authorize::<GetStudentEnrollmentsQuery>(&identity)?;
    let id = accepted(id)?;
    let params = accepted(params)?;
    let query = GetStudentEnrollmentsQuery {
        student_id: id.into_inner(),
        active_only: params.active_only,
    };
    dispatch_intent(&state, query, &identity).await
}

#[cfg(test)]
mod tests {
    //! Enrollment routes against the seeded app.
    use crate::inbound::http::test_utils::{call_json, login_as, school_app, seeded_state};
    use actix_web::test;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[actix_web::test]
    async fn second_active_enrollment_is_a_conflict() {
        let app = test::init_service(school_app(seeded_state().await)).await;
        let cookie = login_as(&app, "admin").await;
        let request = test::TestRequest::post()
            .uri("/api/v1/enrollments")
            .cookie(cookie)
            .set_json(json!({"studentId": 1, "courseId": 101, "semester": "2025-Spring"}));
        let (status, body) = call_json(&app, request).await;
        assert_eq!(status, 409);
        assert_eq!(
            body,
            json!({
                "success": false,
                "statusCode": 409,
                "message": "Student 1 is already enrolled in course 101"
            })
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn dropping_frees_the_course_for_re_enrollment() {
        let app = test::init_service(school_app(seeded_state().await)).await;
        let cookie = login_as(&app, "admin").await;

        let drop = test::TestRequest::post()
            .uri("/api/v1/enrollments/1/drop")
            .cookie(cookie.clone());
        let (status, body) = call_json(&app, drop).await;
        assert_eq!(status, 200);
        assert_eq!(body["data"]["status"], json!("Dropped"));

        let again = test::TestRequest::post()
            .uri("/api/v1/enrollments/1/drop")
            .cookie(cookie.clone());
        let (status, _) = call_json(&app, again).await;
        assert_eq!(status, 409);

        let enroll = test::TestRequest::post()
            .uri("/api/v1/enrollments")
            .cookie(cookie.clone())
            .set_json(json!({"studentId": 1, "courseId": 101, "semester": "2025-Spring"}));
        let (status, _) = call_json(&app, enroll).await;
        assert_eq!(status, 200);

        let active = test::TestRequest::get()
            .uri("/api/v1/students/1/enrollments?activeOnly=true")
            .cookie(cookie);
        let (status, body) = call_json(&app, active).await;
        assert_eq!(status, 200);
        assert_eq!(body["data"].as_array().map(Vec::len), Some(1));
        assert_eq!(body["data"][0]["semester"], json!("2025-Spring"));
    }

    #[rstest]
    #[actix_web::test]
    async fn enrolling_an_unknown_student_is_not_found() {
        let app = test::init_service(school_app(seeded_state().await)).await;
        let cookie = login_as(&app, "admin").await;
        let request = test::TestRequest::post()
            .uri("/api/v1/enrollments")
            .cookie(cookie)
            .set_json(json!({"studentId": 99, "courseId": 101, "semester": "2024-Fall"}));
        let (status, _) = call_json(&app, request).await;
        assert_eq!(status, 404);
    }
}
