//! Student administration endpoints.
//!
//! ```text
//! POST   /api/v1/students
//! GET    /api/v1/students?pageNumber=1&pageSize=10&search=ada&sort=FirstName
//! GET    /api/v1/students/{id}
//! PUT    /api/v1/students/{id}
//! DELETE /api/v1/students/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::domain::PageQuery;
use crate::domain::identity::IdentityContext;
use crate::domain::students::{
    CreateStudentCommand, DeleteStudentCommand, GetStudentByIdQuery, GetStudentsQuery,
    StudentSort, UpdateStudentCommand,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dispatch::{authorize, dispatch_intent};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{Extracted, accepted};

/// Query string accepted by `GET /students`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentListParams {
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
    pub search: Option<String>,
    pub sort: Option<StudentSort>,
}

impl From<StudentListParams> for GetStudentsQuery {
    fn from(params: StudentListParams) -> Self {
        Self {
            page: PageQuery {
                page_number: params.page_number,
                page_size: params.page_size,
            },
            search: params.search,
            sort: params.sort.unwrap_or_default(),
        }
    }
}

/// Body accepted by `PUT /students/{id}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStudentRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
}

impl UpdateStudentRequest {
    fn into_command(self, id: i64) -> UpdateStudentCommand {
        UpdateStudentCommand {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            date_of_birth: self.date_of_birth,
        }
    }
}

#[post("/students")]
pub async fn create_student(
    state: web::Data<HttpState>,
    identity: IdentityContext,
    payload: Extracted<web::Json<CreateStudentCommand>>,
) -> ApiResult<HttpResponse> {
    authorize::<CreateStudentCommand>(&identity)?;
    let payload = accepted(payload)?;
    dispatch_intent(&state, payload.into_inner(), &identity).await
}

#[get("/students")]
pub async fn list_students(
    state: web::Data<HttpState>,
    identity: IdentityContext,
    params: Extracted<web::Query<StudentListParams>>,
) -> ApiResult<HttpResponse> {
    authorize::<GetStudentsQuery>(&identity)?;
    let params = accepted(params)?;
    let query = GetStudentsQuery::from(params.into_inner());
    dispatch_intent(&state, query, &identity).await
}

#[get("/students/{id}")]
pub async fn get_student(
    state: web::Data<HttpState>,
    identity: IdentityContext,
    id: Extracted<web::Path<i64>>,
) -> ApiResult<HttpResponse> {
    authorize::<GetStudentByIdQuery>(&identity)?;
    let id = accepted(id)?;
    let query = GetStudentByIdQuery { id: id.into_inner() };
    dispatch_intent(&state, query, &identity).await
}

#[put("/students/{id}")]
pub async fn update_student(
    state: web::Data<HttpState>,
    identity: IdentityContext,
    id: Extracted<web::Path<i64>>,
    payload: Extracted<web::Json<UpdateStudentRequest>>,
) -> ApiResult<HttpResponse> {
    authorize::<UpdateStudentCommand>(&identity)?;
    let id = accepted(id)?;
    let payload = accepted(payload)?;
    let command = payload.into_inner().into_command(id.into_inner());
    dispatch_intent(&state, command, &identity).await
}

#[delete("/students/{id}")]
pub async fn delete_student(
    state: web::Data<HttpState>,
    identity: IdentityContext,
    id: Extracted<web::Path<i64>>,
) -> ApiResult<HttpResponse> {
    authorize::<DeleteStudentCommand>(&identity)?;
    let id = accepted(id)?;
    let command = DeleteStudentCommand { id: id.into_inner() };
    dispatch_intent(&state, command, &identity).await
}
