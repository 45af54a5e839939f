//! Category catalogue endpoints.
//!
//! ```text
//! POST /api/v1/categories
//! GET  /api/v1/categories?search=sci&pageNumber=1&pageSize=10
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;

use crate::domain::PageQuery;
use crate::domain::categories::{CreateCategoryCommand, GetCategoriesQuery};
use crate::domain::identity::IdentityContext;
use crate::inbound::http::ApiResult;
use crate::inbound::http::dispatch::{authorize, dispatch_intent};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{Extracted, accepted};

/// Query string accepted by `GET /categories`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryListParams {
    pub search: Option<String>,
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
}

#[post("/categories")]
pub async fn create_category(
    state: web::Data<HttpState>,
    identity: IdentityContext,
    payload: Extracted<web::Json<CreateCategoryCommand>>,
) -> ApiResult<HttpResponse> {
    authorize::<CreateCategoryCommand>(&identity)?;
    let payload = accepted(payload)?;
    dispatch_intent(&state, payload.into_inner(), &identity).await
}

#[get("/categories")]
pub async fn list_categories(
    state: web::Data<HttpState>,
    identity: IdentityContext,
    params: Extracted<web::Query<CategoryListParams>>,
) -> ApiResult<HttpResponse> {
    authorize::<GetCategoriesQuery>(&identity)?;
    let params = accepted(params)?;
    let CategoryListParams {
        search,
        page_number,
        page_size,
    } = params.into_inner();
    let query = GetCategoriesQuery {
        search,
        page: PageQuery {
            page_number,
            page_size,
        },
    };
    dispatch_intent(&state, query, &identity).await
}
