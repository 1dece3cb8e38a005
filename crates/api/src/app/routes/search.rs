use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::get,
    Json, Router,
};

use workforce_auth::permissions;
use workforce_contracts::Contract;
use workforce_core::Page;
use workforce_employees::Employee;
use workforce_infra::services::GlobalSearchResults;
use workforce_organization::{Department, Position};

use crate::app::dto::{KeywordParams, PageParams};
use crate::app::errors::ApiResult;
use crate::app::extract::ApiQuery;
use crate::app::services::AppServices;
use crate::authz;
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/global", get(global_search))
        .route("/employees", get(search_employees))
        .route("/departments", get(search_departments))
        .route("/contracts", get(search_contracts))
        .route("/positions", get(search_positions))
}

pub async fn global_search(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    ApiQuery(keyword): ApiQuery<KeywordParams>,
    ApiQuery(page): ApiQuery<PageParams>,
) -> ApiResult<Json<GlobalSearchResults>> {
    authz::require(&principal, &permissions::SEARCH_GLOBAL)?;
    Ok(Json(services.search.global(&keyword.q, page.request()).await?))
}

pub async fn search_employees(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    ApiQuery(keyword): ApiQuery<KeywordParams>,
    ApiQuery(page): ApiQuery<PageParams>,
) -> ApiResult<Json<Page<Employee>>> {
    authz::require(&principal, &permissions::SEARCH_GLOBAL)?;
    Ok(Json(services.search.employees(&keyword.q, page.request()).await?))
}

pub async fn search_departments(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    ApiQuery(keyword): ApiQuery<KeywordParams>,
    ApiQuery(page): ApiQuery<PageParams>,
) -> ApiResult<Json<Page<Department>>> {
    authz::require(&principal, &permissions::SEARCH_GLOBAL)?;
    Ok(Json(services.search.departments(&keyword.q, page.request()).await?))
}

pub async fn search_contracts(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    ApiQuery(keyword): ApiQuery<KeywordParams>,
    ApiQuery(page): ApiQuery<PageParams>,
) -> ApiResult<Json<Page<Contract>>> {
    authz::require(&principal, &permissions::SEARCH_GLOBAL)?;
    Ok(Json(services.search.contracts(&keyword.q, page.request()).await?))
}

pub async fn search_positions(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    ApiQuery(keyword): ApiQuery<KeywordParams>,
    ApiQuery(page): ApiQuery<PageParams>,
) -> ApiResult<Json<Page<Position>>> {
    authz::require(&principal, &permissions::SEARCH_GLOBAL)?;
    Ok(Json(services.search.positions(&keyword.q, page.request()).await?))
}
