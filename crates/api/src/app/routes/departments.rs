use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use workforce_auth::permissions;
use workforce_core::{DepartmentId, Page};
use workforce_organization::{Department, DepartmentChanges, NewDepartment};

use crate::app::dto::{self, AllParams, KeywordParams, PageParams};
use crate::app::errors::ApiResult;
use crate::app::extract::{ApiJson, ApiQuery};
use crate::app::services::AppServices;
use crate::authz;
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_departments).post(create_department))
        .route("/search", get(search_departments))
        .route("/by-name/:name", get(get_department_by_name))
        .route(
            "/:id",
            get(get_department).put(update_department).delete(delete_department),
        )
}

pub async fn create_department(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    ApiJson(body): ApiJson<NewDepartment>,
) -> ApiResult<(StatusCode, Json<Department>)> {
    authz::require(&principal, &permissions::DEPARTMENTS_WRITE)?;
    let dept = services.departments.create(principal.user_id(), body).await?;
    Ok((StatusCode::CREATED, Json(dept)))
}

/// Paginated by default; `?all=true` returns a plain array of every department.
pub async fn list_departments(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    ApiQuery(page): ApiQuery<PageParams>,
    ApiQuery(all): ApiQuery<AllParams>,
) -> ApiResult<Response> {
    authz::require(&principal, &permissions::DEPARTMENTS_READ)?;
    if all.all {
        return Ok(Json(services.departments.all().await?).into_response());
    }
    Ok(Json(services.departments.list(page.request()).await?).into_response())
}

pub async fn search_departments(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    ApiQuery(keyword): ApiQuery<KeywordParams>,
    ApiQuery(page): ApiQuery<PageParams>,
) -> ApiResult<Json<Page<Department>>> {
    authz::require(&principal, &permissions::DEPARTMENTS_READ)?;
    Ok(Json(services.departments.search(&keyword.q, page.request()).await?))
}

pub async fn get_department(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> ApiResult<Json<Department>> {
    authz::require(&principal, &permissions::DEPARTMENTS_READ)?;
    let id: DepartmentId = dto::parse(&id)?;
    Ok(Json(services.departments.get(id).await?))
}

pub async fn get_department_by_name(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(name): Path<String>,
) -> ApiResult<Json<Department>> {
    authz::require(&principal, &permissions::DEPARTMENTS_READ)?;
    Ok(Json(services.departments.get_by_name(&name).await?))
}

pub async fn update_department(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<DepartmentChanges>,
) -> ApiResult<Json<Department>> {
    authz::require(&principal, &permissions::DEPARTMENTS_WRITE)?;
    let id: DepartmentId = dto::parse(&id)?;
    Ok(Json(services.departments.update(principal.user_id(), id, body).await?))
}

pub async fn delete_department(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    authz::require(&principal, &permissions::DEPARTMENTS_WRITE)?;
    let id: DepartmentId = dto::parse(&id)?;
    services.departments.delete(principal.user_id(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
