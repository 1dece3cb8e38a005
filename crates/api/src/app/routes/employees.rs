use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use workforce_auth::permissions;
use workforce_core::{DepartmentId, EmployeeId, Page, PositionId};
use workforce_employees::{Employee, EmployeeChanges};
use workforce_infra::services::EmployeeStats;

use crate::app::dto::{
    self, BulkCreateEmployeesRequest, CreateEmployeeRequest, KeywordParams, PageParams, TransferRequest,
};
use crate::app::errors::ApiResult;
use crate::app::extract::{ApiJson, ApiQuery};
use crate::app::services::AppServices;
use crate::authz;
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_employees).post(create_employee))
        .route("/bulk", post(bulk_create_employees))
        .route("/search", get(search_employees))
        .route("/stats", get(employee_stats))
        .route("/by-department/:id", get(employees_by_department))
        .route("/by-position/:id", get(employees_by_position))
        .route("/:id", get(get_employee).put(update_employee).delete(delete_employee))
        .route("/:id/transfer", post(transfer_employee))
}

pub async fn create_employee(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    ApiJson(body): ApiJson<CreateEmployeeRequest>,
) -> ApiResult<(StatusCode, Json<Employee>)> {
    authz::require(&principal, &permissions::EMPLOYEES_WRITE)?;
    let employee = services
        .employees
        .create(principal.user_id(), body.department_id, body.position_id, body.employee)
        .await?;
    Ok((StatusCode::CREATED, Json(employee)))
}

pub async fn bulk_create_employees(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    ApiJson(body): ApiJson<BulkCreateEmployeesRequest>,
) -> ApiResult<(StatusCode, Json<Vec<Employee>>)> {
    authz::require(&principal, &permissions::EMPLOYEES_WRITE)?;
    let created = services
        .employees
        .bulk_create(principal.user_id(), body.department_id, body.position_id, body.employees)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_employees(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    ApiQuery(page): ApiQuery<PageParams>,
) -> ApiResult<Json<Page<Employee>>> {
    authz::require(&principal, &permissions::EMPLOYEES_READ)?;
    Ok(Json(services.employees.list(page.request()).await?))
}

pub async fn search_employees(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    ApiQuery(keyword): ApiQuery<KeywordParams>,
    ApiQuery(page): ApiQuery<PageParams>,
) -> ApiResult<Json<Page<Employee>>> {
    authz::require(&principal, &permissions::EMPLOYEES_READ)?;
    Ok(Json(services.employees.search(&keyword.q, page.request()).await?))
}

pub async fn employee_stats(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> ApiResult<Json<EmployeeStats>> {
    authz::require(&principal, &permissions::EMPLOYEES_READ)?;
    Ok(Json(services.employees.stats().await?))
}

pub async fn employees_by_department(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<Employee>>> {
    authz::require(&principal, &permissions::EMPLOYEES_READ)?;
    let id: DepartmentId = dto::parse(&id)?;
    Ok(Json(services.employees.by_department(id).await?))
}

pub async fn employees_by_position(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<Employee>>> {
    authz::require(&principal, &permissions::EMPLOYEES_READ)?;
    let id: PositionId = dto::parse(&id)?;
    Ok(Json(services.employees.by_position(id).await?))
}

pub async fn get_employee(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> ApiResult<Json<Employee>> {
    authz::require(&principal, &permissions::EMPLOYEES_READ)?;
    let id: EmployeeId = dto::parse(&id)?;
    Ok(Json(services.employees.get(id).await?))
}

pub async fn update_employee(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<EmployeeChanges>,
) -> ApiResult<Json<Employee>> {
    authz::require(&principal, &permissions::EMPLOYEES_WRITE)?;
    let id: EmployeeId = dto::parse(&id)?;
    Ok(Json(services.employees.update(principal.user_id(), id, body).await?))
}

pub async fn transfer_employee(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<TransferRequest>,
) -> ApiResult<Json<Employee>> {
    authz::require(&principal, &permissions::EMPLOYEES_WRITE)?;
    let id: EmployeeId = dto::parse(&id)?;
    let moved = services
        .employees
        .transfer(principal.user_id(), id, body.department_id, body.position_id)
        .await?;
    Ok(Json(moved))
}

pub async fn delete_employee(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    authz::require(&principal, &permissions::EMPLOYEES_WRITE)?;
    let id: EmployeeId = dto::parse(&id)?;
    services.employees.delete(principal.user_id(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
