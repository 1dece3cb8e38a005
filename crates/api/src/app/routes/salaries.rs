use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use workforce_auth::permissions;
use workforce_compensation::{Salary, SalaryAdjustment, SalaryChanges};
use workforce_core::{DepartmentId, EmployeeId, Money, Page, SalaryId};

use crate::app::dto::{self, AllParams, BulkAdjustRequest, CreateSalaryRequest, PageParams, SalaryRangeParams};
use crate::app::errors::ApiResult;
use crate::app::extract::{ApiJson, ApiQuery};
use crate::app::services::AppServices;
use crate::authz;
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_salaries).post(create_salary))
        .route("/bulk-adjust", post(bulk_adjust_salaries))
        .route("/search", get(search_salaries))
        .route("/above/:threshold", get(salaries_above))
        .route("/average/department/:id", get(department_average))
        .route("/by-employee/:id", get(salaries_by_employee))
        .route("/:id", get(get_salary).put(update_salary).delete(delete_salary))
}

pub async fn create_salary(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    ApiJson(body): ApiJson<CreateSalaryRequest>,
) -> ApiResult<(StatusCode, Json<Salary>)> {
    authz::require(&principal, &permissions::SALARIES_WRITE)?;
    let salary = services
        .salaries
        .create(principal.user_id(), body.employee_id, body.salary)
        .await?;
    Ok((StatusCode::CREATED, Json(salary)))
}

pub async fn bulk_adjust_salaries(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    ApiJson(body): ApiJson<BulkAdjustRequest>,
) -> ApiResult<Json<Vec<Salary>>> {
    authz::require(&principal, &permissions::SALARIES_WRITE)?;
    let adjustment = SalaryAdjustment {
        base: body.base_adjustment,
        bonus: body.bonus_adjustment,
    };
    let adjusted = services
        .salaries
        .bulk_adjust(principal.user_id(), &body.employee_ids, adjustment)
        .await?;
    Ok(Json(adjusted))
}

/// Paginated by default; `?all=true` returns a plain array.
pub async fn list_salaries(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    ApiQuery(page): ApiQuery<PageParams>,
    ApiQuery(all): ApiQuery<AllParams>,
) -> ApiResult<Response> {
    authz::require(&principal, &permissions::SALARIES_READ)?;
    if all.all {
        return Ok(Json(services.salaries.all().await?).into_response());
    }
    Ok(Json(services.salaries.list(page.request()).await?).into_response())
}

pub async fn search_salaries(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    ApiQuery(range): ApiQuery<SalaryRangeParams>,
    ApiQuery(page): ApiQuery<PageParams>,
) -> ApiResult<Json<Page<Salary>>> {
    authz::require(&principal, &permissions::SALARIES_READ)?;
    let found = services
        .salaries
        .search(
            range.min.map(Money::from_cents),
            range.max.map(Money::from_cents),
            page.request(),
        )
        .await?;
    Ok(Json(found))
}

pub async fn salaries_above(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(threshold): Path<String>,
) -> ApiResult<Json<Vec<Salary>>> {
    authz::require(&principal, &permissions::SALARIES_READ)?;
    let threshold = dto::parse_money(&threshold)?;
    Ok(Json(services.salaries.above(threshold).await?))
}

pub async fn department_average(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    authz::require(&principal, &permissions::SALARIES_READ)?;
    let id: DepartmentId = dto::parse(&id)?;
    let average = services.salaries.average_for_department(id).await?;
    Ok(Json(json!({
        "department_id": id,
        "average_total_salary": average,
    })))
}

pub async fn salaries_by_employee(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<Salary>>> {
    let id: EmployeeId = dto::parse(&id)?;
    authz::require_employee_access(&services, &principal, id, &permissions::SALARIES_READ).await?;
    Ok(Json(services.salaries.by_employee(id).await?))
}

pub async fn get_salary(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> ApiResult<Json<Salary>> {
    authz::require(&principal, &permissions::SALARIES_READ)?;
    let id: SalaryId = dto::parse(&id)?;
    Ok(Json(services.salaries.get(id).await?))
}

pub async fn update_salary(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<SalaryChanges>,
) -> ApiResult<Json<Salary>> {
    authz::require(&principal, &permissions::SALARIES_WRITE)?;
    let id: SalaryId = dto::parse(&id)?;
    Ok(Json(services.salaries.update(principal.user_id(), id, body).await?))
}

pub async fn delete_salary(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    authz::require(&principal, &permissions::SALARIES_WRITE)?;
    let id: SalaryId = dto::parse(&id)?;
    services.salaries.delete(principal.user_id(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
