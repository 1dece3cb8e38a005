use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};

use workforce_auth::permissions;
use workforce_core::{EmployeeId, TimeOffRequestId};
use workforce_records::{TimeOffRequest, TimeOffStatus};

use crate::app::dto::{self, StatusRequest, SubmitTimeOffRequest};
use crate::app::errors::ApiResult;
use crate::app::extract::ApiJson;
use crate::app::services::AppServices;
use crate::authz;
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_requests).post(submit_request))
        .route("/by-employee/:id", get(requests_by_employee))
        .route("/:id/status", put(decide_request))
}

/// Employees submit for themselves; approvers may submit for anyone.
pub async fn submit_request(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    ApiJson(body): ApiJson<SubmitTimeOffRequest>,
) -> ApiResult<(StatusCode, Json<TimeOffRequest>)> {
    authz::require(&principal, &permissions::TIME_OFF_SUBMIT)?;
    authz::require_employee_access(&services, &principal, body.employee_id, &permissions::TIME_OFF_DECIDE).await?;
    let request = services
        .time_off
        .submit(principal.user_id(), body.employee_id, body.request)
        .await?;
    Ok((StatusCode::CREATED, Json(request)))
}

pub async fn list_requests(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> ApiResult<Json<Vec<TimeOffRequest>>> {
    authz::require(&principal, &permissions::TIME_OFF_READ)?;
    Ok(Json(services.time_off.list().await?))
}

pub async fn requests_by_employee(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<TimeOffRequest>>> {
    let id: EmployeeId = dto::parse(&id)?;
    authz::require_employee_access(&services, &principal, id, &permissions::TIME_OFF_READ).await?;
    Ok(Json(services.time_off.by_employee(id).await?))
}

pub async fn decide_request(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<StatusRequest>,
) -> ApiResult<Json<TimeOffRequest>> {
    authz::require(&principal, &permissions::TIME_OFF_DECIDE)?;
    let id: TimeOffRequestId = dto::parse(&id)?;
    let status: TimeOffStatus = dto::parse(&body.status)?;
    Ok(Json(services.time_off.update_status(principal.user_id(), id, status).await?))
}
