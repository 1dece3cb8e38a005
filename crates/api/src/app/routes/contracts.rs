use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use chrono::Utc;

use workforce_auth::permissions;
use workforce_contracts::{Contract, ContractStatus, ContractType};
use workforce_core::{ContractId, EmployeeId, Page};

use crate::app::dto::{self, ContractSearchParams, CreateContractRequest, ExtendContractRequest, PageParams, StatusRequest};
use crate::app::errors::ApiResult;
use crate::app::extract::{ApiJson, ApiQuery};
use crate::app::services::AppServices;
use crate::authz;
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_contracts).post(create_contract))
        .route("/search", get(search_contracts))
        .route("/expired", get(expired_contracts))
        .route("/upcoming-expirations", get(upcoming_expirations))
        .route("/by-employee/:id", get(contracts_by_employee))
        .route("/by-type/:type", get(contracts_by_type))
        .route("/by-status/:status", get(contracts_by_status))
        .route("/:id", get(get_contract).delete(delete_contract))
        .route("/:id/status", put(update_contract_status))
        .route("/:id/extend", put(extend_contract))
}

pub async fn create_contract(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    ApiJson(body): ApiJson<CreateContractRequest>,
) -> ApiResult<(StatusCode, Json<Contract>)> {
    authz::require(&principal, &permissions::CONTRACTS_WRITE)?;
    let contract = services
        .contracts
        .create(principal.user_id(), body.employee_id, body.contract)
        .await?;
    Ok((StatusCode::CREATED, Json(contract)))
}

pub async fn list_contracts(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    ApiQuery(page): ApiQuery<PageParams>,
) -> ApiResult<Json<Page<Contract>>> {
    authz::require(&principal, &permissions::CONTRACTS_READ)?;
    Ok(Json(services.contracts.list(page.request()).await?))
}

/// `?type=&status=`: every given filter must match.
pub async fn search_contracts(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    ApiQuery(filter): ApiQuery<ContractSearchParams>,
    ApiQuery(page): ApiQuery<PageParams>,
) -> ApiResult<Json<Page<Contract>>> {
    authz::require(&principal, &permissions::CONTRACTS_READ)?;
    let contract_type: Option<ContractType> = dto::parse_opt(filter.contract_type.as_deref())?;
    let status: Option<ContractStatus> = dto::parse_opt(filter.status.as_deref())?;
    Ok(Json(services.contracts.search(contract_type, status, page.request()).await?))
}

pub async fn expired_contracts(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> ApiResult<Json<Vec<Contract>>> {
    authz::require(&principal, &permissions::CONTRACTS_READ)?;
    Ok(Json(services.contracts.expired(Utc::now().date_naive()).await?))
}

pub async fn upcoming_expirations(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> ApiResult<Json<Vec<Contract>>> {
    authz::require(&principal, &permissions::CONTRACTS_READ)?;
    Ok(Json(services.contracts.upcoming_expirations(Utc::now().date_naive()).await?))
}

pub async fn contracts_by_employee(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<Contract>>> {
    let id: EmployeeId = dto::parse(&id)?;
    authz::require_employee_access(&services, &principal, id, &permissions::CONTRACTS_READ).await?;
    Ok(Json(services.contracts.by_employee(id).await?))
}

pub async fn contracts_by_type(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(raw): Path<String>,
) -> ApiResult<Json<Vec<Contract>>> {
    authz::require(&principal, &permissions::CONTRACTS_READ)?;
    let contract_type: ContractType = dto::parse(&raw)?;
    Ok(Json(services.contracts.by_type(contract_type).await?))
}

pub async fn contracts_by_status(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(raw): Path<String>,
) -> ApiResult<Json<Vec<Contract>>> {
    authz::require(&principal, &permissions::CONTRACTS_READ)?;
    let status: ContractStatus = dto::parse(&raw)?;
    Ok(Json(services.contracts.by_status(status).await?))
}

pub async fn get_contract(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> ApiResult<Json<Contract>> {
    authz::require(&principal, &permissions::CONTRACTS_READ)?;
    let id: ContractId = dto::parse(&id)?;
    Ok(Json(services.contracts.get(id).await?))
}

pub async fn update_contract_status(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<StatusRequest>,
) -> ApiResult<Json<Contract>> {
    authz::require(&principal, &permissions::CONTRACTS_WRITE)?;
    let id: ContractId = dto::parse(&id)?;
    let status: ContractStatus = dto::parse(&body.status)?;
    Ok(Json(services.contracts.update_status(principal.user_id(), id, status).await?))
}

pub async fn extend_contract(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<ExtendContractRequest>,
) -> ApiResult<Json<Contract>> {
    authz::require(&principal, &permissions::CONTRACTS_WRITE)?;
    let id: ContractId = dto::parse(&id)?;
    Ok(Json(services.contracts.extend(principal.user_id(), id, body.new_end_date).await?))
}

pub async fn delete_contract(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    authz::require(&principal, &permissions::CONTRACTS_WRITE)?;
    let id: ContractId = dto::parse(&id)?;
    services.contracts.delete(principal.user_id(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
