use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use workforce_auth::permissions;
use workforce_core::{DepartmentId, Page, PositionId};
use workforce_organization::{Position, PositionChanges, PositionLevel};

use crate::app::dto::{self, CreatePositionRequest, PageParams, PositionSearchParams};
use crate::app::errors::ApiResult;
use crate::app::extract::{ApiJson, ApiQuery};
use crate::app::services::AppServices;
use crate::authz;
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_positions).post(create_position))
        .route("/search", get(search_positions))
        .route("/levels", get(list_levels))
        .route("/by-level/:level", get(positions_by_level))
        .route("/by-department/:id", get(positions_by_department))
        .route("/:id", get(get_position).put(update_position).delete(delete_position))
}

pub async fn create_position(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    ApiJson(body): ApiJson<CreatePositionRequest>,
) -> ApiResult<(StatusCode, Json<Position>)> {
    authz::require(&principal, &permissions::POSITIONS_WRITE)?;
    let position = services
        .positions
        .create(principal.user_id(), body.department_id, body.position)
        .await?;
    Ok((StatusCode::CREATED, Json(position)))
}

pub async fn list_positions(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    ApiQuery(page): ApiQuery<PageParams>,
) -> ApiResult<Json<Page<Position>>> {
    authz::require(&principal, &permissions::POSITIONS_READ)?;
    Ok(Json(services.positions.list(page.request()).await?))
}

/// `?title=&level=`: title contains OR level equals.
pub async fn search_positions(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    ApiQuery(filter): ApiQuery<PositionSearchParams>,
    ApiQuery(page): ApiQuery<PageParams>,
) -> ApiResult<Json<Page<Position>>> {
    authz::require(&principal, &permissions::POSITIONS_READ)?;
    let level: Option<PositionLevel> = dto::parse_opt(filter.level.as_deref())?;
    let found = services
        .positions
        .search(filter.title.as_deref(), level, page.request())
        .await?;
    Ok(Json(found))
}

pub async fn list_levels(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> ApiResult<Json<Vec<PositionLevel>>> {
    authz::require(&principal, &permissions::POSITIONS_READ)?;
    Ok(Json(services.positions.levels()))
}

pub async fn positions_by_level(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(level): Path<String>,
) -> ApiResult<Json<Vec<Position>>> {
    authz::require(&principal, &permissions::POSITIONS_READ)?;
    let level: PositionLevel = dto::parse(&level)?;
    Ok(Json(services.positions.by_level(level).await?))
}

pub async fn positions_by_department(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<Position>>> {
    authz::require(&principal, &permissions::POSITIONS_READ)?;
    let id: DepartmentId = dto::parse(&id)?;
    Ok(Json(services.positions.by_department(id).await?))
}

pub async fn get_position(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> ApiResult<Json<Position>> {
    authz::require(&principal, &permissions::POSITIONS_READ)?;
    let id: PositionId = dto::parse(&id)?;
    Ok(Json(services.positions.get(id).await?))
}

pub async fn update_position(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<PositionChanges>,
) -> ApiResult<Json<Position>> {
    authz::require(&principal, &permissions::POSITIONS_WRITE)?;
    let id: PositionId = dto::parse(&id)?;
    Ok(Json(services.positions.update(principal.user_id(), id, body).await?))
}

pub async fn delete_position(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    authz::require(&principal, &permissions::POSITIONS_WRITE)?;
    let id: PositionId = dto::parse(&id)?;
    services.positions.delete(principal.user_id(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
