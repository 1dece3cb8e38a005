use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    routing::get,
    Json, Router,
};

use workforce_auth::permissions;
use workforce_core::UserId;
use workforce_infra::services::{AccountView, UserProfile};

use crate::app::dto;
use crate::app::errors::ApiResult;
use crate::app::services::AppServices;
use crate::authz;
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_users))
        .route("/me", get(current_user))
        .route("/by-email/:email", get(user_by_email))
        .route("/:id", get(get_user))
        .route("/:id/profile", get(user_profile))
}

pub async fn list_users(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> ApiResult<Json<Vec<AccountView>>> {
    authz::require(&principal, &permissions::USERS_READ)?;
    Ok(Json(services.users.list().await?))
}

pub async fn current_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> ApiResult<Json<AccountView>> {
    Ok(Json(services.users.get(principal.user_id()).await?))
}

pub async fn user_by_email(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(email): Path<String>,
) -> ApiResult<Json<AccountView>> {
    authz::require(&principal, &permissions::USERS_READ)?;
    Ok(Json(services.users.by_email(&email).await?))
}

pub async fn get_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> ApiResult<Json<AccountView>> {
    let id: UserId = dto::parse(&id)?;
    authz::require_self_or(&principal, id, &permissions::USERS_READ)?;
    Ok(Json(services.users.get(id).await?))
}

pub async fn user_profile(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> ApiResult<Json<UserProfile>> {
    let id: UserId = dto::parse(&id)?;
    authz::require_self_or(&principal, id, &permissions::USERS_READ)?;
    Ok(Json(services.users.profile(id).await?))
}
