use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    routing::get,
    Json, Router,
};

use workforce_audit::AuditEntry;
use workforce_auth::permissions;
use workforce_core::UserId;

use crate::app::dto;
use crate::app::errors::ApiResult;
use crate::app::services::AppServices;
use crate::authz;
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_entries))
        .route("/by-user/:id", get(entries_by_user))
}

pub async fn list_entries(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> ApiResult<Json<Vec<AuditEntry>>> {
    authz::require(&principal, &permissions::AUDIT_READ)?;
    Ok(Json(services.audit.all().await?))
}

pub async fn entries_by_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<AuditEntry>>> {
    authz::require(&principal, &permissions::AUDIT_READ)?;
    let id: UserId = dto::parse(&id)?;
    Ok(Json(services.audit.by_user(id).await?))
}
