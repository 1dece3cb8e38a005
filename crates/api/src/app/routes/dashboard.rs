use std::sync::Arc;

use axum::{extract::Extension, routing::get, Json, Router};
use chrono::Utc;

use workforce_auth::permissions;
use workforce_infra::services::{AdminSummary, RecentActivities, UpcomingEvents, UserSummary};

use crate::app::errors::ApiResult;
use crate::app::services::AppServices;
use crate::authz;
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/admin/summary", get(admin_summary))
        .route("/admin/recent-activities", get(recent_activities))
        .route("/admin/upcoming-events", get(upcoming_events))
        .route("/user/summary", get(user_summary))
}

pub async fn admin_summary(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> ApiResult<Json<AdminSummary>> {
    authz::require(&principal, &permissions::DASHBOARD_ADMIN)?;
    Ok(Json(services.dashboard.admin_summary(Utc::now().date_naive()).await?))
}

pub async fn recent_activities(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> ApiResult<Json<RecentActivities>> {
    authz::require(&principal, &permissions::DASHBOARD_ADMIN)?;
    Ok(Json(services.dashboard.recent_activities().await?))
}

pub async fn upcoming_events(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> ApiResult<Json<UpcomingEvents>> {
    authz::require(&principal, &permissions::DASHBOARD_ADMIN)?;
    Ok(Json(services.dashboard.upcoming_events(Utc::now().date_naive()).await?))
}

pub async fn user_summary(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> ApiResult<Json<UserSummary>> {
    authz::require(&principal, &permissions::DASHBOARD_USER)?;
    let account = services.users.account(principal.user_id()).await?;
    Ok(Json(services.dashboard.user_summary(&account).await?))
}
