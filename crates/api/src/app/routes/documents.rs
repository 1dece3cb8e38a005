use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::Utc;

use workforce_auth::permissions;
use workforce_core::EmployeeId;
use workforce_records::Document;

use crate::app::dto::{self, UploadDocumentRequest};
use crate::app::errors::ApiResult;
use crate::app::extract::ApiJson;
use crate::app::services::AppServices;
use crate::authz;
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_documents).post(upload_document))
        .route("/by-employee/:id", get(documents_by_employee))
}

/// Records document metadata; the file itself lives elsewhere.
pub async fn upload_document(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    ApiJson(body): ApiJson<UploadDocumentRequest>,
) -> ApiResult<(StatusCode, Json<Document>)> {
    authz::require(&principal, &permissions::DOCUMENTS_WRITE)?;
    let document = services
        .documents
        .upload(
            principal.user_id(),
            body.employee_id,
            body.document,
            Utc::now().date_naive(),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(document)))
}

pub async fn list_documents(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> ApiResult<Json<Vec<Document>>> {
    authz::require(&principal, &permissions::DOCUMENTS_READ)?;
    Ok(Json(services.documents.list().await?))
}

pub async fn documents_by_employee(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<Document>>> {
    let id: EmployeeId = dto::parse(&id)?;
    authz::require_employee_access(&services, &principal, id, &permissions::DOCUMENTS_READ).await?;
    Ok(Json(services.documents.by_employee(id).await?))
}
