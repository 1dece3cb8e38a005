use axum::{extract::Extension, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::context::PrincipalContext;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn whoami(Extension(principal): Extension<PrincipalContext>) -> Json<Value> {
    Json(json!({
        "user_id": principal.user_id().to_string(),
        "email": principal.email(),
        "role": principal.role().as_str(),
        "permissions": principal
            .principal()
            .permissions()
            .iter()
            .map(|p| p.as_str().to_string())
            .collect::<Vec<_>>(),
    }))
}
