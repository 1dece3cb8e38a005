//! Consistent JSON error responses: `{ "error": <code>, "message": <text> }`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use workforce_auth::AuthzError;
use workforce_core::DomainError;
use workforce_infra::services::ServiceError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "validation_error", message)
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "unauthorized", message)
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(msg) => Self::new(StatusCode::NOT_FOUND, "not_found", msg),
            ServiceError::Conflict(msg) => Self::new(StatusCode::CONFLICT, "conflict", msg),
            ServiceError::Validation(msg) => Self::bad_request(msg),
            ServiceError::Invariant(msg) => {
                Self::new(StatusCode::UNPROCESSABLE_ENTITY, "invariant_violation", msg)
            }
            ServiceError::Unauthenticated(msg) => Self::unauthenticated(msg),
            ServiceError::Forbidden(msg) => Self::new(StatusCode::FORBIDDEN, "forbidden", msg),
            ServiceError::Store(e) => {
                tracing::error!(error = %e, "store failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "store_error", e.to_string())
            }
            ServiceError::Mail(e) => Self::new(StatusCode::BAD_GATEWAY, "mail_error", e.to_string()),
            ServiceError::Internal(msg) => {
                tracing::error!(error = %msg, "internal error");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg)
            }
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ServiceError::from(err).into()
    }
}

impl From<AuthzError> for ApiError {
    fn from(err: AuthzError) -> Self {
        Self::new(StatusCode::FORBIDDEN, "forbidden", err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        json_error(self.status, self.code, self.message)
    }
}

pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
