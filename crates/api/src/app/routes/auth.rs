use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};

use workforce_infra::services::{AuthSession, SignupOutcome, SignupRequest};

use crate::app::dto;
use crate::app::errors::ApiResult;
use crate::app::extract::ApiJson;
use crate::app::services::AppServices;
use crate::context::PrincipalContext;

pub fn public_router() -> Router {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/verify-email", post(verify_email))
        .route("/auth/login", post(login))
        .route("/auth/refresh-token", post(refresh_token))
        .route("/auth/forgot-password", post(forgot_password))
        .route("/auth/reset-password", post(reset_password))
}

/// Second-factor management for the calling account.
pub fn two_factor_router() -> Router {
    Router::new()
        .route("/auth/2fa/generate", post(generate_two_factor))
        .route("/auth/2fa/verify", post(verify_two_factor))
        .route("/auth/2fa/enable", post(enable_two_factor))
        .route("/auth/2fa/disable", post(disable_two_factor))
}

fn message(text: &str) -> Json<Value> {
    Json(json!({ "message": text }))
}

pub async fn signup(
    Extension(services): Extension<Arc<AppServices>>,
    ApiJson(body): ApiJson<SignupRequest>,
) -> ApiResult<(StatusCode, Json<SignupOutcome>)> {
    let outcome = services.accounts.signup(body).await?;
    Ok((StatusCode::CREATED, Json(outcome)))
}

pub async fn verify_email(
    Extension(services): Extension<Arc<AppServices>>,
    ApiJson(body): ApiJson<dto::VerifyEmailRequest>,
) -> ApiResult<Json<Value>> {
    services.accounts.verify_email(&body.email, &body.code).await?;
    Ok(message("Email verified successfully"))
}

pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    ApiJson(body): ApiJson<dto::LoginRequest>,
) -> ApiResult<Json<AuthSession>> {
    let session = services
        .accounts
        .login(&body.email, &body.password, body.two_factor_code.as_deref())
        .await?;
    Ok(Json(session))
}

pub async fn refresh_token(
    Extension(services): Extension<Arc<AppServices>>,
    ApiJson(body): ApiJson<dto::RefreshRequest>,
) -> ApiResult<Json<AuthSession>> {
    Ok(Json(services.accounts.refresh(&body.refresh_token).await?))
}

pub async fn forgot_password(
    Extension(services): Extension<Arc<AppServices>>,
    ApiJson(body): ApiJson<dto::ForgotPasswordRequest>,
) -> ApiResult<Json<Value>> {
    services.accounts.forgot_password(&body.email).await?;
    Ok(message("Password reset instructions sent to your email"))
}

pub async fn reset_password(
    Extension(services): Extension<Arc<AppServices>>,
    ApiJson(body): ApiJson<dto::ResetPasswordRequest>,
) -> ApiResult<Json<Value>> {
    services.accounts.reset_password(&body.token, &body.new_password).await?;
    Ok(message("Password reset successfully"))
}

pub async fn generate_two_factor(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> ApiResult<Json<Value>> {
    let uri = services
        .accounts
        .generate_two_factor_secret(principal.user_id())
        .await?;
    Ok(Json(json!({ "two_factor_uri": uri })))
}

pub async fn verify_two_factor(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    ApiJson(body): ApiJson<dto::TwoFactorCodeRequest>,
) -> ApiResult<Json<Value>> {
    let valid = services
        .accounts
        .verify_two_factor_code(principal.user_id(), &body.code)
        .await?;
    Ok(Json(json!({ "valid": valid })))
}

pub async fn enable_two_factor(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    ApiJson(body): ApiJson<dto::TwoFactorCodeRequest>,
) -> ApiResult<Json<Value>> {
    services
        .accounts
        .enable_two_factor(principal.user_id(), &body.code)
        .await?;
    Ok(message("Two-factor authentication enabled"))
}

pub async fn disable_two_factor(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    ApiJson(body): ApiJson<dto::TwoFactorCodeRequest>,
) -> ApiResult<Json<Value>> {
    services
        .accounts
        .disable_two_factor(principal.user_id(), &body.code)
        .await?;
    Ok(message("Two-factor authentication disabled"))
}
