//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: builds every application service over one set of stores
//! - `routes/`: HTTP routes + handlers (one file per resource)
//! - `dto.rs`: request DTOs and query/path parsing helpers
//! - `errors.rs`: consistent error responses
//! - `extract.rs`: JSON/query extractors that reject with the error envelope

use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::{routing::get, Extension, Router};
use sqlx::postgres::PgPoolOptions;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use workforce_auth::Hs512Jwt;
use workforce_infra::config::AppConfig;
use workforce_infra::mail::{LogMailer, Mailer};
use workforce_infra::services::Stores;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod extract;
pub mod routes;
pub mod services;

/// Build the full HTTP router from configuration (entrypoint used by `main.rs`).
///
/// Uses Postgres when `database.url` is set, in-memory stores otherwise.
pub async fn build_app(config: &AppConfig) -> anyhow::Result<Router> {
    let stores = match config.database.url.as_deref() {
        Some(url) => {
            let pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(url)
                .await?;
            tracing::info!("using postgres record stores");
            Stores::postgres(pool).await?
        }
        None => {
            tracing::warn!("database.url not set; records are kept in memory");
            Stores::in_memory()
        }
    };
    Ok(build_app_with(config, stores, Arc::new(LogMailer)))
}

/// Build the router over explicit stores and mailer.
pub fn build_app_with(config: &AppConfig, stores: Stores, mailer: Arc<dyn Mailer>) -> Router {
    let jwt = Arc::new(Hs512Jwt::new(
        config.auth.jwt_secret.as_bytes(),
        config.access_token_ttl(),
        config.refresh_token_ttl(),
    ));
    let auth_state = middleware::AuthState { jwt: jwt.clone() };
    let services = Arc::new(services::AppServices::new(config, stores, mailer, jwt));

    let protected = routes::protected_router().layer(axum::middleware::from_fn_with_state(
        auth_state,
        middleware::auth_middleware,
    ));

    Router::new()
        .route("/health", get(routes::system::health))
        .nest("/api", routes::public_router().merge(protected))
        .layer(Extension(services))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(config)),
        )
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    match HeaderValue::from_str(&config.cors.allowed_origin) {
        Ok(origin) => layer.allow_origin(origin),
        Err(_) => {
            tracing::warn!(origin = %config.cors.allowed_origin, "ignoring unparseable CORS origin");
            layer
        }
    }
}
