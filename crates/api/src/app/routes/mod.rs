use axum::{routing::get, Router};

pub mod audit;
pub mod auth;
pub mod contracts;
pub mod dashboard;
pub mod departments;
pub mod documents;
pub mod employees;
pub mod positions;
pub mod salaries;
pub mod search;
pub mod system;
pub mod time_off;
pub mod users;

/// Endpoints reachable without a token (sign-up, login, password reset).
pub fn public_router() -> Router {
    auth::public_router()
}

/// Endpoints that require a valid access token.
pub fn protected_router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .merge(auth::two_factor_router())
        .nest("/departments", departments::router())
        .nest("/positions", positions::router())
        .nest("/employees", employees::router())
        .nest("/salaries", salaries::router())
        .nest("/contracts", contracts::router())
        .nest("/documents", documents::router())
        .nest("/time-off", time_off::router())
        .nest("/audit", audit::router())
        .nest("/dashboard", dashboard::router())
        .nest("/search", search::router())
        .nest("/users", users::router())
}
