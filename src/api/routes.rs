//! API route definitions
//!
//! - `/`, `/predict`, `/about` - HTML form page and its two actions
//! - `/api/v1/predict`, `/api/v1/about`, `/api/v1/model` - JSON mirror
//! - `/health` - liveness

use axum::middleware as axum_mw;
use axum::{routing::{get, post}, Router};

use super::handlers::{self, AppState};
use super::middleware;

/// HTML form routes.
pub fn form_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::form_page))
        .route("/predict", post(handlers::submit_form))
        .route("/about", get(handlers::about_page))
        .layer(axum_mw::from_fn(middleware::no_store))
        .with_state(state)
}

/// JSON API routes, nested under `/api/v1`.
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/predict", post(handlers::predict))
        .route("/about", get(handlers::about))
        .route("/model", get(handlers::model_info))
        .fallback(handlers::api_not_found)
        .layer(axum_mw::from_fn(middleware::no_store))
        .with_state(state)
}

/// Liveness endpoint at root level
pub fn health_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .with_state(state)
}
