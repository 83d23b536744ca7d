pub mod auth;
pub mod state;

pub use state::AppState;

use axum::{
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::time::Duration;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

pub fn create_router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config.request_timeout_secs);

    Router::new()
        // Health check
        .route("/api/health", get(health))
        // Authentication protocol endpoints
        .route("/api/auth/signup", post(auth::signup))
        .route("/api/auth/login-data", get(auth::login_data))
        .route("/api/auth/login", post(auth::login))
        .layer(TimeoutLayer::new(timeout))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> axum::Json<HealthResponse> {
    axum::Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
