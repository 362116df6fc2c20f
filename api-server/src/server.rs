use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the HTTP server with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/namespaces", get(handlers::list_namespaces_handler))
        .route("/api/deployments", get(handlers::list_deployments_handler))
        .route("/api/cronjobs", get(handlers::list_cron_jobs_handler))
        .route("/api/statefulsets", get(handlers::list_stateful_sets_handler))
        .route("/api/versions/check", post(handlers::check_versions_handler))
        .route("/api/versions/latest", get(handlers::latest_version_handler))
        .route("/health", get(handlers::health_handler))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
