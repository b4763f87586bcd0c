// HTTP routes

mod http;

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::aggregator::Dashboard;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) dashboard: Arc<Dashboard>,
}

pub fn app(dashboard: Arc<Dashboard>) -> Router {
    let state = AppState { dashboard };
    Router::new()
        .route("/", get(|| async { "Security stack dashboard" })) // GET /
        .route("/version", get(http::version_handler)) // GET /version
        .route("/api/health", get(http::health_handler)) // GET /api/health
        .route("/api/indices", get(http::indices_handler)) // GET /api/indices
        .route("/api/containers", get(http::containers_handler)) // GET /api/containers
        .route("/api/logs/{service}", get(http::logs_handler)) // GET /api/logs/{service}?lines=N
        .route("/api/validate", get(http::validate_handler)) // GET /api/validate
        .route("/api/stats", get(http::stats_handler)) // GET /api/stats
        .route("/api/pihole/status", get(http::pihole_status_handler))
        .route("/api/pihole/summary", get(http::pihole_summary_handler))
        .route("/api/pihole/querytypes", get(http::pihole_query_types_handler))
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
