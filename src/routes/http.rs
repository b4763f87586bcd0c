// GET handlers; marshaling only, all logic lives in the aggregator.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use super::AppState;
use crate::error::DashboardError;
use crate::version::{NAME, VERSION};

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = match self {
            DashboardError::BackendUnavailable { .. } => StatusCode::BAD_GATEWAY,
            DashboardError::NotFound(_) => StatusCode::NOT_FOUND,
        };
        tracing::info!(error = %self, kind = self.kind(), "request failed");
        let body = Json(serde_json::json!({
            "error": self.kind(),
            "message": self.to_string(),
        }));
        (status, body).into_response()
    }
}

type ApiResult<T> = Result<Json<T>, DashboardError>;

/// GET /version — returns service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": NAME,
        "version": VERSION,
    }))
}

pub(super) async fn health_handler(State(state): State<AppState>) -> ApiResult<serde_json::Value> {
    Ok(Json(state.dashboard.cluster_health().await?))
}

pub(super) async fn indices_handler(
    State(state): State<AppState>,
) -> ApiResult<Vec<crate::models::CatIndexRow>> {
    Ok(Json(state.dashboard.indices().await?))
}

pub(super) async fn containers_handler(
    State(state): State<AppState>,
) -> ApiResult<Vec<crate::models::ContainerSnapshot>> {
    Ok(Json(state.dashboard.get_containers().await?))
}

#[derive(Debug, Deserialize)]
pub(super) struct LogsQuery {
    lines: Option<String>,
}

/// GET /api/logs/{service} — plain-text tail; `lines` that do not parse fall back to the default.
pub(super) async fn logs_handler(
    State(state): State<AppState>,
    Path(service): Path<String>,
    Query(query): Query<LogsQuery>,
) -> Result<Response, DashboardError> {
    let requested = query.lines.as_deref().and_then(|l| l.trim().parse().ok());
    let lines = state.dashboard.settings().log_lines(requested);
    let text = state.dashboard.get_logs(&service, lines).await?;
    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], text).into_response())
}

pub(super) async fn validate_handler(
    State(state): State<AppState>,
) -> Json<crate::models::ValidationReport> {
    Json(state.dashboard.get_validation_report().await)
}

pub(super) async fn stats_handler(
    State(state): State<AppState>,
) -> ApiResult<crate::models::StatsSummary> {
    Ok(Json(state.dashboard.get_stats().await?))
}

pub(super) async fn pihole_status_handler(
    State(state): State<AppState>,
) -> ApiResult<serde_json::Value> {
    Ok(Json(state.dashboard.dns_status().await?))
}

pub(super) async fn pihole_summary_handler(
    State(state): State<AppState>,
) -> ApiResult<serde_json::Value> {
    Ok(Json(state.dashboard.dns_summary().await?))
}

pub(super) async fn pihole_query_types_handler(
    State(state): State<AppState>,
) -> ApiResult<serde_json::Value> {
    Ok(Json(state.dashboard.dns_query_types().await?))
}
