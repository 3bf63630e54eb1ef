//! System endpoints: health check and granularity catalog.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
struct HealthResponse {
    status: String,
    timestamp: String,
    version: String,
    leads_loaded: usize,
}

/// `GET /health`: Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, current timestamp and the size of the loaded collection.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            leads_loaded: state.dashboard_service.book().len().await,
        }),
    )
}

/// Supported bucket granularity info.
#[derive(Debug, Serialize, ToSchema)]
struct GranularityInfo {
    granularity: &'static str,
    description: &'static str,
    label_format: &'static str,
    window: String,
}

/// `GET /config/granularities`: List supported bucket granularities.
#[utoipa::path(
    get,
    path = "/config/granularities",
    tag = "System",
    summary = "List granularities",
    description = "Returns each bucket granularity with its label format and the window it covers under the current configuration.",
    responses(
        (status = 200, description = "Granularity catalog", body = Vec<GranularityInfo>),
    )
)]
pub async fn granularities_handler(State(state): State<AppState>) -> impl IntoResponse {
    let types = vec![
        GranularityInfo {
            granularity: "daily",
            description: "One bucket per calendar day of an explicit date range",
            label_format: "M/D/YYYY",
            window: format!("at most {} days", state.config.max_daily_buckets),
        },
        GranularityInfo {
            granularity: "monthly",
            description: "One bucket per month, trailing from the current month",
            label_format: "Month YYYY",
            window: format!("last {} months", state.config.monthly_window_months),
        },
    ];
    (StatusCode::OK, Json(types))
}

/// System routes mounted at the root level (not under /api/v1).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/config/granularities", get(granularities_handler))
}
