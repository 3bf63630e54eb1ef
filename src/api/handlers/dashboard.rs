//! Dashboard view handler.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::DashboardQuery;
use crate::app_state::AppState;
use crate::domain::DashboardView;
use crate::error::{DashboardError, ErrorResponse};

/// `GET /dashboard`: Bucketed counts, chart series and one table page.
///
/// # Errors
///
/// Returns [`DashboardError::InvalidRequest`] for an unknown role,
/// granularity or ownership. Malformed dates, months and page numbers
/// fall back to defaults instead.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    tag = "Dashboard",
    summary = "Render dashboard",
    description = "Scopes the loaded leads by role, vendor and admin feed (`ownership`), counts them into daily or monthly buckets, builds line and pie series over the non-empty buckets, and returns the requested page of the lead table. A malformed or inverted date range yields empty charts.",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Dashboard view", body = DashboardView),
        (status = 400, description = "Unknown role, granularity or ownership", body = ErrorResponse),
    )
)]
pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<impl IntoResponse, DashboardError> {
    let params = query.to_params(&state.config)?;
    let view = state.dashboard_service.view(&params).await;
    Ok(Json(view))
}

/// Dashboard routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/dashboard", get(get_dashboard))
}
