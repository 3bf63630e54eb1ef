//! Vendor search handler.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{VendorListResponse, VendorQuery};
use crate::app_state::AppState;

/// `GET /vendors`: Vendor labels matching a search term.
#[utoipa::path(
    get,
    path = "/api/v1/vendors",
    tag = "Vendors",
    summary = "Search vendors",
    description = "Distinct source labels of the loaded leads containing `search`, case-insensitively, sorted. No term lists every vendor.",
    params(VendorQuery),
    responses(
        (status = 200, description = "Matching vendors", body = VendorListResponse),
    )
)]
pub async fn search_vendors(
    State(state): State<AppState>,
    Query(query): Query<VendorQuery>,
) -> impl IntoResponse {
    let term = query.search.unwrap_or_default();
    Json(VendorListResponse {
        vendors: state.dashboard_service.vendors(&term).await,
    })
}

/// Vendor routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/vendors", get(search_vendors))
}
