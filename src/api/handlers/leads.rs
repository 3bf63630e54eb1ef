//! Lead handlers: bulk load, lookup, edit, and the flagged/booked lists.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::{get, put};
use axum::{Json, Router};

use crate::api::dto::{
    FieldEditRequest, LeadListQuery, LeadListResponse, LoadLeadsRequest, LoadLeadsResponse,
    UpdateLeadRequest,
};
use crate::app_state::AppState;
use crate::domain::{EditableField, Lead, LeadId};
use crate::error::{DashboardError, ErrorResponse};

/// `PUT /leads`: Replace the loaded lead collection.
#[utoipa::path(
    put,
    path = "/api/v1/leads",
    tag = "Leads",
    summary = "Load leads",
    description = "Replaces the lead collection with the given batch. Leads whose id appears in `booked_ids` or `duplicate_ids` are flagged accordingly, and `exclusive_ids`/`shared_ids` assign the admin feed; repeated ids keep their first occurrence.",
    request_body = LoadLeadsRequest,
    responses(
        (status = 200, description = "Collection replaced", body = LoadLeadsResponse),
        (status = 400, description = "Malformed body", body = ErrorResponse),
    )
)]
pub async fn load_leads(
    State(state): State<AppState>,
    Json(mut req): Json<LoadLeadsRequest>,
) -> impl IntoResponse {
    let reconciliation = req.reconciliation();
    let summary = state
        .dashboard_service
        .load_leads(req.leads, &reconciliation)
        .await;
    Json(LoadLeadsResponse {
        loaded: summary.loaded,
        dropped_duplicate_ids: summary.duplicate_ids,
    })
}

/// `GET /leads/{id}`: Get a single lead.
///
/// # Errors
///
/// Returns [`DashboardError::LeadNotFound`] for an unknown id.
#[utoipa::path(
    get,
    path = "/api/v1/leads/{id}",
    tag = "Leads",
    summary = "Get lead",
    params(("id" = String, Path, description = "Lead identifier")),
    responses(
        (status = 200, description = "Lead found", body = Lead),
        (status = 404, description = "Lead not found", body = ErrorResponse),
    )
)]
pub async fn get_lead(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, DashboardError> {
    let lead = state.dashboard_service.get_lead(&LeadId::from(id)).await?;
    Ok(Json(lead))
}

/// `PUT /leads/{id}`: Apply an edit to one lead.
///
/// # Errors
///
/// Returns [`DashboardError::LeadNotFound`] for an unknown id and
/// [`DashboardError::InvalidRequest`] when the body changes nothing.
#[utoipa::path(
    put,
    path = "/api/v1/leads/{id}",
    tag = "Leads",
    summary = "Update lead",
    description = "Merges the given fields into the stored lead and returns the updated record. Writing a zip clears the city and state of that side; writing `City, ST` clears the zip.",
    params(("id" = String, Path, description = "Lead identifier")),
    request_body = UpdateLeadRequest,
    responses(
        (status = 200, description = "Lead updated", body = Lead),
        (status = 400, description = "Empty update", body = ErrorResponse),
        (status = 404, description = "Lead not found", body = ErrorResponse),
    )
)]
pub async fn update_lead(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateLeadRequest>,
) -> Result<impl IntoResponse, DashboardError> {
    let draft = req.into_draft();
    let lead = state
        .dashboard_service
        .update_lead(&LeadId::from(id), &draft)
        .await?;
    Ok(Json(lead))
}

/// `PUT /leads/{id}/fields/{field}`: Edit a single cell.
///
/// # Errors
///
/// Returns [`DashboardError::InvalidRequest`] for an unknown field name and
/// [`DashboardError::LeadNotFound`] for an unknown id.
#[utoipa::path(
    put,
    path = "/api/v1/leads/{id}/fields/{field}",
    tag = "Leads",
    summary = "Edit one field",
    description = "Writes the typed text into one editable column: `first_name`, `phone`, `origin`, `destination`, `move_size`, `move_date` or `notes`.",
    params(
        ("id" = String, Path, description = "Lead identifier"),
        ("field" = String, Path, description = "Editable field name"),
    ),
    request_body = FieldEditRequest,
    responses(
        (status = 200, description = "Lead updated", body = Lead),
        (status = 400, description = "Unknown field", body = ErrorResponse),
        (status = 404, description = "Lead not found", body = ErrorResponse),
    )
)]
pub async fn update_field(
    State(state): State<AppState>,
    Path((id, field)): Path<(String, String)>,
    Json(req): Json<FieldEditRequest>,
) -> Result<impl IntoResponse, DashboardError> {
    let field: EditableField = field.parse()?;
    let draft = req.into_draft(field);
    let lead = state
        .dashboard_service
        .update_lead(&LeadId::from(id), &draft)
        .await?;
    Ok(Json(lead))
}

/// `GET /leads/duplicates`: Paginated duplicate and invalid leads.
///
/// # Errors
///
/// Returns [`DashboardError::InvalidRequest`] for an unknown role.
#[utoipa::path(
    get,
    path = "/api/v1/leads/duplicates",
    tag = "Leads",
    summary = "List duplicate leads",
    description = "Leads flagged duplicate or invalid, newest first, scoped by role and vendor.",
    params(LeadListQuery),
    responses(
        (status = 200, description = "Paginated flagged leads", body = LeadListResponse),
        (status = 400, description = "Unknown role", body = ErrorResponse),
    )
)]
pub async fn list_duplicates(
    State(state): State<AppState>,
    Query(query): Query<LeadListQuery>,
) -> Result<impl IntoResponse, DashboardError> {
    let scope = query.scope()?;
    let (page, page_size) = query.paging(&state.config);
    let (data, pagination) = state
        .dashboard_service
        .flagged(&scope, page, page_size)
        .await;
    Ok(Json(LeadListResponse { data, pagination }))
}

/// `GET /leads/booked`: Paginated booked leads.
///
/// # Errors
///
/// Returns [`DashboardError::InvalidRequest`] for an unknown role.
#[utoipa::path(
    get,
    path = "/api/v1/leads/booked",
    tag = "Leads",
    summary = "List booked leads",
    params(LeadListQuery),
    responses(
        (status = 200, description = "Paginated booked leads", body = LeadListResponse),
        (status = 400, description = "Unknown role", body = ErrorResponse),
    )
)]
pub async fn list_booked(
    State(state): State<AppState>,
    Query(query): Query<LeadListQuery>,
) -> Result<impl IntoResponse, DashboardError> {
    let scope = query.scope()?;
    let (page, page_size) = query.paging(&state.config);
    let (data, pagination) = state
        .dashboard_service
        .booked(&scope, page, page_size)
        .await;
    Ok(Json(LeadListResponse { data, pagination }))
}

/// Lead routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/leads", put(load_leads))
        .route("/leads/duplicates", get(list_duplicates))
        .route("/leads/booked", get(list_booked))
        .route("/leads/{id}", get(get_lead).put(update_lead))
        .route("/leads/{id}/fields/{field}", put(update_field))
}
