//! Dashboard error types with HTTP status code mapping.
//!
//! The aggregation engine itself never fails; [`DashboardError`] covers the
//! surrounding layers (lookups, edits, request parsing). Each variant maps
//! to an HTTP status and a structured JSON body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::LeadId;

/// Structured JSON error response body.
///
/// ```json
/// {
///   "error": {
///     "code": 2001,
///     "message": "lead not found: 42",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Error enum for everything outside the pure engine.
///
/// # Error Code Ranges
///
/// | Range     | Category  | HTTP Status               |
/// |-----------|-----------|---------------------------|
/// | 1000–1999 | Validation | 400 Bad Request          |
/// | 2000–2999 | State     | 404 Not Found / 409 Conflict |
/// | 3000–3999 | Server    | 500 Internal Server Error |
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// No lead with this id is loaded.
    #[error("lead not found: {0}")]
    LeadNotFound(LeadId),

    /// An edit operation was attempted with no row in edit mode.
    #[error("no lead is being edited")]
    NotEditing,

    /// Request validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl DashboardError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::LeadNotFound(_) => 2001,
            Self::NotEditing => 2002,
            Self::Internal(_) => 3000,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::LeadNotFound(_) => StatusCode::NOT_FOUND,
            Self::NotEditing => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
