//! REST endpoint handlers organized by resource.

pub mod dashboard;
pub mod leads;
pub mod system;
pub mod vendors;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(leads::routes())
        .merge(dashboard::routes())
        .merge(vendors::routes())
}
