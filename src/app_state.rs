//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::config::DashboardConfig;
use crate::domain::LeadBook;
use crate::service::DashboardService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Dashboard service for all business logic.
    pub dashboard_service: Arc<DashboardService>,
    /// Settings used to parse request parameters.
    pub config: Arc<DashboardConfig>,
}

impl AppState {
    /// Builds the state around an empty [`LeadBook`].
    #[must_use]
    pub fn new(config: DashboardConfig) -> Self {
        let service = DashboardService::new(Arc::new(LeadBook::new()), &config);
        Self {
            dashboard_service: Arc::new(service),
            config: Arc::new(config),
        }
    }
}
