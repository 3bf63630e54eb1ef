//! Service layer: business logic orchestration.
//!
//! [`DashboardService`] owns the [`crate::domain::LeadBook`], feeds it into
//! the pure view computation, and applies edits.

pub mod dashboard_service;

pub use dashboard_service::DashboardService;
