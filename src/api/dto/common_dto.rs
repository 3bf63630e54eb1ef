//! Shared DTO types and query parsing helpers.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::config::DashboardConfig;
use crate::domain::{Lead, PageInfo, Role, VendorScope};
use crate::error::DashboardError;

/// Scope and pagination query for lead list endpoints.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LeadListQuery {
    /// `admin` (default) or `vendor`.
    #[serde(default)]
    pub role: Option<String>,
    /// Vendor label to narrow to; required for the vendor role.
    #[serde(default)]
    pub vendor: Option<String>,
    /// Page number (1-indexed). Defaults to 1.
    #[serde(default)]
    pub page: Option<String>,
    /// Items per page. Defaults to the configured page size.
    #[serde(default)]
    pub page_size: Option<String>,
}

impl LeadListQuery {
    /// Resolves the vendor scope.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::InvalidRequest`] for an unknown role.
    pub fn scope(&self) -> Result<VendorScope, DashboardError> {
        let role = parse_role(self.role.as_deref())?;
        Ok(VendorScope::for_viewer(role, self.vendor.as_deref()))
    }

    /// Page number and clamped page size.
    #[must_use]
    pub fn paging(&self, config: &DashboardConfig) -> (usize, usize) {
        paging(self.page.as_deref(), self.page_size.as_deref(), config)
    }
}

/// Paginated list of leads.
#[derive(Debug, Serialize, ToSchema)]
pub struct LeadListResponse {
    /// Leads on the requested page.
    pub data: Vec<Lead>,
    /// Pagination metadata.
    pub pagination: PageInfo,
}

/// Parses a role, defaulting to admin when absent or blank.
///
/// # Errors
///
/// Returns [`DashboardError::InvalidRequest`] for an unknown role.
pub fn parse_role(raw: Option<&str>) -> Result<Role, DashboardError> {
    match raw.map(str::trim).filter(|r| !r.is_empty()) {
        Some(r) => r.parse().map_err(DashboardError::InvalidRequest),
        None => Ok(Role::default()),
    }
}

/// Lenient page parsing: garbage or zero becomes page 1, and the page
/// size goes through [`DashboardConfig::page_size`].
#[must_use]
pub fn paging(page: Option<&str>, page_size: Option<&str>, config: &DashboardConfig) -> (usize, usize) {
    let page = page
        .and_then(|p| p.trim().parse::<usize>().ok())
        .filter(|&p| p > 0)
        .unwrap_or(1);
    let size = config.page_size(page_size.and_then(|s| s.trim().parse().ok()));
    (page, size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paging_falls_back_on_garbage() {
        let cfg = DashboardConfig::default();
        assert_eq!(paging(None, None, &cfg), (1, 20));
        assert_eq!(paging(Some("abc"), Some("-5"), &cfg), (1, 20));
        assert_eq!(paging(Some("0"), Some("500"), &cfg), (1, 100));
        assert_eq!(paging(Some(" 3 "), Some("10"), &cfg), (3, 10));
    }

    #[test]
    fn role_defaults_to_admin() {
        assert!(matches!(parse_role(None), Ok(Role::Admin)));
        assert!(matches!(parse_role(Some("")), Ok(Role::Admin)));
        assert!(matches!(parse_role(Some("Vendor")), Ok(Role::Vendor)));
        assert!(parse_role(Some("root")).is_err());
    }

    #[test]
    fn list_query_scope() {
        let query = LeadListQuery {
            role: Some("vendor".to_string()),
            vendor: Some("acme".to_string()),
            ..LeadListQuery::default()
        };
        assert!(matches!(query.scope(), Ok(VendorScope::Only(v)) if v == "acme"));
    }
}
