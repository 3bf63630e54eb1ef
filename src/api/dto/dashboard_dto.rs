//! Query DTO for `GET /dashboard`.

use serde::Deserialize;
use utoipa::IntoParams;

use super::common_dto::{paging, parse_role};
use crate::config::DashboardConfig;
use crate::domain::{LeadOwnership, ViewParams};
use crate::domain::bucket::{DateRange, Granularity, parse_month};
use crate::error::DashboardError;

/// Dashboard view parameters, all optional and parsed leniently.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DashboardQuery {
    /// `admin` (default) or `vendor`.
    #[serde(default)]
    pub role: Option<String>,
    /// Selected vendor label (admin) or own label (vendor).
    #[serde(default)]
    pub vendor: Option<String>,
    /// `daily` or `monthly` (default).
    #[serde(default)]
    pub granularity: Option<String>,
    /// First day of a daily range, `YYYY-MM-DD`.
    #[serde(default)]
    pub start_date: Option<String>,
    /// Last day of a daily range, `YYYY-MM-DD`.
    #[serde(default)]
    pub end_date: Option<String>,
    /// Month name narrowing the start of the monthly window.
    #[serde(default)]
    pub start_month: Option<String>,
    /// Month name narrowing the end of the monthly window.
    #[serde(default)]
    pub end_month: Option<String>,
    /// Admin feed: `exclusive` or `shared`. Omit for both.
    #[serde(default)]
    pub ownership: Option<String>,
    /// Page number (1-indexed).
    #[serde(default)]
    pub page: Option<String>,
    /// Rows per page.
    #[serde(default)]
    pub page_size: Option<String>,
}

impl DashboardQuery {
    /// Converts the query into [`ViewParams`].
    ///
    /// Dates, months and paging never fail; they degrade to `None` or
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::InvalidRequest`] for an unknown role,
    /// granularity or ownership.
    pub fn to_params(&self, config: &DashboardConfig) -> Result<ViewParams, DashboardError> {
        let role = parse_role(self.role.as_deref())?;
        let granularity = match self.granularity.as_deref().map(str::trim) {
            Some(g) if !g.is_empty() => g
                .parse::<Granularity>()
                .map_err(DashboardError::InvalidRequest)?,
            _ => Granularity::default(),
        };
        let ownership = match self.ownership.as_deref().map(str::trim) {
            Some(o) if !o.is_empty() => Some(
                o.parse::<LeadOwnership>()
                    .map_err(DashboardError::InvalidRequest)?,
            ),
            _ => None,
        };
        let date_range = match (&self.start_date, &self.end_date) {
            (Some(start), Some(end)) => DateRange::parse(start, end),
            _ => None,
        };
        let (current_page, page_size) =
            paging(self.page.as_deref(), self.page_size.as_deref(), config);

        Ok(ViewParams {
            role,
            selected_vendor: self.vendor.clone(),
            granularity,
            date_range,
            start_month: self.start_month.as_deref().and_then(parse_month),
            end_month: self.end_month.as_deref().and_then(parse_month),
            ownership,
            current_page,
            page_size,
        })
    }
}
