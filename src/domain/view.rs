//! Dashboard view composition.
//!
//! [`compose_view`] is the single entry point the service calls after each
//! load or filter change: scope by role, vendor and feed, bucket, build
//! charts, paginate. Every step is recomputed from scratch.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{FixedOffset, Month, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::bucket::{BucketLimits, BucketWindow, DateRange, Granularity, TimeBucket, count_leads};
use super::chart::{ChartSeries, LEAD_COUNT_SERIES, LineSeries, PieSeries, count_by_source};
use super::pagination::{PageInfo, paginate};
use super::{Lead, LeadOwnership};

/// Series name for the per-vendor breakdown.
pub const VENDOR_BREAKDOWN_SERIES: &str = "Leads by Vendor";

/// Who is looking at the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Sees every vendor's leads, optionally narrowed to one vendor.
    #[default]
    Admin,
    /// Sees only leads carrying its own label.
    Vendor,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Admin => "admin",
            Self::Vendor => "vendor",
        })
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "vendor" => Ok(Self::Vendor),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// Which leads a viewer may see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VendorScope {
    /// All leads.
    All,
    /// Leads whose source label equals this vendor.
    Only(String),
    /// Nothing; a vendor without a label.
    Nothing,
}

impl VendorScope {
    /// Resolves the scope for a role and the explicitly selected vendor.
    /// Blank selections count as no selection.
    #[must_use]
    pub fn for_viewer(role: Role, selected_vendor: Option<&str>) -> Self {
        let selected = selected_vendor.map(str::trim).filter(|v| !v.is_empty());
        match (role, selected) {
            (_, Some(vendor)) => Self::Only(vendor.to_string()),
            (Role::Admin, None) => Self::All,
            (Role::Vendor, None) => Self::Nothing,
        }
    }

    /// Returns `true` if `lead` is visible under this scope.
    #[must_use]
    pub fn admits(&self, lead: &Lead) -> bool {
        match self {
            Self::All => true,
            Self::Only(vendor) => lead.is_from(vendor),
            Self::Nothing => false,
        }
    }
}

/// Parameters of one dashboard render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewParams {
    /// Viewer role.
    pub role: Role,
    /// Vendor chosen by an admin, or the vendor's own label.
    pub selected_vendor: Option<String>,
    /// Bucket size.
    pub granularity: Granularity,
    /// Daily range; ignored for monthly buckets.
    pub date_range: Option<DateRange>,
    /// Monthly narrowing at the start.
    pub start_month: Option<Month>,
    /// Monthly narrowing at the end.
    pub end_month: Option<Month>,
    /// Admin feed to show; `None` shows both.
    pub ownership: Option<LeadOwnership>,
    /// 1-based page of the lead table.
    pub current_page: usize,
    /// Rows per page.
    pub page_size: usize,
}

impl Default for ViewParams {
    fn default() -> Self {
        Self {
            role: Role::Admin,
            selected_vendor: None,
            granularity: Granularity::Monthly,
            date_range: None,
            start_month: None,
            end_month: None,
            ownership: None,
            current_page: 1,
            page_size: 20,
        }
    }
}

impl ViewParams {
    /// Vendor scope these params resolve to.
    #[must_use]
    pub fn scope(&self) -> VendorScope {
        VendorScope::for_viewer(self.role, self.selected_vendor.as_deref())
    }

    /// Leads visible under the vendor scope and the selected feed, order
    /// preserved.
    #[must_use]
    pub fn visible(&self, leads: &[Lead]) -> Vec<Lead> {
        let scope = self.scope();
        leads
            .iter()
            .filter(|l| scope.admits(l) && l.in_feed(self.ownership))
            .cloned()
            .collect()
    }

    fn window(&self) -> BucketWindow {
        BucketWindow {
            granularity: self.granularity,
            date_range: self.date_range,
            start_month: self.start_month,
            end_month: self.end_month,
        }
    }
}

/// Everything the dashboard page renders.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DashboardView {
    /// Granularity the buckets were built with.
    pub granularity: Granularity,
    /// All buckets of the window, zero counts included.
    pub buckets: Vec<TimeBucket>,
    /// Line chart over the non-empty buckets.
    pub line_series: LineSeries,
    /// Pie chart over the non-empty buckets.
    pub pie_series: PieSeries,
    /// Per-vendor counts of the selected feed; present for an admin with no
    /// vendor selected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_breakdown: Option<ChartSeries>,
    /// Leads on the requested page.
    pub page_slice: Vec<Lead>,
    /// Page metadata for the table.
    pub pagination: PageInfo,
    /// Visible leads that fell outside the chart window.
    pub excluded_from_chart: usize,
}

/// Builds a [`DashboardView`] from an already sorted lead collection.
pub fn compose_view<R: Rng + ?Sized>(
    leads: &[Lead],
    params: &ViewParams,
    today: NaiveDate,
    offset: FixedOffset,
    limits: &BucketLimits,
    rng: &mut R,
) -> DashboardView {
    let visible = params.visible(leads);

    let labels = params.window().labels(today, limits);
    let counts = count_leads(labels, &visible, params.granularity, offset);
    let charted = counts.non_empty();
    let series = ChartSeries::build(LEAD_COUNT_SERIES, &charted, rng);

    let breakdown_name = params
        .ownership
        .map_or(VENDOR_BREAKDOWN_SERIES, LeadOwnership::series_name);
    let vendor_breakdown = matches!(params.scope(), VendorScope::All)
        .then(|| ChartSeries::build(breakdown_name, &count_by_source(&visible), rng));

    let (page_slice, pagination) = paginate(&visible, params.current_page, params.page_size);

    DashboardView {
        granularity: params.granularity,
        buckets: counts.buckets,
        line_series: series.line,
        pie_series: series.pie,
        vendor_breakdown,
        page_slice,
        pagination,
        excluded_from_chart: counts.excluded,
    }
}

/// Distinct vendor labels containing `term`, case-insensitively, sorted.
/// An empty term matches every vendor. Each returned label selects its
/// leads through [`VendorScope::Only`].
#[must_use]
pub fn search_vendors(leads: &[Lead], term: &str) -> Vec<String> {
    let needle = term.trim().to_lowercase();
    leads
        .iter()
        .filter_map(Lead::vendor_label)
        .filter(|v| v.to_lowercase().contains(&needle))
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn today() -> NaiveDate {
        let Some(d) = NaiveDate::from_ymd_opt(2024, 3, 15) else {
            panic!("valid date");
        };
        d
    }

    fn utc() -> FixedOffset {
        let Some(o) = FixedOffset::east_opt(0) else {
            panic!("valid offset");
        };
        o
    }

    fn fixture() -> Vec<Lead> {
        vec![
            Lead::new("1", "2024-03-02T10:00:00Z").with_source("acme"),
            Lead::new("2", "2024-03-01T10:00:00Z").with_source("bolt"),
            Lead::new("3", "2024-01-20T10:00:00Z").with_source("acme"),
            Lead::new("4", "2022-01-20T10:00:00Z").with_source("acme"),
        ]
    }

    fn render(params: &ViewParams) -> DashboardView {
        render_with(&fixture(), params)
    }

    fn render_with(leads: &[Lead], params: &ViewParams) -> DashboardView {
        let mut rng = StdRng::seed_from_u64(3);
        compose_view(
            leads,
            params,
            today(),
            utc(),
            &BucketLimits::default(),
            &mut rng,
        )
    }

    #[test]
    fn scope_resolution() {
        assert_eq!(VendorScope::for_viewer(Role::Admin, None), VendorScope::All);
        assert_eq!(VendorScope::for_viewer(Role::Admin, Some("  ")), VendorScope::All);
        assert_eq!(
            VendorScope::for_viewer(Role::Admin, Some("acme")),
            VendorScope::Only("acme".to_string())
        );
        assert_eq!(VendorScope::for_viewer(Role::Vendor, None), VendorScope::Nothing);
    }

    #[test]
    fn admin_overview_includes_breakdown() {
        let view = render(&ViewParams::default());
        assert_eq!(view.pagination.total_items, 4);
        assert_eq!(view.buckets.len(), 6);
        assert_eq!(view.line_series.labels, ["January 2024", "March 2024"]);
        assert_eq!(view.line_series.values, [1, 2]);
        assert_eq!(view.excluded_from_chart, 1);
        let Some(breakdown) = view.vendor_breakdown else {
            panic!("expected vendor breakdown");
        };
        assert_eq!(breakdown.line.name, VENDOR_BREAKDOWN_SERIES);
        assert_eq!(breakdown.line.labels, ["acme", "bolt"]);
        assert_eq!(breakdown.line.values, [3, 1]);
    }

    #[test]
    fn selected_vendor_narrows_everything() {
        let params = ViewParams {
            selected_vendor: Some("bolt".to_string()),
            ..ViewParams::default()
        };
        let view = render(&params);
        assert!(view.vendor_breakdown.is_none());
        assert_eq!(view.pagination.total_items, 1);
        assert_eq!(view.line_series.values, [1]);
        assert!(view.page_slice.iter().all(|l| l.is_from("bolt")));
    }

    #[test]
    fn vendor_without_label_sees_nothing() {
        let params = ViewParams {
            role: Role::Vendor,
            ..ViewParams::default()
        };
        let view = render(&params);
        assert!(view.page_slice.is_empty());
        assert_eq!(view.pagination.total_pages, 0);
        assert!(view.line_series.labels.is_empty());
        assert!(view.buckets.iter().all(|b| b.count == 0));
    }

    #[test]
    fn daily_view_uses_date_range() {
        let params = ViewParams {
            granularity: Granularity::Daily,
            date_range: DateRange::parse("2024-03-01", "2024-03-03"),
            ..ViewParams::default()
        };
        let view = render(&params);
        assert_eq!(view.buckets.len(), 3);
        assert_eq!(view.line_series.labels, ["3/1/2024", "3/2/2024"]);
        assert_eq!(view.pie_series.colors.len(), 2);
    }

    #[test]
    fn paging_applies_after_scoping() {
        let params = ViewParams {
            page_size: 3,
            current_page: 2,
            ..ViewParams::default()
        };
        let view = render(&params);
        assert_eq!(view.page_slice.len(), 1);
        assert_eq!(view.pagination.total_pages, 2);
        assert_eq!(view.pagination.visible_page_numbers, [1, 2]);
    }

    #[test]
    fn repeated_renders_match_except_colors() {
        let a = render(&ViewParams::default());
        let b = render(&ViewParams::default());
        assert_eq!(a.line_series, b.line_series);
        assert_eq!(a.pie_series.values, b.pie_series.values);
        assert_eq!(a.buckets, b.buckets);
    }

    #[test]
    fn vendor_search_is_case_insensitive_and_sorted() {
        let mut leads = fixture();
        leads.push(Lead::new("5", "").with_source("Acme Movers"));
        leads.push(Lead::new("6", "").with_source(""));
        assert_eq!(search_vendors(&leads, "ACM"), ["Acme Movers", "acme"]);
        assert_eq!(search_vendors(&leads, ""), ["Acme Movers", "acme", "bolt"]);
        assert!(search_vendors(&leads, "zzz").is_empty());
    }

    #[test]
    fn searched_vendor_selects_padded_labels() {
        let leads = vec![
            Lead::new("1", "2024-03-02T10:00:00Z").with_source("acme "),
            Lead::new("2", "2024-03-01T10:00:00Z").with_source(" acme"),
            Lead::new("3", "2024-03-01T11:00:00Z").with_source("bolt"),
        ];
        let found = search_vendors(&leads, "acme");
        assert_eq!(found, ["acme"]);
        let params = ViewParams {
            selected_vendor: found.first().cloned(),
            ..ViewParams::default()
        };
        assert_eq!(params.visible(&leads).len(), 2);
    }

    #[test]
    fn breakdown_labels_are_selectable() {
        let mut leads = fixture();
        leads.push(Lead::new("5", "2024-03-03T10:00:00Z").with_source(" bolt  "));
        let view = render_with(&leads, &ViewParams::default());
        let Some(breakdown) = view.vendor_breakdown else {
            panic!("expected vendor breakdown");
        };
        for (label, count) in breakdown.line.labels.iter().zip(&breakdown.line.values) {
            let params = ViewParams {
                selected_vendor: Some(label.clone()),
                ..ViewParams::default()
            };
            assert_eq!(params.visible(&leads).len() as u64, *count, "{label}");
        }
    }

    #[test]
    fn feed_filter_narrows_table_and_breakdown() {
        let mut leads = fixture();
        for lead in &mut leads {
            lead.ownership = Some(if lead.is_from("acme") {
                LeadOwnership::Exclusive
            } else {
                LeadOwnership::Shared
            });
        }
        let params = ViewParams {
            ownership: Some(LeadOwnership::Shared),
            ..ViewParams::default()
        };
        let view = render_with(&leads, &params);
        assert_eq!(view.pagination.total_items, 1);
        assert!(view.page_slice.iter().all(|l| l.is_from("bolt")));
        let Some(breakdown) = view.vendor_breakdown else {
            panic!("expected vendor breakdown");
        };
        assert_eq!(breakdown.line.name, "Shared Leads");
        assert_eq!(breakdown.line.labels, ["bolt"]);

        let exclusive = render_with(
            &leads,
            &ViewParams {
                ownership: Some(LeadOwnership::Exclusive),
                ..ViewParams::default()
            },
        );
        assert_eq!(exclusive.pagination.total_items, 3);
        assert_eq!(
            exclusive.vendor_breakdown.map(|b| b.line.name),
            Some("Exclusive Leads".to_string())
        );
    }

    #[test]
    fn unowned_leads_drop_out_of_a_feed() {
        let params = ViewParams {
            ownership: Some(LeadOwnership::Exclusive),
            ..ViewParams::default()
        };
        let view = render(&params);
        assert_eq!(view.pagination.total_items, 0);
        assert!(view.line_series.values.is_empty());
    }

    #[test]
    fn role_parsing() {
        assert_eq!("ADMIN".parse::<Role>(), Ok(Role::Admin));
        assert_eq!("vendor".parse::<Role>(), Ok(Role::Vendor));
        assert!("guest".parse::<Role>().is_err());
    }
}
