//! Domain layer: lead model, bucketing, charts, pagination, and editing.
//!
//! Everything except [`LeadBook`] is a pure function of its inputs. The
//! book holds the most recently loaded collection for the service layer.

pub mod bucket;
pub mod chart;
pub mod edit_state;
pub mod lead;
pub mod lead_book;
pub mod lead_id;
pub mod pagination;
pub mod reconcile;
pub mod view;

pub use bucket::{BucketLimits, DateRange, Granularity, TimeBucket};
pub use chart::{ChartColor, ChartSeries, LineSeries, PieSeries};
pub use edit_state::{EditState, EditableField, LeadDraft, LocationDraft};
pub use lead::{Lead, LeadOwnership, Location};
pub use lead_book::LeadBook;
pub use lead_id::LeadId;
pub use pagination::PageInfo;
pub use reconcile::Reconciliation;
pub use view::{DashboardView, Role, VendorScope, ViewParams};
