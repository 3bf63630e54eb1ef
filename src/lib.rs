//! # lead-dashboard
//!
//! Aggregation and pagination engine behind a moving-leads dashboard,
//! exposed over a REST API.
//!
//! Leads are loaded in bulk, reconciled against the booked and duplicate
//! lists, and kept newest first. Each dashboard request scopes them by
//! role and vendor, counts them into daily or monthly buckets, builds
//! line and pie series over the non-empty buckets, and returns one page
//! of the lead table with a five-page navigation window.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── DashboardService (service/)
//!     │
//!     ├── LeadBook (domain/)
//!     └── bucket / chart / pagination / view (domain/)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod service;
