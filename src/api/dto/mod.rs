//! Data Transfer Objects for REST request/response serialization.
//!
//! Query DTOs take raw strings and parse leniently: a malformed date or
//! page number degrades to a default instead of rejecting the request.

pub mod common_dto;
pub mod dashboard_dto;
pub mod lead_dto;

pub use common_dto::*;
pub use dashboard_dto::*;
pub use lead_dto::*;
