//! Dashboard configuration loaded from environment variables.
//!
//! All settings come from environment variables (or a `.env` file via
//! `dotenvy`). Missing or unparseable values fall back to defaults, except
//! `LISTEN_ADDR`, which must parse if set.

use std::net::SocketAddr;
use std::time::Duration;

use chrono::{FixedOffset, Offset, Utc};

use crate::domain::BucketLimits;
use crate::domain::bucket::{DEFAULT_MAX_DAILY_BUCKETS, DEFAULT_MONTHLY_WINDOW};

/// Top-level dashboard configuration.
///
/// Loaded once at startup via [`DashboardConfig::from_env`].
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:3000`).
    pub listen_addr: SocketAddr,

    /// Rows per page when a request does not say.
    pub default_page_size: usize,

    /// Upper clamp for requested page sizes.
    pub max_page_size: usize,

    /// Length of the trailing monthly chart window.
    pub monthly_window_months: u32,

    /// Daily ranges longer than this render as empty.
    pub max_daily_buckets: usize,

    /// Offset from UTC, in minutes, used for bucket labels and "today".
    pub display_utc_offset_minutes: i32,

    /// Requests running longer than this are answered with a timeout.
    pub request_timeout_secs: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            default_page_size: 20,
            max_page_size: 100,
            monthly_window_months: DEFAULT_MONTHLY_WINDOW,
            max_daily_buckets: DEFAULT_MAX_DAILY_BUCKETS,
            display_utc_offset_minutes: 0,
            request_timeout_secs: 30,
        }
    }
}

impl DashboardConfig {
    /// Loads configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed as
    /// a [`SocketAddr`].
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let listen_addr: SocketAddr = match std::env::var("LISTEN_ADDR") {
            Ok(addr) => addr.parse()?,
            Err(_) => defaults.listen_addr,
        };

        let default_page_size =
            parse_env("DEFAULT_PAGE_SIZE", defaults.default_page_size).max(1);
        let max_page_size = parse_env("MAX_PAGE_SIZE", defaults.max_page_size).max(default_page_size);
        let monthly_window_months =
            parse_env("MONTHLY_WINDOW_MONTHS", defaults.monthly_window_months);
        let max_daily_buckets = parse_env("MAX_DAILY_BUCKETS", defaults.max_daily_buckets);
        let display_utc_offset_minutes = parse_env(
            "DISPLAY_UTC_OFFSET_MINUTES",
            defaults.display_utc_offset_minutes,
        );
        let request_timeout_secs =
            parse_env("REQUEST_TIMEOUT_SECS", defaults.request_timeout_secs).max(1);

        Ok(Self {
            listen_addr,
            default_page_size,
            max_page_size,
            monthly_window_months,
            max_daily_buckets,
            display_utc_offset_minutes,
            request_timeout_secs,
        })
    }

    /// Request timeout as a [`Duration`].
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Bucket limits derived from this configuration.
    #[must_use]
    pub const fn bucket_limits(&self) -> BucketLimits {
        BucketLimits {
            monthly_window_months: self.monthly_window_months,
            max_daily_buckets: self.max_daily_buckets,
        }
    }

    /// Display timezone. Out-of-range offsets fall back to UTC.
    #[must_use]
    pub fn display_offset(&self) -> FixedOffset {
        self.display_utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| Utc.fix())
    }

    /// Clamps a requested page size into `[1, max_page_size]`, using the
    /// default when absent.
    #[must_use]
    pub fn page_size(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_page_size)
            .clamp(1, self.max_page_size.max(1))
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
