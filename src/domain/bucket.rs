//! Calendar-driven bucket labels and lead counting.
//!
//! Labels are generated from the calendar, never from the leads, so a
//! chart always covers the configured window even when some buckets are
//! empty. Counting formats each lead's timestamp with the same rule and
//! looks the label up; leads that land outside the window are dropped.
//!
//! Nothing in here returns an error: malformed input yields an empty
//! label sequence.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, FixedOffset, Month, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Lead;

/// Default length of the trailing monthly window.
pub const DEFAULT_MONTHLY_WINDOW: u32 = 6;

/// Default cap on the number of daily buckets in one request.
pub const DEFAULT_MAX_DAILY_BUCKETS: usize = 1830;

/// Time-bucket size for aggregation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// One bucket per calendar day, labelled `M/D/YYYY`.
    Daily,
    /// One bucket per calendar month, labelled `<MonthName> <Year>`.
    #[default]
    Monthly,
}

impl Granularity {
    /// Lower-case wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Monthly => "monthly",
        }
    }

    /// Label of the bucket containing `date`.
    #[must_use]
    pub fn label_for(self, date: NaiveDate) -> String {
        match self {
            Self::Daily => day_label(date),
            Self::Monthly => month_label(date),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "monthly" => Ok(Self::Monthly),
            other => Err(format!("unknown granularity: {other}")),
        }
    }
}

/// Inclusive calendar date range for daily buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct DateRange {
    /// First day, inclusive.
    pub start: NaiveDate,
    /// Last day, inclusive.
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a range. `start > end` is allowed and yields no labels.
    #[must_use]
    pub const fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Parses `YYYY-MM-DD` (or `M/D/YYYY`) endpoints. Returns `None` if
    /// either side is missing or malformed.
    #[must_use]
    pub fn parse(start: &str, end: &str) -> Option<Self> {
        Some(Self::new(parse_date(start)?, parse_date(end)?))
    }

    /// Number of days covered, or 0 for an inverted range.
    #[must_use]
    pub fn len_days(&self) -> usize {
        let days = (self.end - self.start).num_days();
        usize::try_from(days.saturating_add(1)).unwrap_or(0)
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%m/%d/%Y"))
        .ok()
}

/// Parses an English month name or three-letter abbreviation,
/// case-insensitively. Unknown names give `None`.
#[must_use]
pub fn parse_month(name: &str) -> Option<Month> {
    name.trim().parse::<Month>().ok()
}

/// Window limits applied during label generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketLimits {
    /// Length of the trailing monthly window, ending at the current month.
    pub monthly_window_months: u32,
    /// Daily ranges with more days than this are treated as malformed.
    pub max_daily_buckets: usize,
}

impl Default for BucketLimits {
    fn default() -> Self {
        Self {
            monthly_window_months: DEFAULT_MONTHLY_WINDOW,
            max_daily_buckets: DEFAULT_MAX_DAILY_BUCKETS,
        }
    }
}

/// Everything label generation depends on besides the current date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BucketWindow {
    /// Bucket size.
    pub granularity: Granularity,
    /// Explicit range, required for daily buckets and ignored otherwise.
    pub date_range: Option<DateRange>,
    /// Named month narrowing the start year of a monthly window.
    pub start_month: Option<Month>,
    /// Named month narrowing the end year of a monthly window.
    pub end_month: Option<Month>,
}

impl BucketWindow {
    /// Generates the ordered, unique labels for this window as of `today`.
    #[must_use]
    pub fn labels(&self, today: NaiveDate, limits: &BucketLimits) -> Vec<String> {
        match self.granularity {
            Granularity::Daily => match self.date_range {
                Some(range) => daily_labels(range, limits.max_daily_buckets),
                None => Vec::new(),
            },
            Granularity::Monthly => monthly_labels(
                today,
                limits.monthly_window_months,
                self.start_month,
                self.end_month,
            ),
        }
    }
}

/// `M/D/YYYY` without zero padding.
#[must_use]
pub fn day_label(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

/// `<MonthName> <Year>`, e.g. `March 2024`.
#[must_use]
pub fn month_label(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

/// One label per day from `range.start` to `range.end` inclusive.
#[must_use]
pub fn daily_labels(range: DateRange, max_buckets: usize) -> Vec<String> {
    let days = range.len_days();
    if days == 0 || days > max_buckets {
        return Vec::new();
    }
    range
        .start
        .iter_days()
        .take(days)
        .map(day_label)
        .collect()
}

/// Months since year 0, so that consecutive months differ by one.
fn month_index(year: i32, month0: u32) -> i64 {
    i64::from(year) * 12 + i64::from(month0)
}

fn month_start(index: i64) -> Option<NaiveDate> {
    let year = i32::try_from(index.div_euclid(12)).ok()?;
    let month = u32::try_from(index.rem_euclid(12)).ok()? + 1;
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Labels for the trailing `window` months ending at `today`'s month.
///
/// A named start month drops the window's start-year months before it; a
/// named end month drops the end-year months after it. Neither widens
/// the window.
#[must_use]
pub fn monthly_labels(
    today: NaiveDate,
    window: u32,
    start_month: Option<Month>,
    end_month: Option<Month>,
) -> Vec<String> {
    if window == 0 {
        return Vec::new();
    }
    let last = month_index(today.year(), today.month0());
    let first = last - i64::from(window - 1);

    let mut lower = first;
    if let Some(month) = start_month {
        let start_year = first.div_euclid(12);
        lower = lower.max(start_year * 12 + i64::from(month.number_from_month() - 1));
    }
    let mut upper = last;
    if let Some(month) = end_month {
        let end_year = last.div_euclid(12);
        upper = upper.min(end_year * 12 + i64::from(month.number_from_month() - 1));
    }

    (lower..=upper)
        .filter_map(month_start)
        .map(month_label)
        .collect()
}

/// A label and the number of leads falling into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct TimeBucket {
    /// Day or month label.
    pub label: String,
    /// Lead count.
    pub count: u64,
}

/// Result of counting leads into a fixed label sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BucketCounts {
    /// One bucket per generated label, in generator order.
    pub buckets: Vec<TimeBucket>,
    /// Leads skipped because they fell outside the window or had no
    /// parseable timestamp.
    pub excluded: usize,
}

impl BucketCounts {
    /// Drops zero-count buckets, keeping chronological order.
    #[must_use]
    pub fn non_empty(&self) -> Vec<TimeBucket> {
        self.buckets
            .iter()
            .filter(|b| b.count > 0)
            .cloned()
            .collect()
    }
}

/// Counts `leads` into `labels`.
///
/// Timestamps are shifted into `offset` before formatting, so "which day"
/// matches what the viewer sees.
#[must_use]
pub fn count_leads(
    labels: Vec<String>,
    leads: &[Lead],
    granularity: Granularity,
    offset: FixedOffset,
) -> BucketCounts {
    let positions: HashMap<String, usize> = labels
        .iter()
        .enumerate()
        .map(|(i, label)| (label.clone(), i))
        .collect();
    let mut buckets: Vec<TimeBucket> = labels
        .into_iter()
        .map(|label| TimeBucket { label, count: 0 })
        .collect();

    let mut excluded = 0;
    for lead in leads {
        let slot = lead
            .created_at()
            .map(|ts| granularity.label_for(ts.with_timezone(&offset).date_naive()))
            .and_then(|label| positions.get(&label).copied())
            .and_then(|pos| buckets.get_mut(pos));
        match slot {
            Some(bucket) => bucket.count += 1,
            None => excluded += 1,
        }
    }

    BucketCounts { buckets, excluded }
}
