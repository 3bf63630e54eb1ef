//! Lead records as delivered by the upstream backend.
//!
//! Field names on the wire follow the backend's JSON (`ozip`, `movedte`,
//! `isBooked`, ...). Every field except `id` is optional so that a sparse
//! or partially broken record still deserializes and can be displayed.

use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::LeadId;

/// Naive timestamp layouts accepted after RFC 3339 fails.
const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

/// Date-only layouts, interpreted as midnight UTC.
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

/// One prospective move inquiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Lead {
    /// Backend identifier.
    pub id: LeadId,

    /// Creation time as sent by the backend. Kept verbatim for display;
    /// see [`Lead::created_at`] for the parsed value.
    #[serde(default)]
    pub timestamp: String,

    /// Source label, i.e. the vendor that delivered or owns the lead.
    #[serde(default, rename = "label")]
    pub source_label: Option<String>,

    /// Customer first name.
    #[serde(default, rename = "firstname")]
    pub first_name: Option<String>,

    /// Customer phone number.
    #[serde(default)]
    pub phone: Option<String>,

    /// Origin zip code.
    #[serde(default, rename = "ozip")]
    pub origin_zip: Option<String>,

    /// Origin city, used when no zip is known.
    #[serde(default, rename = "ocity")]
    pub origin_city: Option<String>,

    /// Origin state, used when no zip is known.
    #[serde(default, rename = "ostate")]
    pub origin_state: Option<String>,

    /// Destination zip code.
    #[serde(default, rename = "dzip")]
    pub destination_zip: Option<String>,

    /// Destination city, used when no zip is known.
    #[serde(default, rename = "dcity")]
    pub destination_city: Option<String>,

    /// Destination state, used when no zip is known.
    #[serde(default, rename = "dstate")]
    pub destination_state: Option<String>,

    /// Move size category (e.g. `"2 bedroom"`).
    #[serde(default, rename = "movesize")]
    pub move_size: Option<String>,

    /// Requested move date, free-form as entered by the customer.
    #[serde(default, rename = "movedte")]
    pub move_date: Option<String>,

    /// Free-text notes.
    #[serde(default)]
    pub notes: Option<String>,

    /// Whether the move has been booked.
    #[serde(default, rename = "isBooked")]
    pub is_booked: bool,

    /// Advisory duplicate flag.
    #[serde(default, rename = "isDuplicate")]
    pub is_duplicate: bool,

    /// Advisory bad-lead flag.
    #[serde(default, rename = "isInvalid")]
    pub is_invalid: bool,

    /// Which admin feed the lead belongs to, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ownership: Option<LeadOwnership>,
}

/// Admin feed a lead arrives through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LeadOwnership {
    /// Owned by a single vendor.
    Exclusive,
    /// Delivered to several vendors.
    Shared,
}

impl LeadOwnership {
    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exclusive => "exclusive",
            Self::Shared => "shared",
        }
    }

    /// Title used for the feed's chart series.
    #[must_use]
    pub const fn series_name(self) -> &'static str {
        match self {
            Self::Exclusive => "Exclusive Leads",
            Self::Shared => "Shared Leads",
        }
    }
}

impl fmt::Display for LeadOwnership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeadOwnership {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exclusive" => Ok(Self::Exclusive),
            "shared" => Ok(Self::Shared),
            other => Err(format!("unknown ownership: {other}")),
        }
    }
}

impl Lead {
    /// Creates a lead with the given id and raw timestamp and no other data.
    #[must_use]
    pub fn new(id: impl Into<LeadId>, timestamp: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            timestamp: timestamp.into(),
            source_label: None,
            first_name: None,
            phone: None,
            origin_zip: None,
            origin_city: None,
            origin_state: None,
            destination_zip: None,
            destination_city: None,
            destination_state: None,
            move_size: None,
            move_date: None,
            notes: None,
            is_booked: false,
            is_duplicate: false,
            is_invalid: false,
            ownership: None,
        }
    }

    /// Builder-style setter for the source label.
    #[must_use]
    pub fn with_source(mut self, label: impl Into<String>) -> Self {
        self.source_label = Some(label.into());
        self
    }

    /// Parsed creation time, or `None` when the backend sent something
    /// unrecognisable.
    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.timestamp)
    }

    /// Origin location for display.
    #[must_use]
    pub fn origin(&self) -> Location {
        Location::resolve(
            self.origin_zip.as_deref(),
            self.origin_city.as_deref(),
            self.origin_state.as_deref(),
        )
    }

    /// Destination location for display.
    #[must_use]
    pub fn destination(&self) -> Location {
        Location::resolve(
            self.destination_zip.as_deref(),
            self.destination_city.as_deref(),
            self.destination_state.as_deref(),
        )
    }

    /// Source label with surrounding whitespace removed; `None` when
    /// missing or blank. Every vendor comparison goes through this.
    #[must_use]
    pub fn vendor_label(&self) -> Option<&str> {
        clean(self.source_label.as_deref())
    }

    /// Returns `true` if the lead carries the given source label, ignoring
    /// surrounding whitespace on either side.
    #[must_use]
    pub fn is_from(&self, vendor: &str) -> bool {
        self.vendor_label().is_some_and(|label| label == vendor.trim())
    }

    /// Returns `true` if the lead belongs to the `filter` feed, or if no
    /// feed is selected.
    #[must_use]
    pub fn in_feed(&self, filter: Option<LeadOwnership>) -> bool {
        filter.is_none_or(|feed| self.ownership == Some(feed))
    }

    /// Returns `true` if the lead is flagged duplicate or invalid.
    #[must_use]
    pub const fn is_flagged(&self) -> bool {
        self.is_duplicate || self.is_invalid
    }
}

/// A displayable location: zip preferred, city and state as fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Location {
    /// Five-digit (or longer) postal code.
    Zip {
        /// The zip code.
        zip: String,
    },
    /// City and state pair. Either half may be empty.
    CityState {
        /// City name.
        city: String,
        /// State abbreviation.
        state: String,
    },
    /// Nothing usable was supplied.
    Unknown,
}

impl Location {
    fn resolve(zip: Option<&str>, city: Option<&str>, state: Option<&str>) -> Self {
        if let Some(zip) = clean(zip) {
            return Self::Zip {
                zip: zip.to_string(),
            };
        }
        match (clean(city), clean(state)) {
            (None, None) => Self::Unknown,
            (city, state) => Self::CityState {
                city: city.unwrap_or_default().to_string(),
                state: state.unwrap_or_default().to_string(),
            },
        }
    }

    /// Single-line rendering used in tables.
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            Self::Zip { zip } => zip.clone(),
            Self::CityState { city, state } if state.is_empty() => city.clone(),
            Self::CityState { city, state } if city.is_empty() => state.clone(),
            Self::CityState { city, state } => format!("{city}, {state}"),
            Self::Unknown => String::new(),
        }
    }
}

fn clean(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Parses a backend timestamp, trying RFC 3339 first and then a handful
/// of naive layouts (interpreted as UTC).
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
            return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
        }
    }
    None
}

/// Stable sort, newest first. Leads without a parseable timestamp go last
/// and keep their relative order.
pub fn sort_newest_first(leads: &mut [Lead]) {
    leads.sort_by_cached_key(|lead| Reverse(lead.created_at()));
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn deserializes_backend_field_names() {
        let json = r#"{
            "id": 17,
            "timestamp": "2024-03-02T10:15:00Z",
            "label": "acme",
            "firstname": "Dana",
            "ozip": "10001",
            "dcity": "Austin",
            "dstate": "TX",
            "movesize": "studio",
            "movedte": "2024-04-01",
            "notes": "call after 5",
            "isBooked": true
        }"#;
        let Ok(lead) = serde_json::from_str::<Lead>(json) else {
            panic!("lead should deserialize");
        };
        assert_eq!(lead.id.as_str(), "17");
        assert!(lead.is_from("acme"));
        assert!(lead.is_booked);
        assert!(!lead.is_duplicate);
        assert_eq!(lead.origin().display(), "10001");
        assert_eq!(lead.destination().display(), "Austin, TX");
    }

    #[test]
    fn vendor_matching_ignores_padding() {
        let lead = Lead::new("1", "").with_source("  acme ");
        assert_eq!(lead.vendor_label(), Some("acme"));
        assert!(lead.is_from("acme"));
        assert!(lead.is_from(" acme"));
        assert!(!lead.is_from("Acme"));
        assert!(Lead::new("2", "").with_source("   ").vendor_label().is_none());
    }

    #[test]
    fn ownership_round_trips_and_filters() {
        let json = r#"{"id": 1, "ownership": "shared"}"#;
        let Ok(lead) = serde_json::from_str::<Lead>(json) else {
            panic!("lead should deserialize");
        };
        assert_eq!(lead.ownership, Some(LeadOwnership::Shared));
        assert!(lead.in_feed(None));
        assert!(lead.in_feed(Some(LeadOwnership::Shared)));
        assert!(!lead.in_feed(Some(LeadOwnership::Exclusive)));
        assert!(!Lead::new("2", "").in_feed(Some(LeadOwnership::Shared)));
        assert_eq!("Exclusive".parse::<LeadOwnership>(), Ok(LeadOwnership::Exclusive));
        assert!("private".parse::<LeadOwnership>().is_err());
    }

    #[test]
    fn zip_wins_over_city_state() {
        let mut lead = Lead::new("1", "");
        lead.origin_zip = Some("73301".to_string());
        lead.origin_city = Some("Austin".to_string());
        lead.origin_state = Some("TX".to_string());
        assert_eq!(
            lead.origin(),
            Location::Zip {
                zip: "73301".to_string()
            }
        );
    }

    #[test]
    fn blank_zip_falls_back() {
        let mut lead = Lead::new("1", "");
        lead.destination_zip = Some("  ".to_string());
        lead.destination_state = Some("NV".to_string());
        assert_eq!(lead.destination().display(), "NV");
    }

    #[test]
    fn missing_location_is_unknown() {
        let lead = Lead::new("1", "");
        assert_eq!(lead.origin(), Location::Unknown);
        assert_eq!(lead.origin().display(), "");
    }

    #[test]
    fn parses_supported_timestamp_layouts() {
        let cases = [
            "2024-01-05T08:30:00Z",
            "2024-01-05T10:30:00+02:00",
            "2024-01-05 08:30:00",
            "2024-01-05T08:30:00",
            "2024-01-05 08:30:00.250",
        ];
        for raw in cases {
            let Some(ts) = parse_timestamp(raw) else {
                panic!("failed to parse {raw}");
            };
            assert_eq!(ts.day(), 5);
            assert_eq!(ts.hour(), 8);
        }
        let Some(date_only) = parse_timestamp("1/5/2024") else {
            panic!("failed to parse US date");
        };
        assert_eq!((date_only.month(), date_only.day()), (1, 5));
    }

    #[test]
    fn garbage_timestamp_is_none() {
        assert!(parse_timestamp("not a date").is_none());
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("2024-13-45").is_none());
    }

    #[test]
    fn sort_is_newest_first_and_stable() {
        let mut leads = vec![
            Lead::new("old", "2024-01-01T00:00:00Z"),
            Lead::new("bad-a", "garbage"),
            Lead::new("new", "2024-02-01T00:00:00Z"),
            Lead::new("tie-1", "2024-01-15T00:00:00Z"),
            Lead::new("bad-b", ""),
            Lead::new("tie-2", "2024-01-15T00:00:00Z"),
        ];
        sort_newest_first(&mut leads);
        let order: Vec<&str> = leads.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(order, ["new", "tie-1", "tie-2", "old", "bad-a", "bad-b"]);
    }
}
