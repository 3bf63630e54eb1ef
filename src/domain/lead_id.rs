//! Type-safe lead identifier.
//!
//! [`LeadId`] wraps the backend's opaque identifier. The upstream API is
//! inconsistent about whether ids arrive as JSON strings or numbers, so
//! both are accepted and normalised to their string form.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Opaque identifier of a lead, unique within a result set.
///
/// Used as the key for booked/duplicate reconciliation, the edit state
/// and optimistic updates in [`super::LeadBook`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, ToSchema)]
#[serde(transparent)]
pub struct LeadId(String);

impl LeadId {
    /// Creates a `LeadId` from anything string-like.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LeadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LeadId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for LeadId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for LeadId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLeadId {
    Text(String),
    Unsigned(u64),
    Signed(i64),
}

impl<'de> Deserialize<'de> for LeadId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawLeadId::deserialize(deserializer)? {
            RawLeadId::Text(s) => Self(s),
            RawLeadId::Unsigned(n) => Self(n.to_string()),
            RawLeadId::Signed(n) => Self(n.to_string()),
        })
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn accepts_numeric_json() {
        let Ok(id) = serde_json::from_str::<LeadId>("42") else {
            panic!("numeric id should deserialize");
        };
        assert_eq!(id.as_str(), "42");
    }

    #[test]
    fn accepts_string_json() {
        let Ok(id) = serde_json::from_str::<LeadId>("\"abc-1\"") else {
            panic!("string id should deserialize");
        };
        assert_eq!(id, LeadId::from("abc-1"));
    }

    #[test]
    fn numeric_and_string_forms_are_equal() {
        let a: Option<LeadId> = serde_json::from_str("7").ok();
        let b: Option<LeadId> = serde_json::from_str("\"7\"").ok();
        assert!(a.is_some());
        assert_eq!(a, b);
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&LeadId::from(9_u64)).unwrap_or_default();
        assert_eq!(json, "\"9\"");
    }

    #[test]
    fn rejects_objects() {
        assert!(serde_json::from_str::<LeadId>("{\"id\":1}").is_err());
    }
}
