//! Lead load, update and vendor DTOs.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{EditableField, Lead, LeadDraft, LeadId, Reconciliation};

/// Request body for `PUT /leads`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoadLeadsRequest {
    /// Lead collection as returned by the backend.
    pub leads: Vec<Lead>,
    /// Ids from the separate booked-leads list.
    #[serde(default)]
    pub booked_ids: Vec<LeadId>,
    /// Ids from the marked-duplicates list.
    #[serde(default)]
    pub duplicate_ids: Vec<LeadId>,
    /// Ids from the exclusive-leads feed.
    #[serde(default)]
    pub exclusive_ids: Vec<LeadId>,
    /// Ids from the shared-leads feed.
    #[serde(default)]
    pub shared_ids: Vec<LeadId>,
}

impl LoadLeadsRequest {
    /// Id lists folded into one [`Reconciliation`].
    #[must_use]
    pub fn reconciliation(&mut self) -> Reconciliation {
        Reconciliation::new()
            .with_booked(std::mem::take(&mut self.booked_ids))
            .with_duplicates(std::mem::take(&mut self.duplicate_ids))
            .with_exclusive(std::mem::take(&mut self.exclusive_ids))
            .with_shared(std::mem::take(&mut self.shared_ids))
    }
}

/// Response body for `PUT /leads`.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoadLeadsResponse {
    /// Leads now held.
    pub loaded: usize,
    /// Leads dropped because of a repeated id.
    pub dropped_duplicate_ids: usize,
}

/// Request body for `PUT /leads/{id}`.
///
/// Location fields take the text typed into the edit box: a zip, or
/// `"City, ST"`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateLeadRequest {
    /// New first name.
    #[serde(default)]
    pub first_name: Option<String>,
    /// New phone.
    #[serde(default)]
    pub phone: Option<String>,
    /// New origin text.
    #[serde(default)]
    pub origin: Option<String>,
    /// New destination text.
    #[serde(default)]
    pub destination: Option<String>,
    /// New move size.
    #[serde(default)]
    pub move_size: Option<String>,
    /// New move date.
    #[serde(default)]
    pub move_date: Option<String>,
    /// New notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// New booked status.
    #[serde(default)]
    pub is_booked: Option<bool>,
}

impl UpdateLeadRequest {
    /// Converts the request into a typed draft.
    #[must_use]
    pub fn into_draft(self) -> LeadDraft {
        let mut draft = LeadDraft {
            is_booked: self.is_booked,
            ..LeadDraft::default()
        };
        let fields = [
            (EditableField::FirstName, self.first_name),
            (EditableField::Phone, self.phone),
            (EditableField::Origin, self.origin),
            (EditableField::Destination, self.destination),
            (EditableField::MoveSize, self.move_size),
            (EditableField::MoveDate, self.move_date),
            (EditableField::Notes, self.notes),
        ];
        for (field, value) in fields {
            if let Some(value) = value {
                draft.set(field, &value);
            }
        }
        draft
    }
}

/// Request body for `PUT /leads/{id}/fields/{field}`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct FieldEditRequest {
    /// Text typed into the cell.
    pub value: String,
}

impl FieldEditRequest {
    /// Draft touching only `field`.
    #[must_use]
    pub fn into_draft(self, field: EditableField) -> LeadDraft {
        let mut draft = LeadDraft::default();
        draft.set(field, &self.value);
        draft
    }
}

/// Query for `GET /vendors`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct VendorQuery {
    /// Case-insensitive substring to match.
    #[serde(default)]
    pub search: Option<String>,
}

/// Response body for `GET /vendors`.
#[derive(Debug, Serialize, ToSchema)]
pub struct VendorListResponse {
    /// Matching vendor labels, sorted.
    pub vendors: Vec<String>,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{LeadOwnership, LocationDraft};

    #[test]
    fn update_request_maps_to_draft() {
        let req = UpdateLeadRequest {
            origin: Some("Denver, CO".to_string()),
            notes: Some("vip".to_string()),
            is_booked: Some(false),
            ..UpdateLeadRequest::default()
        };
        let draft = req.into_draft();
        assert_eq!(
            draft.origin,
            Some(LocationDraft::CityState {
                city: "Denver".to_string(),
                state: "CO".to_string()
            })
        );
        assert_eq!(draft.notes.as_deref(), Some("vip"));
        assert_eq!(draft.is_booked, Some(false));
        assert!(draft.first_name.is_none());
    }

    #[test]
    fn field_edit_touches_one_field() {
        let Ok(field) = "destination".parse::<EditableField>() else {
            panic!("known field");
        };
        let draft = FieldEditRequest {
            value: "89501".to_string(),
        }
        .into_draft(field);
        assert_eq!(
            draft.destination,
            Some(LocationDraft::Zip {
                zip: "89501".to_string()
            })
        );
        assert!(draft.origin.is_none());
        assert!(draft.is_booked.is_none());
    }

    #[test]
    fn empty_request_is_empty_draft() {
        assert!(UpdateLeadRequest::default().into_draft().is_empty());
    }

    #[test]
    fn load_request_accepts_mixed_ids() {
        let json = r#"{"leads":[{"id":1,"timestamp":"2024-01-01"}],"booked_ids":[1,"2"]}"#;
        let Ok(req) = serde_json::from_str::<LoadLeadsRequest>(json) else {
            panic!("request should deserialize");
        };
        assert_eq!(req.leads.len(), 1);
        assert_eq!(req.booked_ids, [LeadId::from("1"), LeadId::from("2")]);
        assert!(req.duplicate_ids.is_empty());
    }

    #[test]
    fn load_request_folds_feeds() {
        let json = r#"{"leads":[{"id":1},{"id":2},{"id":3}],"exclusive_ids":[1],"shared_ids":["2"]}"#;
        let Ok(mut req) = serde_json::from_str::<LoadLeadsRequest>(json) else {
            panic!("request should deserialize");
        };
        let rec = req.reconciliation();
        let owners: Vec<Option<LeadOwnership>> = rec
            .annotate(std::mem::take(&mut req.leads))
            .iter()
            .map(|l| l.ownership)
            .collect();
        assert_eq!(
            owners,
            [Some(LeadOwnership::Exclusive), Some(LeadOwnership::Shared), None]
        );
    }
}
