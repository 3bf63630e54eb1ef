//! In-place editing of a single lead row.
//!
//! At most one row is edited at a time. [`EditState`] makes that explicit,
//! and [`LeadDraft`] holds one typed slot per editable field so a field
//! name can never be misspelled into a silent no-op.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Lead, LeadId};
use crate::error::DashboardError;

/// Fields that can be edited inline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EditableField {
    /// Customer first name.
    FirstName,
    /// Customer phone.
    Phone,
    /// Origin as zip or `"City, ST"`.
    Origin,
    /// Destination as zip or `"City, ST"`.
    Destination,
    /// Move size category.
    MoveSize,
    /// Requested move date.
    MoveDate,
    /// Notes.
    Notes,
}

impl EditableField {
    /// Every editable field, in table column order.
    pub const ALL: [Self; 7] = [
        Self::FirstName,
        Self::Phone,
        Self::Origin,
        Self::Destination,
        Self::MoveSize,
        Self::MoveDate,
        Self::Notes,
    ];

    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FirstName => "first_name",
            Self::Phone => "phone",
            Self::Origin => "origin",
            Self::Destination => "destination",
            Self::MoveSize => "move_size",
            Self::MoveDate => "move_date",
            Self::Notes => "notes",
        }
    }
}

impl fmt::Display for EditableField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EditableField {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| DashboardError::InvalidRequest(format!("unknown field: {s}")))
    }
}

/// An edited location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LocationDraft {
    /// Zip code; clears city and state.
    Zip {
        /// The zip code.
        zip: String,
    },
    /// City and state; clears the zip so the fallback becomes visible.
    CityState {
        /// City name.
        city: String,
        /// State abbreviation, possibly empty.
        state: String,
    },
}

impl LocationDraft {
    /// Interprets free text from an edit box: digits (and dashes) are a
    /// zip, anything else is `City, ST` split at the last comma.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        let is_zip = !text.is_empty()
            && text.chars().all(|c| c.is_ascii_digit() || c == '-')
            && text.chars().next().is_some_and(|c| c.is_ascii_digit());
        if is_zip {
            return Self::Zip {
                zip: text.to_string(),
            };
        }
        match text.rsplit_once(',') {
            Some((city, state)) => Self::CityState {
                city: city.trim().to_string(),
                state: state.trim().to_string(),
            },
            None => Self::CityState {
                city: text.to_string(),
                state: String::new(),
            },
        }
    }

    fn write(&self, zip: &mut Option<String>, city: &mut Option<String>, state: &mut Option<String>) {
        match self {
            Self::Zip { zip: z } => {
                *zip = Some(z.clone());
                *city = None;
                *state = None;
            }
            Self::CityState { city: c, state: s } => {
                *zip = None;
                *city = Some(c.clone());
                *state = (!s.is_empty()).then(|| s.clone());
            }
        }
    }
}

/// Typed partial lead: `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LeadDraft {
    /// New first name.
    #[serde(default)]
    pub first_name: Option<String>,
    /// New phone.
    #[serde(default)]
    pub phone: Option<String>,
    /// New origin.
    #[serde(default)]
    pub origin: Option<LocationDraft>,
    /// New destination.
    #[serde(default)]
    pub destination: Option<LocationDraft>,
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

impl LeadDraft {
    /// Draft prefilled with the lead's current values, as shown when a row
    /// switches into edit mode.
    #[must_use]
    pub fn from_lead(lead: &Lead) -> Self {
        let location = |zip: &Option<String>, city: &Option<String>, state: &Option<String>| {
            match zip.as_deref().map(str::trim).filter(|z| !z.is_empty()) {
                Some(zip) => Some(LocationDraft::Zip {
                    zip: zip.to_string(),
                }),
                None if city.is_some() || state.is_some() => Some(LocationDraft::CityState {
                    city: city.clone().unwrap_or_default(),
                    state: state.clone().unwrap_or_default(),
                }),
                None => None,
            }
        };
        Self {
            first_name: lead.first_name.clone(),
            phone: lead.phone.clone(),
            origin: location(&lead.origin_zip, &lead.origin_city, &lead.origin_state),
            destination: location(
                &lead.destination_zip,
                &lead.destination_city,
                &lead.destination_state,
            ),
            move_size: lead.move_size.clone(),
            move_date: lead.move_date.clone(),
            notes: lead.notes.clone(),
            is_booked: Some(lead.is_booked),
        }
    }

    /// Sets one field from edit-box text.
    pub fn set(&mut self, field: EditableField, value: &str) {
        let text = Some(value.to_string());
        match field {
            EditableField::FirstName => self.first_name = text,
            EditableField::Phone => self.phone = text,
            EditableField::Origin => self.origin = Some(LocationDraft::parse(value)),
            EditableField::Destination => self.destination = Some(LocationDraft::parse(value)),
            EditableField::MoveSize => self.move_size = text,
            EditableField::MoveDate => self.move_date = text,
            EditableField::Notes => self.notes = text,
        }
    }

    /// Returns `true` if nothing would change.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Returns a copy of `lead` with the draft merged in.
    #[must_use]
    pub fn apply_to(&self, lead: &Lead) -> Lead {
        let mut updated = lead.clone();
        if let Some(v) = &self.first_name {
            updated.first_name = Some(v.clone());
        }
        if let Some(v) = &self.phone {
            updated.phone = Some(v.clone());
        }
        if let Some(loc) = &self.origin {
            loc.write(
                &mut updated.origin_zip,
                &mut updated.origin_city,
                &mut updated.origin_state,
            );
        }
        if let Some(loc) = &self.destination {
            loc.write(
                &mut updated.destination_zip,
                &mut updated.destination_city,
                &mut updated.destination_state,
            );
        }
        if let Some(v) = &self.move_size {
            updated.move_size = Some(v.clone());
        }
        if let Some(v) = &self.move_date {
            updated.move_date = Some(v.clone());
        }
        if let Some(v) = &self.notes {
            updated.notes = Some(v.clone());
        }
        if let Some(v) = self.is_booked {
            updated.is_booked = v;
        }
        updated
    }
}

/// Which row, if any, is being edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditState {
    /// No row is in edit mode.
    #[default]
    NotEditing,
    /// `lead_id` is in edit mode with the given draft.
    Editing {
        /// Row under edit.
        lead_id: LeadId,
        /// Pending values.
        draft: LeadDraft,
    },
}

impl EditState {
    /// Puts `lead` into edit mode, replacing any edit in progress.
    #[must_use]
    pub fn begin(lead: &Lead) -> Self {
        Self::Editing {
            lead_id: lead.id.clone(),
            draft: LeadDraft::from_lead(lead),
        }
    }

    /// Pending draft, if editing.
    #[must_use]
    pub fn draft(&self) -> Option<&LeadDraft> {
        match self {
            Self::Editing { draft, .. } => Some(draft),
            Self::NotEditing => None,
        }
    }

    /// Updates one field of the pending draft.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::NotEditing`] if no row is being edited.
    pub fn set_field(&mut self, field: EditableField, value: &str) -> Result<(), DashboardError> {
        match self {
            Self::Editing { draft, .. } => {
                draft.set(field, value);
                Ok(())
            }
            Self::NotEditing => Err(DashboardError::NotEditing),
        }
    }

    /// Updates the pending booked status.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::NotEditing`] if no row is being edited.
    pub fn set_booked(&mut self, booked: bool) -> Result<(), DashboardError> {
        match self {
            Self::Editing { draft, .. } => {
                draft.is_booked = Some(booked);
                Ok(())
            }
            Self::NotEditing => Err(DashboardError::NotEditing),
        }
    }

    /// Abandons the edit.
    pub fn cancel(&mut self) {
        *self = Self::NotEditing;
    }

    /// Ends the edit and hands back what should be saved.
    pub fn commit(&mut self) -> Option<(LeadId, LeadDraft)> {
        match std::mem::take(self) {
            Self::Editing { lead_id, draft } => Some((lead_id, draft)),
            Self::NotEditing => None,
        }
    }
}
