//! In-memory holder for the most recently loaded lead collection.
//!
//! [`LeadBook`] keeps the collection sorted newest first behind a
//! [`tokio::sync::RwLock`]. Views read a snapshot; edits replace single
//! entries in place (the optimistic update shown before the backend
//! confirms the write).

use std::collections::HashMap;

use tokio::sync::RwLock;

use super::edit_state::LeadDraft;
use super::lead::sort_newest_first;
use super::reconcile::{Reconciliation, dedupe_by_id};
use super::{Lead, LeadId};
use crate::error::DashboardError;

#[derive(Debug, Default)]
struct LeadSet {
    leads: Vec<Lead>,
    positions: HashMap<LeadId, usize>,
}

impl LeadSet {
    fn new(leads: Vec<Lead>) -> Self {
        let positions = leads
            .iter()
            .enumerate()
            .map(|(i, lead)| (lead.id.clone(), i))
            .collect();
        Self { leads, positions }
    }

    fn get(&self, id: &LeadId) -> Option<&Lead> {
        self.positions.get(id).and_then(|&i| self.leads.get(i))
    }

    fn get_mut(&mut self, id: &LeadId) -> Option<&mut Lead> {
        self.positions.get(id).and_then(|&i| self.leads.get_mut(i))
    }
}

/// Summary of a [`LeadBook::replace`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadSummary {
    /// Leads now held.
    pub loaded: usize,
    /// Leads dropped because their id repeated an earlier one.
    pub duplicate_ids: usize,
}

/// Current lead collection shared by all handlers.
///
/// Replacing the collection takes the write lock once; reads clone out
/// what they need so the lock is never held across a view computation.
#[derive(Debug, Default)]
pub struct LeadBook {
    inner: RwLock<LeadSet>,
}

impl LeadBook {
    /// Creates an empty book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the collection: dedupes ids, applies `reconciliation`, and
    /// sorts newest first.
    pub async fn replace(&self, leads: Vec<Lead>, reconciliation: &Reconciliation) -> LoadSummary {
        let mut leads = reconciliation.annotate(leads);
        let duplicate_ids = dedupe_by_id(&mut leads);
        sort_newest_first(&mut leads);
        let loaded = leads.len();
        *self.inner.write().await = LeadSet::new(leads);
        LoadSummary {
            loaded,
            duplicate_ids,
        }
    }

    /// Clone of the whole collection, newest first.
    pub async fn snapshot(&self) -> Vec<Lead> {
        self.inner.read().await.leads.clone()
    }

    /// Clone of the leads matching `pred`, order preserved.
    pub async fn filtered<F>(&self, pred: F) -> Vec<Lead>
    where
        F: Fn(&Lead) -> bool,
    {
        self.inner
            .read()
            .await
            .leads
            .iter()
            .filter(|&l| pred(l))
            .cloned()
            .collect()
    }

    /// Looks up a single lead.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::LeadNotFound`] if `id` is not held.
    pub async fn get(&self, id: &LeadId) -> Result<Lead, DashboardError> {
        self.inner
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| DashboardError::LeadNotFound(id.clone()))
    }

    /// Merges `draft` into the stored lead and returns the updated copy.
    ///
    /// Position is kept: an edit never changes the timestamp, so the sort
    /// order stays valid.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::LeadNotFound`] if `id` is not held.
    pub async fn apply_update(&self, id: &LeadId, draft: &LeadDraft) -> Result<Lead, DashboardError> {
        let mut set = self.inner.write().await;
        let lead = set
            .get_mut(id)
            .ok_or_else(|| DashboardError::LeadNotFound(id.clone()))?;
        *lead = draft.apply_to(lead);
        Ok(lead.clone())
    }

    /// Leads flagged duplicate or invalid.
    pub async fn duplicates(&self) -> Vec<Lead> {
        self.filtered(Lead::is_flagged).await
    }

    /// Booked leads.
    pub async fn booked(&self) -> Vec<Lead> {
        self.filtered(|l| l.is_booked).await
    }

    /// Number of leads held.
    pub async fn len(&self) -> usize {
        self.inner.read().await.leads.len()
    }

    /// Returns `true` if nothing is loaded.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.leads.is_empty()
    }
}
