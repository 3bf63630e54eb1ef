//! Booked and duplicate annotation by id-set membership.
//!
//! The backend serves booked leads, flagged duplicates, and the exclusive
//! and shared admin feeds as separate lists. Before aggregation they are
//! folded into the main collection by tagging each lead whose id appears
//! in one of those sets.

use std::collections::HashSet;

use super::{Lead, LeadId, LeadOwnership};

/// Id sets to merge into a lead collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    booked: HashSet<LeadId>,
    duplicates: HashSet<LeadId>,
    exclusive: HashSet<LeadId>,
    shared: HashSet<LeadId>,
}

impl Reconciliation {
    /// Creates an empty reconciliation that leaves leads untouched.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds ids of leads known to be booked.
    #[must_use]
    pub fn with_booked(mut self, ids: impl IntoIterator<Item = LeadId>) -> Self {
        self.booked.extend(ids);
        self
    }

    /// Adds ids of leads marked as duplicates.
    #[must_use]
    pub fn with_duplicates(mut self, ids: impl IntoIterator<Item = LeadId>) -> Self {
        self.duplicates.extend(ids);
        self
    }

    /// Adds ids of the exclusive feed.
    #[must_use]
    pub fn with_exclusive(mut self, ids: impl IntoIterator<Item = LeadId>) -> Self {
        self.exclusive.extend(ids);
        self
    }

    /// Adds ids of the shared feed.
    #[must_use]
    pub fn with_shared(mut self, ids: impl IntoIterator<Item = LeadId>) -> Self {
        self.shared.extend(ids);
        self
    }

    /// Returns `true` if there is nothing to merge.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.booked.is_empty()
            && self.duplicates.is_empty()
            && self.exclusive.is_empty()
            && self.shared.is_empty()
    }

    fn ownership_of(&self, id: &LeadId) -> Option<LeadOwnership> {
        if self.exclusive.contains(id) {
            Some(LeadOwnership::Exclusive)
        } else if self.shared.contains(id) {
            Some(LeadOwnership::Shared)
        } else {
            None
        }
    }

    /// Tags leads found in the id sets. Flags already set on a lead are
    /// never cleared, and ownership sent on the lead itself is kept. An id
    /// listed in both feeds counts as exclusive.
    #[must_use]
    pub fn annotate(&self, mut leads: Vec<Lead>) -> Vec<Lead> {
        if self.is_empty() {
            return leads;
        }
        for lead in &mut leads {
            lead.is_booked |= self.booked.contains(&lead.id);
            lead.is_duplicate |= self.duplicates.contains(&lead.id);
            if lead.ownership.is_none() {
                lead.ownership = self.ownership_of(&lead.id);
            }
        }
        leads
    }
}

/// Drops repeated ids, keeping the first occurrence. Returns the number
/// of leads removed.
pub fn dedupe_by_id(leads: &mut Vec<Lead>) -> usize {
    let before = leads.len();
    let mut seen = HashSet::with_capacity(before);
    leads.retain(|lead| seen.insert(lead.id.clone()));
    before - leads.len()
}
