//! Dashboard service: loads leads, renders views, applies edits.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Utc};

use crate::config::DashboardConfig;
use crate::domain::lead_book::LoadSummary;
use crate::domain::pagination::paginate;
use crate::domain::view::{compose_view, search_vendors};
use crate::domain::{
    BucketLimits, DashboardView, EditState, Lead, LeadBook, LeadDraft, LeadId, PageInfo,
    Reconciliation, VendorScope, ViewParams,
};
use crate::error::DashboardError;

/// Orchestration layer for every dashboard operation.
///
/// Holds the shared [`LeadBook`] plus the display settings taken from
/// [`DashboardConfig`]. Views are recomputed from a fresh snapshot on each
/// call; nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct DashboardService {
    book: Arc<LeadBook>,
    limits: BucketLimits,
    offset: FixedOffset,
}

impl DashboardService {
    /// Creates a new `DashboardService`.
    #[must_use]
    pub fn new(book: Arc<LeadBook>, config: &DashboardConfig) -> Self {
        Self {
            book,
            limits: config.bucket_limits(),
            offset: config.display_offset(),
        }
    }

    /// Returns a reference to the inner [`LeadBook`].
    #[must_use]
    pub fn book(&self) -> &Arc<LeadBook> {
        &self.book
    }

    /// Replaces the loaded collection.
    pub async fn load_leads(&self, leads: Vec<Lead>, reconciliation: &Reconciliation) -> LoadSummary {
        let received = leads.len();
        let summary = self.book.replace(leads, reconciliation).await;
        if summary.duplicate_ids > 0 {
            tracing::warn!(
                dropped = summary.duplicate_ids,
                "dropped leads with repeated ids"
            );
        }
        tracing::info!(received, loaded = summary.loaded, "leads loaded");
        summary
    }

    /// Renders the dashboard as of now.
    pub async fn view(&self, params: &ViewParams) -> DashboardView {
        self.view_at(params, Utc::now()).await
    }

    /// Renders the dashboard as of `now`; "today" is taken in the display
    /// timezone.
    pub async fn view_at(&self, params: &ViewParams, now: DateTime<Utc>) -> DashboardView {
        let leads = self.book.snapshot().await;
        let today = now.with_timezone(&self.offset).date_naive();
        let view = compose_view(
            &leads,
            params,
            today,
            self.offset,
            &self.limits,
            &mut rand::thread_rng(),
        );
        tracing::debug!(
            role = %params.role,
            granularity = %params.granularity,
            buckets = view.buckets.len(),
            excluded = view.excluded_from_chart,
            "dashboard view computed"
        );
        view
    }

    /// Fetches one lead.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::LeadNotFound`] if the id is not loaded.
    pub async fn get_lead(&self, id: &LeadId) -> Result<Lead, DashboardError> {
        self.book.get(id).await
    }

    /// Applies `draft` to the stored lead and returns the updated lead.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::InvalidRequest`] for an empty draft and
    /// [`DashboardError::LeadNotFound`] if the id is not loaded.
    pub async fn update_lead(&self, id: &LeadId, draft: &LeadDraft) -> Result<Lead, DashboardError> {
        if draft.is_empty() {
            return Err(DashboardError::InvalidRequest(
                "update contains no fields".to_string(),
            ));
        }
        let updated = self.book.apply_update(id, draft).await?;
        tracing::info!(lead_id = %id, booked = updated.is_booked, "lead updated");
        Ok(updated)
    }

    /// Commits an in-progress edit, leaving `state` as `NotEditing`.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::NotEditing`] if no row is being edited,
    /// otherwise whatever [`Self::update_lead`] returns.
    pub async fn commit_edit(&self, state: &mut EditState) -> Result<Lead, DashboardError> {
        let (id, draft) = state.commit().ok_or(DashboardError::NotEditing)?;
        self.update_lead(&id, &draft).await
    }

    /// Page of duplicate or invalid leads visible under `scope`.
    pub async fn flagged(
        &self,
        scope: &VendorScope,
        page: usize,
        page_size: usize,
    ) -> (Vec<Lead>, PageInfo) {
        let leads = self
            .book
            .filtered(|l| l.is_flagged() && scope.admits(l))
            .await;
        paginate(&leads, page, page_size)
    }

    /// Page of booked leads visible under `scope`.
    pub async fn booked(
        &self,
        scope: &VendorScope,
        page: usize,
        page_size: usize,
    ) -> (Vec<Lead>, PageInfo) {
        let leads = self
            .book
            .filtered(|l| l.is_booked && scope.admits(l))
            .await;
        paginate(&leads, page, page_size)
    }

    /// Vendor labels matching `term`.
    pub async fn vendors(&self, term: &str) -> Vec<String> {
        search_vendors(&self.book.snapshot().await, term)
    }
}
