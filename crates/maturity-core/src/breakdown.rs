//! # Stage Breakdown
//!
//! Per-stage bucket counts for a scope (one Function or a whole Pillar).
//!
//! - Unassessed items count toward `total_items` only
//! - Assessed items land in exactly one of completed / in progress / not started
//! - Status is derived from the counts by a fixed priority table
//!
//! Breakdowns are derived values. They are rebuilt on every pass and never
//! mutated once handed out; the gating validator produces annotated copies.

use crate::primitives::rounded_percent;
use crate::{
    AssessableItem, AssessmentResponse, ImplementationStatus, ItemId, MaturityStage,
    MaturityStatus,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// COUNTS
// =============================================================================

/// Raw bucket counts for one stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StageCounts {
    pub total: usize,
    pub assessed: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub not_started: usize,
}

impl StageCounts {
    /// Count an item with no response.
    pub fn record_unassessed(&mut self) {
        self.total = self.total.saturating_add(1);
    }

    /// Count an item with a response of the given status.
    pub fn record(&mut self, status: ImplementationStatus) {
        self.total = self.total.saturating_add(1);
        self.assessed = self.assessed.saturating_add(1);
        match status {
            ImplementationStatus::FullyImplemented | ImplementationStatus::Superseded => {
                self.completed = self.completed.saturating_add(1);
            }
            ImplementationStatus::PartiallyImplemented => {
                self.in_progress = self.in_progress.saturating_add(1);
            }
            ImplementationStatus::NotImplemented => {
                self.not_started = self.not_started.saturating_add(1);
            }
        }
    }

    /// Count an item whose response may be absent.
    pub fn record_optional(&mut self, status: Option<ImplementationStatus>) {
        match status {
            Some(status) => self.record(status),
            None => self.record_unassessed(),
        }
    }

    /// Classify the counts into a stage status.
    ///
    /// Priority order, first match wins:
    ///
    /// | # | Condition | Status |
    /// |---|-----------|--------|
    /// | 1 | nothing assessed | `not-assessed` |
    /// | 2 | every assessed item completed | `completed` |
    /// | 3 | anything in progress or completed | `in-progress` |
    /// | 4 | every assessed item not started | `not-started` |
    /// | 5 | otherwise | `not-assessed` |
    #[must_use]
    pub fn status(&self) -> MaturityStatus {
        match self {
            c if c.assessed == 0 => MaturityStatus::NotAssessed,
            c if c.completed == c.assessed && c.completed > 0 => MaturityStatus::Completed,
            c if c.in_progress > 0 || c.completed > 0 => MaturityStatus::InProgress,
            c if c.not_started == c.assessed => MaturityStatus::NotStarted,
            _ => MaturityStatus::NotAssessed,
        }
    }
}

// =============================================================================
// COMPLETION BASIS
// =============================================================================

/// Denominator used for `completion_percentage`.
///
/// The flat encoding divides by assessed items, the compact encoding by all
/// items. Both are kept as observed until the product decides which one is
/// intended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionBasis {
    Assessed,
    Total,
}

// =============================================================================
// STAGE BREAKDOWN
// =============================================================================

/// Derived per-stage summary for a scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageBreakdown {
    pub stage: MaturityStage,
    pub total_items: usize,
    pub assessed_items: usize,
    pub completed_items: usize,
    pub in_progress_items: usize,
    pub not_started_items: usize,
    /// Share of items that have been assessed.
    pub percentage: u8,
    /// Share of items that are completed, over the encoding's basis.
    pub completion_percentage: u8,
    pub status: MaturityStatus,
    /// Filled in by the gating validator.
    pub can_advance_to_this_stage: bool,
    /// Filled in by the gating validator.
    pub blocked_by_previous_stages: Vec<MaturityStage>,
}

impl StageBreakdown {
    /// Build an un-gated breakdown from counts.
    ///
    /// Gating fields start open (`can_advance_to_this_stage = true`, no
    /// blockers) until [`crate::SequentialGatingValidator`] annotates them.
    #[must_use]
    pub fn from_counts(stage: MaturityStage, counts: StageCounts, basis: CompletionBasis) -> Self {
        let completion_whole = match basis {
            CompletionBasis::Assessed => counts.assessed,
            CompletionBasis::Total => counts.total,
        };

        Self {
            stage,
            total_items: counts.total,
            assessed_items: counts.assessed,
            completed_items: counts.completed,
            in_progress_items: counts.in_progress,
            not_started_items: counts.not_started,
            percentage: rounded_percent(counts.assessed, counts.total),
            completion_percentage: rounded_percent(counts.completed, completion_whole),
            status: counts.status(),
            can_advance_to_this_stage: true,
            blocked_by_previous_stages: Vec::new(),
        }
    }

    /// An all-zero breakdown for a stage with no items.
    #[must_use]
    pub fn empty(stage: MaturityStage) -> Self {
        Self::from_counts(stage, StageCounts::default(), CompletionBasis::Assessed)
    }

    /// Check if the stage has any items in scope.
    #[must_use]
    pub fn is_reported(&self) -> bool {
        self.total_items > 0
    }
}

// =============================================================================
// RESPONSE INDEX
// =============================================================================

/// Lookup of the response status for each item.
///
/// At most one response per item is an input invariant. If the collection
/// violates it anyway, the first response seen for an item wins. Responses
/// pointing at unknown items simply never get looked up.
#[derive(Debug, Clone, Default)]
pub struct ResponseIndex {
    by_item: BTreeMap<ItemId, ImplementationStatus>,
}

impl ResponseIndex {
    /// Build the index from a response collection.
    #[must_use]
    pub fn new(responses: &[AssessmentResponse]) -> Self {
        let mut by_item = BTreeMap::new();
        for response in responses {
            by_item.entry(response.item).or_insert(response.status);
        }
        Self { by_item }
    }

    /// Status recorded for an item, if any.
    #[must_use]
    pub fn status_of(&self, item: ItemId) -> Option<ImplementationStatus> {
        self.by_item.get(&item).copied()
    }

    /// Number of distinct items with a response.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_item.len()
    }

    /// Check if no responses were indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_item.is_empty()
    }
}

// =============================================================================
// CALCULATOR
// =============================================================================

/// Stateless calculator for the flat item + response encoding.
pub struct StageBreakdownCalculator;

impl StageBreakdownCalculator {
    /// Count the given items against their responses.
    ///
    /// `items` must already be restricted to `stage` and to the scope being
    /// summarized; this function does not filter.
    #[must_use]
    pub fn calculate<'a, I>(stage: MaturityStage, items: I, responses: &ResponseIndex) -> StageBreakdown
    where
        I: IntoIterator<Item = &'a AssessableItem>,
    {
        let mut counts = StageCounts::default();
        for item in items {
            counts.record_optional(responses.status_of(item.id));
        }
        StageBreakdown::from_counts(stage, counts, CompletionBasis::Assessed)
    }
}

// =============================================================================
// TESTS
// =============================================================================
