//! # Compact Assessment Decoder
//!
//! Reconstructs per-stage bucket counts from the compact encoding, where an
//! item-group spans several stages but carries a single consolidated
//! assessment: an achieved-stage pointer, a target-stage pointer and the
//! status of the work at the target.
//!
//! For a stage `S` at index `i`:
//!
//! | Condition | Bucket |
//! |-----------|--------|
//! | no assessment for the group | unassessed |
//! | `achieved > i` | completed |
//! | `achieved == i` | by `implementation_status` |
//! | `target == i`, or `achieved < i` and status is not `NotImplemented` | by `implementation_status` |
//! | otherwise | not started |
//!
//! An absent achieved pointer orders below every stage.

use crate::breakdown::{CompletionBasis, StageBreakdown, StageCounts};
use crate::{Assessment, GroupId, ImplementationStatus, ItemGroup, MaturityStage};
use std::collections::BTreeMap;

/// Lookup of the consolidated assessment for each group.
///
/// First assessment seen for a group wins.
#[derive(Debug, Clone, Default)]
pub struct AssessmentIndex {
    by_group: BTreeMap<GroupId, Assessment>,
}

impl AssessmentIndex {
    /// Build the index from an assessment collection.
    #[must_use]
    pub fn new(assessments: &[Assessment]) -> Self {
        let mut by_group = BTreeMap::new();
        for assessment in assessments {
            by_group.entry(assessment.group).or_insert(*assessment);
        }
        Self { by_group }
    }

    /// Assessment recorded for a group, if any.
    #[must_use]
    pub fn get(&self, group: GroupId) -> Option<&Assessment> {
        self.by_group.get(&group)
    }

    /// Number of distinct assessed groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_group.len()
    }

    /// Check if no assessments were indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_group.is_empty()
    }
}

/// Stateless decoder for the compact two-pointer encoding.
pub struct CompactAssessmentDecoder;

impl CompactAssessmentDecoder {
    /// Effective status of one group at `stage`.
    ///
    /// Returns `None` when the group is unassessed. Surpassed stages decode
    /// to `FullyImplemented`, untouched ones to `NotImplemented`.
    #[must_use]
    pub fn status_at(
        stage: MaturityStage,
        assessment: Option<&Assessment>,
    ) -> Option<ImplementationStatus> {
        let assessment = assessment?;
        let i = stage.index();
        let achieved = assessment.achieved_stage.map(MaturityStage::index);
        let target = assessment.target_stage.index();
        let status = assessment.implementation_status;

        let decoded = match achieved {
            Some(a) if a > i => ImplementationStatus::FullyImplemented,
            Some(a) if a == i => status,
            _ if target == i => status,
            // achieved is below i (or absent) from here on
            _ if status != ImplementationStatus::NotImplemented => status,
            _ => ImplementationStatus::NotImplemented,
        };
        Some(decoded)
    }

    /// Decode the bucket counts at `stage` for the given groups.
    ///
    /// Groups without a description at `stage` contribute nothing. `groups`
    /// must already be restricted to the scope being summarized.
    #[must_use]
    pub fn decode<'a, I>(
        stage: MaturityStage,
        groups: I,
        assessments: &AssessmentIndex,
    ) -> StageBreakdown
    where
        I: IntoIterator<Item = &'a ItemGroup>,
    {
        let mut counts = StageCounts::default();
        for group in groups.into_iter().filter(|g| g.spans(stage)) {
            counts.record_optional(Self::status_at(stage, assessments.get(group.id)));
        }
        StageBreakdown::from_counts(stage, counts, CompletionBasis::Total)
    }
}

// =============================================================================
// TESTS
// =============================================================================
