//! # Assessment Snapshot
//!
//! The in-memory collections the storage collaborator hands over before a
//! computation pass. A snapshot holds the hierarchy plus exactly one of the
//! two record encodings.
//!
//! Referential integrity is not checked here. Orphans are simply never
//! matched by the lookups.

use crate::aggregator::{
    AssessmentReport, CompactSource, Encoding, FlatSource, FunctionSummary, HierarchyAggregator,
    StageSource,
};
use crate::{
    AssessableItem, Assessment, AssessmentResponse, Function, FunctionId, ItemGroup, Pillar,
};
use serde::{Deserialize, Serialize};

/// Assessment records in one of the two supported encodings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "encoding", rename_all = "snake_case")]
pub enum AssessmentRecords {
    Flat {
        items: Vec<AssessableItem>,
        #[serde(default)]
        responses: Vec<AssessmentResponse>,
    },
    Compact {
        groups: Vec<ItemGroup>,
        #[serde(default)]
        assessments: Vec<Assessment>,
    },
}

impl AssessmentRecords {
    /// Encoding of these records.
    #[must_use]
    pub fn encoding(&self) -> Encoding {
        match self {
            AssessmentRecords::Flat { .. } => Encoding::Flat,
            AssessmentRecords::Compact { .. } => Encoding::Compact,
        }
    }

    /// Stage source reading these records.
    #[must_use]
    pub fn source(&self) -> Box<dyn StageSource + '_> {
        match self {
            AssessmentRecords::Flat { items, responses } => {
                Box::new(FlatSource::new(items, responses))
            }
            AssessmentRecords::Compact {
                groups,
                assessments,
            } => Box::new(CompactSource::new(groups, assessments)),
        }
    }
}

/// Collection sizes, for logging and status output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SnapshotCounts {
    pub pillars: usize,
    pub functions: usize,
    /// Items (flat) or item-groups (compact).
    pub units: usize,
    /// Responses (flat) or assessments (compact).
    pub records: usize,
}

/// Everything a computation pass reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentSnapshot {
    #[serde(default)]
    pub pillars: Vec<Pillar>,
    #[serde(default)]
    pub functions: Vec<Function>,
    pub records: AssessmentRecords,
}

impl AssessmentSnapshot {
    /// Create a snapshot.
    #[must_use]
    pub fn new(pillars: Vec<Pillar>, functions: Vec<Function>, records: AssessmentRecords) -> Self {
        Self {
            pillars,
            functions,
            records,
        }
    }

    /// Encoding of the records.
    #[must_use]
    pub fn encoding(&self) -> Encoding {
        self.records.encoding()
    }

    /// Collection sizes.
    #[must_use]
    pub fn counts(&self) -> SnapshotCounts {
        let (units, records) = match &self.records {
            AssessmentRecords::Flat { items, responses } => (items.len(), responses.len()),
            AssessmentRecords::Compact {
                groups,
                assessments,
            } => (groups.len(), assessments.len()),
        };
        SnapshotCounts {
            pillars: self.pillars.len(),
            functions: self.functions.len(),
            units,
            records,
        }
    }

    /// Run a full pass over the snapshot.
    #[must_use]
    pub fn report(&self) -> AssessmentReport {
        let source = self.records.source();
        HierarchyAggregator::new(source.as_ref(), &self.pillars, &self.functions).report()
    }

    /// Summarize one Function, if it exists in the snapshot.
    #[must_use]
    pub fn function_summary(&self, id: FunctionId) -> Option<FunctionSummary> {
        let function = self.functions.iter().find(|f| f.id == id)?;
        let source = self.records.source();
        let aggregator = HierarchyAggregator::new(source.as_ref(), &self.pillars, &self.functions);
        Some(aggregator.summarize_function(function))
    }
}

// =============================================================================
// TESTS
// =============================================================================
