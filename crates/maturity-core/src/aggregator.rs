//! # Hierarchy Aggregator
//!
//! Orchestrates a full pass over the Pillar → Function → Stage tree:
//!
//! ```text
//! StageSource (flat | compact)      per stage, per scope
//!        │
//!        ▼
//! drop empty stages ─► SequentialGatingValidator ─► StageResolver
//!        │                                              │
//!        ▼                                              ▼
//! FunctionSummary ──(resolutions)──► PillarSummary ─► AssessmentReport
//! ```
//!
//! Pillar breakdowns are recomputed against the pillar-wide item set, not
//! summed from function breakdowns. Pillar stages, however, come from the
//! function resolutions.
//!
//! Nothing here is cached. Each call walks the borrowed input collections
//! and builds fresh output, so concurrent passes need no synchronization.

use crate::breakdown::ResponseIndex;
use crate::compact::AssessmentIndex;
use crate::primitives::rounded_percent;
use crate::{
    AssessableItem, Assessment, AssessmentResponse, CompactAssessmentDecoder, Function,
    FunctionId, ItemGroup, MaturityStage, Pillar, PillarId, SequentialGatingValidator,
    StageBreakdown, StageBreakdownCalculator, StageResolution, StageResolver,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// =============================================================================
// ENCODINGS
// =============================================================================

/// Which input encoding produced a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Encoding {
    /// One response per stage-bound item.
    Flat,
    /// One consolidated assessment per multi-stage item-group.
    Compact,
}

impl std::fmt::Display for Encoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Encoding::Flat => f.write_str("flat"),
            Encoding::Compact => f.write_str("compact"),
        }
    }
}

/// Anything that can decode raw assessment data into a stage breakdown.
///
/// Gating, resolution and aggregation are written once against this trait.
/// Implementors must be pure: the same stage and scope always yield the same
/// breakdown.
pub trait StageSource {
    /// Encoding this source reads.
    fn encoding(&self) -> Encoding;

    /// Un-gated breakdown of `stage` over the items of the functions in `scope`.
    fn breakdown(&self, stage: MaturityStage, scope: &BTreeSet<FunctionId>) -> StageBreakdown;
}

/// Flat encoding: stage-bound items plus at most one response each.
#[derive(Debug, Clone)]
pub struct FlatSource<'a> {
    items: &'a [AssessableItem],
    responses: ResponseIndex,
}

impl<'a> FlatSource<'a> {
    /// Index the responses and borrow the items.
    #[must_use]
    pub fn new(items: &'a [AssessableItem], responses: &[AssessmentResponse]) -> Self {
        Self {
            items,
            responses: ResponseIndex::new(responses),
        }
    }
}

impl StageSource for FlatSource<'_> {
    fn encoding(&self) -> Encoding {
        Encoding::Flat
    }

    fn breakdown(&self, stage: MaturityStage, scope: &BTreeSet<FunctionId>) -> StageBreakdown {
        let in_scope = self
            .items
            .iter()
            .filter(|item| item.stage == stage && scope.contains(&item.function));
        StageBreakdownCalculator::calculate(stage, in_scope, &self.responses)
    }
}

/// Compact encoding: multi-stage item-groups plus one assessment each.
#[derive(Debug, Clone)]
pub struct CompactSource<'a> {
    groups: &'a [ItemGroup],
    assessments: AssessmentIndex,
}

impl<'a> CompactSource<'a> {
    /// Index the assessments and borrow the groups.
    #[must_use]
    pub fn new(groups: &'a [ItemGroup], assessments: &[Assessment]) -> Self {
        Self {
            groups,
            assessments: AssessmentIndex::new(assessments),
        }
    }
}

impl StageSource for CompactSource<'_> {
    fn encoding(&self) -> Encoding {
        Encoding::Compact
    }

    fn breakdown(&self, stage: MaturityStage, scope: &BTreeSet<FunctionId>) -> StageBreakdown {
        let in_scope = self
            .groups
            .iter()
            .filter(|group| scope.contains(&group.function));
        CompactAssessmentDecoder::decode(stage, in_scope, &self.assessments)
    }
}

/// Reported, gated breakdowns of every stage for a scope.
///
/// Stages without items are dropped before gating, so they neither block
/// later stages nor appear in the output.
#[must_use]
pub fn gated_breakdowns<S>(source: &S, scope: &BTreeSet<FunctionId>) -> Vec<StageBreakdown>
where
    S: StageSource + ?Sized,
{
    let reported: Vec<StageBreakdown> = MaturityStage::ALL
        .iter()
        .map(|stage| source.breakdown(*stage, scope))
        .filter(StageBreakdown::is_reported)
        .collect();
    SequentialGatingValidator::validate(&reported)
}

// =============================================================================
// SUMMARIES
// =============================================================================

/// Resolved maturity of one Function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionSummary {
    pub id: FunctionId,
    pub pillar: PillarId,
    pub name: String,
    pub total_items: usize,
    pub assessed_items: usize,
    pub assessment_percentage: u8,
    pub stage_breakdowns: Vec<StageBreakdown>,
    pub resolution: StageResolution,
}

/// Resolved maturity of one Pillar and its Functions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PillarSummary {
    pub id: PillarId,
    pub name: String,
    /// Sum of the functions' totals.
    pub total_items: usize,
    /// Sum of the functions' assessed counts.
    pub assessed_items: usize,
    pub assessment_percentage: u8,
    /// Recomputed over the pillar-wide item set.
    pub stage_breakdowns: Vec<StageBreakdown>,
    pub functions: Vec<FunctionSummary>,
    /// Derived from the function resolutions.
    pub resolution: StageResolution,
}

impl PillarSummary {
    /// Number of functions whose own resolution has a gap.
    #[must_use]
    pub fn functions_with_gap(&self) -> usize {
        self.functions
            .iter()
            .filter(|f| f.resolution.has_sequential_maturity_gap)
            .count()
    }
}

/// Output of a full pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentReport {
    pub encoding: Encoding,
    pub total_items: usize,
    pub assessed_items: usize,
    pub assessment_percentage: u8,
    pub pillars: Vec<PillarSummary>,
}

impl AssessmentReport {
    /// Find a function summary anywhere in the report.
    #[must_use]
    pub fn function(&self, id: FunctionId) -> Option<&FunctionSummary> {
        self.pillars
            .iter()
            .flat_map(|p| p.functions.iter())
            .find(|f| f.id == id)
    }
}

// =============================================================================
// AGGREGATOR
// =============================================================================

/// Builds summaries for the whole hierarchy from a [`StageSource`].
///
/// Holds only borrowed, read-only collaborators.
pub struct HierarchyAggregator<'a, S: ?Sized> {
    source: &'a S,
    pillars: &'a [Pillar],
    functions: &'a [Function],
}

impl<'a, S> HierarchyAggregator<'a, S>
where
    S: StageSource + ?Sized,
{
    /// Create an aggregator over the given hierarchy.
    #[must_use]
    pub fn new(source: &'a S, pillars: &'a [Pillar], functions: &'a [Function]) -> Self {
        Self {
            source,
            pillars,
            functions,
        }
    }

    /// Summarize a single Function.
    #[must_use]
    pub fn summarize_function(&self, function: &Function) -> FunctionSummary {
        let scope = BTreeSet::from([function.id]);
        let stage_breakdowns = gated_breakdowns(self.source, &scope);
        let resolution = StageResolver::resolve_function(&stage_breakdowns);

        let total_items = stage_breakdowns.iter().map(|b| b.total_items).sum();
        let assessed_items = stage_breakdowns.iter().map(|b| b.assessed_items).sum();

        FunctionSummary {
            id: function.id,
            pillar: function.pillar,
            name: function.name.clone(),
            total_items,
            assessed_items,
            assessment_percentage: rounded_percent(assessed_items, total_items),
            stage_breakdowns,
            resolution,
        }
    }

    /// Summarize a Pillar and every Function tagged with it.
    #[must_use]
    pub fn summarize_pillar(&self, pillar: &Pillar) -> PillarSummary {
        let members: Vec<&Function> = self
            .functions
            .iter()
            .filter(|f| f.pillar == pillar.id)
            .collect();

        let functions: Vec<FunctionSummary> = members
            .iter()
            .map(|f| self.summarize_function(f))
            .collect();

        let total_items = functions.iter().map(|f| f.total_items).sum();
        let assessed_items = functions.iter().map(|f| f.assessed_items).sum();

        let scope: BTreeSet<FunctionId> = members.iter().map(|f| f.id).collect();
        let stage_breakdowns = gated_breakdowns(self.source, &scope);
        let resolution = StageResolver::resolve_pillar(functions.iter().map(|f| &f.resolution));

        PillarSummary {
            id: pillar.id,
            name: pillar.name.clone(),
            total_items,
            assessed_items,
            assessment_percentage: rounded_percent(assessed_items, total_items),
            stage_breakdowns,
            functions,
            resolution,
        }
    }

    /// Summarize every Pillar, in input order.
    #[must_use]
    pub fn aggregate(&self) -> Vec<PillarSummary> {
        self.pillars
            .iter()
            .map(|p| self.summarize_pillar(p))
            .collect()
    }

    /// Full pass with report-level roll-ups.
    #[must_use]
    pub fn report(&self) -> AssessmentReport {
        let pillars = self.aggregate();
        let total_items = pillars.iter().map(|p| p.total_items).sum();
        let assessed_items = pillars.iter().map(|p| p.assessed_items).sum();

        AssessmentReport {
            encoding: self.source.encoding(),
            total_items,
            assessed_items,
            assessment_percentage: rounded_percent(assessed_items, total_items),
            pillars,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
