//! # maturity-core
//!
//! The Maturity Aggregation & Sequential-Gating Engine - THE ENGINE.
//!
//! Converts raw per-item assessment statuses into a gated, multi-level
//! maturity score across a Pillar → Function → Item hierarchy, and explains
//! the gap between what has actually been completed and what the process
//! formally allows an organization to claim.
//!
//! ## Pipeline
//!
//! ```text
//! raw entities ─► StageBreakdownCalculator / CompactAssessmentDecoder
//!              ─► SequentialGatingValidator
//!              ─► StageResolver (function, then pillar)
//!              ─► HierarchyAggregator ─► AssessmentReport
//! ```
//!
//! ## Architectural Constraints
//!
//! - Pure and synchronous: no I/O, no async, no shared mutable state
//! - Deterministic: integer arithmetic only, `BTreeMap`/`BTreeSet` only
//! - Every derived value is recomputed per call; nothing is cached
//! - The pass never fails: incomplete data degrades to zeroed breakdowns

// =============================================================================
// MODULES
// =============================================================================

pub mod aggregator;
pub mod breakdown;
pub mod compact;
pub mod digest;
pub mod gating;
pub mod primitives;
pub mod resolver;
pub mod snapshot;
pub mod system;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    AssessableItem, Assessment, AssessmentResponse, Function, FunctionId, GroupId,
    ImplementationStatus, ItemGroup, ItemId, MaturityError, Pillar, PillarId,
};

// =============================================================================
// RE-EXPORTS: Engine
// =============================================================================

pub use aggregator::{
    AssessmentReport, CompactSource, Encoding, FlatSource, FunctionSummary, HierarchyAggregator,
    PillarSummary, StageSource, gated_breakdowns,
};
pub use breakdown::{
    CompletionBasis, ResponseIndex, StageBreakdown, StageBreakdownCalculator, StageCounts,
};
pub use compact::{AssessmentIndex, CompactAssessmentDecoder};
pub use digest::{canonical_report_bytes, report_checksum};
pub use gating::SequentialGatingValidator;
pub use resolver::{StageResolution, StageResolver};
pub use snapshot::{AssessmentRecords, AssessmentSnapshot, SnapshotCounts};

#[cfg(feature = "crypto-hash")]
pub use digest::report_crypto_hash;

// =============================================================================
// RE-EXPORTS: System (from system module)
// =============================================================================

pub use system::{MaturityStage, MaturityStatus};
