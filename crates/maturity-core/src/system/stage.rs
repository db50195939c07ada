//! # Maturity Stages
//!
//! The fixed, totally ordered sequence of maturity stages and the per-stage
//! completion status derived from assessment counts.
//!
//! ## Stage Definitions
//!
//! | Index | Stage | Meaning |
//! |-------|-------|---------|
//! | 0 | Traditional | Baseline, manual or static practices |
//! | 1 | Initial | First automation and cross-cutting coordination |
//! | 2 | Advanced | Centralized, policy-driven practices |
//! | 3 | Optimal | Fully automated, dynamic, continuously tuned |
//!
//! ## Ordering
//!
//! Order is load-bearing. Every "higher/lower stage" comparison in this crate
//! goes through [`MaturityStage::index`]; names are for display only.

use crate::MaturityError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

// =============================================================================
// STAGE ENUM
// =============================================================================

/// One of the four ordered maturity stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MaturityStage {
    /// Index 0.
    Traditional,
    /// Index 1.
    Initial,
    /// Index 2.
    Advanced,
    /// Index 3.
    Optimal,
}

impl MaturityStage {
    /// All stages in ascending order.
    pub const ALL: [MaturityStage; 4] = [
        MaturityStage::Traditional,
        MaturityStage::Initial,
        MaturityStage::Advanced,
        MaturityStage::Optimal,
    ];

    /// The lowest stage, used as the fallback resolution.
    pub const FIRST: MaturityStage = MaturityStage::Traditional;

    /// Number of stages.
    pub const COUNT: usize = Self::ALL.len();

    /// Zero-based position of this stage in [`MaturityStage::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            MaturityStage::Traditional => 0,
            MaturityStage::Initial => 1,
            MaturityStage::Advanced => 2,
            MaturityStage::Optimal => 3,
        }
    }

    /// Stage at the given index, if in range.
    #[must_use]
    pub fn from_index(index: usize) -> Option<MaturityStage> {
        Self::ALL.get(index).copied()
    }

    /// Get the stage name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            MaturityStage::Traditional => "Traditional",
            MaturityStage::Initial => "Initial",
            MaturityStage::Advanced => "Advanced",
            MaturityStage::Optimal => "Optimal",
        }
    }

    /// Get the next stage, if any.
    #[must_use]
    pub fn next(&self) -> Option<MaturityStage> {
        Self::from_index(self.index().saturating_add(1))
    }

    /// Get the previous stage, if any.
    #[must_use]
    pub fn previous(&self) -> Option<MaturityStage> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }

    /// Check if this stage is terminal (Optimal).
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.next().is_none()
    }
}

impl std::fmt::Display for MaturityStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MaturityStage {
    type Err = MaturityError;

    /// Parse a stage name, ignoring ASCII case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|stage| stage.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| MaturityError::UnknownStage(s.to_string()))
    }
}

// =============================================================================
// STAGE STATUS
// =============================================================================

/// Completion status of one stage within a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MaturityStatus {
    /// No item at this stage has a response.
    NotAssessed,
    /// Every assessed item is not implemented.
    NotStarted,
    /// Some work is done or underway, but not everything assessed is complete.
    InProgress,
    /// Every assessed item is complete.
    Completed,
}

impl MaturityStatus {
    /// Wire label, e.g. `"in-progress"`.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            MaturityStatus::NotAssessed => "not-assessed",
            MaturityStatus::NotStarted => "not-started",
            MaturityStatus::InProgress => "in-progress",
            MaturityStatus::Completed => "completed",
        }
    }

    /// Check if the stage counts as completed for gating.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self, MaturityStatus::Completed)
    }
}

impl std::fmt::Display for MaturityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// TESTS
// =============================================================================
