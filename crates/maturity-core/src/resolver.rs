//! # Stage Resolver
//!
//! Turns gated breakdowns into two stages:
//!
//! - **achieved** (`overall_maturity_stage`): highest stage reachable under
//!   sequential gating
//! - **actual** (`actual_maturity_stage`): highest stage reached if gating
//!   is ignored
//!
//! When they differ the resolution carries a gap flag and a human-readable
//! explanation naming what blocks the actual stage.
//!
//! The pillar-level variant averages stage indices over the pillar's
//! functions and always rounds the mean up.

use crate::primitives::ceil_mean;
use crate::{MaturityStage, MaturityStatus, StageBreakdown};
use serde::{Deserialize, Serialize};

/// Prefix shared by every gap explanation.
pub const EXPLANATION_PREFIX: &str = "Sequential maturity requirements:";

/// Resolved maturity of one scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageResolution {
    /// Gated stage.
    pub overall_maturity_stage: MaturityStage,
    /// Ungated stage.
    pub actual_maturity_stage: MaturityStage,
    pub has_sequential_maturity_gap: bool,
    pub sequential_maturity_explanation: Option<String>,
}

impl StageResolution {
    /// Resolution with no gap at `stage`.
    #[must_use]
    pub fn at(stage: MaturityStage) -> Self {
        Self {
            overall_maturity_stage: stage,
            actual_maturity_stage: stage,
            has_sequential_maturity_gap: false,
            sequential_maturity_explanation: None,
        }
    }
}

impl Default for StageResolution {
    fn default() -> Self {
        Self::at(MaturityStage::FIRST)
    }
}

/// Stateless resolver for function- and pillar-level stages.
pub struct StageResolver;

impl StageResolver {
    /// Resolve one Function from its gated breakdowns (ascending stage order).
    #[must_use]
    pub fn resolve_function(breakdowns: &[StageBreakdown]) -> StageResolution {
        let actual = Self::actual_stage(breakdowns);
        let achieved = Self::achieved_stage(breakdowns);

        if actual == achieved {
            return StageResolution::at(actual);
        }

        StageResolution {
            overall_maturity_stage: achieved,
            actual_maturity_stage: actual,
            has_sequential_maturity_gap: true,
            sequential_maturity_explanation: Some(Self::function_explanation(actual, breakdowns)),
        }
    }

    /// Resolve a Pillar from the resolutions of its Functions.
    ///
    /// Both stages are `ceil(mean(index))` over the functions: actual from
    /// the functions' actual stages, achieved from their gated stages.
    #[must_use]
    pub fn resolve_pillar<'a, I>(functions: I) -> StageResolution
    where
        I: IntoIterator<Item = &'a StageResolution>,
    {
        let functions: Vec<&StageResolution> = functions.into_iter().collect();
        if functions.is_empty() {
            return StageResolution::default();
        }

        let actual = Self::ceil_mean_stage(functions.iter().map(|f| f.actual_maturity_stage));
        let achieved = Self::ceil_mean_stage(functions.iter().map(|f| f.overall_maturity_stage));

        if actual == achieved {
            return StageResolution::at(actual);
        }

        let gaps = functions
            .iter()
            .filter(|f| f.has_sequential_maturity_gap)
            .count();

        StageResolution {
            overall_maturity_stage: achieved,
            actual_maturity_stage: actual,
            has_sequential_maturity_gap: true,
            sequential_maturity_explanation: Some(format!(
                "{} {} of {} functions have incomplete earlier stages that prevent claiming their actual maturity.",
                EXPLANATION_PREFIX,
                gaps,
                functions.len()
            )),
        }
    }

    /// Highest completed stage; otherwise the stage before the lowest
    /// in-progress one; otherwise the first stage.
    fn actual_stage(breakdowns: &[StageBreakdown]) -> MaturityStage {
        let highest_completed = breakdowns
            .iter()
            .filter(|b| b.status == MaturityStatus::Completed)
            .map(|b| b.stage)
            .max_by_key(|stage| stage.index());
        if let Some(stage) = highest_completed {
            return stage;
        }

        breakdowns
            .iter()
            .filter(|b| b.status == MaturityStatus::InProgress)
            .map(|b| b.stage)
            .min_by_key(|stage| stage.index())
            .and_then(|stage| stage.previous())
            .unwrap_or(MaturityStage::FIRST)
    }

    /// Advance through completed, reachable stages; stop at the first miss.
    fn achieved_stage(breakdowns: &[StageBreakdown]) -> MaturityStage {
        let mut achieved = MaturityStage::FIRST;
        for breakdown in breakdowns {
            if !(breakdown.status.is_completed() && breakdown.can_advance_to_this_stage) {
                break;
            }
            achieved = breakdown.stage;
        }
        achieved
    }

    fn function_explanation(actual: MaturityStage, breakdowns: &[StageBreakdown]) -> String {
        let blockers: Vec<&str> = breakdowns
            .iter()
            .find(|b| b.stage == actual)
            .map(|b| b.blocked_by_previous_stages.iter().map(|s| s.name()).collect())
            .unwrap_or_default();

        match blockers.as_slice() {
            [] => format!(
                "{} Cannot advance to {} stage until all previous stages are completed.",
                EXPLANATION_PREFIX, actual
            ),
            [single] => format!(
                "{} Cannot advance to {} stage until all items in the {} stage are completed.",
                EXPLANATION_PREFIX, actual, single
            ),
            many => format!(
                "{} Cannot advance to {} stage until all items in the {} stages are completed.",
                EXPLANATION_PREFIX,
                actual,
                many.join(", ")
            ),
        }
    }

    fn ceil_mean_stage<I>(stages: I) -> MaturityStage
    where
        I: Iterator<Item = MaturityStage>,
    {
        let (sum, count) = stages.fold((0usize, 0usize), |(sum, count), stage| {
            (sum.saturating_add(stage.index()), count.saturating_add(1))
        });
        let index = ceil_mean(sum, count).min(MaturityStage::COUNT - 1);
        MaturityStage::from_index(index).unwrap_or(MaturityStage::FIRST)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SequentialGatingValidator;
    use crate::breakdown::{CompletionBasis, StageCounts};
    use crate::ImplementationStatus::{self, FullyImplemented, NotImplemented, PartiallyImplemented};
    use crate::MaturityStage::{Advanced, Initial, Optimal, Traditional};

    fn gated(stages: &[(MaturityStage, &[ImplementationStatus])]) -> Vec<StageBreakdown> {
        let raw: Vec<StageBreakdown> = stages
            .iter()
            .map(|(stage, statuses)| {
                let mut counts = StageCounts::default();
                for status in *statuses {
                    counts.record(*status);
                }
                StageBreakdown::from_counts(*stage, counts, CompletionBasis::Assessed)
            })
            .collect();
        SequentialGatingValidator::validate(&raw)
    }

    #[test]
    fn no_breakdowns_resolves_to_first_stage() {
        assert_eq!(
            StageResolver::resolve_function(&[]),
            StageResolution::at(Traditional)
        );
    }

    #[test]
    fn in_progress_pulls_actual_back_one_stage() {
        let b = gated(&[
            (Traditional, &[NotImplemented]),
            (Initial, &[NotImplemented]),
            (Advanced, &[PartiallyImplemented]),
        ]);

        let r = StageResolver::resolve_function(&b);
        assert_eq!(r.actual_maturity_stage, Initial);
        assert_eq!(r.overall_maturity_stage, Traditional);
        assert!(r.has_sequential_maturity_gap);
        assert_eq!(
            r.sequential_maturity_explanation.as_deref(),
            Some(
                "Sequential maturity requirements: Cannot advance to Initial stage until all items in the Traditional stage are completed."
            )
        );
    }

    #[test]
    fn in_progress_at_first_stage_stays_first() {
        let b = gated(&[(Traditional, &[PartiallyImplemented])]);
        assert_eq!(
            StageResolver::resolve_function(&b),
            StageResolution::at(Traditional)
        );
    }

    #[test]
    fn achieved_stops_at_first_incomplete_stage() {
        let b = gated(&[
            (Traditional, &[FullyImplemented]),
            (Initial, &[PartiallyImplemented]),
            (Advanced, &[FullyImplemented]),
            (Optimal, &[FullyImplemented]),
        ]);

        let r = StageResolver::resolve_function(&b);
        assert_eq!(r.overall_maturity_stage, Traditional);
        assert_eq!(r.actual_maturity_stage, Optimal);
        assert!(r.has_sequential_maturity_gap);
    }

    #[test]
    fn multiple_blockers_are_listed() {
        let b = gated(&[
            (Traditional, &[PartiallyImplemented]),
            (Initial, &[NotImplemented]),
            (Advanced, &[FullyImplemented]),
        ]);

        let r = StageResolver::resolve_function(&b);
        assert_eq!(
            r.sequential_maturity_explanation.as_deref(),
            Some(
                "Sequential maturity requirements: Cannot advance to Advanced stage until all items in the Traditional, Initial stages are completed."
            )
        );
    }

    #[test]
    fn pillar_without_functions() {
        let none: Vec<StageResolution> = Vec::new();
        assert_eq!(
            StageResolver::resolve_pillar(&none),
            StageResolution::at(Traditional)
        );
    }

    #[test]
    fn pillar_rounds_mean_up() {
        let functions = vec![
            StageResolution::at(Initial),
            StageResolution::at(Initial),
            StageResolution::at(Optimal),
        ];

        let r = StageResolver::resolve_pillar(&functions);
        assert_eq!(r.overall_maturity_stage, Advanced);
        assert_eq!(r.actual_maturity_stage, Advanced);
        assert!(!r.has_sequential_maturity_gap);
    }

    #[test]
    fn pillar_gap_counts_functions_with_gaps() {
        let gap = StageResolution {
            overall_maturity_stage: Traditional,
            actual_maturity_stage: Advanced,
            has_sequential_maturity_gap: true,
            sequential_maturity_explanation: None,
        };
        let functions = vec![gap, StageResolution::at(Traditional)];

        // actual: ceil((2 + 0) / 2) = 1, achieved: ceil(0 / 2) = 0
        let r = StageResolver::resolve_pillar(&functions);
        assert_eq!(r.actual_maturity_stage, Initial);
        assert_eq!(r.overall_maturity_stage, Traditional);
        assert!(r.has_sequential_maturity_gap);
        assert_eq!(
            r.sequential_maturity_explanation.as_deref(),
            Some(
                "Sequential maturity requirements: 1 of 2 functions have incomplete earlier stages that prevent claiming their actual maturity."
            )
        );
    }
}
