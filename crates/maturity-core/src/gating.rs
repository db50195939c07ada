//! # Sequential Gating
//!
//! A stage can only be credited once every earlier stage is completed.
//!
//! The validator annotates an ordered list of breakdowns with
//! `can_advance_to_this_stage` and `blocked_by_previous_stages`. It returns
//! a new list; the input is left untouched.

use crate::StageBreakdown;

/// Stateless sequential-gating validator.
pub struct SequentialGatingValidator;

impl SequentialGatingValidator {
    /// Annotate breakdowns given in ascending stage order.
    ///
    /// - The first breakdown is always reachable.
    /// - Breakdown `i` is reachable iff every breakdown before it is completed.
    /// - Blockers are the stages before `i` that are not completed, in order.
    #[must_use]
    pub fn validate(breakdowns: &[StageBreakdown]) -> Vec<StageBreakdown> {
        breakdowns
            .iter()
            .enumerate()
            .map(|(i, breakdown)| {
                let blocked_by: Vec<_> = breakdowns[..i]
                    .iter()
                    .filter(|earlier| !earlier.status.is_completed())
                    .map(|earlier| earlier.stage)
                    .collect();

                StageBreakdown {
                    can_advance_to_this_stage: blocked_by.is_empty(),
                    blocked_by_previous_stages: blocked_by,
                    ..breakdown.clone()
                }
            })
            .collect()
    }
}

// =============================================================================
// TESTS
// =============================================================================
