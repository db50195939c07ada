//! # Property-Based Tests
//!
//! Invariants that must hold for every snapshot, in both encodings:
//! - Bucket counts add up and never exceed the item total
//! - The achieved stage never exceeds the actual stage; gap iff they differ
//! - Gating annotations are self-consistent
//! - Pillar totals are the sum of their function totals
//! - Repeated passes are identical

use maturity_core::{
    AssessableItem, Assessment, AssessmentRecords, AssessmentReport, AssessmentResponse,
    AssessmentSnapshot, Function, FunctionId, GroupId, ImplementationStatus, ItemGroup, ItemId,
    MaturityStage, Pillar, PillarId, StageBreakdown, StageResolution, report_checksum,
};
use proptest::collection::vec;
use proptest::option;
use proptest::prelude::*;
use proptest::sample::select;

// =============================================================================
// STRATEGIES
// =============================================================================

fn stage() -> impl Strategy<Value = MaturityStage> {
    select(MaturityStage::ALL.to_vec())
}

fn status() -> impl Strategy<Value = ImplementationStatus> {
    select(vec![
        ImplementationStatus::NotImplemented,
        ImplementationStatus::PartiallyImplemented,
        ImplementationStatus::FullyImplemented,
        ImplementationStatus::Superseded,
    ])
}

/// Pillars and functions; function `f` belongs to pillar `f % pillars`.
fn hierarchy(pillar_count: u64, function_count: u64) -> (Vec<Pillar>, Vec<Function>) {
    let pillars = (0..pillar_count)
        .map(|p| Pillar::new(PillarId(p), format!("Pillar {p}")))
        .collect();
    let functions = (0..function_count)
        .map(|f| Function::new(FunctionId(f), PillarId(f % pillar_count), format!("Function {f}")))
        .collect();
    (pillars, functions)
}

/// Flat snapshots. Function ids may exceed the function count, producing
/// orphan items that must be ignored.
fn flat_snapshot() -> impl Strategy<Value = AssessmentSnapshot> {
    (
        1u64..4,
        1u64..7,
        vec((0u64..8, stage(), option::of(status())), 0..48),
    )
        .prop_map(|(pillar_count, function_count, raw)| {
            let (pillars, functions) = hierarchy(pillar_count, function_count);
            let mut items = Vec::new();
            let mut responses = Vec::new();
            for (i, (function, stage, status)) in raw.into_iter().enumerate() {
                let id = ItemId(i as u64);
                items.push(AssessableItem::new(id, FunctionId(function), stage));
                if let Some(status) = status {
                    responses.push(AssessmentResponse::new(id, status));
                }
            }
            AssessmentSnapshot::new(pillars, functions, AssessmentRecords::Flat { items, responses })
        })
}

fn compact_snapshot() -> impl Strategy<Value = AssessmentSnapshot> {
    let group = (
        0u64..8,
        vec(stage(), 1..4),
        option::of((option::of(stage()), stage(), status())),
    );
    (1u64..4, 1u64..7, vec(group, 0..24)).prop_map(|(pillar_count, function_count, raw)| {
        let (pillars, functions) = hierarchy(pillar_count, function_count);
        let mut groups = Vec::new();
        let mut assessments = Vec::new();
        for (i, (function, stages, assessment)) in raw.into_iter().enumerate() {
            let id = GroupId(i as u64);
            let group = stages
                .into_iter()
                .fold(ItemGroup::new(id, FunctionId(function)), |g, s| {
                    g.with_stage(s, "practice")
                });
            groups.push(group);
            if let Some((achieved, target, status)) = assessment {
                assessments.push(Assessment::new(id, achieved, target, status));
            }
        }
        AssessmentSnapshot::new(
            pillars,
            functions,
            AssessmentRecords::Compact {
                groups,
                assessments,
            },
        )
    })
}

fn any_snapshot() -> impl Strategy<Value = AssessmentSnapshot> {
    prop_oneof![flat_snapshot(), compact_snapshot()]
}

// =============================================================================
// CHECKS
// =============================================================================

fn check_breakdowns(breakdowns: &[StageBreakdown]) -> Result<(), TestCaseError> {
    for b in breakdowns {
        prop_assert_eq!(
            b.assessed_items,
            b.completed_items + b.in_progress_items + b.not_started_items
        );
        prop_assert!(b.assessed_items <= b.total_items);
        prop_assert!(b.total_items > 0, "empty stages are not reported");
        prop_assert!(b.percentage <= 100);
        prop_assert!(b.completion_percentage <= 100);
        prop_assert_eq!(
            b.can_advance_to_this_stage,
            b.blocked_by_previous_stages.is_empty()
        );
    }
    for pair in breakdowns.windows(2) {
        prop_assert!(pair[0].stage.index() < pair[1].stage.index());
    }
    if let Some(first) = breakdowns.first() {
        prop_assert!(first.can_advance_to_this_stage);
    }
    Ok(())
}

fn check_resolution(r: &StageResolution) -> Result<(), TestCaseError> {
    prop_assert!(r.overall_maturity_stage.index() <= r.actual_maturity_stage.index());
    prop_assert_eq!(
        r.has_sequential_maturity_gap,
        r.overall_maturity_stage != r.actual_maturity_stage
    );
    prop_assert_eq!(
        r.has_sequential_maturity_gap,
        r.sequential_maturity_explanation.is_some()
    );
    Ok(())
}

fn check_report(report: &AssessmentReport) -> Result<(), TestCaseError> {
    for pillar in &report.pillars {
        check_breakdowns(&pillar.stage_breakdowns)?;
        check_resolution(&pillar.resolution)?;
        prop_assert_eq!(
            pillar.total_items,
            pillar.functions.iter().map(|f| f.total_items).sum::<usize>()
        );
        prop_assert_eq!(
            pillar.total_items,
            pillar.stage_breakdowns.iter().map(|b| b.total_items).sum::<usize>()
        );
        for function in &pillar.functions {
            check_breakdowns(&function.stage_breakdowns)?;
            check_resolution(&function.resolution)?;
            prop_assert_eq!(function.pillar, pillar.id);
        }
    }
    prop_assert_eq!(
        report.total_items,
        report.pillars.iter().map(|p| p.total_items).sum::<usize>()
    );
    Ok(())
}

// =============================================================================
// PROPERTY TESTS
// =============================================================================

proptest! {
    /// Every summary in a report satisfies the breakdown and resolution invariants.
    #[test]
    fn report_invariants_hold(snapshot in any_snapshot()) {
        check_report(&snapshot.report())?;
    }

    /// Same snapshot produces structurally identical reports and digests.
    #[test]
    fn passes_are_idempotent(snapshot in any_snapshot()) {
        let first = snapshot.report();
        let second = snapshot.report();
        prop_assert_eq!(
            report_checksum(&first).expect("checksum"),
            report_checksum(&second).expect("checksum")
        );
        prop_assert_eq!(first, second);
    }

    /// Adding an unassessed item at the terminal stage never changes any
    /// resolution or assessed count.
    #[test]
    fn unassessed_terminal_items_are_inert(snapshot in flat_snapshot()) {
        let before = snapshot.report();

        let mut extended = snapshot.clone();
        if let AssessmentRecords::Flat { items, .. } = &mut extended.records {
            items.push(AssessableItem::new(
                ItemId(u64::MAX),
                FunctionId(0),
                MaturityStage::Optimal,
            ));
        }
        let after = extended.report();

        for (b, a) in before.pillars.iter().zip(after.pillars.iter()) {
            prop_assert_eq!(&b.resolution, &a.resolution);
            for (bf, af) in b.functions.iter().zip(a.functions.iter()) {
                prop_assert_eq!(&bf.resolution, &af.resolution);
                prop_assert_eq!(bf.assessed_items, af.assessed_items);
            }
        }
    }
}
