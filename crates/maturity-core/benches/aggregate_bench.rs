//! # Aggregation Benchmarks
//!
//! Performance benchmarks for full maturity passes over both encodings.
//!
//! Run with: `cargo bench -p maturity-core`

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use maturity_core::{
    AssessableItem, Assessment, AssessmentRecords, AssessmentResponse, AssessmentSnapshot,
    Function, FunctionId, GroupId, ImplementationStatus, ItemGroup, ItemId, MaturityStage, Pillar,
    PillarId, report_checksum,
};
use std::hint::black_box;

const PILLARS: u64 = 5;
const FUNCTIONS_PER_PILLAR: u64 = 4;

fn hierarchy() -> (Vec<Pillar>, Vec<Function>) {
    let pillars = (0..PILLARS)
        .map(|p| Pillar::new(PillarId(p), format!("Pillar {p}")))
        .collect();
    let functions = (0..PILLARS * FUNCTIONS_PER_PILLAR)
        .map(|f| Function::new(FunctionId(f), PillarId(f % PILLARS), format!("Function {f}")))
        .collect();
    (pillars, functions)
}

fn status_for(i: usize) -> ImplementationStatus {
    match i % 4 {
        0 => ImplementationStatus::FullyImplemented,
        1 => ImplementationStatus::PartiallyImplemented,
        2 => ImplementationStatus::Superseded,
        _ => ImplementationStatus::NotImplemented,
    }
}

/// Flat snapshot with N items spread over every function and stage.
/// Every third item is left unassessed.
fn create_flat_snapshot(size: usize) -> AssessmentSnapshot {
    let (pillars, functions) = hierarchy();
    let function_count = functions.len();

    let mut items = Vec::with_capacity(size);
    let mut responses = Vec::with_capacity(size);
    for i in 0..size {
        let stage = MaturityStage::ALL[i % MaturityStage::COUNT];
        let function = FunctionId((i % function_count) as u64);
        items.push(AssessableItem::new(ItemId(i as u64), function, stage));
        if i % 3 != 0 {
            responses.push(AssessmentResponse::new(ItemId(i as u64), status_for(i)));
        }
    }

    AssessmentSnapshot::new(pillars, functions, AssessmentRecords::Flat { items, responses })
}

/// Compact snapshot with N groups, each spanning all four stages.
fn create_compact_snapshot(size: usize) -> AssessmentSnapshot {
    let (pillars, functions) = hierarchy();
    let function_count = functions.len();

    let mut groups = Vec::with_capacity(size);
    let mut assessments = Vec::with_capacity(size);
    for i in 0..size {
        let id = GroupId(i as u64);
        let group = MaturityStage::ALL.iter().fold(
            ItemGroup::new(id, FunctionId((i % function_count) as u64)),
            |g, stage| g.with_stage(*stage, stage.name()),
        );
        groups.push(group);
        if i % 3 != 0 {
            let achieved = MaturityStage::from_index(i % MaturityStage::COUNT);
            let target = achieved.and_then(|s| s.next()).or(achieved);
            if let Some(target) = target {
                assessments.push(Assessment::new(id, achieved, target, status_for(i)));
            }
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
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_flat_report(c: &mut Criterion) {
    let mut group = c.benchmark_group("flat_report");

    for size in [100, 1000, 10000].iter() {
        let snapshot = create_flat_snapshot(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &snapshot, |b, snapshot| {
            b.iter(|| black_box(snapshot.report()));
        });
    }

    group.finish();
}

fn bench_compact_report(c: &mut Criterion) {
    let mut group = c.benchmark_group("compact_report");

    for size in [100, 1000, 10000].iter() {
        let snapshot = create_compact_snapshot(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &snapshot, |b, snapshot| {
            b.iter(|| black_box(snapshot.report()));
        });
    }

    group.finish();
}

fn bench_function_summary(c: &mut Criterion) {
    let mut group = c.benchmark_group("function_summary");

    for size in [1000, 10000].iter() {
        let snapshot = create_flat_snapshot(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &snapshot, |b, snapshot| {
            b.iter(|| black_box(snapshot.function_summary(FunctionId(0))));
        });
    }

    group.finish();
}

fn bench_checksum(c: &mut Criterion) {
    let mut group = c.benchmark_group("report_checksum");

    for size in [1000, 10000].iter() {
        let report = create_compact_snapshot(*size).report();
        group.bench_with_input(BenchmarkId::from_parameter(size), &report, |b, report| {
            b.iter(|| black_box(report_checksum(report)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_flat_report,
    bench_compact_report,
    bench_function_summary,
    bench_checksum
);
criterion_main!(benches);
