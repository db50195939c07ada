//! # CLI Command Implementations
//!
//! Each command loads what it needs, runs the engine and returns the text to
//! print. Printing is left to [`super::execute`].

use crate::config::Settings;
use maturity_core::{
    AssessmentReport, AssessmentSnapshot, FunctionId, FunctionSummary, MaturityError,
    MaturityStage, PillarSummary, StageBreakdown, StageResolution, report_checksum,
    report_crypto_hash,
};
use std::path::{Path, PathBuf};

// =============================================================================
// FILE VALIDATION
// =============================================================================

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), MaturityError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| MaturityError::IoError(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(MaturityError::InvalidSnapshot(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Resolve a snapshot path.
///
/// Canonicalizes the path (resolving `..` and symlinks), which also checks
/// that it exists, then rejects anything that is not a regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, MaturityError> {
    let canonical = path.canonicalize().map_err(|e| {
        MaturityError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(MaturityError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

// =============================================================================
// SNAPSHOT LOADING
// =============================================================================

/// Load and decode a JSON snapshot file.
pub fn load_snapshot(path: &Path, max_bytes: u64) -> Result<AssessmentSnapshot, MaturityError> {
    let validated_path = validate_file_path(path)?;
    validate_file_size(&validated_path, max_bytes)?;

    let bytes = std::fs::read(&validated_path)
        .map_err(|e| MaturityError::IoError(format!("Read file: {}", e)))?;
    let snapshot: AssessmentSnapshot = serde_json::from_slice(&bytes)
        .map_err(|e| MaturityError::InvalidSnapshot(format!("{}: {}", path.display(), e)))?;

    let counts = snapshot.counts();
    tracing::info!(
        path = %validated_path.display(),
        encoding = %snapshot.encoding(),
        pillars = counts.pillars,
        functions = counts.functions,
        units = counts.units,
        records = counts.records,
        "Snapshot loaded"
    );

    Ok(snapshot)
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, MaturityError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| MaturityError::SerializationError(e.to_string()))
}

fn stage_list(stages: &[MaturityStage]) -> String {
    stages
        .iter()
        .map(|s| s.name())
        .collect::<Vec<_>>()
        .join(", ")
}

// =============================================================================
// TEXT RENDERING
// =============================================================================

fn render_resolution(out: &mut String, indent: &str, resolution: &StageResolution) {
    out.push_str(&format!(
        "{}Maturity: {} (actual {})\n",
        indent, resolution.overall_maturity_stage, resolution.actual_maturity_stage
    ));
    if let Some(explanation) = &resolution.sequential_maturity_explanation {
        out.push_str(&format!("{}Gap:      {}\n", indent, explanation));
    }
}

fn render_breakdowns(out: &mut String, indent: &str, breakdowns: &[StageBreakdown]) {
    for b in breakdowns {
        out.push_str(&format!(
            "{}{:<12} {:<13} {:>4}/{:<4} assessed ({:>3}%)  {:>3}% complete",
            indent,
            b.stage.name(),
            b.status.label(),
            b.assessed_items,
            b.total_items,
            b.percentage,
            b.completion_percentage
        ));
        if !b.can_advance_to_this_stage {
            out.push_str(&format!(
                "  blocked by {}",
                stage_list(&b.blocked_by_previous_stages)
            ));
        }
        out.push('\n');
    }
}

fn render_function(out: &mut String, summary: &FunctionSummary, detailed: bool) {
    out.push_str(&format!(
        "  Function {}: {}  ({}/{} assessed, {}%)\n",
        summary.id.0,
        summary.name,
        summary.assessed_items,
        summary.total_items,
        summary.assessment_percentage
    ));
    render_resolution(out, "    ", &summary.resolution);
    if detailed {
        render_breakdowns(out, "      ", &summary.stage_breakdowns);
    }
}

fn render_pillar(out: &mut String, pillar: &PillarSummary, detailed: bool) {
    out.push_str(&format!(
        "Pillar {}: {}  ({}/{} assessed, {}%)\n",
        pillar.id.0,
        pillar.name,
        pillar.assessed_items,
        pillar.total_items,
        pillar.assessment_percentage
    ));
    render_resolution(out, "  ", &pillar.resolution);
    if detailed {
        render_breakdowns(out, "    ", &pillar.stage_breakdowns);
    }
    for function in &pillar.functions {
        render_function(out, function, detailed);
    }
}

/// Render a full report as text.
pub fn render_report(report: &AssessmentReport, detailed: bool) -> String {
    let mut out = String::new();
    out.push_str("Maturity Assessment\n");
    out.push_str("===================\n");
    out.push_str(&format!("Encoding: {}\n", report.encoding));
    out.push_str(&format!(
        "Items:    {}/{} assessed ({}%)\n",
        report.assessed_items, report.total_items, report.assessment_percentage
    ));

    for pillar in &report.pillars {
        out.push('\n');
        render_pillar(&mut out, pillar, detailed);
    }
    out
}

// =============================================================================
// ASSESS COMMAND
// =============================================================================

/// Run a full pass over a snapshot file.
pub fn cmd_assess(file: &Path, settings: &Settings) -> Result<String, MaturityError> {
    let snapshot = load_snapshot(file, settings.max_snapshot_bytes)?;
    let report = snapshot.report();

    for pillar in &report.pillars {
        tracing::debug!(
            pillar = pillar.id.0,
            overall = %pillar.resolution.overall_maturity_stage,
            actual = %pillar.resolution.actual_maturity_stage,
            gap = pillar.resolution.has_sequential_maturity_gap,
            "Pillar resolved"
        );
    }
    let checksum = format!("{:016x}", report_checksum(&report)?);
    tracing::info!(
        pillars = report.pillars.len(),
        checksum = %checksum,
        "Assessment pass complete"
    );

    if settings.json {
        return to_json(&report);
    }
    Ok(render_report(&report, settings.detailed))
}

// =============================================================================
// FUNCTION COMMAND
// =============================================================================

/// Summarize one Function from a snapshot file.
pub fn cmd_function(file: &Path, id: u64, settings: &Settings) -> Result<String, MaturityError> {
    let snapshot = load_snapshot(file, settings.max_snapshot_bytes)?;
    let summary = snapshot
        .function_summary(FunctionId(id))
        .ok_or_else(|| MaturityError::InvalidSnapshot(format!("Function {} not found", id)))?;

    tracing::debug!(
        function = id,
        overall = %summary.resolution.overall_maturity_stage,
        actual = %summary.resolution.actual_maturity_stage,
        "Function resolved"
    );

    if settings.json {
        return to_json(&summary);
    }

    let mut out = String::new();
    render_function(&mut out, &summary, true);
    Ok(out)
}

// =============================================================================
// STAGES COMMAND
// =============================================================================

/// List the ordered maturity stages.
pub fn cmd_stages(settings: &Settings) -> Result<String, MaturityError> {
    if settings.json {
        let stages: Vec<serde_json::Value> = MaturityStage::ALL
            .iter()
            .map(|stage| {
                serde_json::json!({
                    "index": stage.index(),
                    "name": stage.name(),
                    "terminal": stage.is_terminal(),
                })
            })
            .collect();
        return to_json(&stages);
    }

    let mut out = String::new();
    out.push_str("Maturity Stages\n");
    out.push_str("===============\n");
    for stage in MaturityStage::ALL {
        out.push_str(&format!("  {}  {}\n", stage.index(), stage.name()));
    }
    Ok(out)
}

// =============================================================================
// HASH COMMAND
// =============================================================================

/// Fingerprint the report of a snapshot file.
pub fn cmd_hash(file: &Path, settings: &Settings) -> Result<String, MaturityError> {
    let snapshot = load_snapshot(file, settings.max_snapshot_bytes)?;
    let report = snapshot.report();

    let checksum = format!("{:016x}", report_checksum(&report)?);
    let blake3 = report_crypto_hash(&report)?;

    if settings.json {
        return to_json(&serde_json::json!({
            "encoding": report.encoding,
            "checksum": checksum,
            "blake3": blake3,
        }));
    }

    let mut out = String::new();
    out.push_str(&format!("Checksum: {}\n", checksum));
    out.push_str(&format!("BLAKE3:   {}\n", blake3));
    Ok(out)
}
