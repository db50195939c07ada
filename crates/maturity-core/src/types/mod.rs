//! # Core Type Definitions
//!
//! This module contains the raw entities handed to the engine by the storage
//! collaborator:
//! - Identifiers (`PillarId`, `FunctionId`, `ItemId`, `GroupId`)
//! - Hierarchy (`Pillar`, `Function`)
//! - Flat encoding (`AssessableItem`, `AssessmentResponse`)
//! - Compact encoding (`ItemGroup`, `Assessment`)
//! - Error types (`MaturityError`)
//!
//! ## Determinism Guarantees
//!
//! All identifiers implement `Ord` so that every index built from them is a
//! `BTreeMap`/`BTreeSet` with a stable iteration order.

use crate::MaturityStage;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Identifier of a top-level Pillar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PillarId(pub u64);

/// Identifier of a Function (capability area) within a Pillar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FunctionId(pub u64);

/// Identifier of a flat-model Assessable Item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemId(pub u64);

/// Identifier of a compact-model Item-Group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GroupId(pub u64);

// =============================================================================
// HIERARCHY
// =============================================================================

/// Top-level grouping of Functions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pillar {
    pub id: PillarId,
    pub name: String,
}

impl Pillar {
    /// Create a new pillar.
    #[must_use]
    pub fn new(id: PillarId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A named capability area belonging to exactly one Pillar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Function {
    pub id: FunctionId,
    pub pillar: PillarId,
    pub name: String,
}

impl Function {
    /// Create a new function tagged with its pillar.
    #[must_use]
    pub fn new(id: FunctionId, pillar: PillarId, name: impl Into<String>) -> Self {
        Self {
            id,
            pillar,
            name: name.into(),
        }
    }
}

// =============================================================================
// IMPLEMENTATION STATUS
// =============================================================================

/// Status recorded against an item (flat model) or an item-group's target
/// stage (compact model).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImplementationStatus {
    NotImplemented,
    PartiallyImplemented,
    FullyImplemented,
    /// Replaced by an equivalent or stronger control; counts as done.
    Superseded,
}

impl ImplementationStatus {
    /// FullyImplemented and Superseded both count as completed work.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(
            self,
            ImplementationStatus::FullyImplemented | ImplementationStatus::Superseded
        )
    }
}

// =============================================================================
// FLAT ENCODING
// =============================================================================

/// An item that occupies exactly one stage of one Function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessableItem {
    pub id: ItemId,
    pub function: FunctionId,
    pub stage: MaturityStage,
    #[serde(default)]
    pub name: String,
}

impl AssessableItem {
    /// Create a new item.
    #[must_use]
    pub fn new(id: ItemId, function: FunctionId, stage: MaturityStage) -> Self {
        Self {
            id,
            function,
            stage,
            name: String::new(),
        }
    }
}

/// The (at most one) response recorded against an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentResponse {
    pub item: ItemId,
    pub status: ImplementationStatus,
}

impl AssessmentResponse {
    /// Create a new response.
    #[must_use]
    pub const fn new(item: ItemId, status: ImplementationStatus) -> Self {
        Self { item, status }
    }
}

// =============================================================================
// COMPACT ENCODING
// =============================================================================

/// A group of related items spanning several stages of one Function.
///
/// The group contributes one countable item at every stage it has a
/// description for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemGroup {
    pub id: GroupId,
    pub function: FunctionId,
    #[serde(default)]
    pub name: String,
    /// Per-stage implementation description.
    pub stages: BTreeMap<MaturityStage, String>,
}

impl ItemGroup {
    /// Create a group with no stage descriptions.
    #[must_use]
    pub fn new(id: GroupId, function: FunctionId) -> Self {
        Self {
            id,
            function,
            name: String::new(),
            stages: BTreeMap::new(),
        }
    }

    /// Add a description for one stage (builder style).
    #[must_use]
    pub fn with_stage(mut self, stage: MaturityStage, description: impl Into<String>) -> Self {
        self.stages.insert(stage, description.into());
        self
    }

    /// Check if the group has an item at `stage`.
    #[must_use]
    pub fn spans(&self, stage: MaturityStage) -> bool {
        self.stages.contains_key(&stage)
    }
}

/// The single consolidated assessment of an Item-Group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    pub group: GroupId,
    /// Highest stage fully surpassed. `None` orders below every stage.
    #[serde(default)]
    pub achieved_stage: Option<MaturityStage>,
    /// Stage currently being worked toward.
    pub target_stage: MaturityStage,
    /// Status of the work at `target_stage`.
    pub implementation_status: ImplementationStatus,
}

impl Assessment {
    /// Create a new assessment.
    #[must_use]
    pub const fn new(
        group: GroupId,
        achieved_stage: Option<MaturityStage>,
        target_stage: MaturityStage,
        implementation_status: ImplementationStatus,
    ) -> Self {
        Self {
            group,
            achieved_stage,
            target_stage,
            implementation_status,
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur at the engine's boundary.
///
/// The computation pass itself never fails: missing or inconsistent data
/// degrades to zeroed breakdowns. Errors come only from decoding inputs,
/// serializing outputs, or loading files and configuration.
#[derive(Debug, Error)]
pub enum MaturityError {
    /// The input snapshot could not be decoded.
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    /// A stage name did not match any known stage.
    #[error("Unknown maturity stage: {0}")]
    UnknownStage(String),

    /// A serialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// A deserialization error occurred.
    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    /// The configuration file is malformed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

// =============================================================================
// TESTS
// =============================================================================
