//! # Configuration
//!
//! Optional TOML file read at startup:
//!
//! ```toml
//! [output]
//! json = false
//! detailed = false
//!
//! [limits]
//! max_snapshot_bytes = 104857600
//! ```
//!
//! A missing file yields the defaults. Command-line flags are OR-ed on top
//! of the file when [`Settings`] are resolved.

use maturity_core::MaturityError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default snapshot size limit (100 MB).
pub const DEFAULT_MAX_SNAPSHOT_BYTES: u64 = 100 * 1024 * 1024;

// =============================================================================
// FILE SCHEMA
// =============================================================================

/// `[output]` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Emit JSON instead of text.
    pub json: bool,
    /// Include stage breakdowns in text output.
    pub detailed: bool,
}

/// `[limits]` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LimitsConfig {
    pub max_snapshot_bytes: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_snapshot_bytes: DEFAULT_MAX_SNAPSHOT_BYTES,
        }
    }
}

/// Whole configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub output: OutputConfig,
    pub limits: LimitsConfig,
}

impl Config {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, MaturityError> {
        let config: Config =
            toml::from_str(text).map_err(|e| MaturityError::InvalidConfig(e.to_string()))?;

        if config.limits.max_snapshot_bytes == 0 {
            return Err(MaturityError::InvalidConfig(
                "limits.max_snapshot_bytes must be greater than zero".to_string(),
            ));
        }
        Ok(config)
    }

    /// Load configuration from `path`, falling back to defaults when the
    /// file does not exist.
    pub fn load(path: &Path) -> Result<Self, MaturityError> {
        if !path.exists() {
            tracing::warn!(
                path = %path.display(),
                "Configuration file not found, using defaults"
            );
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path).map_err(|e| {
            MaturityError::IoError(format!("Cannot read config '{}': {}", path.display(), e))
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), ?config, "Configuration loaded");
        Ok(config)
    }
}

// =============================================================================
// EFFECTIVE SETTINGS
// =============================================================================

/// Configuration after command-line overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub json: bool,
    pub detailed: bool,
    pub quiet: bool,
    pub max_snapshot_bytes: u64,
}

impl Settings {
    /// Merge the file configuration with command-line flags.
    #[must_use]
    pub fn resolve(config: &Config, json_mode: bool, detailed: bool, quiet: bool) -> Self {
        Self {
            json: json_mode || config.output.json,
            detailed: detailed || config.output.detailed,
            quiet,
            max_snapshot_bytes: config.limits.max_snapshot_bytes,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::resolve(&Config::default(), false, false, false)
    }
}

// =============================================================================
// TESTS
// =============================================================================
