//! # Maturity CLI Module
//!
//! This module implements the CLI interface for the maturity engine.
//!
//! ## Available Commands
//!
//! - `assess` - Resolve every pillar and function in a snapshot
//! - `function` - Resolve a single function with its stage breakdowns
//! - `stages` - List the ordered maturity stages
//! - `hash` - Fingerprint the report of a snapshot

mod commands;

use crate::config::{Config, Settings};
use clap::{Parser, Subcommand};
use maturity_core::MaturityError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Maturity - staged self-assessment engine
///
/// Rolls per-item assessment statuses up into gated function and pillar
/// maturity stages, and explains any gap between what was completed and
/// what sequential gating allows to be claimed.
#[derive(Parser, Debug)]
#[command(name = "maturity")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the TOML configuration file
    #[arg(short, long, global = true, default_value = "maturity.toml")]
    pub config: PathBuf,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve every pillar and function in a snapshot
    Assess {
        /// Path to the snapshot file (JSON)
        #[arg(short, long)]
        file: PathBuf,

        /// Include per-stage breakdowns
        #[arg(short, long)]
        detailed: bool,
    },

    /// Resolve a single function
    Function {
        /// Path to the snapshot file (JSON)
        #[arg(short, long)]
        file: PathBuf,

        /// Function ID
        #[arg(short, long)]
        id: u64,
    },

    /// List the ordered maturity stages
    Stages,

    /// Compute the report checksum and BLAKE3 digest of a snapshot
    Hash {
        /// Path to the snapshot file (JSON)
        #[arg(short, long)]
        file: PathBuf,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), MaturityError> {
    let config = Config::load(&cli.config)?;
    let detailed = matches!(cli.command, Some(Commands::Assess { detailed: true, .. }));
    let settings = Settings::resolve(&config, cli.json_mode, detailed, cli.quiet);

    if !settings.quiet && !settings.json {
        print_banner();
    }

    let output = match cli.command {
        Some(Commands::Assess { file, .. }) => cmd_assess(&file, &settings)?,
        Some(Commands::Function { file, id }) => cmd_function(&file, id, &settings)?,
        Some(Commands::Stages) => cmd_stages(&settings)?,
        Some(Commands::Hash { file }) => cmd_hash(&file, &settings)?,
        None => {
            // No subcommand - list stages by default
            cmd_stages(&settings)?
        }
    };

    print!("{}", output);
    if settings.json {
        println!();
    }
    Ok(())
}

/// Print the startup banner.
fn print_banner() {
    println!("maturity v{}", env!("CARGO_PKG_VERSION"));
    println!();
}
