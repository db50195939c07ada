//! # Maturity - Assessment CLI
//!
//! The main binary for the maturity aggregation engine.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │           apps/maturity (THE BINARY)         │
//! │                                              │
//! │  ┌────────────┐   ┌───────────┐   ┌───────┐  │
//! │  │   CLI      │   │  Config   │   │ Output│  │
//! │  │  (clap)    │   │  (toml)   │   │ (json)│  │
//! │  └─────┬──────┘   └─────┬─────┘   └───┬───┘  │
//! │        └────────────────┼─────────────┘      │
//! │                         ▼                    │
//! │                 ┌───────────────┐            │
//! │                 │ maturity-core │            │
//! │                 │  (THE ENGINE) │            │
//! │                 └───────────────┘            │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! maturity assess -f snapshot.json --detailed
//! maturity function -f snapshot.json --id 3
//! maturity --json-mode hash -f snapshot.json
//! ```

use clap::Parser;
use maturity::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    let cli = cli::Cli::parse();

    // MATURITY_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("MATURITY_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let default_filter = if cli.verbose {
        "maturity=debug"
    } else {
        "maturity=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    // Logs go to stderr so report output on stdout stays parseable.
    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}
