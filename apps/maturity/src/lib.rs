//! # maturity
//!
//! Command-line front end for `maturity-core`: configuration, snapshot
//! loading and report rendering. The binary in `main.rs` only sets up
//! logging and dispatches to [`cli::execute`].

pub mod cli;
pub mod config;
