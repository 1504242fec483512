//! Command-line interface for refactor-reconcile.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **diff**: Diff two model snapshots and report the detected refactorings
//! - **trivial**: Check whether two source files differ only in comments,
//!   imports or blank lines
//!
//! ## Usage
//!
//! ```text
//! # Report refactorings between two snapshots
//! refactor-reconcile diff before.json after.json
//!
//! # Custom engine configuration
//! refactor-reconcile diff before.json after.json --config diff.json
//!
//! # JSON output for scripting
//! refactor-reconcile diff before.json after.json --format json
//!
//! # Trivial-change check on two source files
//! refactor-reconcile trivial Shop.java.orig Shop.java
//! ```

use clap::{Parser, Subcommand};

pub mod diff;
pub mod trivial;

#[derive(Parser)]
#[command(name = "refactor-reconcile")]
#[command(version)]
#[command(about = "Reconcile two code model snapshots and report refactorings")]
#[command(
    long_about = "refactor-reconcile matches the classes, members, modules and package declarations of two code model snapshots.\n\nIt reports:\n- Removed, added and changed elements\n- Refactorings implied by the changes, one tab-separated line each\n- Extract Class / Extract Subclass candidates ranked by source folder proximity"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Diff two model snapshots
    Diff(diff::DiffArgs),

    /// Check whether two files differ only trivially
    Trivial(trivial::TrivialArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
