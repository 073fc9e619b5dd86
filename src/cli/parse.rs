//! CLI parse: clap types for dirtrack. No behavior; definitions only.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// dirtrack - detect changed files in a directory using Merkle trees
#[derive(Parser)]
#[command(name = "dirtrack")]
#[command(about = "Detect changed files in a directory using Merkle hash trees")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (layered over the global config)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (when output is "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Number of threads used to hash files
    #[arg(long, global = true)]
    pub hash_workers: Option<usize>,
}

/// Output format for commands that print structured results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Report files changed since the snapshot (records a baseline on first run)
    Changes {
        /// Directory to inspect
        dir: PathBuf,
        /// Refresh the snapshot after reporting
        #[arg(long)]
        commit: bool,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Overwrite the snapshot with the directory's current state
    Commit {
        /// Directory to snapshot
        dir: PathBuf,
    },
    /// Show the current tree of a directory
    Show {
        /// Directory to inspect
        dir: PathBuf,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Check that the stored snapshot is internally consistent
    Verify {
        /// Tracked directory
        dir: PathBuf,
    },
    /// Delete the snapshot so tracking starts over
    Forget {
        /// Tracked directory
        dir: PathBuf,
    },
    /// Create the directory if needed and record a baseline
    Init {
        /// Directory to create and track
        dir: PathBuf,
    },
    /// Print the effective configuration as TOML
    Config,
}
