use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Scan row tables and write a prioritized worklist.
    Scan(ScanArgs),
    /// Apply a reviewed worklist to the row tables.
    Fix(FixArgs),
    /// Re-scan fixed tables and evaluate the release gates.
    Verify(VerifyArgs),
    /// Copy pre-fix backups back over the row tables.
    Restore(RestoreArgs),
    /// Print the effective configuration as TOML.
    Config,
}

/// Target column, optional column overrides, terminology, and tables.
#[derive(Clone, Debug, Args)]
pub struct TargetArgs {
    /// Target-language column to check (e.g. 越语).
    #[arg(long)]
    pub lang: String,
    /// Reference-language column (defaults to `columns.source`).
    #[arg(long)]
    pub source: Option<String>,
    /// Context-key column (defaults to `columns.context_key`).
    #[arg(long)]
    pub lang_key: Option<String>,
    /// Terminology document (defaults to the configured one).
    #[arg(long)]
    pub terms: Option<PathBuf>,
    /// Row tables (CSV).
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

/// Arguments for `loqa scan`.
#[derive(Clone, Debug, Args)]
pub struct ScanArgs {
    #[command(flatten)]
    pub target: TargetArgs,
    /// Directory for the worklist (defaults to `general.output_dir`).
    #[arg(long)]
    pub output: Option<PathBuf>,
}

/// Arguments for `loqa fix`.
#[derive(Clone, Debug, Args)]
pub struct FixArgs {
    /// Target-language column to rewrite.
    #[arg(long)]
    pub lang: String,
    /// Reviewed worklist CSV.
    #[arg(long)]
    pub worklist: PathBuf,
    /// Report what would change without writing anything.
    #[arg(long)]
    pub dry_run: bool,
    /// Row tables (CSV).
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

/// Arguments for `loqa verify`.
#[derive(Clone, Debug, Args)]
pub struct VerifyArgs {
    #[command(flatten)]
    pub target: TargetArgs,
    /// Write the remaining findings as a worklist into this directory.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

/// Arguments for `loqa restore`.
#[derive(Clone, Debug, Args)]
pub struct RestoreArgs {
    /// Row tables (CSV) to restore from their backups.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}
