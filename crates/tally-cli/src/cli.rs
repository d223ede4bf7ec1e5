//! Command-line argument definitions.

use std::path::PathBuf;

use clap::Parser;

/// Estimate hours worked on a project from editor history.
///
/// Mines the snapshot timestamps VS Code keeps in its local-history
/// folder, groups them into working periods separated by idle gaps of
/// more than two hours, and reports per-day and total hours.
#[derive(Debug, Parser)]
#[command(name = "tally", version, about, long_about = None)]
pub struct Cli {
    /// Path to the editor's user history folder.
    #[arg(long)]
    pub history_dir: Option<PathBuf>,

    /// Folder or file name to match, case-insensitive.
    ///
    /// Defaults to the current directory's name.
    #[arg(short, long)]
    pub project: Option<String>,

    /// Only count snapshots on or after this date (MM/DD/YYYY or YYYY-MM-DD).
    #[arg(short, long)]
    pub since: Option<String>,

    /// Emit the report as JSON.
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
