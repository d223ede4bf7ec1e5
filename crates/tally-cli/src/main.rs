use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tally_cli::report::{self, ReportData};
use tally_cli::{Cli, Config};
use tally_core::{Cutoff, aggregate, build_timeline, segment};

/// Match-string fallback: the name of the current directory.
fn default_project() -> Result<String> {
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    cwd.file_name()
        .and_then(|n| n.to_str())
        .map(String::from)
        .context("current directory has no usable name")
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let history_dir: PathBuf = cli.history_dir.unwrap_or(config.history_dir);
    let project = match cli.project {
        Some(project) => project,
        None => default_project()?,
    };
    let cutoff = cli.since.as_deref().map(Cutoff::parse).transpose()?;

    let groups = tally_history::scan_history(&history_dir)
        .with_context(|| format!("failed to read history folder {}", history_dir.display()))?;
    tracing::debug!(resources = groups.len(), project = %project, "scanned history");

    let timeline = build_timeline(&groups, &project, cutoff);
    let periods = segment(&timeline);
    let data = ReportData {
        project,
        since: cli.since,
        generated_at: Utc::now(),
        period_count: periods.len(),
        aggregate: aggregate(&periods),
    };

    report::run(&data, cli.json)
}
