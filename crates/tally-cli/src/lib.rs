//! CLI for the tally work-hours estimator.
//!
//! This crate wires the pure pipeline in `tally-core` to the filesystem
//! scanner in `tally-history` and presents the result.

mod cli;
mod config;
pub mod report;

pub use cli::Cli;
pub use config::Config;
