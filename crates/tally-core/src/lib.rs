//! Core domain logic for the tally work-hours estimator.
//!
//! This crate contains the pure pipeline that turns editor-history
//! snapshot timestamps into a report:
//! - Timeline: extracting, matching, and filtering timestamps into one
//!   ascending sequence
//! - Segmentation: splitting the timeline into working periods at idle gaps
//! - Aggregation: per-day and grand-total durations

pub mod aggregate;
pub mod segment;
pub mod timeline;

pub use aggregate::{DailyAggregate, DayTotal, aggregate, day_key};
pub use segment::{IDLE_THRESHOLD_MS, WorkingPeriod, segment};
pub use timeline::{
    Cutoff, InvalidDateError, ResourceGroup, SnapshotRecord, build_timeline, matches_resource,
};
