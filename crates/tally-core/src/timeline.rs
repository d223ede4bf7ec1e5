//! Timeline construction: extraction, matching, filtering, ordering.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single snapshot entry from the editor's local history.
///
/// Entries carry more fields on disk (snapshot file name, change source);
/// only the timestamp matters here. An entry without one is dropped during
/// extraction rather than treated as an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotRecord {
    /// Milliseconds since the Unix epoch.
    pub timestamp: Option<i64>,
}

/// All snapshot records belonging to one tracked resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceGroup {
    /// Path or URI of the tracked file.
    pub resource_id: String,
    pub records: Vec<SnapshotRecord>,
}

impl ResourceGroup {
    /// Yields the timestamps of records that carry one, in record order.
    pub fn timestamps(&self) -> impl Iterator<Item = i64> + '_ {
        self.records.iter().filter_map(|r| r.timestamp)
    }
}

/// Case-insensitive substring match of `needle` against a resource id.
///
/// An empty needle matches everything; callers treat that as "no filter",
/// not an error.
#[must_use]
pub fn matches_resource(resource_id: &str, needle: &str) -> bool {
    resource_id.to_uppercase().contains(&needle.to_uppercase())
}

/// A cutoff date string that does not parse as a calendar date.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid cutoff date {input:?} (expected MM/DD/YYYY or YYYY-MM-DD)")]
pub struct InvalidDateError {
    pub input: String,
}

/// Accepted cutoff date formats.
const CUTOFF_FORMATS: &[&str] = &["%m/%d/%Y", "%Y-%m-%d"];

/// An absolute lower bound on snapshot timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cutoff(i64);

impl Cutoff {
    /// Parses a calendar date into the cutoff instant (UTC midnight).
    ///
    /// An unparseable string fails with [`InvalidDateError`] instead of
    /// producing a sentinel that would silently include or exclude every
    /// timestamp.
    pub fn parse(input: &str) -> Result<Self, InvalidDateError> {
        CUTOFF_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(input.trim(), fmt).ok())
            .map(|date| Self(date.and_time(NaiveTime::MIN).and_utc().timestamp_millis()))
            .ok_or_else(|| InvalidDateError {
                input: input.to_string(),
            })
    }

    /// The cutoff instant in milliseconds since the Unix epoch.
    #[must_use]
    pub const fn epoch_millis(self) -> i64 {
        self.0
    }

    /// Whether a timestamp is at or after the cutoff.
    #[must_use]
    pub const fn admits(self, timestamp_ms: i64) -> bool {
        timestamp_ms >= self.0
    }
}

/// Merges the timestamps of all matching resource groups into one
/// ascending timeline.
///
/// Groups whose resource id does not contain `needle` are skipped, as are
/// timestamps before the cutoff. No match produces an empty timeline, not
/// an error; downstream stages turn that into a zero report.
#[must_use]
pub fn build_timeline(
    groups: &[ResourceGroup],
    needle: &str,
    cutoff: Option<Cutoff>,
) -> Vec<i64> {
    let mut timeline: Vec<i64> = groups
        .iter()
        .filter(|group| matches_resource(&group.resource_id, needle))
        .flat_map(ResourceGroup::timestamps)
        .filter(|&ts| cutoff.is_none_or(|c| c.admits(ts)))
        .collect();

    timeline.sort_unstable();
    tracing::debug!(timestamps = timeline.len(), "timeline built");
    timeline
}
