//! Splitting an ascending timeline into working periods at idle gaps.

use serde::Serialize;

/// Gap between consecutive snapshots that separates two working periods:
/// 2 hours. Fixed policy, never configured per run.
pub const IDLE_THRESHOLD_MS: i64 = 2 * 60 * 60 * 1000;

const MS_PER_HOUR: f64 = 3_600_000.0;

/// A maximal run of snapshot timestamps with no internal gap exceeding
/// [`IDLE_THRESHOLD_MS`]; models one continuous work session.
///
/// Always non-empty. A single-snapshot period is an instantaneous session
/// with zero duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkingPeriod {
    timestamps: Vec<i64>,
}

impl WorkingPeriod {
    /// First snapshot in the period.
    #[must_use]
    pub fn start_ms(&self) -> i64 {
        self.timestamps[0]
    }

    /// Last snapshot in the period.
    #[must_use]
    pub fn end_ms(&self) -> i64 {
        self.timestamps[self.timestamps.len() - 1]
    }

    /// Elapsed time between the first and last snapshot.
    #[must_use]
    pub fn duration_ms(&self) -> i64 {
        self.end_ms() - self.start_ms()
    }

    /// Duration in fractional hours.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn duration_hours(&self) -> f64 {
        self.duration_ms() as f64 / MS_PER_HOUR
    }

    /// Snapshots in ascending order.
    #[must_use]
    pub fn timestamps(&self) -> &[i64] {
        &self.timestamps
    }

    /// Number of snapshots in the period.
    #[must_use]
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}

/// Partitions an ascending timeline into maximal working periods.
///
/// The closing decision for a period is made when its last member is
/// processed: a period ends where the timeline ends or where the gap to
/// the next snapshot exceeds the idle threshold. Every timestamp lands in
/// exactly one period and an empty period is never emitted, so an empty
/// timeline yields no periods at all.
#[must_use]
pub fn segment(timeline: &[i64]) -> Vec<WorkingPeriod> {
    let mut periods = Vec::new();
    let mut current: Vec<i64> = Vec::new();

    for (i, &ts) in timeline.iter().enumerate() {
        current.push(ts);

        let closes = match timeline.get(i + 1) {
            None => true,
            Some(&next) => next - ts > IDLE_THRESHOLD_MS,
        };
        if closes {
            periods.push(WorkingPeriod {
                timestamps: std::mem::take(&mut current),
            });
        }
    }

    periods
}
