//! Per-day aggregation of working periods.

use std::collections::HashMap;

use chrono::DateTime;
use serde::Serialize;

use crate::segment::WorkingPeriod;

/// Total hours attributed to one calendar day (UTC).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayTotal {
    /// `YYYY-MM-DD`, derived from period start instants.
    pub day: String,
    pub hours: f64,
}

/// Per-day totals in first-seen order, plus a grand total.
///
/// Day ordering is a first-class property: days appear in the order their
/// first period starts, and a period on a previously seen day adds to the
/// existing bucket at its original position. The index map makes
/// lookup-or-insert O(1) without relying on iteration order of a keyed
/// container.
#[derive(Debug, Clone, Default)]
pub struct DailyAggregate {
    days: Vec<DayTotal>,
    index: HashMap<String, usize>,
    total_hours: f64,
}

impl DailyAggregate {
    fn add(&mut self, day: String, hours: f64) {
        self.total_hours += hours;
        match self.index.get(&day) {
            Some(&i) => self.days[i].hours += hours,
            None => {
                self.index.insert(day.clone(), self.days.len());
                self.days.push(DayTotal { day, hours });
            }
        }
    }

    /// Day totals in first-seen order.
    #[must_use]
    pub fn days(&self) -> &[DayTotal] {
        &self.days
    }

    /// Sum of all period durations, in hours.
    #[must_use]
    pub const fn total_hours(&self) -> f64 {
        self.total_hours
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// `YYYY-MM-DD` in UTC for a millisecond timestamp.
///
/// Timestamps outside chrono's representable range collapse to the epoch
/// day; editor history never produces them.
#[must_use]
pub fn day_key(timestamp_ms: i64) -> String {
    DateTime::from_timestamp_millis(timestamp_ms)
        .unwrap_or(DateTime::UNIX_EPOCH)
        .format("%Y-%m-%d")
        .to_string()
}

/// Reduces working periods into per-day totals and a grand total.
///
/// A period's duration is `end - start` converted to hours, attributed
/// entirely to the UTC day of its start instant even when it crosses
/// midnight. Inputs are not mutated.
#[must_use]
pub fn aggregate(periods: &[WorkingPeriod]) -> DailyAggregate {
    let mut aggregate = DailyAggregate::default();
    for period in periods {
        aggregate.add(day_key(period.start_ms()), period.duration_hours());
    }
    aggregate
}
