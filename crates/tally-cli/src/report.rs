//! Report formatting for the per-day working-hours table.
//!
//! Human output is one line per day in first-seen order plus a trailing
//! total; `--json` emits the same data machine-readable.

use std::fmt::Write;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tally_core::{DailyAggregate, DayTotal};

/// Computed report data.
#[derive(Debug)]
pub struct ReportData {
    /// The match string the timeline was filtered by.
    pub project: String,
    /// Cutoff date as given on the command line, if any.
    pub since: Option<String>,
    pub generated_at: DateTime<Utc>,
    /// Number of working periods behind the aggregate.
    pub period_count: usize,
    pub aggregate: DailyAggregate,
}

// ========== Human Output ==========

/// Formats the human-readable report.
///
/// An empty aggregate still prints the frame, with a zero total and no
/// day lines.
#[must_use]
pub fn format_report(data: &ReportData) -> String {
    let mut output = String::new();

    writeln!(output, "Hours worked ({})", data.project).unwrap();
    writeln!(output, "---------------------").unwrap();
    for DayTotal { day, hours } in data.aggregate.days() {
        writeln!(output, "{hours:.1} hours - {day}").unwrap();
    }
    writeln!(output, "---------------------").unwrap();
    writeln!(output, "{:.1} hours - Total", data.aggregate.total_hours()).unwrap();

    output
}

// ========== JSON Output ==========

/// JSON report structure.
#[derive(Debug, Serialize)]
pub struct JsonReport {
    pub generated_at: String,
    pub project: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<String>,
    pub period_count: usize,
    /// Day totals in first-seen order.
    pub days: Vec<DayTotal>,
    pub total_hours: f64,
}

/// Formats report data as JSON.
pub fn format_report_json(data: &ReportData) -> Result<String> {
    let report = JsonReport {
        generated_at: data.generated_at.to_rfc3339(),
        project: data.project.clone(),
        since: data.since.clone(),
        period_count: data.period_count,
        days: data.aggregate.days().to_vec(),
        total_hours: data.aggregate.total_hours(),
    };

    Ok(serde_json::to_string_pretty(&report)?)
}

// ========== Public Interface ==========

/// Runs the report stage.
pub fn run(data: &ReportData, json: bool) -> Result<()> {
    if json {
        println!("{}", format_report_json(data)?);
    } else {
        print!("{}", format_report(data));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use insta::assert_snapshot;
    use tally_core::{aggregate, segment};

    fn ms(d: u32, h: u32, mi: u32) -> i64 {
        Utc.with_ymd_and_hms(2024, 3, d, h, mi, 0)
            .unwrap()
            .timestamp_millis()
    }

    fn make_report(timeline: &[i64]) -> ReportData {
        let periods = segment(timeline);
        ReportData {
            project: "my-proj".to_string(),
            since: None,
            generated_at: Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap(),
            period_count: periods.len(),
            aggregate: aggregate(&periods),
        }
    }

    #[test]
    fn test_report_empty_timeline() {
        let data = make_report(&[]);
        assert_eq!(data.period_count, 0);

        assert_snapshot!(format_report(&data), @r"
        Hours worked (my-proj)
        ---------------------
        ---------------------
        0.0 hours - Total
        ");
    }

    #[test]
    fn test_report_two_days() {
        let data = make_report(&[
            ms(1, 9, 0),
            ms(1, 10, 30),
            ms(1, 15, 0),
            ms(2, 9, 0),
            ms(2, 9, 30),
        ]);

        assert_snapshot!(format_report(&data), @r"
        Hours worked (my-proj)
        ---------------------
        1.5 hours - 2024-03-01
        0.5 hours - 2024-03-02
        ---------------------
        2.0 hours - Total
        ");
    }

    #[test]
    fn test_report_json_output() {
        let data = make_report(&[ms(1, 9, 0), ms(1, 10, 30)]);
        let output = format_report_json(&data).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["project"], "my-proj");
        assert_eq!(parsed["period_count"], 1);
        assert_eq!(parsed["days"][0]["day"], "2024-03-01");
        assert!((parsed["days"][0]["hours"].as_f64().unwrap() - 1.5).abs() < 1e-9);
        assert!((parsed["total_hours"].as_f64().unwrap() - 1.5).abs() < 1e-9);
        // `since` was not given and must be omitted, not null
        assert!(parsed.get("since").is_none());
    }

    #[test]
    fn test_report_json_includes_since() {
        let mut data = make_report(&[ms(1, 9, 0)]);
        data.since = Some("03/01/2024".to_string());

        let output = format_report_json(&data).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["since"], "03/01/2024");
    }
}
