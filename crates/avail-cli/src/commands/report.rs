//! Report command: the SLA availability pipeline and its formatting.
//!
//! Merges each component's outages, removes maintenance windows, keeps
//! only business hours, counts concurrently down components, and derives
//! downtime and availability for the reporting period.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result, bail};
use avail_core::{Schedule, Span, aggregator, mapper, ops};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::input::{self, Component};

/// Everything the report derives from one input set.
#[derive(Debug)]
pub struct ReportData {
    /// The reporting period.
    pub period: Span,
    /// Component names, in input order.
    pub components: Vec<String>,
    /// Minimum concurrent outages that count as downtime.
    pub threshold: usize,
    /// How many components were down, when.
    pub concurrency: Vec<Span<usize>>,
    /// Merged intervals where at least `threshold` components were down.
    pub downtime: Schedule,
    /// Total downtime in seconds.
    pub downtime_secs: f64,
    /// Fraction of the period covered by downtime.
    pub coverage: f64,
}

/// Runs the availability pipeline over validated inputs.
pub fn build_report(
    components: &[Component],
    period: &Span,
    maintenance: Option<&Schedule>,
    business_hours: Option<&Schedule>,
    threshold: usize,
) -> Result<ReportData> {
    if components.is_empty() {
        bail!("input contains no components");
    }

    // Merge overlaps within each component first; afterwards the number
    // of overlapping spans equals the number of components down.
    let mut merged: Schedule = Vec::new();
    for component in components {
        let spans = ops::flatten(&component.outages);
        tracing::debug!(
            component = %component.name,
            spans = spans.len(),
            "merged component outages"
        );
        merged.extend(spans);
    }

    let mut spans = ops::trim(&merged, period.start, period.end);
    if let Some(windows) = maintenance {
        spans = ops::subtract(&spans, windows);
    }
    if let Some(windows) = business_hours {
        spans = ops::intersect(&spans, windows);
    }

    let concurrency = ops::aggregate(&spans, aggregator::count)?;

    let down: Vec<Span<usize>> = concurrency
        .iter()
        .filter(|interval| interval.value >= threshold)
        .cloned()
        .collect();
    let downtime = ops::flatten(&down);

    let downtime_secs: f64 = ops::map(&downtime, mapper::duration)
        .iter()
        .map(|interval| interval.value)
        .sum();
    let coverage = ops::coverage(&downtime, period)?;

    Ok(ReportData {
        period: period.clone(),
        components: components
            .iter()
            .map(|component| component.name.clone())
            .collect(),
        threshold,
        concurrency,
        downtime,
        downtime_secs,
        coverage,
    })
}

// ========== Duration Formatting ==========

/// Formats seconds as a duration string.
/// Returns "Xh Ym" if >= 1 hour, "Xm" if < 1 hour.
/// Negative durations are treated as 0m.
#[allow(clippy::cast_possible_truncation)]
pub fn format_duration(secs: f64) -> String {
    if secs <= 0.0 {
        return "0m".to_string();
    }
    let total_minutes = (secs / 60.0).floor() as i64;
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if hours >= 1 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

fn format_timestamp(time: DateTime<Utc>) -> String {
    time.format("%Y-%m-%d %H:%M").to_string()
}

// ========== Report Generation ==========

/// Formats the human-readable report output.
#[allow(clippy::cast_precision_loss)]
pub fn format_report(data: &ReportData) -> String {
    let mut output = String::new();

    writeln!(
        output,
        "AVAILABILITY REPORT: {} → {} UTC",
        format_timestamp(data.period.start),
        format_timestamp(data.period.end)
    )
    .unwrap();
    writeln!(output, "Components: {}", data.components.join(", ")).unwrap();
    writeln!(output, "Threshold:  {}+ down at once", data.threshold).unwrap();

    writeln!(output).unwrap();
    writeln!(output, "CONCURRENCY").unwrap();
    writeln!(output, "───────────").unwrap();
    if data.concurrency.is_empty() {
        writeln!(output, "(no outages in period)").unwrap();
    } else {
        let total = data.components.len() as f64;
        for interval in &data.concurrency {
            let percent = interval.value as f64 / total * 100.0;
            writeln!(
                output,
                "{} → {}  {} down ({percent:.0}%)",
                format_timestamp(interval.start),
                format_timestamp(interval.end),
                interval.value
            )
            .unwrap();
        }
    }

    writeln!(output).unwrap();
    writeln!(output, "DOWNTIME").unwrap();
    writeln!(output, "────────").unwrap();
    if data.downtime.is_empty() {
        writeln!(output, "(none met the threshold)").unwrap();
    } else {
        for interval in &data.downtime {
            writeln!(
                output,
                "{} → {}  {}",
                format_timestamp(interval.start),
                format_timestamp(interval.end),
                format_duration(interval.duration_secs())
            )
            .unwrap();
        }
    }

    writeln!(output).unwrap();
    writeln!(output, "SUMMARY").unwrap();
    writeln!(output, "───────").unwrap();
    writeln!(output, "Downtime:     {}", format_duration(data.downtime_secs)).unwrap();
    writeln!(output, "Coverage:     {:.1}% of period", data.coverage * 100.0).unwrap();
    writeln!(
        output,
        "Availability: {:.1}%",
        (1.0 - data.coverage) * 100.0
    )
    .unwrap();

    output
}

// ========== JSON Output ==========

/// JSON report structure.
#[derive(Debug, Serialize)]
pub struct JsonReport {
    pub period: JsonInterval,
    pub components: Vec<String>,
    pub threshold: usize,
    pub concurrency: Vec<JsonConcurrency>,
    pub downtime: Vec<JsonInterval>,
    pub totals: JsonTotals,
}

#[derive(Debug, Serialize)]
pub struct JsonInterval {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Serialize)]
pub struct JsonConcurrency {
    pub start: String,
    pub end: String,
    pub down: usize,
    pub ratio: f64,
}

#[derive(Debug, Serialize)]
pub struct JsonTotals {
    pub downtime_seconds: f64,
    pub coverage: f64,
    pub availability: f64,
}

/// Formats report data as JSON.
#[allow(clippy::cast_precision_loss)]
pub fn format_report_json(data: &ReportData) -> Result<String> {
    let total = data.components.len() as f64;
    let report = JsonReport {
        period: JsonInterval {
            start: data.period.start.to_rfc3339(),
            end: data.period.end.to_rfc3339(),
        },
        components: data.components.clone(),
        threshold: data.threshold,
        concurrency: data
            .concurrency
            .iter()
            .map(|interval| JsonConcurrency {
                start: interval.start.to_rfc3339(),
                end: interval.end.to_rfc3339(),
                down: interval.value,
                ratio: interval.value as f64 / total,
            })
            .collect(),
        downtime: data
            .downtime
            .iter()
            .map(|interval| JsonInterval {
                start: interval.start.to_rfc3339(),
                end: interval.end.to_rfc3339(),
            })
            .collect(),
        totals: JsonTotals {
            downtime_seconds: data.downtime_secs,
            coverage: data.coverage,
            availability: 1.0 - data.coverage,
        },
    };

    Ok(serde_json::to_string_pretty(&report)?)
}

// ========== Public Interface ==========

/// Runs the report command.
#[allow(clippy::too_many_arguments)]
pub fn run(
    input: &Path,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    maintenance: Option<&Path>,
    business_hours: Option<&Path>,
    threshold: usize,
    json: bool,
) -> Result<()> {
    let components = input::load_outages(input)?;
    let period = Span::new(from, to).context("invalid reporting period")?;
    let maintenance = maintenance.map(input::load_windows).transpose()?;
    let business_hours = business_hours.map(input::load_windows).transpose()?;

    let data = build_report(
        &components,
        &period,
        maintenance.as_ref(),
        business_hours.as_ref(),
        threshold,
    )?;

    if json {
        println!("{}", format_report_json(&data)?);
    } else {
        print!("{}", format_report(&data));
    }

    Ok(())
}
