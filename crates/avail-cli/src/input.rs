//! Input file formats for outage spans and windows.
//!
//! Spans are validated at ingestion: a raw interval whose end precedes its
//! start is rejected with the offending component named, before any
//! engine operation runs.

use std::path::Path;

use anyhow::{Context, Result};
use avail_core::{EngineError, Schedule, Span};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A raw interval as it appears in input files.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RawSpan {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl RawSpan {
    fn into_span(self) -> Result<Span, EngineError> {
        Span::new(self.start, self.end)
    }
}

/// Outage history for a single component, as stored in the input file.
#[derive(Debug, Clone, Deserialize)]
pub struct RawComponent {
    pub name: String,
    pub outages: Vec<RawSpan>,
}

/// The outage input file: one entry per component.
#[derive(Debug, Clone, Deserialize)]
pub struct OutageFile {
    pub components: Vec<RawComponent>,
}

/// A component with validated outage spans.
#[derive(Debug, Clone)]
pub struct Component {
    pub name: String,
    pub outages: Schedule,
}

/// Loads and validates the outage file at `path`.
pub fn load_outages(path: &Path) -> Result<Vec<Component>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let file: OutageFile = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse {}", path.display()))?;

    file.components
        .into_iter()
        .map(|component| {
            let outages = component
                .outages
                .into_iter()
                .map(RawSpan::into_span)
                .collect::<Result<Schedule, _>>()
                .with_context(|| format!("invalid outage span for component {}", component.name))?;
            Ok(Component {
                name: component.name,
                outages,
            })
        })
        .collect()
}

/// Loads and validates a windows file: a flat JSON list of intervals.
pub fn load_windows(path: &Path) -> Result<Schedule> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let windows: Vec<RawSpan> = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse {}", path.display()))?;

    windows
        .into_iter()
        .map(RawSpan::into_span)
        .collect::<Result<Schedule, _>>()
        .with_context(|| format!("invalid window in {}", path.display()))
}
