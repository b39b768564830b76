//! Coverage command: fraction of a period covered by a set of spans.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use avail_core::{Span, ops};
use chrono::{DateTime, Utc};

use crate::input;

pub fn run<W: Write>(
    writer: &mut W,
    input_path: &Path,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Result<()> {
    let spans = input::load_windows(input_path)?;
    let period = Span::new(from, to).context("invalid period")?;
    let covered = ops::coverage(&spans, &period)?;

    writeln!(
        writer,
        "Period:       {} → {} UTC",
        period.start.format("%Y-%m-%d %H:%M"),
        period.end.format("%Y-%m-%d %H:%M")
    )?;
    writeln!(writer, "Coverage:     {:.1}%", covered * 100.0)?;
    writeln!(writer, "Availability: {:.1}%", (1.0 - covered) * 100.0)?;

    Ok(())
}
