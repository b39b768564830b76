//! Bulk operations over schedules.
//!
//! The two sweep-line algorithms (`flatten`, `aggregate`) walk the
//! chronological event stream while maintaining the set of spans whose
//! interval contains the sweep cursor. The remaining operations are
//! compositions of the sweeps with the mapper strategies.
//!
//! Everything here is synchronous and pure: each call builds its working
//! state from scratch and discards it with the result, so independent
//! calls on independent schedules can run in parallel without
//! coordination.

use chrono::{DateTime, Utc};
use tracing::trace;

use crate::aggregator;
use crate::event::{self, EventKind};
use crate::mapper;
use crate::span::{EngineError, Span};

/// Applies `mapper` to every span, flattening the outputs in input order.
pub fn map<V, W, F>(schedule: &[Span<V>], mapper: F) -> Vec<Span<W>>
where
    F: Fn(&Span<V>) -> Vec<Span<W>>,
{
    schedule.iter().flat_map(|span| mapper(span)).collect()
}

/// Clips every span to the window `[start, end)`.
pub fn trim<V: Clone>(
    schedule: &[Span<V>],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Vec<Span<V>> {
    map(schedule, mapper::trimmer(start, end))
}

/// Removes the portions of every span covered by `right`.
pub fn subtract<V: Clone, W>(schedule: &[Span<V>], right: &[Span<W>]) -> Vec<Span<V>> {
    map(schedule, mapper::subtractor(right))
}

/// Intersects every span with the windows in `right`.
pub fn intersect<V: Clone, W>(schedule: &[Span<V>], right: &[Span<W>]) -> Vec<Span<V>> {
    map(schedule, mapper::intersector(right))
}

/// Merges overlapping and touching spans into a minimal covering set.
///
/// The result is ascending, pairwise disjoint, and non-adjacent, and its
/// union equals the union of the input. Payloads are dropped.
pub fn flatten<V>(schedule: &[Span<V>]) -> Vec<Span> {
    trace!(spans = schedule.len(), "flattening schedule");
    let events = event::from_schedule(schedule);
    let mut flattened: Vec<Span> = Vec::new();

    let mut active: Vec<usize> = Vec::new();
    let mut start: Option<DateTime<Utc>> = None;
    for event in events {
        match event.kind {
            EventKind::Started => {
                if start.is_none() {
                    start = Some(match flattened.pop() {
                        // The previous merge ended exactly here; reopen it
                        // instead of starting a new one so touching spans
                        // merge.
                        Some(last) if last.end == event.time => last.start,
                        Some(last) => {
                            flattened.push(last);
                            event.time
                        }
                        None => event.time,
                    });
                }
                active.push(event.index);
            }
            EventKind::Ended => {
                remove_member(&mut active, event.index);
                if let Some(opened) = start {
                    if active.is_empty() {
                        flattened.push(Span {
                            start: opened,
                            end: event.time,
                            value: (),
                        });
                        start = None;
                    }
                }
            }
        }
    }

    flattened
}

/// Partitions the timeline into intervals of constant active-set
/// membership, tagging each with the aggregator's value for it.
///
/// The result is a contiguous partition of every maximal active stretch.
/// Adjacent intervals are not merged even when their values coincide;
/// flatten the result if a minimal set is needed. The first aggregator
/// error aborts the sweep with no partial result.
pub fn aggregate<V, W, F>(schedule: &[Span<V>], agg: F) -> Result<Vec<Span<W>>, EngineError>
where
    F: Fn(&[&Span<V>]) -> Result<W, EngineError>,
{
    trace!(spans = schedule.len(), "aggregating schedule");
    let events = event::from_schedule(schedule);
    let mut aggregated: Vec<Span<W>> = Vec::new();

    let mut active: Vec<usize> = Vec::new();
    let mut start: Option<DateTime<Utc>> = None;
    for event in events {
        if let Some(opened) = start {
            if opened != event.time {
                let snapshot: Vec<&Span<V>> = active.iter().map(|&index| &schedule[index]).collect();
                aggregated.push(Span {
                    start: opened,
                    end: event.time,
                    value: agg(&snapshot)?,
                });
                start = Some(event.time);
            }
        }

        match event.kind {
            EventKind::Started => {
                if active.is_empty() {
                    start = Some(event.time);
                }
                active.push(event.index);
            }
            EventKind::Ended => {
                remove_member(&mut active, event.index);
                if active.is_empty() {
                    start = None;
                }
            }
        }
    }

    Ok(aggregated)
}

/// Fraction of `period` covered by at least one span.
///
/// A schedule that never touches the period covers none of it. A
/// zero-duration period has no meaningful coverage and is rejected.
pub fn coverage<V: Clone, W>(schedule: &[Span<V>], period: &Span<W>) -> Result<f64, EngineError> {
    if period.is_empty() {
        return Err(EngineError::DivisionByZero {
            denominator: "period duration",
        });
    }

    let covered = flatten(&trim(schedule, period.start, period.end));
    if covered.is_empty() {
        return Ok(0.0);
    }

    let durations = map(&covered, mapper::duration);
    let members: Vec<&Span<f64>> = durations.iter().collect();
    Ok(aggregator::sum(&members)? / period.duration_secs())
}

/// Removes the first occurrence of `index` from the active set, ignoring
/// absent members (a zero-length span closes before it opens).
fn remove_member(active: &mut Vec<usize>, index: usize) {
    if let Some(position) = active.iter().position(|&member| member == index) {
        active.remove(position);
    }
}
