//! Transient start/end events driving the sweep algorithms.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::span::Span;

/// Whether an event marks a span opening or closing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Started,
    Ended,
}

/// A timestamped marker derived from one end of a span.
///
/// Events exist only for the duration of a single sweep and are never
/// persisted. `index` is the span's position in the input schedule and
/// serves as its identity: two structurally identical spans at different
/// positions stay distinct members of the active set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub kind: EventKind,
    pub time: DateTime<Utc>,
    pub index: usize,
}

/// Yields the two events delimiting `span`.
pub fn from_span<V>(span: &Span<V>, index: usize) -> [Event; 2] {
    [
        Event {
            kind: EventKind::Started,
            time: span.start,
            index,
        },
        Event {
            kind: EventKind::Ended,
            time: span.end,
            index,
        },
    ]
}

/// Converts a whole schedule into one chronologically ordered event stream.
///
/// At equal timestamps an `Ended` event sorts strictly before a `Started`
/// event, so a span ending at T and another starting at T are treated as
/// adjacent rather than overlapping. Events with equal time and kind keep
/// their relative order; the sweeps are multiset-based and do not depend
/// on it.
pub fn from_schedule<V>(schedule: &[Span<V>]) -> Vec<Event> {
    let mut events: Vec<Event> = schedule
        .iter()
        .enumerate()
        .flat_map(|(index, span)| from_span(span, index))
        .collect();
    chronological(&mut events);
    events
}

/// Sorts events by time, breaking ties by ordering `Ended` before
/// `Started`. The sort is stable.
fn chronological(events: &mut [Event]) {
    events.sort_by(|a, b| {
        a.time.cmp(&b.time).then_with(|| match (a.kind, b.kind) {
            (EventKind::Ended, EventKind::Started) => Ordering::Less,
            (EventKind::Started, EventKind::Ended) => Ordering::Greater,
            _ => Ordering::Equal,
        })
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn ts(minutes: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0)
            .single()
            .expect("valid test timestamp")
            + Duration::minutes(minutes)
    }

    fn span(start_min: i64, end_min: i64) -> Span {
        Span::new(ts(start_min), ts(end_min)).expect("valid test span")
    }

    #[test]
    fn from_span_yields_both_endpoints() {
        let events = from_span(&span(0, 10), 3);
        assert_eq!(
            events,
            [
                Event {
                    kind: EventKind::Started,
                    time: ts(0),
                    index: 3,
                },
                Event {
                    kind: EventKind::Ended,
                    time: ts(10),
                    index: 3,
                },
            ]
        );
    }

    #[test]
    fn from_schedule_sorts_chronologically() {
        let events = from_schedule(&[span(20, 30), span(0, 10)]);
        let times: Vec<_> = events.iter().map(|event| event.time).collect();
        assert_eq!(times, vec![ts(0), ts(10), ts(20), ts(30)]);
    }

    #[test]
    fn ended_sorts_before_started_at_equal_time() {
        // One span ends exactly where the next starts; the end must come
        // first so the sweeps see them as adjacent, not overlapping.
        let events = from_schedule(&[span(0, 10), span(10, 20)]);
        let kinds: Vec<_> = events.iter().map(|event| event.kind).collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::Started,
                EventKind::Ended,
                EventKind::Started,
                EventKind::Ended,
            ]
        );
        assert_eq!(events[1].index, 0);
        assert_eq!(events[2].index, 1);
    }

    #[test]
    fn equal_time_and_kind_keeps_input_order() {
        let events = from_schedule(&[span(0, 10), span(0, 10)]);
        assert_eq!(events[0].index, 0);
        assert_eq!(events[1].index, 1);
        assert_eq!(events[2].index, 0);
        assert_eq!(events[3].index, 1);
    }

    #[test]
    fn zero_length_span_closes_before_it_opens() {
        // The tie-break applies within a single instantaneous span too:
        // its Ended event precedes its Started event.
        let events = from_schedule(&[span(5, 5)]);
        let kinds: Vec<_> = events.iter().map(|event| event.kind).collect();
        assert_eq!(kinds, vec![EventKind::Ended, EventKind::Started]);
    }

    #[test]
    fn identical_spans_have_distinct_identities() {
        let events = from_schedule(&[span(0, 10), span(0, 10)]);
        let indices: std::collections::HashSet<_> =
            events.iter().map(|event| event.index).collect();
        assert_eq!(indices.len(), 2);
    }
}
