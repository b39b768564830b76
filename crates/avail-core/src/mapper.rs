//! Per-span transform strategies.
//!
//! A mapper takes one span and produces zero, one, or several output
//! spans. `ops::map` applies a mapper across a whole schedule; the
//! constructors here build the stock mappers from their bounds.

use chrono::{DateTime, Utc};

use crate::ops;
use crate::span::Span;

/// Replaces the payload with the span's elapsed seconds.
pub fn duration<V>(span: &Span<V>) -> Vec<Span<f64>> {
    vec![span.map_value(span.duration_secs())]
}

/// Builds a mapper clipping spans to the window `[start, end)`.
///
/// Spans fully outside the window are discarded; spans straddling a
/// window edge are cut at that edge. Payloads are preserved.
pub fn trimmer<V: Clone>(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> impl Fn(&Span<V>) -> Vec<Span<V>> {
    move |span| {
        if span.end <= start || span.start >= end {
            return Vec::new();
        }

        let mut clipped = span.clone();
        if clipped.start < start {
            clipped.start = start;
        }
        if clipped.end > end {
            clipped.end = end;
        }
        vec![clipped]
    }
}

/// Builds a mapper intersecting spans against a set of windows.
///
/// The right-hand set is flattened first so its members are disjoint. A
/// span overlapping several windows yields one output per window; a span
/// disjoint from all of them yields nothing.
pub fn intersector<V: Clone, W>(
    right: &[Span<W>],
) -> impl Fn(&Span<V>) -> Vec<Span<V>> + use<V, W> {
    let windows = ops::flatten(right);
    move |span| {
        windows
            .iter()
            .filter_map(|window| span.intersect(window))
            .collect()
    }
}

/// Builds a mapper removing the portions of spans covered by a set of
/// windows.
///
/// The right-hand set is flattened first, so the order the windows are
/// applied in cannot affect the surviving fragments.
pub fn subtractor<V: Clone, W>(
    right: &[Span<W>],
) -> impl Fn(&Span<V>) -> Vec<Span<V>> + use<V, W> {
    let windows = ops::flatten(right);
    move |span| {
        let mut fragments = vec![span.clone()];
        for window in &windows {
            fragments = fragments
                .iter()
                .flat_map(|fragment| fragment.subtract(window))
                .collect();
        }
        fragments
    }
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
    fn duration_replaces_payload_with_seconds() {
        let tagged = Span::with_value(ts(0), ts(2), "ignored").unwrap();
        let mapped = duration(&tagged);
        assert_eq!(mapped.len(), 1);
        assert!((mapped[0].value - 120.0).abs() < f64::EPSILON);
        assert_eq!(mapped[0].start, ts(0));
        assert_eq!(mapped[0].end, ts(2));
    }

    #[test]
    fn trimmer_discards_spans_outside_the_window() {
        let trim = trimmer::<()>(ts(10), ts(20));
        assert_eq!(trim(&span(0, 10)), vec![]);
        assert_eq!(trim(&span(20, 30)), vec![]);
        assert_eq!(trim(&span(0, 5)), vec![]);
    }

    #[test]
    fn trimmer_clips_straddling_spans() {
        let trim = trimmer::<()>(ts(10), ts(20));
        assert_eq!(trim(&span(0, 15)), vec![span(10, 15)]);
        assert_eq!(trim(&span(15, 30)), vec![span(15, 20)]);
        assert_eq!(trim(&span(0, 30)), vec![span(10, 20)]);
    }

    #[test]
    fn trimmer_keeps_contained_spans_untouched() {
        let trim = trimmer::<()>(ts(10), ts(20));
        assert_eq!(trim(&span(12, 18)), vec![span(12, 18)]);
    }

    #[test]
    fn trimmer_keeps_zero_length_spans_inside_the_window() {
        let trim = trimmer::<()>(ts(10), ts(20));
        assert_eq!(trim(&span(15, 15)), vec![span(15, 15)]);
    }

    #[test]
    fn trimmer_preserves_payload() {
        let trim = trimmer(ts(10), ts(20));
        let tagged = Span::with_value(ts(0), ts(15), 42_u32).unwrap();
        let clipped = trim(&tagged);
        assert_eq!(clipped.len(), 1);
        assert_eq!(clipped[0].value, 42);
    }

    #[test]
    fn intersector_drops_disjoint_spans() {
        let against = intersector::<(), ()>(&[span(10, 20)]);
        assert_eq!(against(&span(0, 10)), vec![]);
    }

    #[test]
    fn intersector_splits_across_disjoint_windows() {
        // A span covering two separate windows produces two outputs.
        let against = intersector::<(), ()>(&[span(0, 10), span(20, 30)]);
        assert_eq!(against(&span(5, 25)), vec![span(5, 10), span(20, 25)]);
    }

    #[test]
    fn intersector_normalizes_overlapping_windows() {
        // [0,10) and [5,15) merge into [0,15); a span inside that union
        // must come back whole, not once per raw window.
        let against = intersector::<(), ()>(&[span(0, 10), span(5, 15)]);
        assert_eq!(against(&span(2, 12)), vec![span(2, 12)]);
    }

    #[test]
    fn subtractor_returns_nothing_when_covered() {
        let minus = subtractor::<(), ()>(&[span(0, 30)]);
        assert_eq!(minus(&span(5, 25)), vec![]);
    }

    #[test]
    fn subtractor_splits_around_contained_window() {
        let minus = subtractor::<(), ()>(&[span(10, 20)]);
        assert_eq!(minus(&span(0, 30)), vec![span(0, 10), span(20, 30)]);
    }

    #[test]
    fn subtractor_applies_every_window() {
        let minus = subtractor::<(), ()>(&[span(5, 10), span(15, 20)]);
        assert_eq!(
            minus(&span(0, 25)),
            vec![span(0, 5), span(10, 15), span(20, 25)]
        );
    }

    #[test]
    fn subtractor_normalizes_overlapping_windows() {
        // [0,10) and [5,15) act as the single window [0,15).
        let minus = subtractor::<(), ()>(&[span(0, 10), span(5, 15)]);
        assert_eq!(minus(&span(0, 20)), vec![span(15, 20)]);
    }

    #[test]
    fn subtractor_preserves_payload() {
        let minus = subtractor(&[span(10, 20)]);
        let tagged = Span::with_value(ts(0), ts(30), "db-1").unwrap();
        let fragments = minus(&tagged);
        assert_eq!(fragments.len(), 2);
        assert!(fragments.iter().all(|fragment| fragment.value == "db-1"));
    }
}
