//! Half-open time spans and pairwise interval math.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use thiserror::Error;

/// Errors reported by the interval engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A span whose end precedes its start.
    #[error("span end ({end}) precedes start ({start})")]
    InvalidSpan {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// A sum over an empty set of spans has no identity element.
    #[error("cannot sum an empty set of spans")]
    EmptyAggregation,

    /// A ratio or coverage denominator of zero.
    #[error("{denominator} is zero")]
    DivisionByZero { denominator: &'static str },
}

/// A half-open time interval `[start, end)` carrying an opaque payload.
///
/// Plain spans use the default `()` payload. Operations that tag intervals
/// with a computed value (durations, concurrency counts, ratios) produce
/// spans with a non-unit payload; the engine never interprets the payload
/// itself, only caller-supplied strategies do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Span<V = ()> {
    /// When the interval begins.
    pub start: DateTime<Utc>,
    /// When the interval ends (exclusive). Never before `start`.
    pub end: DateTime<Utc>,
    /// Caller-supplied payload.
    pub value: V,
}

/// A collection of spans. Input order carries no meaning; spans may be out
/// of order, overlapping, or duplicated.
pub type Schedule<V = ()> = Vec<Span<V>>;

impl Span {
    /// Creates a plain span after validating `start <= end`.
    ///
    /// Zero-length spans are permitted and represent instantaneous events.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, EngineError> {
        Self::with_value(start, end, ())
    }
}

impl<V> Span<V> {
    /// Creates a value-carrying span after validating `start <= end`.
    pub fn with_value(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        value: V,
    ) -> Result<Self, EngineError> {
        if end < start {
            return Err(EngineError::InvalidSpan { start, end });
        }
        Ok(Self { start, end, value })
    }

    /// Elapsed time between start and end.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Elapsed seconds between start and end, with millisecond precision.
    #[allow(clippy::cast_precision_loss)]
    pub fn duration_secs(&self) -> f64 {
        self.duration().num_milliseconds() as f64 / 1000.0
    }

    /// True when the interval is instantaneous (`start == end`).
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns a copy of this interval carrying `value` instead.
    pub fn map_value<W>(&self, value: W) -> Span<W> {
        Span {
            start: self.start,
            end: self.end,
            value,
        }
    }

    /// Returns the overlap of `self` clipped to `other`'s bounds, carrying
    /// `self`'s payload.
    ///
    /// Returns `None` when the intervals do not overlap; touching
    /// endpoints do not count as overlap.
    pub fn intersect<W>(&self, other: &Span<W>) -> Option<Span<V>>
    where
        V: Clone,
    {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        if end > start {
            Some(Span {
                start,
                end,
                value: self.value.clone(),
            })
        } else {
            None
        }
    }

    /// Removes the portion of `self` covered by `other`.
    ///
    /// Returns nothing if `other` fully covers `self`, `self` unchanged if
    /// they are disjoint, one span if `other` overlaps a single end, and
    /// two spans (before and after) if `other` is strictly contained.
    /// Output spans keep `self`'s payload.
    pub fn subtract<W>(&self, other: &Span<W>) -> Vec<Span<V>>
    where
        V: Clone,
    {
        if other.end <= self.start || other.start >= self.end {
            return vec![self.clone()];
        }

        let mut pieces = Vec::new();
        if self.start < other.start {
            pieces.push(Span {
                start: self.start,
                end: other.start,
                value: self.value.clone(),
            });
        }
        if other.end < self.end {
            pieces.push(Span {
                start: other.end,
                end: self.end,
                value: self.value.clone(),
            });
        }
        pieces
    }
}
