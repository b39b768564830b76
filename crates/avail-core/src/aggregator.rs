//! Reduction strategies over the momentary active set.
//!
//! An aggregator reduces the spans concurrently active at one moment of a
//! sweep to a single value. All aggregators share the fallible contract so
//! `ops::aggregate` can abort a sweep on the first failure.

use crate::span::{EngineError, Span};

/// Sums numeric payloads across the active set.
///
/// Fails on an empty set: a sum without members has no identity element
/// here, and silently returning zero would hide a broken partition.
pub fn sum(active: &[&Span<f64>]) -> Result<f64, EngineError> {
    if active.is_empty() {
        return Err(EngineError::EmptyAggregation);
    }
    Ok(active.iter().map(|span| span.value).sum())
}

/// Number of spans in the active set.
#[allow(clippy::unnecessary_wraps)]
pub fn count<V>(active: &[&Span<V>]) -> Result<usize, EngineError> {
    Ok(active.len())
}

/// Snapshots the active set as owned spans.
#[allow(clippy::unnecessary_wraps)]
pub fn identity<V: Clone>(active: &[&Span<V>]) -> Result<Vec<Span<V>>, EngineError> {
    Ok(active.iter().map(|&span| span.clone()).collect())
}

/// Builds an aggregator reporting the fraction of `total` members active.
///
/// A `total` of zero is rejected here so a bad denominator surfaces once,
/// not on every emitted interval.
pub fn ratio<V>(
    total: usize,
) -> Result<impl Fn(&[&Span<V>]) -> Result<f64, EngineError>, EngineError> {
    if total == 0 {
        return Err(EngineError::DivisionByZero {
            denominator: "ratio total",
        });
    }
    #[allow(clippy::cast_precision_loss)]
    let divide = move |active: &[&Span<V>]| -> Result<f64, EngineError> {
        Ok(active.len() as f64 / total as f64)
    };
    Ok(divide)
}
