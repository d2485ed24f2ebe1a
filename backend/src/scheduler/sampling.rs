//! Percentile-band sampling over time-ordered resolver output.
//!
//! A band is a contiguous sub-range of an ordered sequence, expressed
//! as fractional rank bounds `[lo, hi)`: element `i` of an `n`-element
//! sequence belongs to the band when `i / n` lies in the interval.
//! Sampling uniformly within early bands biases the simulation toward
//! filling the earliest slots first while keeping it non-deterministic.

use crate::resolver::Assignment;
use crate::rng::RngManager;
use std::ops::Range;

/// Index range of the `[lo, hi)` rank-fraction band of an `len`-element
/// sequence.
pub fn band_range(len: usize, lo: f64, hi: f64) -> Range<usize> {
    let n = len as f64;
    let start = (lo * n).ceil() as usize;
    let end = ((hi * n).ceil() as usize).min(len);
    start..end.max(start)
}

/// Uniform sample from the `[lo, hi)` band of `entries`.
///
/// Returns `None` when the band contains no elements.
pub fn sample_band(
    entries: &[Assignment],
    lo: f64,
    hi: f64,
    rng: &mut RngManager,
) -> Option<Assignment> {
    let range = band_range(entries.len(), lo, hi);
    if range.is_empty() {
        return None;
    }
    let offset = rng.index(range.len());
    Some(entries[range.start + offset])
}

/// Uniform sample from the earliest `frac` of `entries`, never fewer
/// than one element when `entries` is non-empty.
pub fn sample_earliest(
    entries: &[Assignment],
    frac: f64,
    rng: &mut RngManager,
) -> Option<Assignment> {
    if entries.is_empty() {
        return None;
    }
    let end = band_range(entries.len(), 0.0, frac).end.max(1);
    let offset = rng.index(end);
    Some(entries[offset])
}
