//! Availability score
//!
//! Pure function mapping (provider, commitment state) to a priority.
//! Two terms, independently weighted:
//!
//! - freshness `x`: fraction of the grid the provider has not yet
//!   committed, range (0, 1] — rewards remaining capacity
//! - scarcity `decay = e^(-1.2 * (licenses - 1))`: strictly decreasing
//!   in license count, equal to 1 for a single license — gives
//!   low-capacity providers priority early, tapering quickly
//!
//! `score = w1 * x + w2 * decay`. No side effects; pure read of the
//! store.

use crate::models::provider::Provider;
use crate::models::store::CommitmentStore;
use crate::models::weights::Weights;

/// Decay rate of the license-scarcity bonus
pub const LICENSE_DECAY_RATE: f64 = 1.2;

/// Availability score for one provider against the current store.
///
/// `total_slots` is the fixed size of the slot grid. A provider with
/// zero licenses scores positive infinity; this is a documented
/// anomaly (capacity is expected >= 1), not an error.
///
/// # Example
/// ```
/// use slot_allocator_core_rs::{score, CommitmentStore, Provider, Weights};
///
/// let provider = Provider::new(1, "Solo".to_string(), 1);
/// let store = CommitmentStore::new();
/// // capacity 1 and an empty store: both terms are 1.0
/// assert_eq!(score(&provider, &store, 24, &Weights::default()), 1.0);
/// ```
pub fn score(
    provider: &Provider,
    store: &CommitmentStore,
    total_slots: usize,
    weights: &Weights,
) -> f64 {
    if provider.licenses() == 0 {
        return f64::INFINITY;
    }

    let total = total_slots as f64;
    let remaining = total - store.count(provider.id()) as f64;
    let x = remaining / total;
    let decay = (-LICENSE_DECAY_RATE * (provider.licenses() as f64 - 1.0)).exp();

    weights.w1() * x + weights.w2() * decay
}

/// Truncate toward zero at two decimal places.
///
/// The resolver compares truncated scores; truncation (not
/// nearest-rounding) is the authoritative behavior because it affects
/// how often candidates tie.
pub fn truncate2(value: f64) -> f64 {
    (value * 100.0).trunc() / 100.0
}
