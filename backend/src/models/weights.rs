//! Score weights
//!
//! Two real weights constrained to sum to 1.0, each clamped to
//! [0.1, 0.9]. Setting one recomputes the other as its complement.
//! Out-of-range values are clamped, never rejected.
//!
//! Changing weights changes the score semantics, so the engine clears
//! the Commitment Store whenever either weight is set (handled by the
//! `Scheduler`, not here — this type is a pure value).

use serde::{Deserialize, Serialize};

/// Lower clamp for either weight
pub const WEIGHT_MIN: f64 = 0.1;
/// Upper clamp for either weight
pub const WEIGHT_MAX: f64 = 0.9;

/// Complementary (freshness, scarcity) weight pair.
///
/// `w1` weighs a provider's remaining uncommitted capacity, `w2` the
/// license-scarcity decay bonus.
///
/// # Example
/// ```
/// use slot_allocator_core_rs::Weights;
///
/// let mut weights = Weights::default();
/// assert_eq!((weights.w1(), weights.w2()), (0.5, 0.5));
///
/// weights.set_w1(0.3);
/// assert_eq!(weights.w2(), 0.7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    w1: f64,
    w2: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self { w1: 0.5, w2: 0.5 }
    }
}

impl Weights {
    /// Build a pair from the freshness weight; the scarcity weight is
    /// its complement.
    pub fn new(w1: f64) -> Self {
        let w1 = w1.clamp(WEIGHT_MIN, WEIGHT_MAX);
        Self { w1, w2: 1.0 - w1 }
    }

    /// Set the freshness weight (clamped); recomputes `w2 = 1 - w1`
    pub fn set_w1(&mut self, value: f64) {
        self.w1 = value.clamp(WEIGHT_MIN, WEIGHT_MAX);
        self.w2 = 1.0 - self.w1;
    }

    /// Set the scarcity weight (clamped); recomputes `w1 = 1 - w2`
    pub fn set_w2(&mut self, value: f64) {
        self.w2 = value.clamp(WEIGHT_MIN, WEIGHT_MAX);
        self.w1 = 1.0 - self.w2;
    }

    /// Freshness weight
    pub fn w1(&self) -> f64 {
        self.w1
    }

    /// Scarcity weight
    pub fn w2(&self) -> f64 {
        self.w2
    }
}
