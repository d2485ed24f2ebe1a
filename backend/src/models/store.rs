//! Commitment Store
//!
//! The authoritative mapping of finalized (provider, slot) assignments.
//! Everything else in the engine is derived from it: the score function
//! reads per-provider counts, the resolver reads slot consumption, and
//! the driver's marker sets are advisory overlays with no effect on
//! resolution beyond what the store already encodes.
//!
//! # Critical Invariants
//!
//! 1. A (provider, slot) pair is committed at most once (set semantics)
//! 2. A slot is "consumed" for all providers once any provider holds it
//! 3. The driver only ever adds commitments; removal happens only via
//!    `clear()` or a manual `toggle`

use crate::core::slots::SlotId;
use crate::models::provider::ProviderId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Sparse boolean relation between providers and slots.
///
/// Backed by an ordered set so iteration order is deterministic, which
/// keeps replays with a fixed RNG seed byte-for-byte identical.
///
/// # Example
/// ```
/// use slot_allocator_core_rs::{CommitmentStore, SlotId};
///
/// let mut store = CommitmentStore::new();
/// store.commit(3, SlotId::new(10, 30));
/// assert_eq!(store.count(3), 1);
/// assert!(store.slot_taken(SlotId::new(10, 30)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitmentStore {
    committed: BTreeSet<(ProviderId, SlotId)>,
}

impl CommitmentStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of a (provider, slot) pair (manual control).
    ///
    /// Returns the new membership state: `true` if the pair is now
    /// committed, `false` if the flip removed it.
    pub fn toggle(&mut self, provider: ProviderId, slot: SlotId) -> bool {
        let key = (provider, slot);
        if self.committed.remove(&key) {
            false
        } else {
            self.committed.insert(key);
            true
        }
    }

    /// Set membership true. Idempotent; never fails.
    pub fn commit(&mut self, provider: ProviderId, slot: SlotId) {
        self.committed.insert((provider, slot));
    }

    /// Empty the store (weight change or explicit reset)
    pub fn clear(&mut self) {
        self.committed.clear();
    }

    /// Committed-slot count for one provider
    pub fn count(&self, provider: ProviderId) -> usize {
        self.committed.iter().filter(|(p, _)| *p == provider).count()
    }

    /// Whether this exact pair is committed
    pub fn is_committed(&self, provider: ProviderId, slot: SlotId) -> bool {
        self.committed.contains(&(provider, slot))
    }

    /// The provider holding `slot`, if any.
    ///
    /// With one holder per slot (the toggle path is the collaborator's
    /// responsibility) this is the slot's unique owner.
    pub fn holder_of(&self, slot: SlotId) -> Option<ProviderId> {
        self.committed
            .iter()
            .find(|(_, s)| *s == slot)
            .map(|(p, _)| *p)
    }

    /// Whether any provider holds `slot`
    pub fn slot_taken(&self, slot: SlotId) -> bool {
        self.holder_of(slot).is_some()
    }

    /// Total number of committed pairs
    pub fn len(&self) -> usize {
        self.committed.len()
    }

    /// Whether the store has no commitments
    pub fn is_empty(&self) -> bool {
        self.committed.is_empty()
    }

    /// Iterate committed pairs in (provider, slot) order
    pub fn iter(&self) -> impl Iterator<Item = (ProviderId, SlotId)> + '_ {
        self.committed.iter().copied()
    }
}
