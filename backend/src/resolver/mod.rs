//! Assignment Resolver
//!
//! Determines which provider currently "owns" (is eligible to claim)
//! each slot, given the commitment state. Pure passes over read-only
//! state; resolution has no side effects and is fully deterministic,
//! including the tie-break.

use crate::core::slots::{SlotGrid, SlotId};
use crate::models::provider::{Provider, ProviderId};
use crate::models::store::CommitmentStore;
use crate::models::weights::Weights;
use crate::scoring::{score, truncate2};

/// One resolved (slot, provider) eligibility pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment {
    pub slot: SlotId,
    pub provider: ProviderId,
}

/// Resolve the currently eligible provider for one slot.
///
/// Returns `None` once any provider holds the slot: a committed slot is
/// consumed for all providers, not just its holder. Otherwise every
/// provider is scored, scores are truncated to two decimals, and the
/// maximum wins. Ties are broken deterministically: tied ids sorted
/// ascending, indexed by `slot.component_sum() mod ties.len()`.
pub fn resolve(
    slot: SlotId,
    providers: &[Provider],
    store: &CommitmentStore,
    total_slots: usize,
    weights: &Weights,
) -> Option<ProviderId> {
    if store.slot_taken(slot) {
        return None;
    }

    let mut best = f64::NEG_INFINITY;
    let mut tied: Vec<ProviderId> = Vec::new();
    for provider in providers {
        let s = truncate2(score(provider, store, total_slots, weights));
        if s > best {
            best = s;
            tied.clear();
            tied.push(provider.id());
        } else if s == best {
            tied.push(provider.id());
        }
    }

    if tied.is_empty() {
        return None;
    }
    if tied.len() == 1 {
        return Some(tied[0]);
    }

    tied.sort_unstable();
    let h = slot.component_sum() as usize;
    Some(tied[h % tied.len()])
}

/// Resolve every slot in the grid, in the grid's time order.
///
/// Slots with no eligible provider are omitted. This ordered sequence
/// is what the driver's percentile bands sample from.
pub fn resolve_all(
    grid: &SlotGrid,
    providers: &[Provider],
    store: &CommitmentStore,
    weights: &Weights,
) -> Vec<Assignment> {
    grid.iter()
        .filter_map(|slot| {
            resolve(slot, providers, store, grid.len(), weights)
                .map(|provider| Assignment { slot, provider })
        })
        .collect()
}
