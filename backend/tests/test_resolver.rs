//! Integration tests for the Assignment Resolver

use slot_allocator_core_rs::{
    resolve, resolve_all, CommitmentStore, Provider, SlotGrid, SlotId, Weights,
};

fn tied_pair() -> Vec<Provider> {
    // Identical capacity and identical commitment history: identical
    // truncated scores, so every slot is decided by the tie-break.
    vec![
        Provider::new(3, "A".to_string(), 1),
        Provider::new(7, "B".to_string(), 1),
    ]
}

#[test]
fn test_tie_break_worked_example() {
    // Slot 10:30, component sum 40, two tied candidates sorted
    // ascending [3, 7]: index 40 mod 2 = 0 picks provider 3.
    let providers = tied_pair();
    let store = CommitmentStore::new();
    let weights = Weights::default();
    let slot = SlotId::new(10, 30);

    for _ in 0..20 {
        assert_eq!(resolve(slot, &providers, &store, 6, &weights), Some(3));
    }
}

#[test]
fn test_tie_break_odd_sum_picks_second() {
    let providers = tied_pair();
    let store = CommitmentStore::new();
    let weights = Weights::default();

    // Component sum 45, 45 mod 2 = 1.
    assert_eq!(
        resolve(SlotId::new(10, 35), &providers, &store, 6, &weights),
        Some(7)
    );
}

#[test]
fn test_tie_break_ignores_supplied_provider_order() {
    let forward = tied_pair();
    let mut reversed = tied_pair();
    reversed.reverse();

    let store = CommitmentStore::new();
    let weights = Weights::default();
    let slot = SlotId::new(10, 30);

    assert_eq!(
        resolve(slot, &forward, &store, 6, &weights),
        resolve(slot, &reversed, &store, 6, &weights),
    );
}

#[test]
fn test_committed_provider_never_returned_again() {
    let providers = tied_pair();
    let mut store = CommitmentStore::new();
    let weights = Weights::default();
    let slot = SlotId::new(10, 30);

    assert_eq!(resolve(slot, &providers, &store, 6, &weights), Some(3));
    store.commit(3, slot);

    // The slot is consumed outright, not handed to provider 7.
    assert_eq!(resolve(slot, &providers, &store, 6, &weights), None);
}

#[test]
fn test_fully_consumed_grid_resolves_to_nothing() {
    let providers = tied_pair();
    let grid = SlotGrid::generate(9, 10, 20);
    let mut store = CommitmentStore::new();
    let weights = Weights::default();

    for slot in grid.iter() {
        store.commit(3, slot);
    }

    assert!(resolve_all(&grid, &providers, &store, &weights).is_empty());
    for slot in grid.iter() {
        assert_eq!(resolve(slot, &providers, &store, grid.len(), &weights), None);
    }
}

#[test]
fn test_resolve_all_output_is_time_ordered() {
    let providers = tied_pair();
    let grid = SlotGrid::generate(9, 11, 10);
    let store = CommitmentStore::new();

    let all = resolve_all(&grid, &providers, &store, &Weights::default());
    assert_eq!(all.len(), grid.len());
    for pair in all.windows(2) {
        assert!(pair[0].slot < pair[1].slot);
    }
}

#[test]
fn test_commitments_shift_the_decision() {
    // Provider 3 commits two slots; its freshness term drops below
    // provider 7's and the tie dissolves in 7's favor everywhere else.
    let providers = tied_pair();
    let grid = SlotGrid::generate(9, 10, 10);
    let mut store = CommitmentStore::new();
    let weights = Weights::default();

    store.commit(3, SlotId::new(9, 0));
    store.commit(3, SlotId::new(9, 10));

    for slot in grid.iter().skip(2) {
        assert_eq!(
            resolve(slot, &providers, &store, grid.len(), &weights),
            Some(7),
            "slot {slot}"
        );
    }
}

#[test]
fn test_zero_capacity_provider_dominates() {
    // Infinite score: the defensive anomaly wins every free slot.
    let providers = vec![
        Provider::new(1, "A".to_string(), 0),
        Provider::new(2, "B".to_string(), 1),
    ];
    let store = CommitmentStore::new();

    assert_eq!(
        resolve(SlotId::new(9, 0), &providers, &store, 6, &Weights::default()),
        Some(1)
    );
}
