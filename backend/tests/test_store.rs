//! Integration tests for the Commitment Store

use slot_allocator_core_rs::{CommitmentStore, SlotId};

#[test]
fn test_manual_toggle_round_trip() {
    let mut store = CommitmentStore::new();
    let slot = SlotId::new(10, 0);

    assert!(store.toggle(1, slot), "first toggle commits");
    assert!(store.is_committed(1, slot));

    assert!(!store.toggle(1, slot), "second toggle removes");
    assert!(store.is_empty());
}

#[test]
fn test_commit_never_fails_and_never_duplicates() {
    let mut store = CommitmentStore::new();
    let slot = SlotId::new(10, 0);

    for _ in 0..5 {
        store.commit(4, slot);
    }
    assert_eq!(store.len(), 1);
    assert_eq!(store.count(4), 1);
}

#[test]
fn test_commit_after_manual_toggle_is_idempotent() {
    let mut store = CommitmentStore::new();
    let slot = SlotId::new(10, 0);

    store.toggle(4, slot);
    store.commit(4, slot);
    assert_eq!(store.len(), 1);

    // A later manual toggle can still remove the pair.
    assert!(!store.toggle(4, slot));
    assert!(store.is_empty());
}

#[test]
fn test_counts_and_holders_across_providers() {
    let mut store = CommitmentStore::new();
    store.commit(1, SlotId::new(9, 0));
    store.commit(1, SlotId::new(9, 30));
    store.commit(2, SlotId::new(10, 0));

    assert_eq!(store.count(1), 2);
    assert_eq!(store.count(2), 1);
    assert_eq!(store.holder_of(SlotId::new(10, 0)), Some(2));
    assert_eq!(store.holder_of(SlotId::new(10, 30)), None);
}

#[test]
fn test_clear_empties_everything() {
    let mut store = CommitmentStore::new();
    store.commit(1, SlotId::new(9, 0));
    store.commit(2, SlotId::new(9, 10));

    store.clear();

    assert!(store.is_empty());
    assert_eq!(store.count(1), 0);
    assert!(!store.slot_taken(SlotId::new(9, 0)));
}

#[test]
fn test_iteration_order_is_deterministic() {
    let mut a = CommitmentStore::new();
    let mut b = CommitmentStore::new();

    // Same pairs, different insertion order.
    a.commit(2, SlotId::new(9, 0));
    a.commit(1, SlotId::new(10, 0));
    b.commit(1, SlotId::new(10, 0));
    b.commit(2, SlotId::new(9, 0));

    let pairs_a: Vec<_> = a.iter().collect();
    let pairs_b: Vec<_> = b.iter().collect();
    assert_eq!(pairs_a, pairs_b);
}
