//! Integration tests for the weight pair

use slot_allocator_core_rs::{Weights, WEIGHT_MAX, WEIGHT_MIN};

#[test]
fn test_setting_w1_sets_w2_exactly() {
    let mut w = Weights::default();
    w.set_w1(0.3);

    assert_eq!(w.w1(), 0.3);
    assert_eq!(w.w2(), 0.7);
}

#[test]
fn test_setting_w2_sets_w1_exactly() {
    let mut w = Weights::default();
    w.set_w2(0.25);

    assert_eq!(w.w2(), 0.25);
    assert_eq!(w.w1(), 0.75);
}

#[test]
fn test_out_of_range_values_are_clamped() {
    let mut w = Weights::default();

    w.set_w1(-3.0);
    assert_eq!(w.w1(), WEIGHT_MIN);
    assert_eq!(w.w2(), WEIGHT_MAX);

    w.set_w1(42.0);
    assert_eq!(w.w1(), WEIGHT_MAX);
    assert!((w.w2() - WEIGHT_MIN).abs() < 1e-12);
}

#[test]
fn test_sum_stays_one() {
    for raw in [0.0, 0.1, 0.17, 0.5, 0.83, 0.9, 1.0] {
        let w = Weights::new(raw);
        assert!(
            (w.w1() + w.w2() - 1.0).abs() < 1e-12,
            "w1 + w2 must be 1.0 for input {raw}"
        );
    }
}
