//! Property tests for the histogram estimator and the rolling window.

use graxx_stats::{IntegerStats, RollingWindow};
use proptest::prelude::*;
use std::collections::VecDeque;

fn load(capacity: usize, values: &[u64]) -> IntegerStats {
    let mut stats = IntegerStats::new(capacity).unwrap();
    for &v in values {
        stats.ingest(v);
    }
    stats
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn buckets_sum_to_total(
        capacity in 1..64usize,
        values in prop::collection::vec(0..200u64, 0..300),
    ) {
        let stats = load(capacity, &values);
        prop_assert_eq!(stats.buckets().iter().sum::<u64>(), stats.total_count());
        prop_assert_eq!(stats.total_count(), values.len() as u64);
    }

    #[test]
    fn clamped_values_only_touch_top_bucket(
        capacity in 1..64usize,
        extra in prop::collection::vec(0..10_000u64, 1..50),
    ) {
        let values: Vec<u64> = extra.iter().map(|e| capacity as u64 + e).collect();
        let stats = load(capacity, &values);
        prop_assert_eq!(stats.bucket(capacity - 1), Some(values.len() as u64));
        prop_assert!(stats.buckets()[..capacity - 1].iter().all(|&c| c == 0));
    }

    #[test]
    fn everything_is_above_zero(
        capacity in 1..64usize,
        values in prop::collection::vec(0..200u64, 1..300),
    ) {
        let stats = load(capacity, &values);
        prop_assert_eq!(stats.fraction_above(0), 1.0);
    }

    #[test]
    fn percentiles_never_decrease(
        capacity in 1..64usize,
        values in prop::collection::vec(0..80u64, 1..300),
    ) {
        let stats = load(capacity, &values);
        let mut previous = 0usize;
        for p in 1..=100 {
            let current = stats.percentile(p).unwrap().unwrap();
            prop_assert!(current >= previous, "p{} = {} < {}", p, current, previous);
            prop_assert!(current < capacity);
            previous = current;
        }
    }

    #[test]
    fn median_of_two_distinct_values_is_their_midpoint(
        a in 0..50u64,
        gap in 1..50u64,
    ) {
        let stats = load(128, &[a, a + gap]);
        prop_assert_eq!(stats.median(), Some(((2 * a + gap) / 2) as usize));
    }

    #[test]
    fn window_matches_a_queue(
        capacity in 1..32usize,
        pushes in prop::collection::vec(-1e6..1e6f64, 0..200),
    ) {
        let mut window = RollingWindow::new(capacity).unwrap();
        let mut model: VecDeque<f64> = std::iter::repeat(0.0).take(capacity).collect();
        for &v in &pushes {
            window.push(v);
            model.pop_front();
            model.push_back(v);
        }
        let actual: Vec<f64> = window.iter().collect();
        let expected: Vec<f64> = model.into_iter().collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn set_then_get_touches_one_slot(
        capacity in 1..32usize,
        pushes in prop::collection::vec(-1e3..1e3f64, 0..64),
        position_seed in any::<usize>(),
        value in -1e3..1e3f64,
    ) {
        let mut window = RollingWindow::new(capacity).unwrap();
        for &v in &pushes {
            window.push(v);
        }
        let position = position_seed % capacity;
        let before: Vec<f64> = window.iter().collect();
        window.set(position, value).unwrap();
        prop_assert_eq!(window.get(position).unwrap(), value);
        for (p, (old, new)) in before.iter().zip(window.iter()).enumerate() {
            if p != position {
                prop_assert_eq!(*old, new);
            }
        }
    }
}

#[test]
fn window_slides_after_full_cycle() {
    let mut window = RollingWindow::new(4).unwrap();
    for v in 1..=4 {
        window.push(f64::from(v));
    }
    assert_eq!(window.get(0).unwrap(), 1.0);
    assert_eq!(window.get(3).unwrap(), 4.0);
    window.push(5.0);
    assert_eq!(window.get(0).unwrap(), 2.0);
    assert_eq!(window.get(3).unwrap(), 5.0);
}
