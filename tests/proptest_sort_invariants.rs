//! Property-based invariant tests for the sort drivers.
//!
//! 1. Final snapshot is ordered and fully settled, for every algorithm
//! 2. The multiset of values survives every swap and merge copy-back
//! 3. Histories are never empty
//! 4. Stepping to the end reaches the full-history final state
//! 5. Merge keeps equal values in their original order
//! 6. Quick partition separates its range around the pivot
//! 7. `has_next` does not change unless the driver steps
//! 8. Snapshots never alias the live array, and `full_sort` leaves the
//!    stepper where it was

use proptest::prelude::*;
use sort_visualizer::sorting_algorithms::{
    Algorithm, Comparator, Element, MergeSort, QuickSort, SortDriver, Sorter,
};

// ── Strategies ──────────────────────────────────────────────────────────

fn values_strategy() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(1i32..=100, 0..40)
}

/// Few distinct values, lots of ties.
fn duplicate_heavy_strategy() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(1i32..=4, 2..40)
}

/// An array plus an inner range `low < high` inside it.
fn ranged_values_strategy() -> impl Strategy<Value = (Vec<i32>, usize, usize)> {
    prop::collection::vec(1i32..=100, 2..40)
        .prop_flat_map(|values| {
            let len = values.len();
            (Just(values), 0..len - 1)
        })
        .prop_flat_map(|(values, low)| {
            let len = values.len();
            (Just(values), Just(low), low + 1..len)
        })
}

fn algorithm_strategy() -> impl Strategy<Value = Algorithm> {
    prop::sample::select(Algorithm::ALL.to_vec())
}

fn sorter(algorithm: Algorithm, values: &[i32]) -> Sorter {
    Sorter::new(algorithm, Element::from_values(values), Comparator::default())
}

fn step_to_end(driver: &mut Sorter) -> Vec<Element> {
    driver.init();
    while driver.has_next() {
        driver.sort_next();
    }
    driver.elements().to_vec()
}

fn sorted_copy(values: &[i32]) -> Vec<i32> {
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    sorted
}

// ═══════════════════════════════════════════════════════════════════════
// 1–3. Final state, value preservation, non-empty history
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn full_sort_ends_sorted_and_settled(
        algorithm in algorithm_strategy(),
        values in values_strategy(),
    ) {
        let history = sorter(algorithm, &values).full_sort();
        prop_assert!(!history.is_empty());

        let last = history.last().unwrap();
        prop_assert!(last.values().windows(2).all(|w| w[0] <= w[1]));
        prop_assert!(last.iter().all(|e| e.sorted));
        prop_assert!(last.iter().all(|e| !e.current && !e.secondary_current && !e.pivot));
    }

    #[test]
    fn duplicates_sort_cleanly(
        algorithm in algorithm_strategy(),
        values in duplicate_heavy_strategy(),
    ) {
        let history = sorter(algorithm, &values).full_sort();
        prop_assert_eq!(history.last().unwrap().values(), sorted_copy(&values));
    }

    #[test]
    fn values_are_preserved_in_every_snapshot(
        algorithm in algorithm_strategy(),
        values in values_strategy(),
    ) {
        let history = sorter(algorithm, &values).full_sort();
        let expected = sorted_copy(&values);
        for snapshot in &history {
            prop_assert_eq!(sorted_copy(&snapshot.values()), expected.clone());
        }
        if values.len() >= 2 {
            prop_assert_eq!(history.first().unwrap().values(), values);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 4. Stepper / full-history equivalence
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn stepper_reaches_full_history_state(
        algorithm in algorithm_strategy(),
        values in values_strategy(),
    ) {
        let history = sorter(algorithm, &values).full_sort();
        let last = history.last().unwrap();

        let stepped = step_to_end(&mut sorter(algorithm, &values));
        let stepped_values: Vec<i32> = stepped.iter().map(|e| e.value).collect();
        let stepped_sorted: Vec<bool> = stepped.iter().map(|e| e.sorted).collect();
        let last_sorted: Vec<bool> = last.iter().map(|e| e.sorted).collect();

        prop_assert_eq!(stepped_values, last.values());
        prop_assert_eq!(stepped_sorted, last_sorted);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 5. Merge stability
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn merge_keeps_ties_in_input_order(values in duplicate_heavy_strategy()) {
        let mut merge = MergeSort::new(Element::from_values(&values), Comparator::default());
        let history = merge.full_sort();
        let last = history.last().unwrap();
        for pair in last.windows(2) {
            if pair[0].value == pair[1].value {
                prop_assert!(pair[0].id < pair[1].id);
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 6. Quick partition
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn partition_splits_around_pivot(values in prop::collection::vec(1i32..=100, 2..40)) {
        let high = values.len() - 1;
        let mut quick = QuickSort::new(Element::from_values(&values), Comparator::default());
        quick.init();
        let pi = quick.partition(0, high);
        let after = quick.values();

        prop_assert!(pi <= high);
        prop_assert!(after[..pi].iter().all(|&v| v <= after[pi]));
        prop_assert!(after[pi + 1..].iter().all(|&v| v >= after[pi]));
        prop_assert_eq!(sorted_copy(&after), sorted_copy(&values));
    }

    #[test]
    fn partition_stays_inside_its_range((values, low, high) in ranged_values_strategy()) {
        let mut quick = QuickSort::new(Element::from_values(&values), Comparator::default());
        quick.init();
        let pi = quick.partition(low, high);
        let after = quick.values();

        prop_assert!(low <= pi && pi <= high);
        prop_assert!(after[low..pi].iter().all(|&v| v <= after[pi]));
        prop_assert!(after[pi + 1..=high].iter().all(|&v| v >= after[pi]));
        prop_assert_eq!(&after[..low], &values[..low]);
        prop_assert_eq!(&after[high + 1..], &values[high + 1..]);
        prop_assert_eq!(sorted_copy(&after[low..=high]), sorted_copy(&values[low..=high]));
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 7–8. has_next idempotence, snapshot and stepper independence
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn has_next_only_changes_on_steps(
        algorithm in algorithm_strategy(),
        values in values_strategy(),
    ) {
        let mut driver = sorter(algorithm, &values);
        driver.init();
        loop {
            let before = driver.has_next();
            prop_assert_eq!(driver.has_next(), before);
            prop_assert_eq!(driver.has_next(), before);
            if !before {
                break;
            }
            driver.sort_next();
        }
    }

    #[test]
    fn recorded_history_outlives_live_mutation(
        algorithm in algorithm_strategy(),
        values in prop::collection::vec(1i32..=100, 2..20),
    ) {
        let mut driver = sorter(algorithm, &values);
        let history = driver.full_sort();

        // Step the same driver to the end, then scribble on its array
        step_to_end(&mut driver);
        driver.base_mut().elements_mut().reverse();
        driver.base_mut().elements_mut()[0].pivot = true;

        let fresh = sorter(algorithm, &values).full_sort();
        prop_assert_eq!(history.len(), fresh.len());
        for (kept, expected) in history.iter().zip(&fresh) {
            prop_assert_eq!(kept, expected);
        }
        prop_assert_eq!(history.first().unwrap().values(), values);
    }

    #[test]
    fn full_sort_does_not_move_the_stepper(
        algorithm in algorithm_strategy(),
        values in prop::collection::vec(1i32..=100, 2..20),
        steps in 0usize..10,
    ) {
        let mut driver = sorter(algorithm, &values);
        driver.init();
        for _ in 0..steps {
            driver.sort_next();
        }
        let state = driver.state();
        let live = driver.elements().to_vec();

        driver.full_sort();
        prop_assert_eq!(driver.state(), state);
        prop_assert_eq!(driver.elements(), live.as_slice());
    }
}
