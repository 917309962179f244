use std::cmp::Ordering;

use log::{debug, trace};

use crate::sorting_algorithms::{
    Algorithm, Comparator, Element, History, Replay, SortBase, SortDriver,
};

const PSEUDOCODE: &str = "\
quicksort(low, high) {
    if (low < high) {
        pi = partition(low, high);   // array[pi] is in its final place
        array[pi].sorted = true;
        quicksort(low, pi - 1);
        quicksort(pi + 1, high);
    }
}

partition(low, high) {
    pivot = array[high];
    l = low; r = high - 1;
    while (l < r) {
        if (array[l] > pivot && array[r] <= pivot) swap(l++, r);
        else if (array[l] <= pivot) l++;
        else r--;
    }
    if (pivot < array[r]) { swap(r, high); return r; }
    return high;
}";

/// Quick sort with the pivot taken from the high end of each range.
#[derive(Debug)]
pub struct QuickSort {
    base: SortBase,
    history: History,
    replay: Replay,
}

impl QuickSort {
    pub fn new(elements: Vec<Element>, comparator: Comparator) -> Self {
        QuickSort {
            base: SortBase::new(elements, comparator),
            history: History::new(),
            replay: Replay::default(),
        }
    }

    pub fn values(&self) -> Vec<i32> {
        self.base.elements().iter().map(|e| e.value).collect()
    }

    /// Snapshots recorded so far by [`QuickSort::partition`] and the recursion.
    pub fn history(&self) -> &History {
        &self.history
    }

    fn record(&mut self) {
        self.history.record(self.base.elements());
    }

    fn quick_sort_helper(&mut self, low: usize, high: usize) {
        if low < high {
            let pi = self.partition(low, high);
            self.base.mark_current(None);
            self.base.mark_secondary_current(None);
            self.base.elements_mut()[pi].sorted = true;
            self.record();

            if pi > low {
                self.quick_sort_helper(low, pi - 1);
            }
            self.quick_sort_helper(pi + 1, high);
        }
    }

    /// Partitions `[low, high]` around `array[high]` and returns the pivot's
    /// final index. Everything left of it compares `<=` the pivot, everything
    /// right of it `>`.
    pub fn partition(&mut self, low: usize, high: usize) -> usize {
        assert!(low < high, "partition needs at least two elements");
        trace!("partition [{low}, {high}]");

        let pivot = self.base.elements()[high];
        self.base.mark_pivot(Some(high));
        self.record();

        let mut left = low;
        let mut right = high - 1;
        while left < right {
            self.base.mark_current(Some(left));
            self.base.mark_secondary_current(Some(right));

            let elements = self.base.elements();
            let left_above = self.base.compare(&elements[left], &pivot) == Ordering::Greater;
            let right_at_most = self.base.compare(&elements[right], &pivot) != Ordering::Greater;

            if left_above {
                if right_at_most {
                    self.base.swap(left, right);
                    self.base.mark_current(Some(left));
                    self.base.mark_secondary_current(Some(right));
                    left += 1;
                } else {
                    right -= 1;
                }
            } else {
                left += 1;
            }
            self.record();
        }

        self.base.mark_pivot(None);
        self.base.mark_current(Some(high));
        self.base.mark_secondary_current(Some(right));
        self.record();

        if self.base.compare(&pivot, &self.base.elements()[right]) == Ordering::Less {
            self.base.swap(right, high);
            self.base.mark_current(Some(right));
            self.base.mark_secondary_current(Some(high));
            self.record();
            right
        } else {
            high
        }
    }

    fn record_history(mut self) -> History {
        self.init();
        if let Some(history) = self.base.trivial_history() {
            return history;
        }

        self.record();
        let last = self.base.len() - 1;
        self.quick_sort_helper(0, last);
        self.base.finish();
        self.record();

        debug!("quick sort recorded {} snapshots", self.history.len());
        self.history
    }
}

impl SortDriver for QuickSort {
    fn base(&self) -> &SortBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SortBase {
        &mut self.base
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::Quick
    }

    fn init(&mut self) -> &[Element] {
        self.base.prepare(false);
        debug!("quick sort initialized with {} elements", self.base.len());
        self.base.elements()
    }

    fn sort_next(&mut self) -> &[Element] {
        if !self.base.has_next() {
            return self.base.elements();
        }
        self.base.begin_step();
        self.base.replay_step(&mut self.replay, |elements, comparator| {
            QuickSort::new(elements, comparator).record_history()
        });
        self.base.elements()
    }

    fn full_sort(&mut self) -> History {
        QuickSort::new(self.base.elements().to_vec(), self.base.comparator()).record_history()
    }

    fn print_algorithm(&self) -> &'static str {
        PSEUDOCODE
    }
}
