use std::cmp::Ordering;

use log::{debug, trace};

use crate::sorting_algorithms::{
    Algorithm, Comparator, Element, History, Replay, SortBase, SortDriver,
};

const PSEUDOCODE: &str = "\
mergesort(left, right) {
    if (right > left) {
        middle = floor((left + right) / 2);
        mergesort(left, middle);
        mergesort(middle + 1, right);
        merge(left, middle, right);
    }
}

merge(left, middle, right) {
    i = left; j = middle + 1; tmp = [];
    while (i <= middle && j <= right)
        tmp.push(array[i] <= array[j] ? array[i++] : array[j++]);
    tmp.push(...array[i..=middle], ...array[j..=right]);
    array[left..=right] = tmp;
}";

/// Top-down merge sort. Stable: ties take the left half first.
#[derive(Debug)]
pub struct MergeSort {
    base: SortBase,
    history: History,
    replay: Replay,
}

impl MergeSort {
    pub fn new(elements: Vec<Element>, comparator: Comparator) -> Self {
        MergeSort {
            base: SortBase::new(elements, comparator),
            history: History::new(),
            replay: Replay::default(),
        }
    }

    fn record(&mut self) {
        self.history.record(self.base.elements());
    }

    fn top_down_split_merge(&mut self, left: usize, right: usize) {
        if right > left {
            let middle = (left + right) / 2;
            self.top_down_split_merge(left, middle);
            self.top_down_split_merge(middle + 1, right);
            self.top_down_merge(left, middle, right);
        }
    }

    /// Merges `[left, middle]` with `[middle + 1, right]` through a scratch
    /// buffer, one snapshot per comparison and one after the copy-back.
    fn top_down_merge(&mut self, left: usize, middle: usize, right: usize) {
        if left == right {
            return;
        }
        trace!("merge [{left}, {middle}] with [{}, {right}]", middle + 1);

        let mut merged: Vec<Element> = Vec::with_capacity(right - left + 1);
        let mut i = left;
        let mut j = middle + 1;

        while i <= middle && j <= right {
            if self.base.compare_at(i, j) != Ordering::Greater {
                merged.push(self.base.elements()[i]);
                self.base.mark_current(Some(i));
                i += 1;
            } else {
                merged.push(self.base.elements()[j]);
                self.base.mark_current(Some(j));
                j += 1;
            }
            self.record();
        }

        // One side is exhausted; the rest of the other goes in as is
        merged.extend_from_slice(&self.base.elements()[i..=middle]);
        merged.extend_from_slice(&self.base.elements()[j..=right]);

        for (slot, mut element) in self.base.elements_mut()[left..=right]
            .iter_mut()
            .zip(merged)
        {
            element.clear_currents();
            element.sorted = true;
            *slot = element;
        }
        self.base.mark_current(None);
        self.record();
    }

    /// Sorts this driver's own array from scratch, recording every step.
    fn record_history(mut self) -> History {
        self.init();
        if let Some(history) = self.base.trivial_history() {
            return history;
        }

        self.record();
        let last = self.base.len() - 1;
        self.top_down_split_merge(0, last);
        self.base.finish();

        debug!("merge sort recorded {} snapshots", self.history.len());
        self.history
    }
}

impl SortDriver for MergeSort {
    fn base(&self) -> &SortBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SortBase {
        &mut self.base
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::Merge
    }

    fn init(&mut self) -> &[Element] {
        self.base.prepare(false);
        debug!("merge sort initialized with {} elements", self.base.len());
        self.base.elements()
    }

    fn sort_next(&mut self) -> &[Element] {
        if !self.base.has_next() {
            return self.base.elements();
        }
        self.base.begin_step();
        self.base.replay_step(&mut self.replay, |elements, comparator| {
            MergeSort::new(elements, comparator).record_history()
        });
        self.base.elements()
    }

    fn full_sort(&mut self) -> History {
        MergeSort::new(self.base.elements().to_vec(), self.base.comparator()).record_history()
    }

    fn print_algorithm(&self) -> &'static str {
        PSEUDOCODE
    }
}
