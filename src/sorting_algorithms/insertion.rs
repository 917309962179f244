use std::cmp::Ordering;

use log::{debug, trace};

use crate::sorting_algorithms::{Algorithm, Comparator, Element, History, SortBase, SortDriver};

const PSEUDOCODE: &str = "\
for (i = 1; i < array.length; i++) {
    cur = array[i];
    // walk cur backwards until everything before it is smaller
    for (k = i, a = k - 1; a >= 0; a--, k--) {
        if (cur < array[a]) {
            array[k] = array[a];
            array[a] = cur;
        } else {
            break;
        }
    }
    // array[0..=i] is sorted
}";

/// Insertion sort. The stepper spends one step on each comparison-and-swap
/// and a second one moving the cursor, so every swap stays on screen.
#[derive(Debug)]
pub struct InsertionSort {
    base: SortBase,
    outer_index: usize,
    /// Element `swap_index` is compared against; `None` once it reached the front.
    inner_index: Option<usize>,
    swap_index: usize,
    prev_swap: bool,
}

impl InsertionSort {
    pub fn new(elements: Vec<Element>, comparator: Comparator) -> Self {
        InsertionSort {
            base: SortBase::new(elements, comparator),
            outer_index: 1,
            inner_index: Some(0),
            swap_index: 1,
            prev_swap: false,
        }
    }

    /// Highlights `k` against its left neighbour, or just `k` at the front.
    fn highlight_from(&mut self, k: usize) {
        self.base.mark_current(Some(k));
        self.base.mark_secondary_current(k.checked_sub(1));
    }

    /// `[0, i]` is sorted; point the markers at the next element to insert.
    fn settle_prefix(&mut self, i: usize) {
        self.base.mark_sorted_prefix(Some(i));
        let next = i + 1;
        self.base
            .mark_current((next < self.base.len()).then_some(next));
        self.base.mark_secondary_current(Some(i));
    }

    fn record_history(mut self) -> History {
        self.init();
        if let Some(history) = self.base.trivial_history() {
            return history;
        }

        let mut history = History::new();
        history.record(self.base.elements());

        for i in 1..self.base.len() {
            // Markers already sit on (i, i - 1) from init or the previous settle
            let mut k = i;
            while k > 0 && self.base.compare_at(k, k - 1) == Ordering::Less {
                self.base.swap(k, k - 1);
                history.record(self.base.elements());

                k -= 1;
                self.highlight_from(k);
                history.record(self.base.elements());
            }
            self.settle_prefix(i);
            history.record(self.base.elements());
        }

        self.base.finish();
        history.record(self.base.elements());
        debug!("insertion sort recorded {} snapshots", history.len());
        history
    }
}

impl SortDriver for InsertionSort {
    fn base(&self) -> &SortBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SortBase {
        &mut self.base
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::Insertion
    }

    fn init(&mut self) -> &[Element] {
        self.base.prepare(true);
        debug!("insertion sort initialized with {} elements", self.base.len());
        self.base.elements()
    }

    fn sort_next(&mut self) -> &[Element] {
        if !self.base.has_next() {
            return self.base.elements();
        }
        self.base.begin_step();

        if self.outer_index >= self.base.len() {
            self.base.finish();
            return self.base.elements();
        }

        if self.prev_swap {
            self.prev_swap = false;
            self.inner_index = self.inner_index.and_then(|a| a.checked_sub(1));
            self.swap_index -= 1;
            self.highlight_from(self.swap_index);
            return self.base.elements();
        }

        let should_swap = match self.inner_index {
            Some(a) => self.base.compare_at(self.swap_index, a) == Ordering::Less,
            None => false,
        };

        match self.inner_index {
            Some(a) if should_swap => {
                trace!("insertion swap {} <-> {}", self.swap_index, a);
                // The markers travel with the swapped elements
                self.base.swap(self.swap_index, a);
                self.prev_swap = true;
            }
            _ => {
                self.settle_prefix(self.outer_index);
                self.outer_index += 1;
                self.swap_index = self.outer_index;
                self.inner_index = Some(self.outer_index - 1);
            }
        }

        self.base.elements()
    }

    fn full_sort(&mut self) -> History {
        InsertionSort::new(self.base.elements().to_vec(), self.base.comparator()).record_history()
    }

    fn print_algorithm(&self) -> &'static str {
        PSEUDOCODE
    }
}
