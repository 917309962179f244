use std::cmp::Ordering;

use log::{debug, trace};

use crate::sorting_algorithms::{Algorithm, Comparator, Element, History, SortBase, SortDriver};

const PSEUDOCODE: &str = "\
for (end = array.length - 1; end >= 0; end--) {
    for (i = 1; i <= end; i++) {
        cur = array[i];
        prev = array[i - 1];
        if (prev > cur) {
            array[i] = prev;
            array[i - 1] = cur;
        }
    }
    // array[end..] now holds the largest values in order
}";

#[derive(Debug)]
pub struct BubbleSort {
    base: SortBase,
    end_index: usize,
    inner_index: usize,
}

impl BubbleSort {
    pub fn new(elements: Vec<Element>, comparator: Comparator) -> Self {
        let end_index = elements.len().saturating_sub(1);
        BubbleSort {
            base: SortBase::new(elements, comparator),
            end_index,
            inner_index: 1,
        }
    }

    fn highlight_pair(&mut self, i: usize) {
        self.base.mark_current(Some(i));
        self.base.mark_secondary_current(Some(i - 1));
    }

    fn record_history(mut self) -> History {
        self.init();
        if let Some(history) = self.base.trivial_history() {
            return history;
        }

        let mut history = History::new();
        history.record(self.base.elements());

        for end in (0..self.base.len()).rev() {
            for i in 1..=end {
                self.highlight_pair(i);
                history.record(self.base.elements());

                if self.base.compare_at(i - 1, i) == Ordering::Greater {
                    self.base.swap(i - 1, i);
                    self.highlight_pair(i);
                    history.record(self.base.elements());
                }
            }
            self.base.mark_sorted_suffix_from(end, true);
            history.record(self.base.elements());
        }

        self.base.finish();
        debug!("bubble sort recorded {} snapshots", history.len());
        history
    }
}

impl SortDriver for BubbleSort {
    fn base(&self) -> &SortBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SortBase {
        &mut self.base
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::Bubble
    }

    fn init(&mut self) -> &[Element] {
        self.base.prepare(true);
        debug!("bubble sort initialized with {} elements", self.base.len());
        self.base.elements()
    }

    fn sort_next(&mut self) -> &[Element] {
        if !self.base.has_next() {
            return self.base.elements();
        }
        self.base.begin_step();

        if self.base.len() < 2 {
            self.base.finish();
            return self.base.elements();
        }

        let i = self.inner_index;
        if self.base.compare_at(i - 1, i) == Ordering::Greater {
            // Stay on this pair for one more step so the swap is visible
            trace!("bubble swap {} <-> {}", i - 1, i);
            self.base.swap(i - 1, i);
            self.highlight_pair(i);
        } else if i < self.end_index {
            self.inner_index += 1;
            self.highlight_pair(self.inner_index);
        } else if self.end_index > 0 {
            self.end_index -= 1;
            self.inner_index = 1;
            self.highlight_pair(1);
            self.base.mark_sorted_suffix_from(self.end_index + 1, false);
            trace!("bubble pass done, sorted from {}", self.end_index + 1);
        } else {
            self.base.finish();
        }

        self.base.elements()
    }

    fn full_sort(&mut self) -> History {
        BubbleSort::new(self.base.elements().to_vec(), self.base.comparator()).record_history()
    }

    fn print_algorithm(&self) -> &'static str {
        PSEUDOCODE
    }
}
