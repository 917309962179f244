pub mod annotate;
pub mod bubble;
pub mod element;
pub mod history;
pub mod insertion;
pub mod mergesort;
pub mod quicksort;

use std::cmp::Ordering;
use std::fmt;

use log::debug;

pub use bubble::BubbleSort;
pub use element::{CompareKey, Comparator, Element};
pub use history::{History, Replay, Snapshot};
pub use insertion::InsertionSort;
pub use mergesort::MergeSort;
pub use quicksort::QuickSort;

/// Lifecycle of a driver. `Done` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    Uninitialized,
    Ready,
    Stepping,
    Done,
}

/// Which sorting algorithm to visualize.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Algorithm {
    Bubble,
    Insertion,
    #[default]
    Merge,
    Quick,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Bubble,
        Algorithm::Insertion,
        Algorithm::Merge,
        Algorithm::Quick,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Bubble => "Bubble Sort",
            Algorithm::Insertion => "Insertion Sort",
            Algorithm::Merge => "Merge Sort",
            Algorithm::Quick => "Quick Sort",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// State and behavior every driver shares: the owned array, the comparator
/// and the lifecycle.
#[derive(Debug)]
pub struct SortBase {
    elements: Vec<Element>,
    comparator: Comparator,
    state: DriverState,
}

impl SortBase {
    pub fn new(elements: Vec<Element>, comparator: Comparator) -> Self {
        SortBase {
            elements,
            comparator,
            state: DriverState::Uninitialized,
        }
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn elements_mut(&mut self) -> &mut [Element] {
        &mut self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn comparator(&self) -> Comparator {
        self.comparator
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn has_next(&self) -> bool {
        self.state != DriverState::Done
    }

    /// Compares the elements at two indices.
    pub fn compare_at(&self, a: usize, b: usize) -> Ordering {
        self.comparator.compare(&self.elements[a], &self.elements[b])
    }

    pub fn compare(&self, a: &Element, b: &Element) -> Ordering {
        self.comparator.compare(a, b)
    }

    pub fn swap(&mut self, a: usize, b: usize) {
        self.elements.swap(a, b);
    }

    pub fn mark_current(&mut self, index: Option<usize>) {
        annotate::mark_current(&mut self.elements, index);
    }

    pub fn mark_secondary_current(&mut self, index: Option<usize>) {
        annotate::mark_secondary_current(&mut self.elements, index);
    }

    pub fn mark_pivot(&mut self, index: Option<usize>) {
        annotate::mark_pivot(&mut self.elements, index);
    }

    pub fn mark_sorted_prefix(&mut self, end: Option<usize>) {
        annotate::mark_sorted_prefix(&mut self.elements, end);
    }

    pub fn mark_sorted_suffix_from(&mut self, start: usize, clear_currents: bool) {
        annotate::mark_sorted_suffix_from(&mut self.elements, start, clear_currents);
    }

    /// Clears every flag and optionally highlights the first pair. Progress
    /// cursors live in the drivers and are untouched. A finished driver keeps
    /// its settled array.
    pub fn prepare(&mut self, highlight_first_pair: bool) {
        if self.state == DriverState::Done {
            return;
        }
        annotate::clear_roles(&mut self.elements);
        if highlight_first_pair && self.elements.len() >= 2 {
            self.mark_current(Some(1));
            self.mark_secondary_current(Some(0));
        }
        if self.state == DriverState::Uninitialized {
            self.state = DriverState::Ready;
        }
    }

    /// Records that a stepper unit is about to run.
    pub fn begin_step(&mut self) {
        assert!(
            self.state != DriverState::Uninitialized,
            "sort_next called before init"
        );
        if self.state == DriverState::Ready {
            self.state = DriverState::Stepping;
        }
    }

    /// Marks the whole array sorted, drops every transient marker and moves
    /// to `Done`.
    pub fn finish(&mut self) {
        let last = self.elements.len().checked_sub(1);
        self.mark_sorted_prefix(last);
        self.mark_pivot(None);
        self.state = DriverState::Done;
        debug!("sort finished over {} elements", self.elements.len());
    }

    /// Arrays shorter than two elements have nothing to sort: their history
    /// is the single settled state.
    pub fn trivial_history(&mut self) -> Option<History> {
        if self.elements.len() >= 2 {
            return None;
        }
        self.finish();
        let mut history = History::new();
        history.record(&self.elements);
        Some(history)
    }

    /// One stepper unit for drivers that only know how to run to completion:
    /// the full history is computed once on a private copy and then copied
    /// over the live array one snapshot at a time.
    pub fn replay_step<F>(&mut self, replay: &mut Replay, compute: F)
    where
        F: FnOnce(Vec<Element>, Comparator) -> History,
    {
        if !replay.is_loaded() {
            replay.load(compute(self.elements.clone(), self.comparator));
            debug!("precomputed {} replay steps", replay.remaining());
        }
        replay.advance(&mut self.elements);
        if replay.remaining() == 0 {
            self.finish();
        }
    }
}

/// Common interface of the four drivers.
///
/// Stepper mode: `init`, then `sort_next` while `has_next`. Full-history mode:
/// `full_sort`, which needs no `init` and can be called at any point.
pub trait SortDriver {
    fn base(&self) -> &SortBase;

    fn base_mut(&mut self) -> &mut SortBase;

    fn algorithm(&self) -> Algorithm;

    /// Clears all flags and sets the algorithm's opening highlight.
    fn init(&mut self) -> &[Element];

    /// Advances one visible unit of work. A no-op once `has_next` is false.
    fn sort_next(&mut self) -> &[Element];

    /// Runs the whole sort on a copy of the current array, recording a
    /// snapshot at every step boundary. The stepper's array and lifecycle are
    /// left as they were.
    fn full_sort(&mut self) -> History;

    /// Fixed pseudocode of the algorithm.
    fn print_algorithm(&self) -> &'static str;

    fn has_next(&self) -> bool {
        self.base().has_next()
    }

    fn state(&self) -> DriverState {
        self.base().state()
    }

    fn elements(&self) -> &[Element] {
        self.base().elements()
    }

    fn compare(&self, a: &Element, b: &Element) -> Ordering {
        self.base().compare(a, b)
    }
}

/// A driver selected by [`Algorithm`].
#[derive(Debug)]
pub enum Sorter {
    Bubble(BubbleSort),
    Insertion(InsertionSort),
    Merge(MergeSort),
    Quick(QuickSort),
}

impl Sorter {
    pub fn new(algorithm: Algorithm, elements: Vec<Element>, comparator: Comparator) -> Self {
        match algorithm {
            Algorithm::Bubble => Sorter::Bubble(BubbleSort::new(elements, comparator)),
            Algorithm::Insertion => Sorter::Insertion(InsertionSort::new(elements, comparator)),
            Algorithm::Merge => Sorter::Merge(MergeSort::new(elements, comparator)),
            Algorithm::Quick => Sorter::Quick(QuickSort::new(elements, comparator)),
        }
    }

    fn driver(&self) -> &dyn SortDriver {
        match self {
            Sorter::Bubble(d) => d,
            Sorter::Insertion(d) => d,
            Sorter::Merge(d) => d,
            Sorter::Quick(d) => d,
        }
    }

    fn driver_mut(&mut self) -> &mut dyn SortDriver {
        match self {
            Sorter::Bubble(d) => d,
            Sorter::Insertion(d) => d,
            Sorter::Merge(d) => d,
            Sorter::Quick(d) => d,
        }
    }
}

impl SortDriver for Sorter {
    fn base(&self) -> &SortBase {
        self.driver().base()
    }

    fn base_mut(&mut self) -> &mut SortBase {
        self.driver_mut().base_mut()
    }

    fn algorithm(&self) -> Algorithm {
        self.driver().algorithm()
    }

    fn init(&mut self) -> &[Element] {
        self.driver_mut().init()
    }

    fn sort_next(&mut self) -> &[Element] {
        self.driver_mut().sort_next()
    }

    fn full_sort(&mut self) -> History {
        self.driver_mut().full_sort()
    }

    fn print_algorithm(&self) -> &'static str {
        self.driver().print_algorithm()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_stepper(sorter: &mut Sorter) -> Vec<Element> {
        sorter.init();
        let mut guard = 0;
        while sorter.has_next() {
            sorter.sort_next();
            guard += 1;
            assert!(guard < 100_000, "stepper did not terminate");
        }
        sorter.elements().to_vec()
    }

    #[test]
    fn sorter_dispatches_by_algorithm() {
        for algorithm in Algorithm::ALL {
            let sorter = Sorter::new(algorithm, Element::from_values(&[2, 1]), Comparator::default());
            assert_eq!(sorter.algorithm(), algorithm);
            assert_eq!(sorter.state(), DriverState::Uninitialized);
            assert!(!sorter.print_algorithm().is_empty());
        }
    }

    #[test]
    fn every_driver_sorts_in_both_modes() {
        let values = [9, 4, 7, 4, 1, 8, 2, 2, 6];
        for algorithm in Algorithm::ALL {
            let mut full = Sorter::new(algorithm, Element::from_values(&values), Comparator::default());
            let history = full.full_sort();
            let last = history.last().unwrap();
            assert_eq!(last.values(), [1, 2, 2, 4, 4, 6, 7, 8, 9], "{algorithm}");
            assert!(last.is_fully_sorted(), "{algorithm}");

            let mut stepper = Sorter::new(algorithm, Element::from_values(&values), Comparator::default());
            let stepped = run_stepper(&mut stepper);
            let stepped_values: Vec<_> = stepped.iter().map(|e| e.value).collect();
            assert_eq!(stepped_values, last.values(), "{algorithm}");
            assert!(stepped.iter().all(|e| e.sorted), "{algorithm}");
        }
    }

    #[test]
    fn init_moves_to_ready_then_stepping() {
        let mut sorter = Sorter::new(Algorithm::Bubble, Element::from_values(&[3, 2, 1]), Comparator::default());
        sorter.init();
        assert_eq!(sorter.state(), DriverState::Ready);
        sorter.sort_next();
        assert_eq!(sorter.state(), DriverState::Stepping);
    }

    #[test]
    #[should_panic(expected = "before init")]
    fn stepping_before_init_panics() {
        let mut sorter = Sorter::new(Algorithm::Insertion, Element::from_values(&[3, 2, 1]), Comparator::default());
        sorter.sort_next();
    }

    #[test]
    fn has_next_is_idempotent() {
        let mut sorter = Sorter::new(Algorithm::Quick, Element::from_values(&[3, 1, 2]), Comparator::default());
        sorter.init();
        let first = sorter.has_next();
        assert_eq!(sorter.has_next(), first);
        run_stepper(&mut sorter);
        assert!(!sorter.has_next());
        assert!(!sorter.has_next());
    }

    #[test]
    fn full_sort_leaves_stepper_alone() {
        for algorithm in Algorithm::ALL {
            let mut sorter = Sorter::new(algorithm, Element::from_values(&[5, 3, 8, 1]), Comparator::default());
            let history = sorter.full_sort();
            assert_eq!(sorter.state(), DriverState::Uninitialized, "{algorithm}");
            assert_eq!(sorter.elements(), Element::from_values(&[5, 3, 8, 1]).as_slice());

            // Mid-run: same state and array before and after
            sorter.init();
            sorter.sort_next();
            let before = sorter.elements().to_vec();
            assert_eq!(sorter.full_sort().last(), history.last(), "{algorithm}");
            assert_eq!(sorter.state(), DriverState::Stepping, "{algorithm}");
            assert_eq!(sorter.elements(), before.as_slice(), "{algorithm}");

            let stepped = run_stepper(&mut sorter);
            assert!(stepped.iter().all(|e| e.sorted), "{algorithm}");
        }
    }

    #[test]
    fn init_after_done_keeps_settled_array() {
        for algorithm in Algorithm::ALL {
            let mut sorter = Sorter::new(algorithm, Element::from_values(&[4, 1, 3, 2]), Comparator::default());
            let done = run_stepper(&mut sorter);
            assert_eq!(sorter.init(), done.as_slice(), "{algorithm}");
            assert_eq!(sorter.state(), DriverState::Done);
            assert!(sorter.elements().iter().all(|e| e.sorted), "{algorithm}");
        }
    }

    #[test]
    fn sort_next_after_done_is_noop() {
        for algorithm in Algorithm::ALL {
            let mut sorter = Sorter::new(algorithm, Element::from_values(&[5, 3, 8, 1]), Comparator::default());
            let done = run_stepper(&mut sorter);
            assert_eq!(sorter.sort_next(), done.as_slice());
            assert_eq!(sorter.state(), DriverState::Done);
        }
    }

    #[test]
    fn tiny_arrays_settle_in_one_snapshot() {
        for algorithm in Algorithm::ALL {
            for values in [&[][..], &[42][..]] {
                let mut sorter = Sorter::new(algorithm, Element::from_values(values), Comparator::default());
                assert_eq!(sorter.base().is_empty(), values.is_empty());
                let history = sorter.full_sort();
                assert_eq!(history.len(), 1, "{algorithm}");
                assert!(history.last().unwrap().is_fully_sorted());

                let mut stepper = Sorter::new(algorithm, Element::from_values(values), Comparator::default());
                stepper.init();
                assert!(stepper.has_next());
                stepper.sort_next();
                assert!(!stepper.has_next(), "{algorithm}");
                assert!(stepper.elements().iter().all(|e| e.sorted));
            }
        }
    }
}
