use std::collections::VecDeque;
use std::ops::Deref;

use super::Element;

/// Independent copy of the array at one instant. Immutable once taken.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Snapshot(Vec<Element>);

impl Snapshot {
    pub fn capture(elements: &[Element]) -> Self {
        Snapshot(elements.to_vec())
    }

    pub fn elements(&self) -> &[Element] {
        &self.0
    }

    pub fn values(&self) -> Vec<i32> {
        self.0.iter().map(|e| e.value).collect()
    }

    pub fn is_fully_sorted(&self) -> bool {
        self.0.iter().all(|e| e.sorted)
    }

    pub fn into_elements(self) -> Vec<Element> {
        self.0
    }
}

impl Deref for Snapshot {
    type Target = [Element];

    fn deref(&self) -> &[Element] {
        &self.0
    }
}

/// Append-only sequence of snapshots covering one sort, initial state first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct History {
    snapshots: Vec<Snapshot>,
}

impl History {
    pub fn new() -> Self {
        History::default()
    }

    /// Appends a deep copy of `elements`.
    pub fn record(&mut self, elements: &[Element]) {
        self.snapshots.push(Snapshot::capture(elements));
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn first(&self) -> Option<&Snapshot> {
        self.snapshots.first()
    }

    pub fn last(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Snapshot> {
        self.snapshots.iter()
    }

    /// Converts the history into a queue the playback side pops from.
    pub fn into_queue(self) -> VecDeque<Snapshot> {
        self.snapshots.into()
    }
}

impl IntoIterator for History {
    type Item = Snapshot;
    type IntoIter = std::vec::IntoIter<Snapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.snapshots.into_iter()
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a Snapshot;
    type IntoIter = std::slice::Iter<'a, Snapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.snapshots.iter()
    }
}

/// Feeds a precomputed history back into a live array one snapshot per step.
/// Used by the recursive drivers to offer a stepper.
#[derive(Debug, Default)]
pub struct Replay {
    queue: Option<VecDeque<Snapshot>>,
}

impl Replay {
    pub fn is_loaded(&self) -> bool {
        self.queue.is_some()
    }

    /// Loads a history, dropping its first snapshot (the state the live array
    /// is already in).
    pub fn load(&mut self, history: History) {
        let mut queue = history.into_queue();
        queue.pop_front();
        self.queue = Some(queue);
    }

    pub fn remaining(&self) -> usize {
        self.queue.as_ref().map_or(0, VecDeque::len)
    }

    /// Copies the next snapshot over `elements`. Returns false once drained.
    pub fn advance(&mut self, elements: &mut [Element]) -> bool {
        match self.queue.as_mut().and_then(VecDeque::pop_front) {
            Some(snapshot) => {
                elements.copy_from_slice(snapshot.elements());
                true
            }
            None => false,
        }
    }
}
