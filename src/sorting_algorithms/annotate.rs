//! Flag helpers shared by every driver so role semantics stay consistent.
//!
//! `None` stands for "no index": the role is cleared everywhere. Any other
//! index must be in range; violating that is a caller bug and panics.

use super::Element;

fn mark_single(elements: &mut [Element], index: Option<usize>, set: fn(&mut Element, bool)) {
    if let Some(idx) = index {
        assert!(
            idx < elements.len(),
            "index {idx} out of range for array of length {}",
            elements.len()
        );
    }
    for (i, element) in elements.iter_mut().enumerate() {
        set(element, Some(i) == index);
    }
}

/// Sets `current` at `index` and clears it everywhere else.
pub fn mark_current(elements: &mut [Element], index: Option<usize>) {
    mark_single(elements, index, |e, on| e.current = on);
}

/// Sets `secondary_current` at `index` and clears it everywhere else.
pub fn mark_secondary_current(elements: &mut [Element], index: Option<usize>) {
    mark_single(elements, index, |e, on| e.secondary_current = on);
}

/// Sets `pivot` at `index` and clears it everywhere else.
pub fn mark_pivot(elements: &mut [Element], index: Option<usize>) {
    mark_single(elements, index, |e, on| e.pivot = on);
}

/// Marks `[0, end]` sorted and everything after it unsorted. Clears the
/// comparison markers on the whole array.
///
/// An `end` past the last index marks the whole array; `None` marks nothing.
pub fn mark_sorted_prefix(elements: &mut [Element], end: Option<usize>) {
    for (i, element) in elements.iter_mut().enumerate() {
        element.clear_currents();
        element.sorted = end.is_some_and(|end| i <= end);
    }
}

/// Marks `[start, len)` sorted with its comparison markers cleared and
/// everything before `start` unsorted. `clear_currents` also wipes the
/// comparison markers on the untouched prefix.
pub fn mark_sorted_suffix_from(elements: &mut [Element], start: usize, clear_currents: bool) {
    for (i, element) in elements.iter_mut().enumerate() {
        if i < start {
            element.sorted = false;
            if clear_currents {
                element.clear_currents();
            }
        } else {
            element.clear_currents();
            element.sorted = true;
        }
    }
}

/// Sets `sorted` on `[start, end]` inclusive; other flags are left alone.
pub fn mark_sorted_range(elements: &mut [Element], start: usize, end: usize) {
    for element in &mut elements[start..=end] {
        element.sorted = true;
    }
}

/// Exchanges the `current` and `secondary_current` markers between the two
/// elements holding them. Does nothing unless both markers are present.
pub fn swap_currents(elements: &mut [Element]) {
    let current = elements.iter().position(|e| e.current);
    let secondary = elements.iter().position(|e| e.secondary_current);

    if let (Some(c), Some(s)) = (current, secondary) {
        if c == s {
            return;
        }
        elements[c].current = false;
        elements[c].secondary_current = true;
        elements[s].secondary_current = false;
        elements[s].current = true;
    }
}

/// Resets every flag on every element.
pub fn clear_roles(elements: &mut [Element]) {
    for element in elements.iter_mut() {
        element.clear_roles();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arr(len: usize) -> Vec<Element> {
        (0..len).map(|i| Element::new(i as i32, i)).collect()
    }

    fn currents(elements: &[Element]) -> Vec<bool> {
        elements.iter().map(|e| e.current).collect()
    }

    fn sorted(elements: &[Element]) -> Vec<bool> {
        elements.iter().map(|e| e.sorted).collect()
    }

    #[test]
    fn mark_current_is_exclusive() {
        let mut a = arr(4);
        mark_current(&mut a, Some(1));
        mark_current(&mut a, Some(3));
        assert_eq!(currents(&a), [false, false, false, true]);
        mark_current(&mut a, None);
        assert_eq!(currents(&a), [false; 4]);
    }

    #[test]
    fn helpers_accept_empty_arrays() {
        let mut a = arr(0);
        mark_current(&mut a, None);
        mark_secondary_current(&mut a, None);
        mark_pivot(&mut a, None);
        mark_sorted_prefix(&mut a, Some(3));
        mark_sorted_suffix_from(&mut a, 0, true);
        swap_currents(&mut a);
        assert!(a.is_empty());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn out_of_range_index_panics() {
        let mut a = arr(2);
        mark_pivot(&mut a, Some(2));
    }

    #[test]
    fn sorted_prefix_clears_currents_everywhere() {
        let mut a = arr(4);
        mark_current(&mut a, Some(3));
        mark_secondary_current(&mut a, Some(0));
        mark_sorted_prefix(&mut a, Some(1));
        assert_eq!(sorted(&a), [true, true, false, false]);
        assert!(a.iter().all(|e| !e.current && !e.secondary_current));

        mark_sorted_prefix(&mut a, Some(10));
        assert_eq!(sorted(&a), [true; 4]);
        mark_sorted_prefix(&mut a, None);
        assert_eq!(sorted(&a), [false; 4]);
    }

    #[test]
    fn sorted_suffix_keeps_prefix_markers_unless_asked() {
        let mut a = arr(4);
        mark_current(&mut a, Some(1));
        mark_secondary_current(&mut a, Some(3));
        mark_sorted_suffix_from(&mut a, 2, false);
        assert_eq!(sorted(&a), [false, false, true, true]);
        assert!(a[1].current);
        assert!(!a[3].secondary_current);

        mark_sorted_suffix_from(&mut a, 3, true);
        assert_eq!(sorted(&a), [false, false, false, true]);
        assert!(!a[1].current);
    }

    #[test]
    fn sorted_range_leaves_other_flags() {
        let mut a = arr(5);
        mark_pivot(&mut a, Some(2));
        mark_sorted_range(&mut a, 1, 3);
        assert_eq!(sorted(&a), [false, true, true, true, false]);
        assert!(a[2].pivot);
    }

    // The legacy helper this replaces never actually moved the flags; the
    // markers are exchanged here.
    #[test]
    fn swap_currents_exchanges_markers() {
        let mut a = arr(3);
        mark_current(&mut a, Some(2));
        mark_secondary_current(&mut a, Some(1));
        swap_currents(&mut a);
        assert!(a[1].current && !a[1].secondary_current);
        assert!(a[2].secondary_current && !a[2].current);
    }

    #[test]
    fn swap_currents_needs_both_markers() {
        let mut a = arr(3);
        mark_current(&mut a, Some(0));
        swap_currents(&mut a);
        assert!(a[0].current);
        assert!(a.iter().all(|e| !e.secondary_current));
    }
}
