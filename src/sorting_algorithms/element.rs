use std::cmp::Ordering;
use std::fmt;

/// One bar of the visualization: a numeric value plus the transient roles the
/// drivers assign to it while sorting.
///
/// The engine may set several roles at once. Which one wins on screen is up to
/// the presentation layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Element {
    pub value: i32,
    /// Position of the element in the freshly generated array. Never compared.
    pub id: usize,
    pub current: bool,
    pub secondary_current: bool,
    pub pivot: bool,
    pub sorted: bool,
}

impl Element {
    pub fn new(value: i32, id: usize) -> Self {
        Element {
            value,
            id,
            ..Default::default()
        }
    }

    /// Builds a fresh array (ids in order, no roles) from raw values.
    pub fn from_values(values: &[i32]) -> Vec<Element> {
        values
            .iter()
            .enumerate()
            .map(|(id, &value)| Element::new(value, id))
            .collect()
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn clear_roles(&mut self) {
        self.current = false;
        self.secondary_current = false;
        self.pivot = false;
        self.sorted = false;
    }

    pub fn clear_currents(&mut self) {
        self.current = false;
        self.secondary_current = false;
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)?;
        if self.current {
            write!(f, "*")?;
        }
        if self.secondary_current {
            write!(f, "'")?;
        }
        if self.pivot {
            write!(f, "^")?;
        }
        if self.sorted {
            write!(f, "+")?;
        }
        Ok(())
    }
}

/// Key extractor for the single numeric field elements are ordered by.
pub type CompareKey = fn(&Element) -> i32;

/// Orders elements by a numeric key. Pure; shared by every driver.
#[derive(Clone, Copy)]
pub struct Comparator {
    key: CompareKey,
}

impl Comparator {
    pub fn new(key: CompareKey) -> Self {
        Comparator { key }
    }

    pub fn compare(&self, a: &Element, b: &Element) -> Ordering {
        (self.key)(a).cmp(&(self.key)(b))
    }

    pub fn key(&self, element: &Element) -> i32 {
        (self.key)(element)
    }
}

impl Default for Comparator {
    fn default() -> Self {
        Comparator::new(Element::value)
    }
}

impl fmt::Debug for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Comparator").finish_non_exhaustive()
    }
}
