//! The value of a single filter dimension.

use std::collections::BTreeSet;

/// Either no restriction on a dimension, or a specific value to match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector<T> {
    /// Every value is accepted.
    All,
    /// Only rows matching this value are accepted.
    Only(T),
}

impl<T> Default for Selector<T> {
    fn default() -> Self {
        Self::All
    }
}

impl<T> Selector<T> {
    /// Whether this selector places no restriction on its dimension.
    pub fn is_all(&self) -> bool {
        matches!(self, Selector::All)
    }
}

impl Selector<String> {
    /// Whether `value` passes the selector. Matching is exact.
    pub fn admits(&self, value: &str) -> bool {
        match self {
            Selector::All => true,
            Selector::Only(expected) => expected == value,
        }
    }
}

impl Selector<BTreeSet<i32>> {
    /// Whether `year` passes the selector.
    ///
    /// An empty set of years admits nothing.
    pub fn admits_year(&self, year: i32) -> bool {
        match self {
            Selector::All => true,
            Selector::Only(years) => years.contains(&year),
        }
    }
}
