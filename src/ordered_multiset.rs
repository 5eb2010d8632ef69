use std::collections::HashMap;
use std::hash::{BuildHasher, Hash};

use crate::error::InvariantError;

/// A multiset kept in non-decreasing order after every mutation.
///
/// Backed by a sorted `Vec`: lookups are binary searches, insertion shifts
/// the tail. Duplicates are stored as separate elements and their relative
/// order is unspecified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedMultiset<T> {
    items: Vec<T>,
}

impl<T> Default for OrderedMultiset<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> OrderedMultiset<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Full contents in non-decreasing order.
    pub fn ordered_view(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T: Ord> OrderedMultiset<T> {
    /// Bulk insert. The input may be in any order.
    pub fn load<I: IntoIterator<Item = T>>(&mut self, values: I) {
        let before = self.items.len();
        self.items.extend(values);
        if self.items.len() == before {
            return;
        }

        self.items[before..].sort_unstable();
        if before > 0 && self.items[before - 1] > self.items[before] {
            // Two sorted runs; the stable sort merges them in linear time.
            self.items.sort();
        }
    }

    /// Insert a single value at its sorted position.
    pub fn insert_one(&mut self, value: T) {
        let pos = self.upper_bound(&value);
        self.items.insert(pos, value);
    }

    /// Insert `count` copies of `value` in one shift.
    pub fn insert_copies(&mut self, value: T, count: usize)
    where
        T: Clone,
    {
        if count == 0 {
            return;
        }
        let pos = self.upper_bound(&value);
        self.items
            .splice(pos..pos, std::iter::repeat(value).take(count));
    }

    /// Remove every occurrence of every key in `keys`, returning how many
    /// elements were dropped. Survivors keep their order.
    pub fn remove_where_key_in<V, S>(&mut self, keys: &HashMap<T, V, S>) -> usize
    where
        T: Hash,
        S: BuildHasher,
    {
        if keys.is_empty() || self.items.is_empty() {
            return 0;
        }
        let before = self.items.len();
        self.items.retain(|item| !keys.contains_key(item));
        before - self.items.len()
    }

    /// Number of elements equal to `value`.
    pub fn count_of(&self, value: &T) -> usize {
        self.upper_bound(value) - self.lower_bound(value)
    }

    pub fn contains(&self, value: &T) -> bool {
        self.items.binary_search(value).is_ok()
    }

    /// Verify the container is non-decreasing.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        match self.items.windows(2).position(|pair| pair[0] > pair[1]) {
            Some(position) => Err(InvariantError::Unsorted { position }),
            None => Ok(()),
        }
    }

    /// Verify order and that the container holds exactly `expected` elements.
    pub fn check_cardinality(&self, expected: usize) -> Result<(), InvariantError> {
        self.check_invariants()?;
        if self.items.len() != expected {
            return Err(InvariantError::Cardinality {
                expected,
                found: self.items.len(),
            });
        }
        Ok(())
    }

    fn lower_bound(&self, value: &T) -> usize {
        self.items.partition_point(|item| item < value)
    }

    fn upper_bound(&self, value: &T) -> usize {
        self.items.partition_point(|item| item <= value)
    }
}

impl<T: Clone> OrderedMultiset<T> {
    /// Owned snapshot of the sorted contents.
    pub fn to_vec(&self) -> Vec<T> {
        self.items.clone()
    }
}

impl<T: Ord> FromIterator<T> for OrderedMultiset<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.load(iter);
        set
    }
}

impl<'a, T> IntoIterator for &'a OrderedMultiset<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
