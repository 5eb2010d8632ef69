use std::collections::HashMap;
use std::hash::Hash;

use ahash::RandomState;

/// Occurrence count of each distinct value within a single batch.
pub type FrequencyTable<T> = HashMap<T, usize, RandomState>;

/// Counts values within one batch at a time.
///
/// Holds no counts between calls: every table describes exactly the batch it
/// was built from, never the container's history.
#[derive(Clone, Default)]
pub struct FrequencyAnalyzer {
    hasher: RandomState,
}

impl FrequencyAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hasher(hasher: RandomState) -> Self {
        Self { hasher }
    }

    pub fn count<T>(&self, batch: &[T]) -> FrequencyTable<T>
    where
        T: Hash + Eq + Clone,
    {
        let mut table = HashMap::with_capacity_and_hasher(batch.len(), self.hasher.clone());
        for item in batch {
            // Avoid cloning keys we have already seen
            if let Some(count) = table.get_mut(item) {
                *count += 1;
            } else {
                table.insert(item.clone(), 1);
            }
        }
        table
    }
}
