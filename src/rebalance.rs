//! Frequency-driven rebalancing of the sorted container.
//!
//! After a batch is ingested, values that occur more than `threshold` times
//! *within that batch* are hot. Every occurrence of a hot value is discarded
//! from the container and exactly the batch count is reinserted.
//!
//! Copies of a hot value that arrived in earlier batches are dropped by this
//! rewrite and are not restored. Callers relying on multiset conservation
//! across batches must keep every batch at or below the threshold.

use std::hash::Hash;

use tracing::debug;

use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;
use crate::ordered_multiset::OrderedMultiset;

/// Counts above this within one batch mark a value as hot.
pub const DEFAULT_THRESHOLD: usize = 10;

/// Hot values of a batch and their batch-local counts.
pub type HotSet<T> = FrequencyTable<T>;

/// What a rebalance pass did to the container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RebalanceOutcome {
    pub hot_values: usize,
    pub removed: usize,
    pub reinserted: usize,
}

impl RebalanceOutcome {
    pub fn is_noop(&self) -> bool {
        self.hot_values == 0
    }

    /// Elements lost (positive) or gained (negative) by the rewrite.
    pub fn net_discarded(&self) -> isize {
        self.removed as isize - self.reinserted as isize
    }
}

impl std::ops::AddAssign for RebalanceOutcome {
    fn add_assign(&mut self, other: Self) {
        self.hot_values += other.hot_values;
        self.removed += other.removed;
        self.reinserted += other.reinserted;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RebalancePolicy {
    threshold: usize,
}

impl Default for RebalancePolicy {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl RebalancePolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Policy with a custom threshold. Zero is rejected since it would make
    /// every value of every batch hot.
    pub fn with_threshold(threshold: usize) -> Result<Self> {
        if threshold == 0 {
            return Err(Error::Config(
                "rebalance threshold must be at least 1".to_string(),
            ));
        }
        Ok(Self { threshold })
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Entries whose count is strictly greater than the threshold.
    pub fn select_hot<T>(&self, frequencies: &FrequencyTable<T>) -> HotSet<T>
    where
        T: Hash + Eq + Clone,
    {
        let mut hot = HotSet::with_hasher(frequencies.hasher().clone());
        hot.extend(
            frequencies
                .iter()
                .filter(|&(_, &count)| count > self.threshold)
                .map(|(value, &count)| (value.clone(), count)),
        );
        hot
    }

    /// Discard every occurrence of each hot value, then put back exactly its
    /// batch count.
    pub fn rebalance<T>(
        &self,
        container: &mut OrderedMultiset<T>,
        hot: &HotSet<T>,
    ) -> RebalanceOutcome
    where
        T: Ord + Hash + Clone,
    {
        if hot.is_empty() {
            return RebalanceOutcome::default();
        }

        let removed = container.remove_where_key_in(hot);
        let mut reinserted = 0;
        for (value, &count) in hot {
            container.insert_copies(value.clone(), count);
            reinserted += count;
        }

        let outcome = RebalanceOutcome {
            hot_values: hot.len(),
            removed,
            reinserted,
        };
        debug!(
            hot_values = outcome.hot_values,
            removed = outcome.removed,
            reinserted = outcome.reinserted,
            len = container.len(),
            "rebalanced hot values"
        );
        outcome
    }

    /// `select_hot` followed by `rebalance`.
    pub fn apply<T>(
        &self,
        container: &mut OrderedMultiset<T>,
        frequencies: &FrequencyTable<T>,
    ) -> RebalanceOutcome
    where
        T: Ord + Hash + Clone,
    {
        let hot = self.select_hot(frequencies);
        self.rebalance(container, &hot)
    }
}
