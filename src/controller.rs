//! Ingestion front end over the sorted container.
//!
//! The controller owns the [`OrderedMultiset`] and drives it through three
//! ingestion modes:
//!
//! - `load`: one-shot bulk insert, no rebalancing
//! - `insert_batch`: per-item sorted insert, then one rebalance over the batch
//! - `stream_event`: a batch of size one, processed in arrival order
//!
//! ```text
//!   Empty --load--> Loaded --insert_batch / stream_event--> Adjusting
//!                     ^                                        |
//!                     +------------- rebalance done -----------+
//! ```

use std::hash::Hash;

use tracing::trace;

use crate::config::{Config, IngestMode};
use crate::error::Result;
use crate::frequency::{FrequencyAnalyzer, FrequencyTable};
use crate::ordered_multiset::OrderedMultiset;
use crate::rebalance::{RebalanceOutcome, RebalancePolicy};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Nothing has been ingested yet
    Empty,
    /// Idle and sorted
    Loaded,
    /// Inside an insert/rebalance cycle
    Adjusting,
}

pub struct IngestionController<T> {
    container: OrderedMultiset<T>,
    analyzer: FrequencyAnalyzer,
    policy: RebalancePolicy,
    state: State,
}

impl<T> Default for IngestionController<T> {
    fn default() -> Self {
        Self::with_policy(RebalancePolicy::default())
    }
}

impl<T> IngestionController<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: RebalancePolicy) -> Self {
        Self {
            container: OrderedMultiset::new(),
            analyzer: FrequencyAnalyzer::new(),
            policy,
            state: State::Empty,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::with_policy(config.policy()?))
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn policy(&self) -> &RebalancePolicy {
        &self.policy
    }

    /// Sorted contents. Valid in any state.
    pub fn output(&self) -> &[T] {
        self.container.ordered_view()
    }

    /// Read-only access to the underlying container.
    pub fn container(&self) -> &OrderedMultiset<T> {
        &self.container
    }

    pub fn len(&self) -> usize {
        self.container.len()
    }

    pub fn is_empty(&self) -> bool {
        self.container.is_empty()
    }
}

impl<T: Ord + Hash + Clone> IngestionController<T> {
    /// Bulk load without rebalancing.
    pub fn load<I: IntoIterator<Item = T>>(&mut self, batch: I) {
        self.container.load(batch);
        self.state = State::Loaded;
        trace!(len = self.container.len(), "bulk load complete");
    }

    /// Insert every item of `batch` at its sorted position, then rebalance
    /// against the batch's own frequencies.
    pub fn insert_batch(&mut self, batch: &[T]) -> RebalanceOutcome {
        if batch.is_empty() {
            return RebalanceOutcome::default();
        }

        self.state = State::Adjusting;
        for item in batch {
            self.container.insert_one(item.clone());
        }
        let frequencies = self.analyzer.count(batch);
        let outcome = self.policy.apply(&mut self.container, &frequencies);
        self.state = State::Loaded;

        trace!(
            batch = batch.len(),
            hot_values = outcome.hot_values,
            len = self.container.len(),
            "batch ingested"
        );
        outcome
    }

    /// One streamed value, handled as a batch of size one.
    pub fn stream_event(&mut self, value: T) -> RebalanceOutcome {
        self.insert_batch(std::slice::from_ref(&value))
    }

    /// Apply `stream_event` to each value in arrival order. Returns the number
    /// of events processed.
    pub fn stream<I: IntoIterator<Item = T>>(&mut self, events: I) -> usize {
        let mut processed = 0;
        for value in events {
            self.stream_event(value);
            processed += 1;
        }
        processed
    }

    /// Feed a finite input through one ingestion mode. `Batch` splits the
    /// input into consecutive chunks of `batch_size` (at least 1); a hot value
    /// in a later chunk discards copies left by earlier ones.
    pub fn ingest(
        &mut self,
        values: Vec<T>,
        mode: IngestMode,
        batch_size: usize,
    ) -> RebalanceOutcome {
        let mut total = RebalanceOutcome::default();
        match mode {
            IngestMode::Load => self.load(values),
            IngestMode::Batch => {
                for chunk in values.chunks(batch_size.max(1)) {
                    total += self.insert_batch(chunk);
                }
            }
            IngestMode::Stream => {
                for value in values {
                    total += self.stream_event(value);
                }
            }
        }
        total
    }

    /// Batch-local frequency table for an arbitrary batch.
    pub fn analyze(&self, batch: &[T]) -> FrequencyTable<T> {
        self.analyzer.count(batch)
    }

    /// Rebalance the container from a frequency table produced by `analyze`.
    pub fn adjust(&mut self, frequencies: &FrequencyTable<T>) -> RebalanceOutcome {
        let previous = self.state;
        self.state = State::Adjusting;
        let outcome = self.policy.apply(&mut self.container, frequencies);
        self.state = match previous {
            State::Empty if self.container.is_empty() => State::Empty,
            _ => State::Loaded,
        };
        outcome
    }
}
