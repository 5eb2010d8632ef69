//! Wall-clock and call-count profiling for ingestion sessions.
//!
//! [`Profiled`] wraps any [`Ingest`] implementation and times each call it
//! forwards. It only sees the public operations, so results with and without
//! the wrapper are identical.

use std::cell::Cell;
use std::fmt::Write as _;
use std::hash::Hash;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::controller::IngestionController;
use crate::datagen::DatasetGenerator;
use crate::rebalance::RebalanceOutcome;

/// The operations an ingestion session exposes.
pub trait Ingest<T> {
    fn load(&mut self, batch: Vec<T>);
    fn insert_batch(&mut self, batch: &[T]) -> RebalanceOutcome;
    fn stream_event(&mut self, value: T) -> RebalanceOutcome;
    fn output(&self) -> Vec<T>;
}

impl<T: Ord + Hash + Clone> Ingest<T> for IngestionController<T> {
    fn load(&mut self, batch: Vec<T>) {
        IngestionController::load(self, batch)
    }

    fn insert_batch(&mut self, batch: &[T]) -> RebalanceOutcome {
        IngestionController::insert_batch(self, batch)
    }

    fn stream_event(&mut self, value: T) -> RebalanceOutcome {
        IngestionController::stream_event(self, value)
    }

    fn output(&self) -> Vec<T> {
        IngestionController::output(self).to_vec()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operation {
    Load,
    InsertBatch,
    StreamEvent,
    Output,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Load,
        Operation::InsertBatch,
        Operation::StreamEvent,
        Operation::Output,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Operation::Load => "load",
            Operation::InsertBatch => "insert_batch",
            Operation::StreamEvent => "stream_event",
            Operation::Output => "output",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpStats {
    pub calls: u64,
    pub total: Duration,
}

impl OpStats {
    pub fn mean(&self) -> Duration {
        if self.calls == 0 {
            return Duration::ZERO;
        }
        let nanos = self.total.as_nanos() / u128::from(self.calls);
        Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
    }
}

/// Timing decorator around an [`Ingest`] implementation.
pub struct Profiled<I> {
    inner: I,
    // Cells so that `output(&self)` can be recorded too
    stats: [Cell<OpStats>; 4],
}

impl<I> Profiled<I> {
    pub fn new(inner: I) -> Self {
        Self {
            inner,
            stats: Default::default(),
        }
    }

    pub fn inner(&self) -> &I {
        &self.inner
    }

    pub fn into_inner(self) -> I {
        self.inner
    }

    pub fn stats(&self, op: Operation) -> OpStats {
        self.stats[op.index()].get()
    }

    pub fn reset(&self) {
        for cell in &self.stats {
            cell.set(OpStats::default());
        }
    }

    /// Per-operation table, one line per operation that was called.
    pub fn report(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:<14} {:>8} {:>14} {:>14}",
            "operation", "calls", "total", "mean"
        );
        for op in Operation::ALL {
            let stats = self.stats(op);
            if stats.calls == 0 {
                continue;
            }
            let _ = writeln!(
                out,
                "{:<14} {:>8} {:>14?} {:>14?}",
                op.name(),
                stats.calls,
                stats.total,
                stats.mean()
            );
        }
        out
    }

    fn record(&self, op: Operation, start: Instant) {
        let cell = &self.stats[op.index()];
        let mut stats = cell.get();
        stats.calls += 1;
        stats.total += start.elapsed();
        cell.set(stats);
    }
}

impl<T, I: Ingest<T>> Ingest<T> for Profiled<I> {
    fn load(&mut self, batch: Vec<T>) {
        let start = Instant::now();
        self.inner.load(batch);
        self.record(Operation::Load, start);
    }

    fn insert_batch(&mut self, batch: &[T]) -> RebalanceOutcome {
        let start = Instant::now();
        let outcome = self.inner.insert_batch(batch);
        self.record(Operation::InsertBatch, start);
        outcome
    }

    fn stream_event(&mut self, value: T) -> RebalanceOutcome {
        let start = Instant::now();
        let outcome = self.inner.stream_event(value);
        self.record(Operation::StreamEvent, start);
        outcome
    }

    fn output(&self) -> Vec<T> {
        let start = Instant::now();
        let output = self.inner.output();
        self.record(Operation::Output, start);
        output
    }
}

pub const PROFILE_INITIAL_SIZE: usize = 10_000;
pub const PROFILE_INCOMING_SIZE: usize = 5_000;
pub const PROFILE_VALUE_MAX: u32 = 10_000;

fn profile_inputs(seed: u64) -> (Vec<u32>, Vec<u32>) {
    let mut datasets = DatasetGenerator::from_seed(seed);
    let initial = datasets.random_range(PROFILE_INITIAL_SIZE, 0, PROFILE_VALUE_MAX);
    let incoming = datasets.random_range(PROFILE_INCOMING_SIZE, 0, PROFILE_VALUE_MAX);
    (initial, incoming)
}

/// Bulk load 10 000 values, then ingest 5 000 more as a single batch.
pub fn profile_batch_adjustment(seed: u64) -> Profiled<IngestionController<u32>> {
    let (initial, incoming) = profile_inputs(seed);
    let mut session = Profiled::new(IngestionController::new());
    session.load(initial);
    session.insert_batch(&incoming);
    debug!(len = session.inner().len(), "batch profile complete");
    session
}

/// Bulk load 10 000 values, then stream 5 000 more one event at a time.
pub fn profile_stream_handling(seed: u64) -> Profiled<IngestionController<u32>> {
    let (initial, incoming) = profile_inputs(seed);
    let mut session = Profiled::new(IngestionController::new());
    session.load(initial);
    for value in incoming {
        session.stream_event(value);
    }
    debug!(len = session.inner().len(), "stream profile complete");
    session
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::mock;
    use mockall::predicate::eq;

    mock! {
        Session {}
        impl Ingest<u32> for Session {
            fn load(&mut self, batch: Vec<u32>);
            fn insert_batch(&mut self, batch: &[u32]) -> RebalanceOutcome;
            fn stream_event(&mut self, value: u32) -> RebalanceOutcome;
            fn output(&self) -> Vec<u32>;
        }
    }

    #[test]
    fn test_profiled_forwards_every_call() {
        let mut inner = MockSession::new();
        inner
            .expect_load()
            .with(eq(vec![3, 1, 2]))
            .times(1)
            .return_const(());
        inner
            .expect_insert_batch()
            .times(2)
            .return_const(RebalanceOutcome::default());
        inner
            .expect_stream_event()
            .with(eq(7))
            .times(1)
            .return_const(RebalanceOutcome::default());
        inner
            .expect_output()
            .times(1)
            .return_const(vec![1, 2, 3, 7]);

        let mut session = Profiled::new(inner);
        session.load(vec![3u32, 1, 2]);
        session.insert_batch(&[4u32]);
        session.insert_batch(&Vec::<u32>::new());
        session.stream_event(7u32);
        assert_eq!(Ingest::<u32>::output(&session), vec![1, 2, 3, 7]);

        assert_eq!(session.stats(Operation::Load).calls, 1);
        assert_eq!(session.stats(Operation::InsertBatch).calls, 2);
        assert_eq!(session.stats(Operation::StreamEvent).calls, 1);
        assert_eq!(session.stats(Operation::Output).calls, 1);
    }

    #[test]
    fn test_profiled_does_not_change_results() {
        let mut plain = IngestionController::<u32>::new();
        let mut profiled = Profiled::new(IngestionController::<u32>::new());

        let mut batch = vec![6u32; 12];
        batch.extend([1, 2, 3]);

        plain.load(vec![6, 6, 9, 0]);
        Ingest::load(&mut profiled, vec![6, 6, 9, 0]);

        let plain_outcome = plain.insert_batch(&batch);
        let profiled_outcome = Ingest::insert_batch(&mut profiled, &batch);
        assert_eq!(plain_outcome, profiled_outcome);

        plain.stream_event(4);
        Ingest::stream_event(&mut profiled, 4);

        assert_eq!(Ingest::output(&profiled), plain.output().to_vec());
        assert_eq!(profiled.inner().state(), plain.state());
    }

    #[test]
    fn test_report_lists_called_operations() {
        let mut session = Profiled::new(IngestionController::<u32>::new());
        session.load(vec![1, 2, 3]);
        let _ = Ingest::<u32>::output(&session);

        let report = session.report();
        assert!(report.contains("load"));
        assert!(report.contains("output"));
        assert!(!report.contains("stream_event"));

        session.reset();
        assert_eq!(session.stats(Operation::Load), OpStats::default());
    }

    #[test]
    fn test_mean_of_unused_operation() {
        assert_eq!(OpStats::default().mean(), Duration::ZERO);
        let stats = OpStats {
            calls: 4,
            total: Duration::from_millis(8),
        };
        assert_eq!(stats.mean(), Duration::from_millis(2));
    }

    #[test]
    fn test_mean_with_call_count_beyond_u32() {
        let stats = OpStats {
            calls: 1 << 32,
            total: Duration::from_secs(1 << 32),
        };
        assert_eq!(stats.mean(), Duration::from_secs(1));
    }

    #[test]
    fn test_profile_scenarios() {
        let batch = profile_batch_adjustment(7);
        assert_eq!(batch.stats(Operation::Load).calls, 1);
        assert_eq!(batch.stats(Operation::InsertBatch).calls, 1);
        assert!(batch.inner().container().check_invariants().is_ok());

        let stream = profile_stream_handling(7);
        assert_eq!(
            stream.stats(Operation::StreamEvent).calls,
            PROFILE_INCOMING_SIZE as u64
        );
        // Single events are never hot, so nothing is discarded
        assert_eq!(
            stream.inner().len(),
            PROFILE_INITIAL_SIZE + PROFILE_INCOMING_SIZE
        );
        assert!(stream.inner().container().check_invariants().is_ok());
    }
}
