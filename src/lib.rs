//! hotsort keeps a multiset of ordered values sorted while data arrives
//! incrementally: bulk loads, batched inserts, or single streamed events.
//!
//! After each batch, values that occur more than a threshold number of times
//! within that batch are rebalanced: all of their copies are dropped from the
//! container and exactly the batch count is put back. Copies from earlier
//! batches do not survive this rewrite.
//!
//! ```
//! use hotsort::IngestionController;
//!
//! let mut sorter = IngestionController::new();
//! sorter.load(vec![5, 3, 8]);
//! sorter.insert_batch(&[1, 9, 7]);
//! assert_eq!(sorter.output(), &[1, 3, 5, 7, 8, 9]);
//! ```

mod config;
pub use config::{Config, IngestMode, DEFAULT_BATCH_SIZE};

mod controller;
pub use controller::{IngestionController, State};

pub mod datagen;

mod error;
pub use error::{Error, InvariantError, Result};

mod frequency;
pub use frequency::{FrequencyAnalyzer, FrequencyTable};

pub mod input;

mod ordered_multiset;
pub use ordered_multiset::OrderedMultiset;

pub mod profile;

mod rebalance;
pub use rebalance::{HotSet, RebalanceOutcome, RebalancePolicy, DEFAULT_THRESHOLD};
