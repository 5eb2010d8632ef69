use clap::ValueEnum;

use crate::error::{Error, Result};
use crate::rebalance::{RebalancePolicy, DEFAULT_THRESHOLD};

/// Default chunk size when input is ingested as a sequence of batches.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// How a finite input is fed to the controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum IngestMode {
    /// One bulk load, never rebalances
    #[default]
    Load,
    /// Consecutive chunks of `batch_size`, each rebalanced on its own counts
    Batch,
    /// One event per value
    Stream,
}

/// Tunables for an ingestion session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// A value is hot when it occurs more than this many times in one batch.
    pub threshold: usize,
    pub mode: IngestMode,
    /// Chunk size used by [`IngestMode::Batch`].
    pub batch_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            mode: IngestMode::default(),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl Config {
    pub fn with_threshold(threshold: usize) -> Result<Self> {
        let config = Self {
            threshold,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.threshold == 0 {
            return Err(Error::Config(
                "threshold must be at least 1".to_string(),
            ));
        }
        if self.batch_size == 0 {
            return Err(Error::Config(
                "batch size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn policy(&self) -> Result<RebalancePolicy> {
        self.validate()?;
        RebalancePolicy::with_threshold(self.threshold)
    }
}
