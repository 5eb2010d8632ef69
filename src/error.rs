//! Error types for hotsort.
//!
//! The sorted-multiset core never fails at runtime. Errors only appear at the
//! edges (configuration and reading input values), plus [`InvariantError`]
//! which `check_invariants` hands back to tests when the container is found
//! in a broken state.

use thiserror::Error;

/// Result type alias for hotsort operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for hotsort.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// A token in the input could not be parsed as a value
    #[error("Parse error at token {index}: {token:?} is not a valid value")]
    Parse { index: usize, token: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Internal container invariant was violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantError {
    /// Two adjacent elements are out of order
    #[error("container unsorted at position {position}")]
    Unsorted { position: usize },

    /// Container length does not match what the caller expected
    #[error("cardinality mismatch: expected {expected}, found {found}")]
    Cardinality { expected: usize, found: usize },
}
