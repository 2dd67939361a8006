//! Error types for the benchmark harness.
//!
//! All errors are explicit and typed; nothing in the library panics on a
//! fallible path.

use thiserror::Error;

/// Error type for benchmark operations.
#[derive(Debug, Error)]
pub enum BenchError {
    /// Configuration rejected at construction time.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A configured worker count exceeds the safety limit.
    #[error("worker count {0} exceeds maximum {1}")]
    WorkerCountTooLarge(usize, usize),

    /// A worker thread could not be spawned.
    #[error("failed to spawn worker for partition {partition_index}: {reason}")]
    WorkerSpawnFailed {
        partition_index: usize,
        reason: String,
    },

    /// A worker thread died before publishing its result. Fatal for the
    /// pass: there is no retry and no partial-result substitution.
    #[error("worker for partition {partition_index} panicked")]
    WorkerPanicked { partition_index: usize },

    /// Appending a record to the pass log failed.
    #[error("failed to write pass log: {0}")]
    LogWriteFailed(String),

    /// JSON (de)serialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic I/O error wrapper.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// The standard Result type for benchmark operations.
///
/// All fallible operations in this crate return this type. Use the `?`
/// operator, `match`, or combinator methods to handle results.
pub type Result<T> = std::result::Result<T, BenchError>;
