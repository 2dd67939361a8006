#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

//! Configuration for benchmark runs.

use crate::error::{BenchError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default upper bound of the counted range. Takes a few seconds
/// single-threaded on current hardware; large enough for the speedup
/// between worker counts to be visible.
pub const DEFAULT_UPPER_BOUND: u64 = 10_000_000;

/// Worker counts exercised by a full benchmark run, in execution order.
pub const DEFAULT_WORKER_COUNTS: [usize; 3] = [1, 2, 4];

/// Maximum allowed worker count (safety limit)
const MAX_WORKERS: usize = 256;

/// Configuration for a benchmark run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchConfig {
    /// Inclusive upper bound of the counted range `[1, upper_bound]`
    upper_bound: u64,

    /// Worker counts to run, one pass each, in order
    worker_counts: Vec<usize>,

    /// Optional JSON-lines file receiving one record per pass
    output_path: Option<PathBuf>,
}

impl BenchConfig {
    /// Create a new benchmark configuration with validation.
    ///
    /// # Arguments
    ///
    /// * `upper_bound` - Inclusive upper bound of the counted range. Zero
    ///   is allowed and produces zero-count passes.
    /// * `worker_counts` - Worker counts to run, one pass each, in order.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - `worker_counts` is empty
    /// - Any worker count is zero
    /// - Any worker count exceeds the maximum (256)
    ///
    /// # Examples
    ///
    /// ```
    /// # use primescale::BenchConfig;
    /// let config = BenchConfig::new(10_000_000, vec![1, 2, 4]);
    /// assert!(config.is_ok());
    /// ```
    pub fn new(upper_bound: u64, worker_counts: Vec<usize>) -> Result<Self> {
        Self::validate_worker_counts(&worker_counts)?;

        Ok(Self {
            upper_bound,
            worker_counts,
            output_path: None,
        })
    }

    /// Create the standard three-pass configuration (1, 2, 4 workers)
    /// over `[1, upper_bound]`.
    ///
    /// # Errors
    ///
    /// Returns error if configuration validation fails
    pub fn standard(upper_bound: u64) -> Result<Self> {
        Self::new(upper_bound, DEFAULT_WORKER_COUNTS.to_vec())
    }

    /// Set the JSON-lines output path for per-pass records.
    #[must_use]
    pub fn with_output_path(mut self, path: PathBuf) -> Self {
        self.output_path = Some(path);
        self
    }

    /// Get the inclusive upper bound of the counted range
    #[must_use]
    pub const fn upper_bound(&self) -> u64 {
        self.upper_bound
    }

    /// Get the worker counts, in execution order
    #[must_use]
    pub fn worker_counts(&self) -> &[usize] {
        &self.worker_counts
    }

    /// Get the JSON-lines output path (if set)
    #[must_use]
    pub fn output_path(&self) -> Option<&PathBuf> {
        self.output_path.as_ref()
    }

    /// Validate the worker-count list
    fn validate_worker_counts(worker_counts: &[usize]) -> Result<()> {
        if worker_counts.is_empty() {
            return Err(BenchError::InvalidConfig(
                "worker counts cannot be empty".to_string(),
            ));
        }

        for &workers in worker_counts {
            if workers == 0 {
                return Err(BenchError::InvalidConfig(
                    "worker count must be at least 1".to_string(),
                ));
            }
            if workers > MAX_WORKERS {
                return Err(BenchError::WorkerCountTooLarge(workers, MAX_WORKERS));
            }
        }

        Ok(())
    }
}
