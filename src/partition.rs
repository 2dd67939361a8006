#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

//! Range partitioning for the worker pool.

use serde::{Deserialize, Serialize};

/// An inclusive range of candidate integers assigned to one worker.
///
/// Degenerate inputs (an upper bound smaller than the worker count) can
/// produce inverted bounds (`low > high`); such an interval is empty and
/// contributes zero primes downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    low: u64,
    high: u64,
}

impl Interval {
    /// Create a new interval with inclusive bounds.
    #[must_use]
    pub const fn new(low: u64, high: u64) -> Self {
        Self { low, high }
    }

    /// Get the inclusive lower bound.
    #[must_use]
    pub const fn low(&self) -> u64 {
        self.low
    }

    /// Get the inclusive upper bound.
    #[must_use]
    pub const fn high(&self) -> u64 {
        self.high
    }

    /// Number of integers covered; 0 when the bounds are inverted.
    #[must_use]
    pub const fn len(&self) -> u64 {
        if self.low > self.high {
            0
        } else {
            self.high - self.low + 1
        }
    }

    /// Whether the interval covers no integers.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.low > self.high
    }
}

/// An ordered sequence of intervals covering `[1, upper_bound]` exactly
/// once, with no gaps and no overlaps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionPlan {
    upper_bound: u64,
    intervals: Vec<Interval>,
}

impl PartitionPlan {
    /// Split `[1, upper_bound]` into `workers` contiguous intervals.
    ///
    /// Boundaries are the floor-division multiples `i * upper_bound / workers`,
    /// so interval `i` is `[i*N/W + 1, (i+1)*N/W]`. For two workers this is
    /// `[1, N/2]` and `[N/2+1, N]`; for four workers the same quarters the
    /// manual `N/4`, `N/2`, `3N/4` boundaries produce.
    ///
    /// Callers validate `workers >= 1` (see `BenchConfig`); a zero worker
    /// count yields an empty plan rather than dividing by zero.
    #[must_use]
    pub fn split(upper_bound: u64, workers: usize) -> Self {
        let w = workers as u64;
        let intervals = (0..w)
            .map(|i| Interval::new(i * upper_bound / w + 1, (i + 1) * upper_bound / w))
            .collect();

        Self {
            upper_bound,
            intervals,
        }
    }

    /// Get the upper bound of the covered range.
    #[must_use]
    pub const fn upper_bound(&self) -> u64 {
        self.upper_bound
    }

    /// Get the partition intervals, in ascending order.
    #[must_use]
    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// Number of workers the plan was built for.
    #[must_use]
    pub fn worker_count(&self) -> usize {
        self.intervals.len()
    }
}
