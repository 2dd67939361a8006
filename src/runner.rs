#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

//! Pass execution and summary statistics.

use std::time::{Duration, Instant};

use tracing::info;

use crate::config::BenchConfig;
use crate::dispatch::{self, PartialResult};
use crate::error::Result;
use crate::partition::PartitionPlan;

/// Outcome of one benchmark pass at a fixed worker count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassResult {
    worker_count: usize,
    total_primes: u64,
    elapsed: Duration,
}

impl PassResult {
    /// Create a pass result.
    #[must_use]
    pub const fn new(worker_count: usize, total_primes: u64, elapsed: Duration) -> Self {
        Self {
            worker_count,
            total_primes,
            elapsed,
        }
    }

    /// Number of workers the pass ran with.
    #[must_use]
    pub const fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// Total primes found across all partitions.
    #[must_use]
    pub const fn total_primes(&self) -> u64 {
        self.total_primes
    }

    /// Wall-clock duration of the pass (partition, count, join, sum).
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Wall-clock duration in milliseconds.
    #[must_use]
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }
}

/// Runs the configured sequence of benchmark passes.
pub struct BenchRunner {
    config: BenchConfig,
}

impl BenchRunner {
    /// Create a new benchmark runner.
    #[must_use]
    pub const fn new(config: BenchConfig) -> Self {
        Self { config }
    }

    /// Execute one pass per configured worker count, in order.
    ///
    /// # Errors
    ///
    /// Returns error if any pass fails; a failed pass aborts the run.
    pub fn run(&self) -> Result<BenchSummary> {
        let mut passes = Vec::with_capacity(self.config.worker_counts().len());

        for &workers in self.config.worker_counts() {
            passes.push(self.run_pass(workers)?);
        }

        Ok(BenchSummary::new(self.config.upper_bound(), passes))
    }

    /// Execute a single pass: partition, dispatch, join, sum.
    ///
    /// The timestamps bracket the whole pass, so thread spawn and join
    /// overhead counts toward the measured duration.
    ///
    /// # Errors
    ///
    /// Returns error if a worker cannot be spawned or panics mid-pass.
    pub fn run_pass(&self, workers: usize) -> Result<PassResult> {
        let started = Instant::now();

        let plan = PartitionPlan::split(self.config.upper_bound(), workers);
        let partials = dispatch::run_workers(&plan)?;
        let total_primes = partials.iter().map(PartialResult::count).sum();

        let pass = PassResult {
            worker_count: workers,
            total_primes,
            elapsed: started.elapsed(),
        };

        info!(
            workers = pass.worker_count(),
            total_primes = pass.total_primes(),
            elapsed = ?pass.elapsed(),
            "pass complete"
        );

        Ok(pass)
    }
}

/// Results of a full benchmark run across all worker counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchSummary {
    upper_bound: u64,
    passes: Vec<PassResult>,
}

impl BenchSummary {
    /// Create a summary from completed passes.
    #[must_use]
    pub const fn new(upper_bound: u64, passes: Vec<PassResult>) -> Self {
        Self {
            upper_bound,
            passes,
        }
    }

    /// Get the upper bound the passes ran against.
    #[must_use]
    pub const fn upper_bound(&self) -> u64 {
        self.upper_bound
    }

    /// Get the completed passes, in execution order.
    #[must_use]
    pub fn passes(&self) -> &[PassResult] {
        &self.passes
    }

    /// Wall-clock speedup of `pass` relative to the first (baseline)
    /// pass. Returns `None` when there is no baseline or the pass
    /// duration is zero.
    #[must_use]
    pub fn speedup(&self, pass: &PassResult) -> Option<f64> {
        let baseline = self.passes.first()?;
        let denom = pass.elapsed().as_secs_f64();

        (denom > 0.0).then(|| baseline.elapsed().as_secs_f64() / denom)
    }

    /// Whether every pass found the same total. Partitioning must not
    /// change the count; a disagreement here means a counting bug.
    #[must_use]
    pub fn totals_agree(&self) -> bool {
        match self.passes.split_first() {
            Some((first, rest)) => rest
                .iter()
                .all(|pass| pass.total_primes() == first.total_primes()),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary_with_totals(totals: &[u64]) -> BenchSummary {
        let passes = totals
            .iter()
            .enumerate()
            .map(|(i, &total)| PassResult {
                worker_count: 1 << i,
                total_primes: total,
                elapsed: Duration::from_millis(100 >> i),
            })
            .collect();
        BenchSummary::new(1_000, passes)
    }

    #[test]
    fn test_runner_three_passes() {
        let config = BenchConfig::new(200, vec![1, 2, 4]);
        assert!(config.is_ok());

        if let Ok(config) = config {
            let summary = BenchRunner::new(config).run();
            assert!(summary.is_ok());

            if let Ok(summary) = summary {
                assert_eq!(summary.passes().len(), 3);
                assert!(summary.totals_agree());
                // 46 primes below 200.
                assert_eq!(summary.passes().first().map(PassResult::total_primes), Some(46));
            }
        }
    }

    #[test]
    fn test_pass_zero_upper_bound() {
        let config = BenchConfig::new(0, vec![4]);
        assert!(config.is_ok());

        if let Ok(config) = config {
            let pass = BenchRunner::new(config).run_pass(4);
            assert!(pass.is_ok());
            assert_eq!(pass.ok().map(|p| p.total_primes()), Some(0));
        }
    }

    #[test]
    fn test_totals_agree() {
        assert!(summary_with_totals(&[25, 25, 25]).totals_agree());
        assert!(!summary_with_totals(&[25, 25, 24]).totals_agree());
        assert!(summary_with_totals(&[]).totals_agree());
    }

    #[test]
    fn test_speedup_relative_to_baseline() {
        let summary = summary_with_totals(&[25, 25, 25]);
        // Baseline 100ms, second pass 50ms, third pass 25ms.
        let speedups: Vec<Option<f64>> = summary
            .passes()
            .iter()
            .map(|p| summary.speedup(p))
            .collect();

        assert_eq!(speedups.len(), 3);
        assert!(speedups[0].is_some_and(|s| (s - 1.0).abs() < 1e-9));
        assert!(speedups[1].is_some_and(|s| (s - 2.0).abs() < 1e-9));
        assert!(speedups[2].is_some_and(|s| (s - 4.0).abs() < 1e-9));
    }

    #[test]
    fn test_elapsed_ms_conversion() {
        let pass = PassResult {
            worker_count: 1,
            total_primes: 0,
            elapsed: Duration::from_millis(1500),
        };
        assert!((pass.elapsed_ms() - 1500.0).abs() < 1e-9);
    }
}
