#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

//! Worker dispatch and join for a single benchmark pass.
//!
//! One worker thread per partition, created fresh for the pass. Each
//! worker gets exclusive `&mut` access to its own pre-sized output slot,
//! so no two workers ever share a write target. The coordinator reads
//! the slots only after joining every worker; the join is the only
//! synchronization point of a pass.

use std::thread;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::error::{BenchError, Result};
use crate::partition::PartitionPlan;
use crate::prime::count_primes;

/// Prime count produced by one worker for one partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartialResult {
    partition_index: usize,
    count: u64,
    elapsed: Duration,
}

impl PartialResult {
    /// Index of the partition this result belongs to.
    #[must_use]
    pub const fn partition_index(&self) -> usize {
        self.partition_index
    }

    /// Prime count over the partition.
    #[must_use]
    pub const fn count(&self) -> u64 {
        self.count
    }

    /// Time the worker spent counting its partition.
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

/// Count primes over every interval of `plan` concurrently.
///
/// Spawns one scoped thread per partition and blocks until all of them
/// have been joined. Results come back ordered by partition index.
///
/// # Errors
///
/// Returns error if:
/// - A worker thread cannot be spawned
/// - A worker thread panics (fatal for the pass; no retry)
pub fn run_workers(plan: &PartitionPlan) -> Result<Vec<PartialResult>> {
    run_workers_with_start_delay(plan, Duration::ZERO)
}

/// Same as [`run_workers`], but every worker sleeps for `start_delay`
/// before counting. Non-zero delays are only used by tests to perturb
/// scheduling and confirm the join barrier is what makes the slot reads
/// safe.
///
/// # Errors
///
/// Returns error if a worker cannot be spawned or panics mid-pass.
pub fn run_workers_with_start_delay(
    plan: &PartitionPlan,
    start_delay: Duration,
) -> Result<Vec<PartialResult>> {
    let mut slots: Vec<Option<PartialResult>> = vec![None; plan.worker_count()];

    thread::scope(|scope| -> Result<()> {
        let mut handles = Vec::with_capacity(plan.worker_count());

        for (index, (slot, interval)) in slots.iter_mut().zip(plan.intervals()).enumerate() {
            let interval = *interval;
            let handle = thread::Builder::new()
                .name(format!("prime-worker-{index}"))
                .spawn_scoped(scope, move || {
                    if !start_delay.is_zero() {
                        thread::sleep(start_delay);
                    }

                    let started = Instant::now();
                    let count = count_primes(interval);

                    // Single writer per slot; published before the join.
                    *slot = Some(PartialResult {
                        partition_index: index,
                        count,
                        elapsed: started.elapsed(),
                    });
                })
                .map_err(|e| BenchError::WorkerSpawnFailed {
                    partition_index: index,
                    reason: e.to_string(),
                })?;

            handles.push((index, handle));
        }

        // Join barrier: every worker finishes before any slot is read.
        for (index, handle) in handles {
            handle
                .join()
                .map_err(|_| BenchError::WorkerPanicked {
                    partition_index: index,
                })?;
        }

        Ok(())
    })?;

    let results: Vec<PartialResult> = slots
        .into_iter()
        .enumerate()
        .map(|(index, slot)| {
            slot.ok_or(BenchError::WorkerPanicked {
                partition_index: index,
            })
        })
        .collect::<Result<_>>()?;

    for partial in &results {
        debug!(
            partition = partial.partition_index(),
            count = partial.count(),
            elapsed = ?partial.elapsed(),
            "partition counted"
        );
    }

    Ok(results)
}
