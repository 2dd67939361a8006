#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

//! Report rendering and the per-pass JSON-lines sink.

use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{BenchError, Result};
use crate::runner::{BenchSummary, PassResult};

/// One completed pass as written to the JSON-lines sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassRecord {
    /// Timestamp when the record was created
    timestamp: DateTime<Utc>,

    /// Upper bound of the counted range
    upper_bound: u64,

    /// Number of workers the pass ran with
    worker_count: usize,

    /// Total primes found
    total_primes: u64,

    /// Wall-clock duration in milliseconds
    elapsed_ms: f64,
}

impl PassRecord {
    /// Create a record for a completed pass, stamped with the current time.
    #[must_use]
    pub fn new(upper_bound: u64, pass: &PassResult) -> Self {
        Self {
            timestamp: Utc::now(),
            upper_bound,
            worker_count: pass.worker_count(),
            total_primes: pass.total_primes(),
            elapsed_ms: pass.elapsed_ms(),
        }
    }

    /// Get the record timestamp
    #[must_use]
    pub const fn timestamp(&self) -> &DateTime<Utc> {
        &self.timestamp
    }

    /// Get the upper bound
    #[must_use]
    pub const fn upper_bound(&self) -> u64 {
        self.upper_bound
    }

    /// Get the worker count
    #[must_use]
    pub const fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// Get the total prime count
    #[must_use]
    pub const fn total_primes(&self) -> u64 {
        self.total_primes
    }

    /// Get the elapsed milliseconds
    #[must_use]
    pub const fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }
}

/// Logger for appending pass records to a file.
pub struct PassLogger {
    output_path: PathBuf,
}

impl PassLogger {
    /// Create a new pass logger.
    #[must_use]
    pub const fn new(output_path: PathBuf) -> Self {
        Self { output_path }
    }

    /// Append a pass record to the log file (JSON lines format).
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be written or JSON serialization
    /// fails
    pub fn log_pass(&self, record: &PassRecord) -> Result<()> {
        use std::io::Write;

        let json = serde_json::to_string(record)?;

        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.output_path)
            .map_err(|e| BenchError::LogWriteFailed(e.to_string()))?;

        writeln!(file, "{json}").map_err(|e| BenchError::LogWriteFailed(e.to_string()))?;

        Ok(())
    }

    /// Read all records from the log file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or JSON parsing fails
    pub fn read_records(&self) -> Result<Vec<PassRecord>> {
        if !Path::new(&self.output_path).exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.output_path)?;
        let reader = BufReader::new(file);

        reader
            .lines()
            .map(|line_result| {
                let line = line_result?;
                serde_json::from_str(&line).map_err(Into::into)
            })
            .collect()
    }
}

/// Render the run header: banner, range, and planned worker counts.
#[must_use]
pub fn render_header(upper_bound: u64, worker_counts: &[usize]) -> String {
    let counts = worker_counts
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    let mut out = String::new();
    let _ = writeln!(out, "=== Prime Counting Benchmark ===");
    let _ = writeln!(out, "Range: 1 - {upper_bound}");
    let _ = writeln!(out, "Worker counts: {counts}");
    let _ = writeln!(out);
    out
}

/// Render one completed pass. `baseline` is the first pass of the run;
/// passes after it get a speedup figure.
#[must_use]
pub fn render_pass(pass: &PassResult, baseline: Option<&PassResult>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Workers: {}", pass.worker_count());
    let _ = writeln!(out, "  Total primes: {}", pass.total_primes());

    match baseline {
        Some(base) if pass.elapsed_ms() > 0.0 => {
            let speedup = base.elapsed_ms() / pass.elapsed_ms();
            let _ = writeln!(
                out,
                "  Duration: {:.2}ms ({speedup:.2}x speedup)",
                pass.elapsed_ms()
            );
        }
        _ => {
            let _ = writeln!(out, "  Duration: {:.2}ms", pass.elapsed_ms());
        }
    }

    let _ = writeln!(out);
    out
}

/// Render the closing summary.
#[must_use]
pub fn render_footer(summary: &BenchSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Benchmark Complete ===");

    let best = summary
        .passes()
        .iter()
        .filter_map(|pass| summary.speedup(pass).map(|s| (pass.worker_count(), s)))
        .max_by(|(_, a), (_, b)| a.total_cmp(b));

    if let Some((workers, speedup)) = best {
        let _ = writeln!(out, "Best speedup: {speedup:.2}x with {workers} worker(s)");
    }

    out
}

/// Render the whole run as a single JSON object.
///
/// # Errors
///
/// Returns error if JSON serialization fails
pub fn render_json(summary: &BenchSummary) -> Result<String> {
    let passes: Vec<serde_json::Value> = summary
        .passes()
        .iter()
        .map(|pass| {
            serde_json::json!({
                "worker_count": pass.worker_count(),
                "total_primes": pass.total_primes(),
                "elapsed_ms": pass.elapsed_ms(),
                "speedup": summary.speedup(pass),
            })
        })
        .collect();

    let value = serde_json::json!({
        "upper_bound": summary.upper_bound(),
        "totals_agree": summary.totals_agree(),
        "passes": passes,
    });

    serde_json::to_string_pretty(&value).map_err(Into::into)
}
