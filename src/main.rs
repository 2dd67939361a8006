#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

//! CLI for the prime-counting speedup benchmark.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::warn;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use primescale::report::{self, PassLogger, PassRecord};
use primescale::{BenchConfig, BenchRunner, BenchSummary, DEFAULT_UPPER_BOUND, Result};

/// Prime-counting speedup benchmark
#[derive(Parser, Debug)]
#[command(name = "primescale")]
#[command(version)]
#[command(
    about = "Counts primes in [1, N] at several worker counts and compares wall-clock speedup"
)]
struct Cli {
    /// Inclusive upper bound of the counted range
    #[arg(short = 'n', long, default_value_t = DEFAULT_UPPER_BOUND)]
    upper_bound: u64,

    /// Append per-pass records to a JSON-lines file
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Print the final summary as JSON instead of the human-readable report
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() {
    init_tracing();

    match run() {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = BenchConfig::standard(cli.upper_bound)?;
    if let Some(path) = cli.output {
        config = config.with_output_path(path);
    }

    let upper_bound = config.upper_bound();
    let worker_counts = config.worker_counts().to_vec();
    let logger = config.output_path().cloned().map(PassLogger::new);
    let runner = BenchRunner::new(config);

    if !cli.json {
        print!("{}", report::render_header(upper_bound, &worker_counts));
    }

    // Passes run strictly in order; the first one is the speedup baseline.
    let mut passes = Vec::with_capacity(worker_counts.len());
    for workers in worker_counts {
        let pass = runner.run_pass(workers)?;

        if let Some(logger) = &logger {
            logger.log_pass(&PassRecord::new(upper_bound, &pass))?;
        }

        if !cli.json {
            print!("{}", report::render_pass(&pass, passes.first()));
        }

        passes.push(pass);
    }

    let summary = BenchSummary::new(upper_bound, passes);

    if !summary.totals_agree() {
        warn!("pass totals disagree; the partitioned count has a bug");
    }

    if cli.json {
        println!("{}", report::render_json(&summary)?);
    } else {
        print!("{}", report::render_footer(&summary));
    }

    Ok(())
}

/// Initialize tracing subscriber with environment filter.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
