//! Percolation threshold CLI.
//!
//! Runs T independent trials on an N-by-N grid and prints the sample
//! mean, standard deviation and confidence interval of the threshold.

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use percolation::config::{Execution, ExperimentConfig};
use percolation::experiment::PercolationStats;
use percolation::grid::FillTracking;

#[derive(Parser, Debug)]
#[command(name = "percolation", version)]
#[command(about = "Estimate the percolation threshold of an N-by-N grid by Monte Carlo simulation")]
struct Cli {
    /// Grid side length N
    #[arg(allow_negative_numbers = true)]
    grid_size: i64,

    /// Number of independent trials T
    #[arg(allow_negative_numbers = true)]
    trials: i64,

    /// Base random seed (a fresh one is drawn and logged when absent)
    #[arg(long, env = "PERCOLATION_SEED")]
    seed: Option<u64>,

    /// Run trials on a worker pool
    #[arg(long, short)]
    parallel: bool,

    /// Worker threads for --parallel (implies it)
    #[arg(long, short = 'j', env = "PERCOLATION_THREADS")]
    threads: Option<usize>,

    /// Track fullness in a separate structure, avoiding backwash
    #[arg(long)]
    no_backwash: bool,

    /// Two-sided confidence level of the reported interval
    #[arg(long, default_value_t = ExperimentConfig::DEFAULT_CONFIDENCE)]
    confidence: f64,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(long, short)]
    verbose: bool,
}

impl Cli {
    fn to_config(&self) -> percolation::Result<ExperimentConfig> {
        let mut config = ExperimentConfig::from_signed(self.grid_size, self.trials)?
            .with_confidence(self.confidence);
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if self.parallel || self.threads.is_some() {
            config = config.with_execution(Execution::Parallel {
                threads: self.threads,
            });
        }
        if self.no_backwash {
            config = config.with_fill_tracking(FillTracking::Separate);
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.to_config()?;
    let stats = PercolationStats::run(&config)?;

    if cli.json {
        let json = serde_json::to_string_pretty(&stats.summary())
            .context("failed to serialize summary")?;
        println!("{json}");
    } else {
        print_stats(&stats);
    }
    Ok(())
}

fn print_stats(stats: &PercolationStats) {
    let interval_label = format!("{} confidence interval", percent(stats.confidence_level()));
    println!("{:<25} = {:.10}", "mean", stats.mean());
    println!("{:<25} = {:.10}", "stddev", stats.stddev());
    println!(
        "{:<25} = {:.10}, {:.10}",
        interval_label,
        stats.confidence_lo(),
        stats.confidence_hi()
    );
}

/// `0.95` → `95%`, `0.995` → `99.5%`.
fn percent(level: f64) -> String {
    let pct = level * 100.0;
    if (pct - pct.round()).abs() < 1e-9 {
        format!("{pct:.0}%")
    } else {
        let text = format!("{pct:.4}");
        format!("{}%", text.trim_end_matches('0'))
    }
}
