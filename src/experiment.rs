//! Monte Carlo estimation of the percolation threshold.
//!
//! Each trial starts from a fully blocked grid and opens uniformly random
//! blocked sites until the grid percolates. The fraction of open sites at
//! that moment is the trial's threshold. Already-open draws are rejected
//! and redrawn, so every pick is uniform over the remaining blocked sites.
//!
//! Trials are independent: trial `i` depends only on the grid size and
//! its generator ([`crate::random::trial_rng`]). Sequential and parallel
//! execution therefore produce the same thresholds, in the same order.

use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{Execution, ExperimentConfig};
use crate::error::{PercolationError, Result};
use crate::grid::{FillTracking, Percolation};
use crate::random::{self, SiteSource};
use crate::stats;

/// Runs one trial and returns its percolation threshold.
///
/// # Errors
/// [`PercolationError::InvalidArgument`] if `n == 0`.
///
/// # Examples
/// ```
/// use percolation::experiment::run_trial;
/// use percolation::grid::FillTracking;
/// use percolation::random::create_rng;
///
/// let mut rng = create_rng(1);
/// let threshold = run_trial(16, FillTracking::Shared, &mut rng).unwrap();
/// assert!(threshold > 0.0 && threshold <= 1.0);
/// ```
pub fn run_trial<S: SiteSource + ?Sized>(
    n: usize,
    fill_tracking: FillTracking,
    source: &mut S,
) -> Result<f64> {
    let mut grid = Percolation::with_fill_tracking(n, fill_tracking)?;
    while !grid.percolates() {
        let (row, col) = loop {
            let row = source.uniform(1, n);
            let col = source.uniform(1, n);
            if !grid.is_open(row, col)? {
                break (row, col);
            }
        };
        grid.open(row, col)?;
    }
    Ok(grid.number_of_open_sites() as f64 / (n as f64 * n as f64))
}

/// Thresholds of a finished experiment and their summary statistics.
///
/// # Examples
/// ```
/// use percolation::experiment::PercolationStats;
///
/// let stats = PercolationStats::from_thresholds(10, vec![0.55, 0.6, 0.65]).unwrap();
/// assert!((stats.mean() - 0.6).abs() < 1e-12);
/// assert!((stats.stddev() - 0.05).abs() < 1e-12);
/// assert!(stats.confidence_lo() < stats.mean());
/// ```
#[derive(Debug, Clone)]
pub struct PercolationStats {
    grid_size: usize,
    thresholds: Vec<f64>,
    seed: Option<u64>,
    confidence: f64,
    z: f64,
}

/// Serializable snapshot of a [`PercolationStats`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub grid_size: usize,
    pub trials: usize,
    pub seed: Option<u64>,
    pub mean: f64,
    pub stddev: f64,
    pub confidence_level: f64,
    pub confidence_lo: f64,
    pub confidence_hi: f64,
    pub min: f64,
    pub max: f64,
}

impl PercolationStats {
    /// Performs `trials` independent trials on an `n × n` grid with a fresh
    /// random seed, sequentially.
    ///
    /// # Errors
    /// [`PercolationError::InvalidArgument`] if `n == 0` or `trials == 0`.
    pub fn new(n: usize, trials: usize) -> Result<Self> {
        Self::run(&ExperimentConfig::new(n, trials))
    }

    /// Runs the experiment described by `config`.
    ///
    /// # Errors
    /// Any [`ExperimentConfig::validate`] failure, or
    /// [`PercolationError::WorkerPool`] if a parallel pool cannot start.
    pub fn run(config: &ExperimentConfig) -> Result<Self> {
        config.validate()?;
        let z = config.z_score()?;
        let seed = config.seed.unwrap_or_else(random::fresh_seed);

        info!(
            grid_size = config.grid_size,
            trials = config.trials,
            seed,
            execution = ?config.execution,
            fill_tracking = ?config.fill_tracking,
            "starting percolation experiment"
        );
        let started = Instant::now();

        let thresholds = match config.execution {
            Execution::Sequential => (0..config.trials)
                .map(|trial| seeded_trial(config, seed, trial))
                .collect::<Result<Vec<_>>>()?,
            Execution::Parallel { threads } => {
                let mut builder = rayon::ThreadPoolBuilder::new();
                if let Some(threads) = threads {
                    builder = builder.num_threads(threads);
                }
                let pool = builder
                    .build()
                    .map_err(|e| PercolationError::WorkerPool(e.to_string()))?;
                pool.install(|| {
                    (0..config.trials)
                        .into_par_iter()
                        .map(|trial| seeded_trial(config, seed, trial))
                        .collect::<Result<Vec<_>>>()
                })?
            }
        };

        info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            "percolation experiment finished"
        );

        Ok(Self {
            grid_size: config.grid_size,
            thresholds,
            seed: Some(seed),
            confidence: config.confidence,
            z,
        })
    }

    /// Wraps thresholds measured elsewhere, with a 95% interval.
    ///
    /// # Errors
    /// [`PercolationError::InvalidArgument`] if `n == 0` or `thresholds` is
    /// empty.
    pub fn from_thresholds(n: usize, thresholds: Vec<f64>) -> Result<Self> {
        if n == 0 {
            return Err(PercolationError::InvalidArgument {
                name: "grid size",
                value: 0,
            });
        }
        if thresholds.is_empty() {
            return Err(PercolationError::InvalidArgument {
                name: "trials",
                value: 0,
            });
        }
        Ok(Self {
            grid_size: n,
            thresholds,
            seed: None,
            confidence: ExperimentConfig::DEFAULT_CONFIDENCE,
            z: stats::Z_95,
        })
    }

    /// Side length N of the grids the trials ran on.
    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    /// Number of recorded trials T.
    pub fn trials(&self) -> usize {
        self.thresholds.len()
    }

    /// Base seed the trials were drawn from, if they ran here.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Per-trial thresholds in trial order.
    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    /// Sample mean of the thresholds.
    pub fn mean(&self) -> f64 {
        stats::mean(&self.thresholds).unwrap_or(f64::NAN)
    }

    /// Sample standard deviation of the thresholds; NaN for a single trial.
    pub fn stddev(&self) -> f64 {
        stats::std_dev(&self.thresholds).unwrap_or(f64::NAN)
    }

    /// Low endpoint of the confidence interval.
    pub fn confidence_lo(&self) -> f64 {
        self.interval().0
    }

    /// High endpoint of the confidence interval.
    pub fn confidence_hi(&self) -> f64 {
        self.interval().1
    }

    /// Confidence level of [`Self::confidence_lo`] and [`Self::confidence_hi`].
    pub fn confidence_level(&self) -> f64 {
        self.confidence
    }

    /// Smallest recorded threshold.
    pub fn min(&self) -> f64 {
        stats::min(&self.thresholds).unwrap_or(f64::NAN)
    }

    /// Largest recorded threshold.
    pub fn max(&self) -> f64 {
        stats::max(&self.thresholds).unwrap_or(f64::NAN)
    }

    /// Collects every statistic into one serializable record.
    ///
    /// # Complexity
    /// O(T): each statistic is one pass over the thresholds.
    pub fn summary(&self) -> Summary {
        let (confidence_lo, confidence_hi) = self.interval();
        Summary {
            grid_size: self.grid_size,
            trials: self.trials(),
            seed: self.seed,
            mean: self.mean(),
            stddev: self.stddev(),
            confidence_level: self.confidence,
            confidence_lo,
            confidence_hi,
            min: self.min(),
            max: self.max(),
        }
    }

    fn interval(&self) -> (f64, f64) {
        stats::confidence_interval(self.mean(), self.stddev(), self.trials(), self.z)
    }
}

fn seeded_trial(config: &ExperimentConfig, seed: u64, trial: usize) -> Result<f64> {
    let mut rng = random::trial_rng(seed, trial);
    let threshold = run_trial(config.grid_size, config.fill_tracking, &mut rng)?;
    debug!(trial, threshold, "trial finished");
    Ok(threshold)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn threshold_is_a_valid_fraction(n in 1_usize..12, seed in 0_u64..10000) {
            let mut rng = random::create_rng(seed);
            let threshold = run_trial(n, FillTracking::Shared, &mut rng).unwrap();
            let opened = threshold * (n * n) as f64;
            prop_assert!(threshold > 0.0 && threshold <= 1.0);
            // at least one site per row is needed
            prop_assert!(opened + 1e-9 >= n as f64);
            prop_assert!((opened - opened.round()).abs() < 1e-9);
        }
    }
}
