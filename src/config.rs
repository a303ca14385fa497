//! Experiment configuration.

use serde::{Deserialize, Serialize};

use crate::error::{positive, PercolationError, Result};
use crate::grid::FillTracking;
use crate::special;

/// How trials are scheduled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Execution {
    /// One trial after another on the calling thread.
    #[default]
    Sequential,
    /// Trials spread over a rayon pool. `threads: None` uses rayon's
    /// default size.
    Parallel { threads: Option<usize> },
}

/// Parameters of one Monte Carlo experiment.
///
/// # Examples
/// ```
/// use percolation::config::{Execution, ExperimentConfig};
///
/// let config = ExperimentConfig::new(200, 100)
///     .with_seed(42)
///     .with_execution(Execution::Parallel { threads: Some(4) });
/// assert!(config.validate().is_ok());
/// assert_eq!(config.z_score().unwrap(), 1.96);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentConfig {
    /// Grid side length N.
    pub grid_size: usize,
    /// Number of independent trials T.
    pub trials: usize,
    /// Base seed. `None` draws one per run.
    pub seed: Option<u64>,
    /// Sequential or rayon-parallel trials.
    pub execution: Execution,
    /// Fullness bookkeeping of every trial grid.
    pub fill_tracking: FillTracking,
    /// Two-sided confidence level of the reported interval.
    pub confidence: f64,
}

impl ExperimentConfig {
    /// Default confidence level.
    pub const DEFAULT_CONFIDENCE: f64 = 0.95;

    /// Sequential, unseeded, shared fill tracking, 95% interval.
    pub fn new(grid_size: usize, trials: usize) -> Self {
        Self {
            grid_size,
            trials,
            seed: None,
            execution: Execution::Sequential,
            fill_tracking: FillTracking::Shared,
            confidence: Self::DEFAULT_CONFIDENCE,
        }
    }

    /// Builds a config from signed sizes, as they arrive from a command
    /// line.
    ///
    /// # Errors
    /// [`PercolationError::InvalidArgument`] if either value is ≤ 0.
    pub fn from_signed(grid_size: i64, trials: i64) -> Result<Self> {
        Ok(Self::new(
            positive("grid size", grid_size)?,
            positive("trials", trials)?,
        ))
    }

    /// Fixes the base seed, making the run reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Chooses sequential or parallel trials.
    pub fn with_execution(mut self, execution: Execution) -> Self {
        self.execution = execution;
        self
    }

    /// Chooses how grids answer `is_full`.
    pub fn with_fill_tracking(mut self, fill_tracking: FillTracking) -> Self {
        self.fill_tracking = fill_tracking;
        self
    }

    /// Sets the two-sided confidence level, checked by [`Self::validate`].
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    /// Checks every field.
    ///
    /// # Errors
    /// - [`PercolationError::InvalidArgument`] for a zero grid size or
    ///   trial count.
    /// - [`PercolationError::InvalidConfidence`] for a level outside (0, 1).
    pub fn validate(&self) -> Result<()> {
        if self.grid_size == 0 {
            return Err(PercolationError::InvalidArgument {
                name: "grid size",
                value: 0,
            });
        }
        if self.trials == 0 {
            return Err(PercolationError::InvalidArgument {
                name: "trials",
                value: 0,
            });
        }
        self.z_score().map(|_| ())
    }

    /// Critical value for [`Self::confidence`].
    pub fn z_score(&self) -> Result<f64> {
        special::two_sided_z(self.confidence)
            .ok_or(PercolationError::InvalidConfidence(self.confidence))
    }
}
