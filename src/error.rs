//! Error type shared by the grid model and the experiment driver.

use thiserror::Error;

/// Failures reported by this crate.
///
/// Every variant is returned to the immediate caller. Nothing in the
/// library retries, recovers from, or logs these.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PercolationError {
    /// A size or count that must be positive was not.
    #[error("invalid argument: {name} must be positive, got {value}")]
    InvalidArgument {
        /// Which parameter was rejected.
        name: &'static str,
        /// The rejected value.
        value: i64,
    },

    /// A site coordinate outside `[1, n]²`.
    #[error("site ({row}, {col}) is outside the {n}x{n} grid")]
    OutOfRange { row: usize, col: usize, n: usize },

    /// Confidence level outside the open interval (0, 1).
    #[error("invalid confidence level {0}: expected a value strictly between 0 and 1")]
    InvalidConfidence(f64),

    /// The worker pool for parallel trials could not be started.
    #[error("failed to build worker pool: {0}")]
    WorkerPool(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PercolationError>;

/// Converts a signed size or count into `usize`, rejecting anything ≤ 0.
///
/// # Examples
/// ```
/// use percolation::error::{positive, PercolationError};
/// assert_eq!(positive("grid size", 20), Ok(20));
/// assert!(matches!(
///     positive("grid size", -1),
///     Err(PercolationError::InvalidArgument { name: "grid size", value: -1 })
/// ));
/// ```
pub fn positive(name: &'static str, value: i64) -> Result<usize> {
    if value <= 0 {
        return Err(PercolationError::InvalidArgument { name, value });
    }
    usize::try_from(value).map_err(|_| PercolationError::InvalidArgument { name, value })
}
