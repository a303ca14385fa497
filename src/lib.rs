//! # percolation
//!
//! Site percolation on square grids.
//!
//! An N×N grid starts with every site blocked. Sites are opened one at a
//! time; the grid *percolates* once a chain of open, 4-adjacent sites
//! joins the top row to the bottom row. Repeating random openings until
//! that happens estimates the percolation threshold, about 0.5927 for
//! large grids.
//!
//! ## Modules
//!
//! - [`grid`]: the incremental grid model ([`grid::Percolation`])
//! - [`experiment`]: Monte Carlo driver ([`experiment::PercolationStats`])
//! - [`collections`]: disjoint-set forest backing the grid
//! - [`stats`]: mean, sample standard deviation, confidence intervals
//! - [`special`]: normal quantiles for non-default confidence levels
//! - [`random`]: seeded generators and the site-draw seam
//! - [`config`]: experiment parameters
//! - [`error`]: the crate's error type
//!
//! ## Example
//!
//! ```
//! use percolation::config::ExperimentConfig;
//! use percolation::experiment::PercolationStats;
//!
//! let stats = PercolationStats::run(&ExperimentConfig::new(20, 30).with_seed(42)).unwrap();
//! assert!(stats.confidence_lo() < stats.mean());
//! assert!(stats.mean() < stats.confidence_hi());
//! ```

pub mod collections;
pub mod config;
pub mod error;
pub mod experiment;
pub mod grid;
pub mod random;
pub mod special;
pub mod stats;

pub use error::{PercolationError, Result};
pub use experiment::PercolationStats;
pub use grid::Percolation;
