//! Random sources for picking sites.
//!
//! Every trial owns its own generator, seeded from a base seed and the
//! trial index with [`trial_rng`]. A trial's draws therefore depend only
//! on `(base_seed, trial_index)`, whichever thread runs it.
//!
//! # Reproducibility
//!
//! `SmallRng` (Xoshiro256++) is deterministic for a given seed on the same
//! platform. Runs without an explicit seed draw a base seed from the
//! OS-seeded thread RNG via [`fresh_seed`]; the driver logs it.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Uniform integer draws over an inclusive range.
///
/// Implemented for every [`rand::Rng`]. Tests implement it directly to
/// script which sites a trial visits.
pub trait SiteSource {
    /// Returns a value uniformly distributed in `lo..=hi`.
    ///
    /// Callers guarantee `lo <= hi`.
    fn uniform(&mut self, lo: usize, hi: usize) -> usize;
}

impl<R: Rng> SiteSource for R {
    fn uniform(&mut self, lo: usize, hi: usize) -> usize {
        self.random_range(lo..=hi)
    }
}

/// Creates a fast, seeded random number generator.
///
/// # Examples
/// ```
/// use percolation::random::{create_rng, SiteSource};
/// let mut rng = create_rng(7);
/// let x = rng.uniform(1, 6);
/// assert!((1..=6).contains(&x));
/// ```
pub fn create_rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

/// Generator for trial number `trial` of an experiment seeded with
/// `base_seed`.
pub fn trial_rng(base_seed: u64, trial: usize) -> SmallRng {
    create_rng(base_seed.wrapping_add(trial as u64))
}

/// Draws a base seed from the thread-local, OS-seeded generator.
pub fn fresh_seed() -> u64 {
    rand::rng().random()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_rng_deterministic() {
        let mut a = create_rng(42);
        let mut b = create_rng(42);
        let xs: Vec<usize> = (0..20).map(|_| a.uniform(1, 100)).collect();
        let ys: Vec<usize> = (0..20).map(|_| b.uniform(1, 100)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn test_trial_rng_depends_on_index() {
        let mut first = trial_rng(9, 0);
        let mut second = trial_rng(9, 1);
        let xs: Vec<usize> = (0..20).map(|_| first.uniform(1, 1000)).collect();
        let ys: Vec<usize> = (0..20).map(|_| second.uniform(1, 1000)).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn test_trial_rng_wraps() {
        let mut a = trial_rng(u64::MAX, 1);
        let mut b = create_rng(0);
        assert_eq!(a.uniform(1, 1_000_000), b.uniform(1, 1_000_000));
    }

    #[test]
    fn test_uniform_degenerate_range() {
        let mut rng = create_rng(3);
        for _ in 0..10 {
            assert_eq!(rng.uniform(5, 5), 5);
        }
    }

    #[test]
    fn test_uniform_covers_range() {
        let mut rng = create_rng(11);
        let mut counts = [0u32; 4];
        let draws = 8000;
        for _ in 0..draws {
            counts[rng.uniform(1, 4) - 1] += 1;
        }
        for (i, &count) in counts.iter().enumerate() {
            let share = count as f64 / draws as f64;
            assert!((share - 0.25).abs() < 0.03, "value {} drawn with share {share}", i + 1);
        }
    }
}
