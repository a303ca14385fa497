//! Descriptive statistics over per-trial thresholds.
//!
//! # Algorithms
//!
//! - **Mean**: Neumaier-compensated summation, error O(ε) independent of n.
//! - **Variance**: two-pass, compensated sum of squared deviations from
//!   the mean, with Bessel's correction (denominator `n − 1`).
//! - **Confidence interval**: normal approximation,
//!   `mean ± z · s / √n`.

/// z-score of the two-sided 95% normal confidence interval.
pub const Z_95: f64 = 1.96;

/// Sums `data` with Neumaier's variant of Kahan summation.
///
/// Reference: Neumaier (1974), *Zeitschrift für Angewandte Mathematik
/// und Mechanik* 54(1), pp. 39–51.
pub fn kahan_sum(data: &[f64]) -> f64 {
    compensated(data.iter().copied())
}

fn compensated(values: impl Iterator<Item = f64>) -> f64 {
    let mut sum = 0.0_f64;
    let mut c = 0.0_f64;
    for x in values {
        let t = sum + x;
        if sum.abs() >= x.abs() {
            c += (sum - t) + x;
        } else {
            c += (x - t) + sum;
        }
        sum = t;
    }
    sum + c
}

/// Arithmetic mean.
///
/// # Returns
/// - `None` if `data` is empty or contains NaN/Inf.
///
/// # Examples
/// ```
/// use percolation::stats::mean;
/// assert_eq!(mean(&[0.5, 0.6, 0.7]).map(|m| (m * 10.0).round()), Some(6.0));
/// assert_eq!(mean(&[]), None);
/// ```
pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() || !data.iter().all(|x| x.is_finite()) {
        return None;
    }
    Some(kahan_sum(data) / data.len() as f64)
}

/// Sample variance with Bessel's correction.
///
/// # Returns
/// - `None` if `data.len() < 2` or `data` contains NaN/Inf.
///
/// # Examples
/// ```
/// use percolation::stats::variance;
/// let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
/// assert!((variance(&v).unwrap() - 32.0 / 7.0).abs() < 1e-12);
/// ```
pub fn variance(data: &[f64]) -> Option<f64> {
    if data.len() < 2 {
        return None;
    }
    let m = mean(data)?;
    let ss = compensated(data.iter().map(|&x| (x - m) * (x - m)));
    Some(ss / (data.len() - 1) as f64)
}

/// Sample standard deviation, `sqrt(variance(data))`.
pub fn std_dev(data: &[f64]) -> Option<f64> {
    variance(data).map(f64::sqrt)
}

/// Smallest value, `None` if empty or any value is NaN.
pub fn min(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    data.iter()
        .try_fold(f64::INFINITY, |acc, &x| (!x.is_nan()).then(|| acc.min(x)))
}

/// Largest value, `None` if empty or any value is NaN.
pub fn max(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    data.iter()
        .try_fold(f64::NEG_INFINITY, |acc, &x| (!x.is_nan()).then(|| acc.max(x)))
}

/// Normal-approximation confidence interval `mean ∓ z · std_dev / √n`.
///
/// NaN in either input propagates into both bounds.
///
/// # Examples
/// ```
/// use percolation::stats::{confidence_interval, Z_95};
/// let (lo, hi) = confidence_interval(0.6, 0.04, 16, Z_95);
/// assert!((lo - 0.5804).abs() < 1e-12);
/// assert!((hi - 0.6196).abs() < 1e-12);
///
/// let (lo, hi) = confidence_interval(0.6, f64::NAN, 1, Z_95);
/// assert!(lo.is_nan() && hi.is_nan());
/// ```
pub fn confidence_interval(mean: f64, std_dev: f64, n: usize, z: f64) -> (f64, f64) {
    let half_width = z * std_dev / (n as f64).sqrt();
    (mean - half_width, mean + half_width)
}
