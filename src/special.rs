//! Normal quantiles for confidence intervals.
//!
//! Only what the experiment driver needs to turn a confidence level into
//! a critical value.

/// Inverse of the standard normal CDF (quantile function).
///
/// Given `p ∈ (0, 1)`, returns `z` with `Φ(z) = p`.
///
/// # Algorithm
/// Acklam's rational approximation: a central rational function on
/// `[0.02425, 0.97575]` and a tail rational function in `√(−2 ln q)`
/// outside it.
///
/// Reference: P. J. Acklam (2003), "An algorithm for computing the inverse
/// normal cumulative distribution function".
///
/// # Accuracy
/// Relative error < 1.15 × 10⁻⁹ over the whole domain.
///
/// # Returns
/// - `f64::NAN` if `p` is NaN or outside `[0, 1]`.
/// - `f64::NEG_INFINITY` / `f64::INFINITY` at `p == 0.0` / `p == 1.0`.
///
/// # Examples
/// ```
/// use percolation::special::inverse_normal_cdf;
/// assert!(inverse_normal_cdf(0.5).abs() < 1e-9);
/// assert!((inverse_normal_cdf(0.975) - 1.959964).abs() < 1e-6);
/// ```
pub fn inverse_normal_cdf(p: f64) -> f64 {
    if p.is_nan() || !(0.0..=1.0).contains(&p) {
        return f64::NAN;
    }
    if p == 0.0 {
        return f64::NEG_INFINITY;
    }
    if p == 1.0 {
        return f64::INFINITY;
    }

    const A: [f64; 6] = [
        -3.969683028665376e+01,
        2.209460984245205e+02,
        -2.759285104469687e+02,
        1.383577518672690e+02,
        -3.066479806614716e+01,
        2.506628277459239e+00,
    ];
    const B: [f64; 5] = [
        -5.447609879822406e+01,
        1.615858368580409e+02,
        -1.556989798598866e+02,
        6.680131188771972e+01,
        -1.328068155288572e+01,
    ];
    const C: [f64; 6] = [
        -7.784894002430293e-03,
        -3.223964580411365e-01,
        -2.400758277161838e+00,
        -2.549732539343734e+00,
        4.374664141464968e+00,
        2.938163982698783e+00,
    ];
    const D: [f64; 4] = [
        7.784695709041462e-03,
        3.224671290700398e-01,
        2.445134137142996e+00,
        3.754408661907416e+00,
    ];
    const P_LOW: f64 = 0.02425;

    let tail = |q: f64| {
        let t = (-2.0 * q.ln()).sqrt();
        (((((C[0] * t + C[1]) * t + C[2]) * t + C[3]) * t + C[4]) * t + C[5])
            / ((((D[0] * t + D[1]) * t + D[2]) * t + D[3]) * t + 1.0)
    };

    if p < P_LOW {
        tail(p)
    } else if p > 1.0 - P_LOW {
        -tail(1.0 - p)
    } else {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    }
}

/// Critical value `z` of a two-sided normal interval at `level`.
///
/// The conventional 95% level maps to exactly [`crate::stats::Z_95`]
/// (1.96) rather than the computed 1.959964..., so reported intervals
/// match the textbook formula.
///
/// # Returns
/// `None` unless `0 < level < 1`.
///
/// # Examples
/// ```
/// use percolation::special::two_sided_z;
/// assert_eq!(two_sided_z(0.95), Some(1.96));
/// assert!((two_sided_z(0.99).unwrap() - 2.5758293).abs() < 1e-6);
/// assert_eq!(two_sided_z(1.0), None);
/// ```
pub fn two_sided_z(level: f64) -> Option<f64> {
    if !(level > 0.0 && level < 1.0) {
        return None;
    }
    if level == 0.95 {
        return Some(crate::stats::Z_95);
    }
    Some(inverse_normal_cdf(0.5 + level / 2.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverse_cdf_known_values() {
        // (p, z) pairs from standard tables
        let table = [
            (0.5, 0.0),
            (0.8413447460685429, 1.0),
            (0.9, 1.2815515655446004),
            (0.95, 1.6448536269514722),
            (0.975, 1.959963984540054),
            (0.995, 2.5758293035489004),
            (0.001, -3.090232306167813),
        ];
        for (p, z) in table {
            let got = inverse_normal_cdf(p);
            assert!((got - z).abs() < 1e-8, "Φ⁻¹({p}) = {got}, expected {z}");
        }
    }

    #[test]
    fn test_inverse_cdf_symmetry() {
        for &p in &[0.001, 0.01, 0.1, 0.3, 0.45] {
            let sum = inverse_normal_cdf(p) + inverse_normal_cdf(1.0 - p);
            assert!(sum.abs() < 1e-8, "Φ⁻¹({p}) + Φ⁻¹({}) = {sum}", 1.0 - p);
        }
    }

    #[test]
    fn test_inverse_cdf_edges() {
        assert_eq!(inverse_normal_cdf(0.0), f64::NEG_INFINITY);
        assert_eq!(inverse_normal_cdf(1.0), f64::INFINITY);
        assert!(inverse_normal_cdf(-0.1).is_nan());
        assert!(inverse_normal_cdf(1.1).is_nan());
        assert!(inverse_normal_cdf(f64::NAN).is_nan());
    }

    #[test]
    fn test_two_sided_z() {
        assert_eq!(two_sided_z(0.95), Some(1.96));
        assert!((two_sided_z(0.90).unwrap() - 1.6448536).abs() < 1e-6);
        for bad in [0.0, 1.0, -0.5, 2.0, f64::NAN] {
            assert_eq!(two_sided_z(bad), None, "level {bad}");
        }
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn inverse_cdf_is_increasing(a in 0.0001_f64..0.5, gap in 1e-6_f64..0.49) {
            prop_assert!(inverse_normal_cdf(a) < inverse_normal_cdf(a + gap));
        }

        #[test]
        fn wider_level_wider_interval(a in 0.01_f64..0.5, gap in 1e-6_f64..0.48) {
            prop_assert!(two_sided_z(a).unwrap() < two_sided_z(a + gap).unwrap());
        }
    }
}
