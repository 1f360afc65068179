//! Numerical building blocks: empirical quantiles, correlation algebra, and random streams.

pub mod correlation;
pub mod rng;

pub use correlation::*;
pub use rng::*;

/// Empirical percentile with linear interpolation between order statistics.
///
/// `pct` is in `[0, 100]`. The rank is `pct / 100 * (n - 1)`; the result interpolates between
/// the two order statistics bracketing that rank. Returns `None` for an empty sample.
///
/// # Examples
/// ```rust
/// use portfolio_projection::math::percentile;
///
/// let xs = [5.0, 1.0, 4.0, 2.0, 3.0];
/// assert_eq!(percentile(&xs, 50.0), Some(3.0));
/// assert!((percentile(&xs, 10.0).unwrap() - 1.4).abs() < 1.0e-12);
/// ```
pub fn percentile(sample: &[f64], pct: f64) -> Option<f64> {
    if sample.is_empty() {
        return None;
    }
    let mut sorted = sample.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    Some(percentile_sorted(&sorted, pct))
}

/// [`percentile`] over a slice already sorted ascending.
///
/// Panics on an empty slice.
pub fn percentile_sorted(sorted: &[f64], pct: f64) -> f64 {
    assert!(!sorted.is_empty(), "percentile of an empty sample");
    if sorted.len() == 1 {
        return sorted[0];
    }

    let p = (pct / 100.0).clamp(0.0, 1.0);
    let rank = p * (sorted.len() as f64 - 1.0);
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let w = rank - lo as f64;
        sorted[lo] + w * (sorted[hi] - sorted[lo])
    }
}

/// Arithmetic mean; `0.0` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn percentile_matches_linear_rule_reference_values() {
        let xs = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_relative_eq!(percentile(&xs, 10.0).unwrap(), 1.4, epsilon = 1.0e-12);
        assert_relative_eq!(percentile(&xs, 90.0).unwrap(), 4.6, epsilon = 1.0e-12);
        assert_relative_eq!(percentile(&xs, 0.0).unwrap(), 1.0);
        assert_relative_eq!(percentile(&xs, 100.0).unwrap(), 5.0);

        let even = [4.0, 1.0, 3.0, 2.0];
        assert_relative_eq!(percentile(&even, 50.0).unwrap(), 2.5, epsilon = 1.0e-12);
    }

    #[test]
    fn percentile_of_singleton_and_empty() {
        assert_eq!(percentile(&[7.5], 90.0), Some(7.5));
        assert_eq!(percentile(&[], 50.0), None);
    }

    #[test]
    fn percentile_handles_negative_values() {
        let xs = [-10.0, 0.0, 10.0];
        assert_relative_eq!(percentile(&xs, 25.0).unwrap(), -5.0, epsilon = 1.0e-12);
    }

    #[test]
    fn mean_of_values() {
        assert_relative_eq!(mean(&[1.0, 2.0, 3.0, 6.0]), 3.0);
        assert_eq!(mean(&[]), 0.0);
    }
}
