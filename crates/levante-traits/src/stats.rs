//! Statistical utility functions.
//!
//! This module provides the small statistical operations shared across the
//! engine: sample mean and sample standard deviation, used by summary
//! statistics and by the regression t-statistics.

/// Minimum threshold for a standard deviation to count as non-zero.
/// Values below this threshold are treated as zero variance.
pub const MIN_STD_THRESHOLD: f64 = 1e-10;

/// Arithmetic mean of a slice.
///
/// # Edge Cases
///
/// - Empty input: returns NaN
///
/// # Examples
///
/// ```
/// use levante_traits::stats::mean;
///
/// assert!((mean(&[1.0, 2.0, 3.0]) - 2.0).abs() < 1e-12);
/// assert!(mean(&[]).is_nan());
/// ```
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation with N-1 denominator (Bessel's correction).
///
/// # Edge Cases
///
/// - Fewer than two values: returns 0.0
///
/// # Examples
///
/// ```
/// use levante_traits::stats::sample_std;
///
/// let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
/// assert!((sample_std(&values) - 2.138089935299395).abs() < 1e-12);
/// assert_eq!(sample_std(&[42.0]), 0.0);
/// ```
pub fn sample_std(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|x| (x - m).powi(2)).sum::<f64>() / (n - 1) as f64;
    variance.sqrt()
}
