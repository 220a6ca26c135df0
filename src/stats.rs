//! Summary statistics over repeated-trial fitness samples.

/// Arithmetic mean. Returns `0.0` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population (biased) standard deviation around a given mean.
///
/// Divides by `N`, not `N - 1`:
///
/// ```
/// use u_bitga::stats::population_std_dev;
///
/// let sd = population_std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0], 5.0);
/// assert!((sd - 2.0).abs() < 1e-12);
/// ```
///
/// Returns `0.0` for an empty slice.
pub fn population_std_dev(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    (sum_sq / values.len() as f64).sqrt()
}
