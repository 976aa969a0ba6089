//! Robust location/scale estimators

/// Scales the MAD into a consistent estimator of the standard deviation
/// for normally distributed data.
pub const ROBUST_SIGMA_SCALE: f64 = 1.4826;

/// Sorted-midpoint median; mean of the two middle values for even counts.
/// Returns 0.0 for an empty slice.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Median of absolute deviations from `center`. Returns 0.0 for an empty slice.
pub fn median_absolute_deviation(values: &[f64], center: f64) -> f64 {
    let deviations: Vec<f64> = values.iter().map(|v| (v - center).abs()).collect();
    median(&deviations)
}

/// `ROBUST_SIGMA_SCALE * MAD`
pub fn robust_sigma(values: &[f64], center: f64) -> f64 {
    ROBUST_SIGMA_SCALE * median_absolute_deviation(values, center)
}

/// Round half away from zero to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
