//! Statistical math utilities for performance metric calculations.

/// Calculate mean of a slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sum: f64 = values.iter().sum();
    Some(sum / values.len() as f64)
}

/// Calculate population standard deviation (variance divides by n).
pub fn population_std_dev(values: &[f64]) -> Option<f64> {
    let avg = mean(values)?;
    let variance_sum: f64 = values.iter().map(|v| (v - avg) * (v - avg)).sum();
    let variance = variance_sum / values.len() as f64;
    Some(variance.sqrt())
}

/// Calculate downside deviation over the negative values only.
///
/// The variance denominator uses the full count, not the negative count.
/// Returns `None` when the slice is empty or contains no negative values.
pub fn downside_deviation(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let negative: Vec<f64> = values.iter().filter(|v| **v < 0.0).copied().collect();
    if negative.is_empty() {
        return None;
    }

    let variance_sum: f64 = negative.iter().map(|v| v * v).sum();
    let variance = variance_sum / values.len() as f64; // Use total count
    Some(variance.sqrt())
}

/// Ordinary-least-squares slope of `y` regressed against its index.
pub fn ols_slope(y: &[f64]) -> Option<f64> {
    let n = y.len();
    if n < 2 {
        return None;
    }

    let nf = n as f64;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_x2 = 0.0;

    for (i, value) in y.iter().enumerate() {
        let x = i as f64;
        sum_x += x;
        sum_y += value;
        sum_xy += x * value;
        sum_x2 += x * x;
    }

    Some((nf * sum_xy - sum_x * sum_y) / (nf * sum_x2 - sum_x * sum_x))
}
