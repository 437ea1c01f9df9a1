//! Small summary-statistic helpers over `f64` slices.

use serde::Serialize;

/// Five-number summary plus mean and count for one group of prices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryStats {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation (N-1 in the denominator); 0.0 for a
    /// singleton group.
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

/// Summarizes a group of prices. Returns `None` for an empty group; callers
/// decide whether emptiness is an error or an absent row.
pub fn summarize(values: &[f64]) -> Option<SummaryStats> {
    if values.is_empty() {
        return None;
    }
    let mean = mean(values);
    let variance = if values.len() < 2 {
        0.0
    } else {
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64
    };
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Some(SummaryStats {
        count: values.len(),
        mean,
        median: median(values),
        std_dev: variance.sqrt(),
        min,
        max,
    })
}

/// Arithmetic mean. Empty input is the caller's bug; guarded by `summarize`.
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Median via sorting; midpoint average for even lengths.
pub fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let n = sorted.len();
    if n == 0 {
        return f64::NAN;
    }
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// Percentile `p` in `[0, 1]` by linear interpolation between order
/// statistics: `rank = p * (n - 1)`, interpolating between the bracketing
/// sorted values. The single percentile definition used crate-wide.
pub fn percentile(values: &[f64], p: f64) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let n = sorted.len();
    if n == 0 {
        return f64::NAN;
    }
    if n == 1 {
        return sorted[0];
    }
    let rank = p.clamp(0.0, 1.0) * (n - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let fraction = rank - lower as f64;
    sorted[lower] + fraction * (sorted[upper] - sorted[lower])
}
