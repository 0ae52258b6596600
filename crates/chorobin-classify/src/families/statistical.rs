//! Statistical families: percentile, quantile, standard deviation, box plot

use crate::sorted::quantile_sorted;
use statrs::statistics::Statistics;

/// Quantile of each requested percentile
pub fn percentile(sorted: &[f64], percentiles: &[f64]) -> Vec<f64> {
    percentiles
        .iter()
        .filter(|p| p.is_finite())
        .map(|p| quantile_sorted(sorted, p / 100.0))
        .collect()
}

/// Equal-count classes: quantiles at `i / bin_count`
pub fn quantile(sorted: &[f64], bin_count: usize) -> Vec<f64> {
    (1..bin_count)
        .map(|i| quantile_sorted(sorted, i as f64 / bin_count as f64))
        .collect()
}

/// `bin_count - 1` breaks one standard deviation apart, centred on the mean
///
/// With an odd class count the middle class straddles the mean; with an even
/// count the mean is itself a break. Constant data gives a single class.
pub fn standard_deviation(sorted: &[f64], bin_count: usize) -> Vec<f64> {
    if sorted.len() < 2 {
        return Vec::new();
    }
    let mean = sorted.iter().mean();
    let sd = sorted.iter().std_dev();
    if !sd.is_finite() || sd == 0.0 {
        return Vec::new();
    }
    let centre = (bin_count as f64 - 2.0) / 2.0;
    (0..bin_count.saturating_sub(1))
        .map(|i| mean + (i as f64 - centre) * sd)
        .collect()
}

/// Lower fence, hinges, median and upper fence (six classes)
pub fn box_plot(sorted: &[f64]) -> Vec<f64> {
    let q1 = quantile_sorted(sorted, 0.25);
    let median = quantile_sorted(sorted, 0.5);
    let q3 = quantile_sorted(sorted, 0.75);
    let iqr = q3 - q1;
    vec![q1 - 1.5 * iqr, q1, median, q3, q3 + 1.5 * iqr]
}
