//! Interval families: equal, defined, exponential and geometric

use crate::params::{BreakParams, DEFAULT_INTERVAL_DIVISIONS};
use chorobin_core::{Error, Result};

/// Cap on the number of breaks the defined-interval family may emit
const MAX_DEFINED_BREAKS: usize = 10_000;

/// `bin_count` classes of equal width over `[min, max]`
pub fn equal_interval(sorted: &[f64], bin_count: usize) -> Vec<f64> {
    let (min, max) = (sorted[0], sorted[sorted.len() - 1]);
    let width = (max - min) / bin_count as f64;
    (1..bin_count).map(|i| min + width * i as f64).collect()
}

/// Classes of a fixed width starting at the minimum
pub fn defined_interval(sorted: &[f64], params: &BreakParams) -> Result<Vec<f64>> {
    let (min, max) = (sorted[0], sorted[sorted.len() - 1]);
    let range = max - min;
    if range == 0.0 {
        return Ok(Vec::new());
    }
    let width = params
        .interval_width
        .unwrap_or(range / DEFAULT_INTERVAL_DIVISIONS);
    if !width.is_finite() || width <= 0.0 {
        return Err(Error::InvalidParameter(format!(
            "Interval width {width} must be positive"
        )));
    }
    if range / width > MAX_DEFINED_BREAKS as f64 {
        return Err(Error::InvalidParameter(format!(
            "Interval width {width} yields more than {MAX_DEFINED_BREAKS} classes"
        )));
    }

    let mut breaks = Vec::new();
    let mut i = 1;
    loop {
        let b = min + width * i as f64;
        if b >= max {
            break;
        }
        breaks.push(b);
        i += 1;
    }
    Ok(breaks)
}

/// Class widths growing by `params.exponential_ratio` from the minimum
pub fn exponential_bin_sizes(sorted: &[f64], bin_count: usize, params: &BreakParams) -> Result<Vec<f64>> {
    let ratio = params.exponential_ratio;
    if !ratio.is_finite() || ratio <= 0.0 {
        return Err(Error::InvalidParameter(format!(
            "Exponential ratio {ratio} must be positive"
        )));
    }
    if ratio == 1.0 {
        return Ok(equal_interval(sorted, bin_count));
    }

    let (min, max) = (sorted[0], sorted[sorted.len() - 1]);
    let k = bin_count as i32;
    let first = (max - min) * (ratio - 1.0) / (ratio.powi(k) - 1.0);

    let mut breaks = Vec::with_capacity(bin_count.saturating_sub(1));
    let mut edge = min;
    for i in 0..k - 1 {
        edge += first * ratio.powi(i);
        breaks.push(edge);
    }
    Ok(breaks)
}

/// Breaks in geometric progression between min and max
///
/// Non-positive data is shifted so the smallest value sits at 1.
pub fn geometric_interval(sorted: &[f64], bin_count: usize) -> Vec<f64> {
    let (min, max) = (sorted[0], sorted[sorted.len() - 1]);
    if max == min {
        return Vec::new();
    }
    let shift = if min <= 0.0 { 1.0 - min } else { 0.0 };
    let (lo, hi) = (min + shift, max + shift);
    // log space keeps the ratio finite when `lo` is subnormal
    let (ln_lo, ln_hi) = (lo.ln(), hi.ln());
    let step = (ln_hi - ln_lo) / bin_count as f64;
    (1..bin_count)
        .map(|i| (ln_lo + step * i as f64).exp() - shift)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_equal_interval() {
        let breaks = equal_interval(&[0.0, 3.0, 10.0], 5);
        assert_eq!(breaks, vec![2.0, 4.0, 6.0, 8.0]);
        assert!(equal_interval(&[0.0, 10.0], 1).is_empty());
    }

    #[test]
    fn test_defined_interval_default_width() {
        let breaks = defined_interval(&[0.0, 100.0], &BreakParams::default()).unwrap();
        assert_eq!(breaks.len(), 9);
        assert_relative_eq!(breaks[0], 10.0);
        assert_relative_eq!(breaks[8], 90.0);
    }

    #[test]
    fn test_defined_interval_custom_width() {
        let params = BreakParams::default().with_interval_width(30.0);
        let breaks = defined_interval(&[0.0, 100.0], &params).unwrap();
        assert_eq!(breaks, vec![30.0, 60.0, 90.0]);

        let bad = BreakParams::default().with_interval_width(-1.0);
        assert!(defined_interval(&[0.0, 100.0], &bad).is_err());
        let tiny = BreakParams::default().with_interval_width(1e-9);
        assert!(defined_interval(&[0.0, 100.0], &tiny).is_err());
        assert!(defined_interval(&[5.0, 5.0], &bad).unwrap().is_empty());
    }

    #[test]
    fn test_exponential_bin_sizes_double() {
        // widths 1, 2, 4, 8 over [0, 15]
        let breaks = exponential_bin_sizes(&[0.0, 15.0], 4, &BreakParams::default()).unwrap();
        assert_eq!(breaks.len(), 3);
        assert_relative_eq!(breaks[0], 1.0);
        assert_relative_eq!(breaks[1], 3.0);
        assert_relative_eq!(breaks[2], 7.0);
    }

    #[test]
    fn test_geometric_interval() {
        let breaks = geometric_interval(&[1.0, 1000.0], 3);
        assert_eq!(breaks.len(), 2);
        assert_relative_eq!(breaks[0], 10.0, epsilon = 1e-9);
        assert_relative_eq!(breaks[1], 100.0, epsilon = 1e-9);

        let shifted = geometric_interval(&[-5.0, 10.0], 4);
        assert_eq!(shifted.len(), 3);
        assert!(shifted.windows(2).all(|w| w[0] < w[1]));
        assert!(shifted[0] > -5.0 && shifted[2] < 10.0);
    }
}
