//! Helpers over sorted value slices

use ordered_float::OrderedFloat;

/// Sorted copy of `values`
pub fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by_key(|v| OrderedFloat(*v));
    sorted
}

/// Linearly interpolated quantile of sorted data, `p` in `[0, 1]`
///
/// Uses the `(n - 1) p` position, so `p = 0` and `p = 1` are the extremes.
pub fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    let p = p.clamp(0.0, 1.0);
    let h = (sorted.len() - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(sorted.len() - 1);
    sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo])
}

/// Number of distinct values in sorted data
pub fn distinct_count(sorted: &[f64]) -> usize {
    if sorted.is_empty() {
        return 0;
    }
    1 + sorted.windows(2).filter(|w| w[0] != w[1]).count()
}

/// Prefix sums of values and squared values, length `n + 1`
pub struct PrefixSums {
    sum: Vec<f64>,
    sum_sq: Vec<f64>,
}

impl PrefixSums {
    pub fn new(sorted: &[f64]) -> Self {
        let mut sum = Vec::with_capacity(sorted.len() + 1);
        let mut sum_sq = Vec::with_capacity(sorted.len() + 1);
        sum.push(0.0);
        sum_sq.push(0.0);
        for v in sorted {
            sum.push(sum[sum.len() - 1] + v);
            sum_sq.push(sum_sq[sum_sq.len() - 1] + v * v);
        }
        Self { sum, sum_sq }
    }

    /// Sum of squared deviations from the mean over `sorted[j..=i]`
    pub fn ssd(&self, j: usize, i: usize) -> f64 {
        let n = (i + 1 - j) as f64;
        let s = self.sum[i + 1] - self.sum[j];
        let sq = self.sum_sq[i + 1] - self.sum_sq[j];
        (sq - s * s / n).max(0.0)
    }
}
