//! Iterative and optimal families: maximum breaks, head/tail, CK-means, Fisher-Jenks
//!
//! The optimal families return the first value of every class but the first,
//! so a value equal to a break lands in the class it was clustered into.

use crate::sorted::{distinct_count, PrefixSums};
use ordered_float::OrderedFloat;
use statrs::statistics::Statistics;
use std::cmp::Reverse;

/// Breaks at the midpoints of the `bin_count - 1` widest gaps
pub fn maximum_breaks(sorted: &[f64], bin_count: usize) -> Vec<f64> {
    let mut gaps: Vec<(usize, f64)> = sorted
        .windows(2)
        .enumerate()
        .filter(|(_, w)| w[1] > w[0])
        .map(|(i, w)| (i, w[1] - w[0]))
        .collect();
    // Widest first; equal gaps keep value order
    gaps.sort_by_key(|(i, gap)| (Reverse(OrderedFloat(*gap)), *i));

    let mut breaks: Vec<f64> = gaps
        .iter()
        .take(bin_count.saturating_sub(1))
        .map(|(i, _)| (sorted[*i] + sorted[*i + 1]) / 2.0)
        .collect();
    breaks.sort_by_key(|b| OrderedFloat(*b));
    breaks
}

/// Repeatedly split the head (values above the mean) while it stays a minority
pub fn head_tail_breaks(sorted: &[f64], head_ratio: f64) -> Vec<f64> {
    let mut breaks = Vec::new();
    let mut head: &[f64] = sorted;
    while head.len() >= 2 {
        let mean = head.iter().mean();
        // sorted, so the head is a suffix
        let split = head.partition_point(|v| *v <= mean);
        let next = &head[split..];
        if next.is_empty() {
            break;
        }
        breaks.push(mean);
        if next.len() as f64 / head.len() as f64 >= head_ratio {
            break;
        }
        head = next;
    }
    breaks
}

/// Optimal 1-D k-means by dynamic programming
///
/// Row `c` of the table is filled by divide and conquer over the monotone
/// split positions, giving `O(k n log n)` overall.
pub fn ck_means(sorted: &[f64], bin_count: usize) -> Vec<f64> {
    let n = sorted.len();
    let k = bin_count.min(distinct_count(sorted));
    if k <= 1 {
        return Vec::new();
    }

    let sums = PrefixSums::new(sorted);
    let mut cost = vec![vec![0.0; n]; k];
    let mut split = vec![vec![0usize; n]; k];
    for i in 0..n {
        cost[0][i] = sums.ssd(0, i);
    }

    for c in 1..k {
        let (done, rest) = cost.split_at_mut(c);
        let prev = &done[c - 1];
        let row = &mut rest[0];
        fill_row(c, c, n - 1, c, n - 1, prev, row, &mut split[c], &sums);
    }

    let mut starts = vec![0usize; k];
    let mut end = n - 1;
    for c in (0..k).rev() {
        let start = split[c][end];
        starts[c] = start;
        if start == 0 {
            break;
        }
        end = start - 1;
    }
    starts[1..].iter().map(|&s| sorted[s]).collect()
}

#[allow(clippy::too_many_arguments)]
fn fill_row(
    c: usize,
    i_min: usize,
    i_max: usize,
    j_lo: usize,
    j_hi: usize,
    prev: &[f64],
    row: &mut [f64],
    split: &mut [usize],
    sums: &PrefixSums,
) {
    if i_min > i_max {
        return;
    }
    let i = (i_min + i_max) / 2;
    let mut best = f64::INFINITY;
    let mut best_j = j_lo.max(c);
    for j in j_lo.max(c)..=j_hi.min(i) {
        let candidate = prev[j - 1] + sums.ssd(j, i);
        if candidate < best {
            best = candidate;
            best_j = j;
        }
    }
    row[i] = best;
    split[i] = best_j;

    if i > i_min {
        fill_row(c, i_min, i - 1, j_lo, best_j, prev, row, split, sums);
    }
    fill_row(c, i + 1, i_max, best_j, j_hi, prev, row, split, sums);
}

/// Jenks natural breaks via the classic variance matrices
pub fn fisher_jenks(sorted: &[f64], bin_count: usize) -> Vec<f64> {
    let n = sorted.len();
    let k = bin_count.min(distinct_count(sorted));
    if k <= 1 {
        return Vec::new();
    }

    // 1-based tables as in the original formulation
    let mut lower = vec![vec![0usize; k + 1]; n + 1];
    let mut variance = vec![vec![0.0f64; k + 1]; n + 1];
    for j in 1..=k {
        lower[1][j] = 1;
        for row in variance.iter_mut().skip(2) {
            row[j] = f64::INFINITY;
        }
    }

    for l in 2..=n {
        let (mut sum, mut sum_sq, mut w) = (0.0, 0.0, 0.0);
        let mut var = 0.0;
        for m in 1..=l {
            let lcl = l - m + 1;
            let v = sorted[lcl - 1];
            w += 1.0;
            sum += v;
            sum_sq += v * v;
            var = sum_sq - sum * sum / w;
            let i4 = lcl - 1;
            if i4 != 0 {
                for j in 2..=k {
                    let candidate = var + variance[i4][j - 1];
                    if variance[l][j] >= candidate {
                        lower[l][j] = lcl;
                        variance[l][j] = candidate;
                    }
                }
            }
        }
        lower[l][1] = 1;
        variance[l][1] = var;
    }

    let mut breaks = Vec::with_capacity(k - 1);
    let mut end = n;
    for class in (2..=k).rev() {
        let start = lower[end][class];
        // a class starting at the first value carries no break
        if start <= 1 {
            break;
        }
        breaks.push(sorted[start - 1]);
        end = start - 1;
    }
    breaks.reverse();
    breaks
}
