//! Assignment and counting over samples

use crate::traits::BinAssigner;
use crate::types::{BinExtent, BinSizes};
use chorobin_core::{BinId, Sample, Scale, ScaleKind};

/// Bin id of a single finite value
pub fn assign<A: BinAssigner + ?Sized>(assigner: &A, value: f64) -> BinId {
    assigner.assign(value)
}

/// Bin id per sample position; invalid entries keep their slot as `None`
pub fn assign_all<A: BinAssigner + ?Sized>(assigner: &A, sample: &Sample) -> Vec<Option<BinId>> {
    sample
        .entries()
        .iter()
        .map(|e| assigner.assign_opt(e.value))
        .collect()
}

/// Count valid values per observed bin id
pub fn histogram<A: BinAssigner + ?Sized>(assigner: &A, sample: &Sample) -> BinSizes {
    sample
        .entries()
        .iter()
        .filter_map(|e| assigner.assign_opt(e.value))
        .collect()
}

/// Count a plain slice of values; non-finite values are skipped
pub fn histogram_values<A: BinAssigner + ?Sized>(assigner: &A, values: &[f64]) -> BinSizes {
    values
        .iter()
        .filter_map(|v| assigner.assign_opt(Some(*v)))
        .collect()
}

/// Value range per bin for comparison charts
///
/// The outer edges are the data range, widened to cover breaks that fall
/// outside it so every bin has a non-negative width.
pub fn bin_extents(scale: &Scale, data_min: f64, data_max: f64) -> Vec<BinExtent> {
    match &scale.kind {
        ScaleKind::Linear { min, max } => vec![BinExtent {
            bin: 1,
            min: *min,
            max: *max,
        }],
        ScaleKind::Threshold { breaks } => {
            let lo = breaks.first().map_or(data_min, |b| data_min.min(*b));
            let hi = breaks.last().map_or(data_max, |b| data_max.max(*b));
            let n = breaks.len() + 1;
            (0..n)
                .map(|i| BinExtent {
                    bin: i + 1,
                    min: if i == 0 { lo } else { breaks[i - 1] },
                    max: if i == n - 1 { hi } else { breaks[i] },
                })
                .collect()
        }
    }
}
