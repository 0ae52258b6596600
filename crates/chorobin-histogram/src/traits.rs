//! Core trait for bin assignment

use chorobin_core::{BinId, Scale};

/// Anything that maps a value onto a 1-indexed bin id
pub trait BinAssigner {
    /// Bin id of a finite value
    fn assign(&self, value: f64) -> BinId;

    /// Number of bins this assigner can produce
    fn bin_count(&self) -> usize;

    /// Bin id for a possibly invalid value; invalid values get no bin
    fn assign_opt(&self, value: Option<f64>) -> Option<BinId> {
        value.filter(|v| v.is_finite()).map(|v| self.assign(v))
    }
}

impl BinAssigner for Scale {
    fn assign(&self, value: f64) -> BinId {
        self.bin_for(value)
    }

    fn bin_count(&self) -> usize {
        Scale::bin_count(self)
    }
}
