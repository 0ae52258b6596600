//! Core types for bin-size representation

use chorobin_core::BinId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Count of valid values per observed bin id
///
/// Only bins that actually received a value are present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BinSizes {
    counts: BTreeMap<BinId, usize>,
}

impl BinSizes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more value in `bin`
    pub fn increment(&mut self, bin: BinId) {
        *self.counts.entry(bin).or_insert(0) += 1;
    }

    /// Count for `bin`, `None` if no value landed there
    pub fn get(&self, bin: BinId) -> Option<usize> {
        self.counts.get(&bin).copied()
    }

    /// Count for `bin`, zero if absent
    pub fn count(&self, bin: BinId) -> usize {
        self.get(bin).unwrap_or(0)
    }

    /// Sum of all counts
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Number of observed bins
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// `(bin, count)` in ascending bin id
    pub fn iter(&self) -> impl Iterator<Item = (BinId, usize)> + '_ {
        self.counts.iter().map(|(b, c)| (*b, *c))
    }

    /// Largest count, used to scale comparison bar charts
    pub fn max_count(&self) -> usize {
        self.counts.values().copied().max().unwrap_or(0)
    }

    /// Counts for bins `1..=bin_count`, zero-filled
    pub fn dense(&self, bin_count: usize) -> Vec<usize> {
        (1..=bin_count).map(|b| self.count(b)).collect()
    }
}

impl FromIterator<BinId> for BinSizes {
    fn from_iter<I: IntoIterator<Item = BinId>>(iter: I) -> Self {
        let mut sizes = BinSizes::new();
        for bin in iter {
            sizes.increment(bin);
        }
        sizes
    }
}

impl fmt::Display for BinSizes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (bin, count)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{bin}: {count}")?;
        }
        write!(f, "}}")
    }
}

/// Value range covered by one bin in a comparison chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BinExtent {
    pub bin: BinId,
    /// Left edge (inclusive)
    pub min: f64,
    /// Right edge (exclusive, except for the last bin)
    pub max: f64,
}

impl BinExtent {
    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    pub fn center(&self) -> f64 {
        (self.min + self.max) / 2.0
    }
}

impl fmt::Display for BinExtent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bin {} [{:.3}, {:.3})", self.bin, self.min, self.max)
    }
}
