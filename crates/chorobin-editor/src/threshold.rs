//! Color threshold derived from a manual bin set

use chorobin_core::{threshold_index, BinId, Color, ManualBinSet};
use serde::{Deserialize, Serialize};

/// Default size of the boundary nudge
pub const DEFAULT_NUDGE_MAGNITUDE: f64 = 1e-9;

/// Which edge of a boundary was set by the last edit
///
/// A value painted exactly onto a boundary must render in the bin the user
/// painted it into, so boundaries are nudged away from the authoritative side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryDirection {
    /// A bin's `domain_to` moved; boundaries shift up
    #[default]
    DomainTo,
    /// A bin's `domain_from` moved; boundaries shift down
    DomainFrom,
}

/// Explicit offset applied to every derived boundary
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundaryNudge {
    pub direction: BoundaryDirection,
    pub magnitude: f64,
}

impl Default for BoundaryNudge {
    fn default() -> Self {
        Self::new(BoundaryDirection::DomainTo, DEFAULT_NUDGE_MAGNITUDE)
    }
}

impl BoundaryNudge {
    /// Negative or non-finite magnitudes become zero
    pub fn new(direction: BoundaryDirection, magnitude: f64) -> Self {
        let magnitude = if magnitude.is_finite() { magnitude.max(0.0) } else { 0.0 };
        Self {
            direction,
            magnitude,
        }
    }

    /// No offset at all
    pub fn none() -> Self {
        Self::new(BoundaryDirection::DomainTo, 0.0)
    }

    /// Shift `boundary` away from the authoritative side
    ///
    /// A non-zero magnitude is widened to at least one unit in the last
    /// place of `boundary`, so the shift survives at any scale.
    pub fn apply(&self, boundary: f64) -> f64 {
        if self.magnitude == 0.0 || !boundary.is_finite() {
            return boundary;
        }
        let step = self.magnitude.max(f64::EPSILON * boundary.abs());
        match self.direction {
            BoundaryDirection::DomainTo => boundary + step,
            BoundaryDirection::DomainFrom => boundary - step,
        }
    }
}

/// Threshold mapping of values to bin colors
///
/// `domain` holds every bin's `domain_from` except the first, nudged;
/// `range` holds every bin's color. The same `<` rule as scale assignment
/// applies, so a value on a nudged boundary goes to the upper bin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorThreshold {
    pub domain: Vec<f64>,
    pub range: Vec<Color>,
    pub nudge: BoundaryNudge,
}

impl ColorThreshold {
    pub fn from_bins(bins: &ManualBinSet, nudge: BoundaryNudge) -> Self {
        Self {
            domain: bins.breakpoints().into_iter().map(|b| nudge.apply(b)).collect(),
            range: bins.colors(),
            nudge,
        }
    }

    /// 1-indexed bin of `value`
    pub fn bin_for(&self, value: f64) -> BinId {
        threshold_index(&self.domain, value) + 1
    }

    /// Color of `value`, `None` for an empty threshold
    pub fn color_for(&self, value: f64) -> Option<Color> {
        let index = threshold_index(&self.domain, value).min(self.range.len().checked_sub(1)?);
        self.range.get(index).copied()
    }

    /// Paintable colors, one per bin
    pub fn preset_colors(&self) -> &[Color] {
        &self.range
    }
}
