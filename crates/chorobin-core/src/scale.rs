//! Scales: the concrete partition a method resolves to
//!
//! A threshold scale is an ordered list of breaks; a linear scale is the
//! unclassed `[min, max]` ramp. Both carry the scheme they should be drawn
//! with.

use crate::color::SchemeRef;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of decimals breaks are rounded to for display-stable scales
pub const BREAK_DECIMALS: i32 = 2;

/// Shape of a scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ScaleKind {
    /// Strictly increasing breaks; `breaks.len() + 1` bins
    Threshold { breaks: Vec<f64> },
    /// Continuous ramp over `[min, max]`
    Linear { min: f64, max: f64 },
}

/// A resolved scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    #[serde(flatten)]
    pub kind: ScaleKind,
    pub scheme: SchemeRef,
}

impl Scale {
    /// Threshold scale; breaks are sorted, de-duplicated and non-finite
    /// entries dropped so the strictly-increasing invariant always holds
    pub fn threshold(breaks: Vec<f64>, scheme: SchemeRef) -> Self {
        Self {
            kind: ScaleKind::Threshold {
                breaks: normalize_breaks(breaks),
            },
            scheme,
        }
    }

    /// Linear (unclassed) scale
    pub fn linear(min: f64, max: f64, scheme: SchemeRef) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            kind: ScaleKind::Linear { min, max },
            scheme,
        }
    }

    /// Neutral display fallback: no breaks, gray
    pub fn fallback() -> Self {
        Self {
            kind: ScaleKind::Threshold { breaks: Vec::new() },
            scheme: SchemeRef::gray(),
        }
    }

    /// Whether this is the neutral fallback scale
    pub fn is_fallback(&self) -> bool {
        self.scheme == SchemeRef::gray() && self.breaks().is_empty() && !self.is_linear()
    }

    pub fn is_linear(&self) -> bool {
        matches!(self.kind, ScaleKind::Linear { .. })
    }

    /// Breaks of a threshold scale; empty for linear scales
    pub fn breaks(&self) -> &[f64] {
        match &self.kind {
            ScaleKind::Threshold { breaks } => breaks,
            ScaleKind::Linear { .. } => &[],
        }
    }

    /// Number of bins the scale produces
    pub fn bin_count(&self) -> usize {
        match &self.kind {
            ScaleKind::Threshold { breaks } => breaks.len() + 1,
            ScaleKind::Linear { .. } => 1,
        }
    }

    /// Domain as handed to the renderer: breaks, or `[min, max]`
    pub fn domain(&self) -> Vec<f64> {
        match &self.kind {
            ScaleKind::Threshold { breaks } => breaks.clone(),
            ScaleKind::Linear { min, max } => vec![*min, *max],
        }
    }

    /// Bin id of a finite value: 1 plus the number of breaks not above it
    ///
    /// Linear scales put every value in bin 1.
    pub fn bin_for(&self, value: f64) -> crate::BinId {
        match &self.kind {
            ScaleKind::Threshold { breaks } => threshold_index(breaks, value) + 1,
            ScaleKind::Linear { .. } => 1,
        }
    }

    /// Same partition drawn with another scheme
    pub fn with_scheme(mut self, scheme: SchemeRef) -> Self {
        self.scheme = scheme;
        self
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ScaleKind::Threshold { breaks } => {
                write!(f, "Threshold({} bins, breaks={:?}, scheme={})", breaks.len() + 1, breaks, self.scheme)
            }
            ScaleKind::Linear { min, max } => {
                write!(f, "Linear([{min:.3}, {max:.3}], scheme={})", self.scheme)
            }
        }
    }
}

/// Sort, drop non-finite and collapse equal breaks
pub fn normalize_breaks(mut breaks: Vec<f64>) -> Vec<f64> {
    breaks.retain(|b| b.is_finite());
    breaks.sort_by_key(|b| OrderedFloat(*b));
    breaks.dedup();
    breaks
}

/// Number of sorted breaks `b` with `b <= value`
///
/// A value exactly on a break belongs to the upper side. This is the single
/// comparison used for statistics, map fill and the editor's color threshold.
pub fn threshold_index(breaks: &[f64], value: f64) -> usize {
    breaks.partition_point(|b| *b <= value)
}

/// Round a break to `decimals` places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
