//! Auxiliary parameters for break computation

use serde::{Deserialize, Serialize};

/// Percentiles used by the percentile family
pub const DEFAULT_PERCENTILES: [f64; 5] = [1.0, 10.0, 50.0, 90.0, 99.0];

/// Share of values in the head at which head/tail splitting stops
pub const DEFAULT_HEAD_RATIO: f64 = 0.4;

/// Growth factor between consecutive exponential bin widths
pub const DEFAULT_EXPONENTIAL_RATIO: f64 = 2.0;

/// Number of classes the default defined-interval width divides the range into
pub const DEFAULT_INTERVAL_DIVISIONS: f64 = 10.0;

/// Family-specific knobs; families ignore what they do not use
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreakParams {
    /// Breaks supplied to the manual-interval family
    pub manual_breaks: Option<Vec<f64>>,
    /// Class width for the defined-interval family; `None` uses range / 10
    pub interval_width: Option<f64>,
    /// Percentiles (0..=100) for the percentile family
    pub percentiles: Vec<f64>,
    /// Head share threshold for head/tail breaks
    pub head_ratio: f64,
    /// Width growth factor for exponential bin sizes
    pub exponential_ratio: f64,
}

impl Default for BreakParams {
    fn default() -> Self {
        Self {
            manual_breaks: None,
            interval_width: None,
            percentiles: DEFAULT_PERCENTILES.to_vec(),
            head_ratio: DEFAULT_HEAD_RATIO,
            exponential_ratio: DEFAULT_EXPONENTIAL_RATIO,
        }
    }
}

impl BreakParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_manual_breaks(mut self, breaks: Vec<f64>) -> Self {
        self.manual_breaks = Some(breaks);
        self
    }

    pub fn with_interval_width(mut self, width: f64) -> Self {
        self.interval_width = Some(width);
        self
    }

    pub fn with_percentiles(mut self, percentiles: Vec<f64>) -> Self {
        self.percentiles = percentiles;
        self
    }

    pub fn with_head_ratio(mut self, ratio: f64) -> Self {
        self.head_ratio = ratio;
        self
    }

    pub fn with_exponential_ratio(mut self, ratio: f64) -> Self {
        self.exponential_ratio = ratio;
        self
    }
}
