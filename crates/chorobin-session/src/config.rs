//! Session configuration

use chorobin_classify::BreakParams;
use chorobin_consistency::default_selection;
use chorobin_core::{Classifier, Color, MethodId, Result, SchemeRef};
use chorobin_editor::DEFAULT_NUDGE_MAGNITUDE;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BIN_COUNT: usize = 5;
pub const MIN_BIN_COUNT: usize = 1;
pub const MAX_BIN_COUNT: usize = 20;
pub const DEFAULT_SCHEME: &str = "viridis";
pub const MAX_NUDGE_MAGNITUDE: f64 = 1e-3;

/// Settings shared by every view of one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Requested classes per method
    pub bin_count: usize,
    pub color_scheme: SchemeRef,
    /// Fill for entities without a valid value
    pub invalid_color: Color,
    /// Whether entities without a valid value are drawn at all
    pub show_invalid_values: bool,
    /// Methods compared by the resiliency view
    pub resiliency_selection: Vec<MethodId>,
    /// Method the manual editor starts from
    pub default_manual_method: MethodId,
    /// Offset of the editor's derived boundaries
    pub nudge_magnitude: f64,
    /// Seed for manual-interval placeholder breaks; `None` draws from entropy
    pub seed: Option<u64>,
    pub break_params: BreakParams,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            bin_count: DEFAULT_BIN_COUNT,
            color_scheme: SchemeRef::new(DEFAULT_SCHEME),
            invalid_color: Color::INVALID,
            show_invalid_values: true,
            resiliency_selection: default_selection(),
            default_manual_method: MethodId::from(Classifier::FisherJenks),
            nudge_magnitude: DEFAULT_NUDGE_MAGNITUDE,
            seed: None,
            break_params: BreakParams::default(),
        }
    }
}

impl SessionConfig {
    pub fn builder() -> SessionConfigBuilder {
        SessionConfigBuilder::new()
    }

    /// Parse from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SessionConfig = serde_json::from_str(json)?;
        Ok(config.clamped())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Pull out-of-range values back into range
    pub fn clamped(mut self) -> Self {
        self.bin_count = clamp_bin_count(self.bin_count);
        self.nudge_magnitude = clamp_nudge(self.nudge_magnitude);
        self
    }
}

pub fn clamp_bin_count(bin_count: usize) -> usize {
    bin_count.clamp(MIN_BIN_COUNT, MAX_BIN_COUNT)
}

fn clamp_nudge(magnitude: f64) -> f64 {
    if magnitude.is_finite() {
        magnitude.clamp(0.0, MAX_NUDGE_MAGNITUDE)
    } else {
        DEFAULT_NUDGE_MAGNITUDE
    }
}

/// Builder for [`SessionConfig`]
///
/// Numeric settings are clamped into their valid range rather than rejected.
#[derive(Debug, Clone, Default)]
pub struct SessionConfigBuilder {
    config: SessionConfig,
}

impl SessionConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the bin count (1-20)
    pub fn bin_count(mut self, bin_count: usize) -> Self {
        self.config.bin_count = clamp_bin_count(bin_count);
        self
    }

    pub fn color_scheme(mut self, code: impl Into<String>) -> Self {
        self.config.color_scheme = SchemeRef::new(code);
        self
    }

    pub fn invalid_color(mut self, color: Color) -> Self {
        self.config.invalid_color = color;
        self
    }

    pub fn show_invalid_values(mut self, show: bool) -> Self {
        self.config.show_invalid_values = show;
        self
    }

    pub fn resiliency_selection(mut self, methods: impl IntoIterator<Item = MethodId>) -> Self {
        self.config.resiliency_selection = methods.into_iter().collect();
        self
    }

    pub fn default_manual_method(mut self, method: impl Into<MethodId>) -> Self {
        self.config.default_manual_method = method.into();
        self
    }

    /// Sets the boundary nudge (0 to 1e-3)
    pub fn nudge_magnitude(mut self, magnitude: f64) -> Self {
        self.config.nudge_magnitude = clamp_nudge(magnitude);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn break_params(mut self, params: BreakParams) -> Self {
        self.config.break_params = params;
        self
    }

    pub fn build(self) -> SessionConfig {
        self.config
    }
}
