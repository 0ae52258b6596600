//! Core trait for classification libraries

use crate::params::BreakParams;
use chorobin_core::{Classifier, Result};

/// Computes class breaks for a classification family
///
/// Implementations receive only valid values. The returned breaks must be
/// sorted ascending; de-duplication and rounding are left to the caller.
/// Deterministic families must return the same breaks for the same input.
pub trait ClassificationLibrary {
    /// Compute the breaks of `classifier` over `values` for `bin_count` classes
    fn compute_breaks(
        &self,
        classifier: Classifier,
        values: &[f64],
        bin_count: usize,
        params: &BreakParams,
    ) -> Result<Vec<f64>>;

    /// Library name for diagnostics
    fn name(&self) -> &'static str {
        "custom"
    }

    /// Whether the library offers `classifier` at all
    fn supports(&self, _classifier: Classifier) -> bool {
        true
    }
}

impl<L: ClassificationLibrary + ?Sized> ClassificationLibrary for &L {
    fn compute_breaks(
        &self,
        classifier: Classifier,
        values: &[f64],
        bin_count: usize,
        params: &BreakParams,
    ) -> Result<Vec<f64>> {
        (**self).compute_breaks(classifier, values, bin_count, params)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn supports(&self, classifier: Classifier) -> bool {
        (**self).supports(classifier)
    }
}

impl<L: ClassificationLibrary + ?Sized> ClassificationLibrary for Box<L> {
    fn compute_breaks(
        &self,
        classifier: Classifier,
        values: &[f64],
        bin_count: usize,
        params: &BreakParams,
    ) -> Result<Vec<f64>> {
        (**self).compute_breaks(classifier, values, bin_count, params)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn supports(&self, classifier: Classifier) -> bool {
        (**self).supports(classifier)
    }
}
