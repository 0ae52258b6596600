//! Built-in classification library

use crate::families;
use crate::params::BreakParams;
use crate::sorted::sorted_copy;
use crate::traits::ClassificationLibrary;
use chorobin_core::{Classifier, Error, Result};
use ordered_float::OrderedFloat;
use tracing::{debug, instrument};

/// Deterministic implementation of every built-in family
///
/// Only manual interval depends on caller input beyond the data: it passes
/// through `params.manual_breaks`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BreakLibrary;

impl BreakLibrary {
    pub fn new() -> Self {
        Self
    }

    fn validate(values: &[f64], bin_count: usize) -> Result<()> {
        if bin_count == 0 {
            return Err(Error::invalid_bin_count(bin_count));
        }
        if values.is_empty() {
            return Err(Error::EmptySample);
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(Error::non_finite("values"));
        }
        Ok(())
    }
}

impl ClassificationLibrary for BreakLibrary {
    #[instrument(skip(self, values, params), fields(n = values.len(), method = classifier.id()))]
    fn compute_breaks(
        &self,
        classifier: Classifier,
        values: &[f64],
        bin_count: usize,
        params: &BreakParams,
    ) -> Result<Vec<f64>> {
        Self::validate(values, bin_count)?;
        let sorted = sorted_copy(values);

        let mut breaks = match classifier {
            Classifier::EqualInterval => families::equal_interval(&sorted, bin_count),
            Classifier::Percentile => families::percentile(&sorted, &params.percentiles),
            Classifier::Quantile => families::quantile(&sorted, bin_count),
            Classifier::StandardDeviation => families::standard_deviation(&sorted, bin_count),
            Classifier::ManualInterval => {
                families::manual_interval(params.manual_breaks.as_deref())?
            }
            Classifier::PrettyBreaks => families::pretty_breaks(&sorted, bin_count)?,
            Classifier::MaximumBreaks => families::maximum_breaks(&sorted, bin_count),
            Classifier::HeadTailBreaks => families::head_tail_breaks(&sorted, params.head_ratio),
            Classifier::CkMeans => families::ck_means(&sorted, bin_count),
            Classifier::BoxPlot => families::box_plot(&sorted),
            Classifier::DefinedInterval => families::defined_interval(&sorted, params)?,
            Classifier::ExponentialBinSizes => {
                families::exponential_bin_sizes(&sorted, bin_count, params)?
            }
            Classifier::GeometricInterval => families::geometric_interval(&sorted, bin_count),
            Classifier::FisherJenks => families::fisher_jenks(&sorted, bin_count),
        };

        if breaks.iter().any(|b| !b.is_finite()) {
            return Err(Error::Classification(format!(
                "{} produced non-finite breaks",
                classifier.name()
            )));
        }
        breaks.sort_by_key(|b| OrderedFloat(*b));

        debug!(breaks = breaks.len(), "computed breaks");
        Ok(breaks)
    }

    fn name(&self) -> &'static str {
        "builtin"
    }
}
