//! Scale resolution
//!
//! Turns a method descriptor into a concrete [`Scale`] for the current sample,
//! bin count and color scheme. Failures never escape [`ScaleResolver::resolve`]:
//! they yield the neutral gray fallback so the map stays drawable.

use crate::descriptor::{MethodDescriptor, MethodStrategy};
use crate::registry::MethodRegistry;
use chorobin_classify::{BreakLibrary, BreakParams, ClassificationLibrary};
use chorobin_core::{
    normalize_breaks, round_to, Classifier, Error, MethodId, Result, Sample, Scale, SchemeRef,
    BREAK_DECIMALS,
};
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, instrument, warn};

/// Attempts at drawing a placeholder break not already drawn
const MAX_PLACEHOLDER_DRAWS: usize = 64;

/// Resolves method descriptors into scales
///
/// The RNG only feeds the manual-interval placeholder breaks; seed it for
/// reproducible runs.
pub struct ScaleResolver<L = BreakLibrary, R = ChaCha8Rng> {
    library: L,
    rng: R,
    params: BreakParams,
}

impl Default for ScaleResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ScaleResolver {
    /// Built-in library with an entropy-seeded RNG
    pub fn new() -> Self {
        Self::with_library(BreakLibrary::new())
    }

    /// Built-in library with a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self::with_library_seeded(BreakLibrary::new(), seed)
    }
}

impl<L: ClassificationLibrary> ScaleResolver<L, ChaCha8Rng> {
    pub fn with_library(library: L) -> Self {
        Self::with_library_and_rng(library, ChaCha8Rng::from_entropy())
    }

    pub fn with_library_seeded(library: L, seed: u64) -> Self {
        Self::with_library_and_rng(library, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<L: ClassificationLibrary, R: RngCore> ScaleResolver<L, R> {
    pub fn with_library_and_rng(library: L, rng: R) -> Self {
        Self {
            library,
            rng,
            params: BreakParams::default(),
        }
    }

    pub fn with_params(mut self, params: BreakParams) -> Self {
        self.params = params;
        self
    }

    pub fn params(&self) -> &BreakParams {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut BreakParams {
        &mut self.params
    }

    pub fn library(&self) -> &L {
        &self.library
    }

    /// Scale for a registered method id; unknown ids fall back
    pub fn resolve_id(
        &mut self,
        registry: &MethodRegistry,
        id: &MethodId,
        sample: &Sample,
        bin_count: usize,
        scheme: &SchemeRef,
    ) -> Scale {
        match registry.get(id) {
            Some(descriptor) => self.resolve(descriptor, sample, bin_count, scheme),
            None => {
                debug!(%id, "unknown method, using fallback scale");
                Scale::fallback()
            }
        }
    }

    /// Scale for `method`; any failure yields [`Scale::fallback`]
    pub fn resolve(
        &mut self,
        method: &MethodDescriptor,
        sample: &Sample,
        bin_count: usize,
        scheme: &SchemeRef,
    ) -> Scale {
        match self.resolve_checked(method, sample, bin_count, scheme) {
            Ok(scale) => scale,
            Err(Error::EmptySample) => {
                debug!(id = %method.id, "no valid values, using fallback scale");
                Scale::fallback()
            }
            Err(e) => {
                warn!(id = %method.id, error = %e, "classification failed, using fallback scale");
                Scale::fallback()
            }
        }
    }

    /// Scale for `method`, reporting why it could not be built
    #[instrument(skip(self, method, sample, scheme), fields(id = %method.id))]
    pub fn resolve_checked(
        &mut self,
        method: &MethodDescriptor,
        sample: &Sample,
        bin_count: usize,
        scheme: &SchemeRef,
    ) -> Result<Scale> {
        let (min, max) = sample.extent().ok_or(Error::EmptySample)?;

        let scale = match &method.strategy {
            MethodStrategy::Unclassed => Scale::linear(min, max, scheme.clone()),
            MethodStrategy::UserDefined { breaks } => {
                Scale::threshold(breaks.clone(), scheme.clone())
            }
            MethodStrategy::Resiliency => {
                Scale::threshold(resiliency_breaks(bin_count), scheme.clone())
            }
            MethodStrategy::Library { classifier } => {
                let breaks = self.library_breaks(*classifier, sample, bin_count, min, max)?;
                Scale::threshold(breaks, scheme.clone())
            }
        };

        debug!(bins = scale.bin_count(), "resolved scale");
        Ok(scale)
    }

    fn library_breaks(
        &mut self,
        classifier: Classifier,
        sample: &Sample,
        bin_count: usize,
        min: f64,
        max: f64,
    ) -> Result<Vec<f64>> {
        if !self.library.supports(classifier) {
            warn!(library = self.library.name(), method = classifier.id(), "method not offered");
            return Err(Error::unknown_method(classifier.id()));
        }
        let values = sample.valid_values();

        let needs_placeholder =
            classifier == Classifier::ManualInterval && self.params.manual_breaks.is_none();
        let breaks = if needs_placeholder {
            let placeholder = self.placeholder_breaks(min, max, bin_count.saturating_sub(1));
            let params = self.params.clone().with_manual_breaks(placeholder);
            self.library
                .compute_breaks(classifier, &values, bin_count, &params)?
        } else {
            self.library
                .compute_breaks(classifier, &values, bin_count, &self.params)?
        };

        if breaks.iter().any(|b| !b.is_finite()) {
            return Err(Error::Classification(format!(
                "{} returned non-finite breaks",
                self.library.name()
            )));
        }

        let breaks = if classifier.keeps_library_rounding() {
            breaks
        } else {
            breaks
                .into_iter()
                .map(|b| round_to(b, BREAK_DECIMALS))
                .collect()
        };
        Ok(normalize_breaks(breaks))
    }

    /// `n` distinct uniform draws in `[min, max]`, sorted ascending
    ///
    /// Stand-in breaks for a manual interval nobody has edited yet.
    pub fn placeholder_breaks(&mut self, min: f64, max: f64, n: usize) -> Vec<f64> {
        if n == 0 {
            return Vec::new();
        }
        if max <= min {
            return vec![min; n];
        }
        let mut breaks: Vec<f64> = Vec::with_capacity(n);
        while breaks.len() < n {
            let mut candidate = self.rng.gen_range(min..=max);
            for _ in 0..MAX_PLACEHOLDER_DRAWS {
                if !breaks.contains(&candidate) {
                    break;
                }
                candidate = self.rng.gen_range(min..=max);
            }
            breaks.push(candidate);
        }
        breaks.sort_by(f64::total_cmp);
        breaks
    }
}

/// Breaks `2..=bin_count`, so modal bin id `k` lands in bin `k`
pub fn resiliency_breaks(bin_count: usize) -> Vec<f64> {
    (2..=bin_count).map(|b| b as f64).collect()
}
