//! The orchestrating session
//!
//! A [`Session`] owns everything one analysis works on: the method registry,
//! the active sample, the configuration, the manual editor and the latest
//! consistency report. State-changing events bump the generation counter and
//! recompute synchronously; asynchronous completions are checked against a
//! [`GenerationTicket`] before they may touch the session.

use crate::config::{clamp_bin_count, SessionConfig};
use crate::ticket::{GenerationCounter, GenerationTicket};
use chorobin_classify::{BreakLibrary, BreakParams, ClassificationLibrary};
use chorobin_consistency::{ConsistencyAnalyzer, ConsistencyReport};
use chorobin_core::{
    class_offset, Color, ColorScheme, DataShape, Error, MethodId, Result, Sample, Scale,
    ScaleKind, SchemeRef,
};
use chorobin_editor::ManualBinEditor;
use chorobin_histogram::{histogram, BinSizes};
use chorobin_scale::{MethodDescriptor, MethodFilter, MethodRegistry, ScaleResolver};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Color of `value` under `scale`, drawn from `scheme`
///
/// Threshold scales color by class offset; linear scales by the value's
/// position in `[min, max]`.
pub fn scale_color(scale: &Scale, scheme: &ColorScheme, value: f64) -> Color {
    match scale.kind {
        ScaleKind::Linear { min, max } => {
            let offset = if max > min { (value - min) / (max - min) } else { 0.0 };
            scheme.color_at(offset, 0)
        }
        ScaleKind::Threshold { .. } => {
            let n = scale.bin_count();
            scheme.color_at(class_offset(scale.bin_for(value) - 1, n), n)
        }
    }
}

fn scheme_or_gray(scheme: &SchemeRef) -> &'static ColorScheme {
    scheme.builtin().unwrap_or_else(|| {
        warn!(%scheme, "unknown color scheme, drawing in gray");
        ColorScheme::gray()
    })
}

/// One analysis session over a single attribute at a time
pub struct Session<L = BreakLibrary> {
    counter: GenerationCounter,
    config: SessionConfig,
    registry: MethodRegistry,
    resolver: ScaleResolver<L>,
    analyzer: ConsistencyAnalyzer,
    editor: ManualBinEditor,
    attribute: String,
    sample: Sample,
    report: ConsistencyReport,
    manual_method: MethodId,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl Session {
    /// Session backed by the built-in classification library
    pub fn new(config: SessionConfig) -> Self {
        Self::with_library(config, BreakLibrary::new())
    }
}

impl<L: ClassificationLibrary> Session<L> {
    /// Session backed by a custom classification library
    pub fn with_library(config: SessionConfig, library: L) -> Self {
        let config = config.clamped();
        let resolver = match config.seed {
            Some(seed) => ScaleResolver::with_library_seeded(library, seed),
            None => ScaleResolver::with_library(library),
        }
        .with_params(config.break_params.clone());
        let editor = ManualBinEditor::new()
            .with_nudge_magnitude(config.nudge_magnitude)
            .with_invalid_color(config.invalid_color);

        let session = Self {
            counter: GenerationCounter::new(),
            analyzer: ConsistencyAnalyzer::new(config.resiliency_selection.iter().cloned()),
            manual_method: config.default_manual_method.clone(),
            config,
            registry: MethodRegistry::new(),
            resolver,
            editor,
            attribute: String::new(),
            sample: Sample::default(),
            report: ConsistencyReport::new(),
        };
        info!(session = %session.id(), "session started");
        session
    }

    pub fn id(&self) -> Uuid {
        self.counter.session_id()
    }

    pub fn generation(&self) -> u64 {
        self.counter.current()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn registry(&self) -> &MethodRegistry {
        &self.registry
    }

    pub fn method(&self, id: &MethodId) -> Option<&MethodDescriptor> {
        self.registry.get(id)
    }

    /// Methods matching the catalog filter, in registration order
    pub fn filtered_methods<'a>(
        &'a self,
        filter: &'a MethodFilter,
    ) -> impl Iterator<Item = &'a MethodDescriptor> + 'a {
        self.registry.filter(filter)
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    pub fn sample(&self) -> &Sample {
        &self.sample
    }

    pub fn data_shape(&self) -> DataShape {
        self.sample.shape()
    }

    pub fn report(&self) -> &ConsistencyReport {
        &self.report
    }

    pub fn analyzer(&self) -> &ConsistencyAnalyzer {
        &self.analyzer
    }

    pub fn editor(&self) -> &ManualBinEditor {
        &self.editor
    }

    /// Direct access for boundary edits; edits do not change the generation
    pub fn editor_mut(&mut self) -> &mut ManualBinEditor {
        &mut self.editor
    }

    /// Method the manual editor was seeded from
    pub fn manual_method(&self) -> &MethodId {
        &self.manual_method
    }

    pub fn scheme(&self) -> &'static ColorScheme {
        scheme_or_gray(&self.config.color_scheme)
    }

    /// Latest scale of a method, `None` if unregistered
    pub fn scale_of(&self, id: &MethodId) -> Option<&Scale> {
        self.registry.get(id).map(|m| &m.scale)
    }

    /// Latest bin sizes of a method, `None` if unregistered
    pub fn bin_sizes_of(&self, id: &MethodId) -> Option<&BinSizes> {
        self.registry.get(id).map(|m| &m.bin_sizes)
    }

    /// Replace the active attribute and recompute every view
    #[instrument(skip(self, sample), fields(session = %self.id(), entities = sample.len()))]
    pub fn load_sample(&mut self, attribute: &str, sample: Sample) {
        self.attribute = attribute.to_string();
        self.sample = sample;
        let shape = self.sample.shape();
        info!(attribute = %self.attribute, %shape, "loaded sample");
        self.counter.bump();
        self.recompute_all();
        self.refresh_editor();
    }

    /// Change the requested class count; returns the count applied
    pub fn set_bin_count(&mut self, bin_count: usize) -> usize {
        let bin_count = clamp_bin_count(bin_count);
        if bin_count == self.config.bin_count {
            return bin_count;
        }
        debug!(bin_count, "bin count changed");
        self.config.bin_count = bin_count;
        self.counter.bump();
        self.recompute_all();
        self.refresh_editor();
        bin_count
    }

    /// Change the color scheme; the editor keeps its boundaries
    pub fn set_color_scheme(&mut self, scheme: SchemeRef) {
        if scheme == self.config.color_scheme {
            return;
        }
        debug!(%scheme, "color scheme changed");
        self.config.color_scheme = scheme;
        self.counter.bump();
        self.recompute_all();

        let scheme = self.scheme();
        let bins = self.editor.bins().clone();
        if let Err(e) = self.editor.restore(&bins, scheme) {
            warn!(error = %e, "could not recolor manual bins, resetting");
            self.editor.reset();
        }
    }

    /// Change the family-specific knobs and recompute
    pub fn set_break_params(&mut self, params: BreakParams) {
        self.config.break_params = params.clone();
        *self.resolver.params_mut() = params;
        self.counter.bump();
        self.recompute_all();
    }

    /// Seed the manual editor from another registered method
    pub fn set_manual_method(&mut self, id: &MethodId) -> Result<()> {
        self.registry.require(id)?;
        self.manual_method = id.clone();
        self.counter.bump();
        self.refresh_editor();
        Ok(())
    }

    pub fn set_resiliency_selection(&mut self, methods: impl IntoIterator<Item = MethodId>) {
        self.analyzer = ConsistencyAnalyzer::new(methods);
        self.config.resiliency_selection = self.analyzer.selection().to_vec();
        self.counter.bump();
        self.recompute_consistency();
    }

    pub fn toggle_resiliency_method(&mut self, id: MethodId) {
        self.analyzer.toggle(id);
        self.config.resiliency_selection = self.analyzer.selection().to_vec();
        self.counter.bump();
        self.recompute_consistency();
    }

    /// Freeze the editor's bins as a user method named `name`
    ///
    /// The new method becomes the manual method; its id is the name without
    /// whitespace.
    pub fn commit_manual(&mut self, name: &str, description: impl Into<String>) -> Result<MethodId> {
        let bins = self.editor.commit()?;
        let descriptor = MethodDescriptor::user_defined(name, description, bins);
        let id = descriptor.id.clone();
        self.registry.register_user_method(descriptor)?;
        info!(%id, "committed user method");

        self.counter.bump();
        self.recompute_method(&id)?;
        self.recompute_consistency();
        self.manual_method = id.clone();
        Ok(id)
    }

    /// Remove a user method; built-ins are rejected
    pub fn remove_user_method(&mut self, id: &MethodId) -> Result<MethodDescriptor> {
        let removed = self.registry.remove_user_method(id)?;
        if self.analyzer.is_selected(id) {
            self.analyzer.toggle(id.clone());
            self.config.resiliency_selection = self.analyzer.selection().to_vec();
        }
        self.counter.bump();
        if &self.manual_method == id {
            self.manual_method = self.config.default_manual_method.clone();
            self.refresh_editor();
        }
        self.recompute_consistency();
        Ok(removed)
    }

    /// Ticket for a request issued now
    pub fn ticket(&self) -> GenerationTicket {
        self.counter.ticket(&self.attribute, &self.manual_method)
    }

    pub fn is_current(&self, ticket: &GenerationTicket) -> bool {
        self.validate(ticket).is_ok()
    }

    /// `StaleAsyncResult` unless `ticket` still matches the session
    pub fn validate(&self, ticket: &GenerationTicket) -> Result<()> {
        self.counter
            .validate(ticket, &self.attribute, &self.manual_method)
    }

    /// Apply a completion only if its ticket is still current
    ///
    /// Stale completions are logged and dropped.
    pub fn complete<T, F>(&mut self, ticket: &GenerationTicket, f: F) -> Option<T>
    where
        F: FnOnce(&mut Self) -> T,
    {
        match self.validate(ticket) {
            Ok(()) => Some(f(self)),
            Err(e) => {
                debug!(error = %e, "discarding stale completion");
                None
            }
        }
    }

    /// Map fill of an entity under a method's scale
    ///
    /// `None` when the method is unknown, or when the entity has no valid
    /// value and invalid values are hidden.
    pub fn fill_for(&self, id: &MethodId, key: &str) -> Option<Color> {
        let scale = self.scale_of(id)?;
        match self.sample.value_of(key) {
            Some(value) => Some(scale_color(scale, scheme_or_gray(&scale.scheme), value)),
            None => self.invalid_fill(),
        }
    }

    /// Map fill of an entity under the live manual bins
    pub fn manual_fill_for(&self, key: &str) -> Option<Color> {
        match self.sample.value_of(key) {
            Some(value) => Some(self.editor.fill_for(Some(value))),
            None => self.invalid_fill(),
        }
    }

    fn invalid_fill(&self) -> Option<Color> {
        self.config
            .show_invalid_values
            .then_some(self.config.invalid_color)
    }

    /// Recompute every method's scale and bin sizes, then consistency
    pub fn recompute_all(&mut self) {
        for id in self.registry.ids() {
            if id.as_str() == MethodId::RESILIENCY {
                continue;
            }
            if let Err(e) = self.recompute_method(&id) {
                warn!(%id, error = %e, "recompute failed");
            }
        }
        self.recompute_consistency();
    }

    fn recompute_method(&mut self, id: &MethodId) -> Result<()> {
        let method = self.registry.require(id)?;
        let scale = self.resolver.resolve(
            method,
            &self.sample,
            self.config.bin_count,
            &self.config.color_scheme,
        );
        let sizes = histogram(&scale, &self.sample);
        self.registry.update(id, scale, sizes)
    }

    fn recompute_consistency(&mut self) {
        self.report = self.analyzer.analyze_registry(&self.sample, &self.registry);

        let resiliency = MethodId::resiliency();
        let Some(method) = self.registry.get(&resiliency) else {
            return;
        };
        let scale = self.resolver.resolve(
            method,
            &self.sample,
            self.config.bin_count,
            &self.config.color_scheme,
        );
        let sizes = self.report.modal_histogram(&scale);
        if let Err(e) = self.registry.update(&resiliency, scale, sizes) {
            warn!(error = %e, "could not store resiliency scale");
        }
    }

    /// Reseed the editor from the manual method
    ///
    /// User methods restore their committed bins; other methods rebuild
    /// from their current scale over the data range.
    fn refresh_editor(&mut self) {
        let scheme = self.scheme();
        let outcome = match self.registry.get(&self.manual_method) {
            None => Err(Error::unknown_method(&self.manual_method)),
            Some(method) => match (&method.source_bins, self.sample.extent()) {
                (Some(bins), _) => self.editor.restore(bins, scheme),
                (None, Some((min, max))) => {
                    self.editor.initialize_from(&method.scale, min, max, scheme)
                }
                (None, None) => {
                    self.editor.reset();
                    Ok(())
                }
            },
        };
        if let Err(e) = outcome {
            warn!(method = %self.manual_method, error = %e, "could not seed manual bins, resetting");
            self.editor.reset();
        }
    }
}
