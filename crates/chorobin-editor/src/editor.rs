//! Manual bin editor state machine

use crate::threshold::{BoundaryDirection, BoundaryNudge, ColorThreshold, DEFAULT_NUDGE_MAGNITUDE};
use chorobin_core::{
    class_offset, Color, ColorScheme, Error, ManualBin, ManualBinSet, Result, Scale,
};
use tracing::{debug, instrument};

/// Interactive editor over a [`ManualBinSet`]
///
/// Every operation leaves the set contiguous, sorted and with
/// `domain_from <= domain_to` for every bin; zero-width bins are allowed
/// until the next [`deduplicate`](Self::deduplicate). The derived
/// [`ColorThreshold`] is recomputed after each edit.
#[derive(Debug, Clone, PartialEq)]
pub struct ManualBinEditor {
    bins: ManualBinSet,
    threshold: ColorThreshold,
    current_color: Color,
    nudge_magnitude: f64,
    invalid_color: Color,
}

impl Default for ManualBinEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualBinEditor {
    /// Editor holding a single unbounded white bin
    pub fn new() -> Self {
        let bins = ManualBinSet::unbounded(Color::WHITE);
        let threshold = ColorThreshold::from_bins(&bins, BoundaryNudge::default());
        Self {
            bins,
            threshold,
            current_color: Color::WHITE,
            nudge_magnitude: DEFAULT_NUDGE_MAGNITUDE,
            invalid_color: Color::INVALID,
        }
    }

    pub fn with_nudge_magnitude(mut self, magnitude: f64) -> Self {
        self.nudge_magnitude = magnitude;
        self.recompute(self.threshold.nudge.direction);
        self
    }

    pub fn with_invalid_color(mut self, color: Color) -> Self {
        self.invalid_color = color;
        self
    }

    pub fn bins(&self) -> &ManualBinSet {
        &self.bins
    }

    pub fn threshold(&self) -> &ColorThreshold {
        &self.threshold
    }

    pub fn breakpoints(&self) -> Vec<f64> {
        self.bins.breakpoints()
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Colors the user can paint with, one per bin
    pub fn preset_colors(&self) -> &[Color] {
        self.threshold.preset_colors()
    }

    /// Active paint color
    pub fn current_color(&self) -> Color {
        self.current_color
    }

    /// Pick the paint color; it must be one of the preset colors
    pub fn set_current_color(&mut self, color: Color) -> Result<()> {
        if !self.preset_colors().contains(&color) {
            return Err(Error::UnknownColor(color.to_hex()));
        }
        self.current_color = color;
        Ok(())
    }

    /// Build `breaks.len() + 1` bins spanning `[min, max]`
    ///
    /// Breaks outside the data range widen the outer edges. A linear scale
    /// yields a single bin.
    pub fn initialize_from(
        &mut self,
        scale: &Scale,
        min: f64,
        max: f64,
        scheme: &ColorScheme,
    ) -> Result<()> {
        if !min.is_finite() || !max.is_finite() {
            return Err(Error::non_finite("data range"));
        }
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        let breaks = scale.breaks();
        let lo = breaks.first().map_or(min, |b| b.min(min));
        let hi = breaks.last().map_or(max, |b| b.max(max));

        let mut endpoints = Vec::with_capacity(breaks.len() + 2);
        endpoints.push(lo);
        endpoints.extend_from_slice(breaks);
        endpoints.push(hi);

        let n = breaks.len() + 1;
        let bins = endpoints
            .windows(2)
            .enumerate()
            .map(|(i, w)| ManualBin::new(w[0], w[1], scheme.color_at(class_offset(i, n), n)))
            .collect();
        self.bins = ManualBinSet::new(bins);
        debug!(bins = n, scheme = %scheme.code, "initialized manual bins");
        self.recompute(BoundaryDirection::DomainTo);
        Ok(())
    }

    /// Copy a committed set, recoloring it from `scheme`
    ///
    /// Breakpoints are kept exactly; colors follow the current scheme at the
    /// same class offsets.
    pub fn restore(&mut self, saved: &ManualBinSet, scheme: &ColorScheme) -> Result<()> {
        if saved.is_empty() {
            return Err(Error::EmptyBinSet);
        }
        saved.check_invariants()?;
        let mut bins = saved.clone();
        let n = bins.len();
        for (i, bin) in bins.bins_mut().iter_mut().enumerate() {
            bin.color = scheme.color_at(class_offset(i, n), n);
        }
        self.bins = bins;
        debug!(bins = n, scheme = %scheme.code, "restored manual bins");
        self.recompute(BoundaryDirection::DomainTo);
        Ok(())
    }

    /// Append a zero-width white bin at the upper edge
    pub fn add_bin(&mut self) -> Result<()> {
        let edge = self.bins.last().ok_or(Error::EmptyBinSet)?.domain_to;
        self.bins.push(ManualBin::new(edge, edge, Color::WHITE));
        debug!(bins = self.bins.len(), "added bin");
        self.recompute(BoundaryDirection::DomainTo);
        Ok(())
    }

    /// Move the lower edge of bin `index`, returning the value applied
    ///
    /// The value is clamped into `[bins[index - 1].domain_from,
    /// bins[index].domain_to]` and the previous bin's upper edge follows it.
    pub fn set_boundary(&mut self, index: usize, value: f64) -> Result<f64> {
        if value.is_nan() {
            return Err(Error::non_finite("boundary value"));
        }
        let len = self.bins.len();
        let upper = self
            .bins
            .get(index)
            .ok_or_else(|| Error::bin_index_out_of_range(index, len))?
            .domain_to;
        let lower = match index.checked_sub(1) {
            Some(prev) => self.bins.get(prev).map_or(f64::NEG_INFINITY, |b| b.domain_from),
            None => f64::NEG_INFINITY,
        };
        let applied = value.max(lower).min(upper);

        let bins = self.bins.bins_mut();
        bins[index].domain_from = applied;
        if index > 0 {
            bins[index - 1].domain_to = applied;
        }
        debug!(index, requested = value, applied, "set boundary");
        self.recompute(BoundaryDirection::DomainTo);
        Ok(applied)
    }

    /// Reassign `value` to the bin painted `target`
    ///
    /// The target bin grows to reach `value`. Neighbours past it are pulled
    /// along; any that collapse become zero-width, take the target color and
    /// are removed by the trailing deduplication.
    #[instrument(skip(self), fields(bins = self.bins.len()))]
    pub fn paint_boundary(&mut self, value: f64, target: Color) -> Result<BoundaryDirection> {
        if !value.is_finite() {
            return Err(Error::non_finite("paint value"));
        }
        let target_idx = self
            .bins
            .position_of_color(target)
            .ok_or_else(|| Error::UnknownColor(target.to_hex()))?;

        let bins = self.bins.bins_mut();
        let direction = if value > bins[target_idx].domain_to {
            bins[target_idx].domain_to = value;
            for i in target_idx + 1..bins.len() {
                if value > bins[i].domain_from {
                    bins[i].domain_from = bins[i - 1].domain_to;
                    if bins[i].domain_from >= bins[i].domain_to {
                        bins[i].domain_to = bins[i].domain_from;
                        bins[i].color = target;
                    }
                }
            }
            BoundaryDirection::DomainTo
        } else if value < bins[target_idx].domain_from {
            bins[target_idx].domain_from = value;
            for i in (0..target_idx).rev() {
                if value < bins[i].domain_to {
                    bins[i].domain_to = bins[i + 1].domain_from;
                    if bins[i].domain_from >= bins[i].domain_to {
                        bins[i].domain_from = bins[i].domain_to;
                        bins[i].color = target;
                    }
                }
            }
            BoundaryDirection::DomainFrom
        } else if value == bins[target_idx].domain_from && target_idx > 0 {
            // already on the lower edge; nudge down so it stays in the target
            BoundaryDirection::DomainFrom
        } else {
            BoundaryDirection::DomainTo
        };

        let removed = self.bins.dedup_zero_width();
        debug!(target_idx, ?direction, removed, "painted boundary");
        self.recompute(direction);
        Ok(direction)
    }

    /// Remove zero-width bins; the last remaining bin is never removed
    pub fn deduplicate(&mut self) -> usize {
        let removed = self.bins.dedup_zero_width();
        if removed > 0 {
            debug!(removed, "removed zero-width bins");
        }
        self.recompute(self.threshold.nudge.direction);
        removed
    }

    /// Recolor bin `index`
    pub fn set_color(&mut self, index: usize, color: Color) -> Result<()> {
        let len = self.bins.len();
        let bin = self
            .bins
            .get_mut(index)
            .ok_or_else(|| Error::bin_index_out_of_range(index, len))?;
        bin.color = color;
        self.recompute(self.threshold.nudge.direction);
        Ok(())
    }

    /// Drop every bin, leaving a single unbounded white bin
    pub fn reset(&mut self) {
        self.bins = ManualBinSet::unbounded(Color::WHITE);
        debug!("reset manual bins");
        self.recompute(BoundaryDirection::DomainTo);
    }

    /// Snapshot of the current set for registering as a user method
    pub fn commit(&self) -> Result<ManualBinSet> {
        self.check_invariants()?;
        Ok(self.bins.clone())
    }

    /// Map fill for an entity value; invalid values get the invalid color
    pub fn fill_for(&self, value: Option<f64>) -> Color {
        value
            .filter(|v| v.is_finite())
            .and_then(|v| self.threshold.color_for(v))
            .unwrap_or(self.invalid_color)
    }

    /// Non-empty, contiguous, sorted and `domain_from <= domain_to`
    pub fn check_invariants(&self) -> Result<()> {
        if self.bins.is_empty() {
            return Err(Error::EmptyBinSet);
        }
        self.bins.check_invariants()
    }

    fn recompute(&mut self, direction: BoundaryDirection) {
        let nudge = BoundaryNudge::new(direction, self.nudge_magnitude);
        self.threshold = ColorThreshold::from_bins(&self.bins, nudge);
        if !self.threshold.range.contains(&self.current_color) {
            if let Some(first) = self.threshold.range.first() {
                self.current_color = *first;
            }
        }
        debug_assert!(
            self.check_invariants().is_ok(),
            "manual bins invalid after edit: {:?}",
            self.check_invariants()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chorobin_core::SchemeRef;

    fn viridis() -> &'static ColorScheme {
        ColorScheme::builtin("viridis").unwrap()
    }

    fn three_bins() -> ManualBinEditor {
        let mut editor = ManualBinEditor::new();
        let scale = Scale::threshold(vec![2.0, 5.0], SchemeRef::new("viridis"));
        editor.initialize_from(&scale, 0.0, 9.0, viridis()).unwrap();
        editor
    }

    fn edges(editor: &ManualBinEditor) -> Vec<(f64, f64)> {
        editor
            .bins()
            .iter()
            .map(|b| (b.domain_from, b.domain_to))
            .collect()
    }

    #[test]
    fn test_initialize_from_scale() {
        let editor = three_bins();
        assert_eq!(edges(&editor), vec![(0.0, 2.0), (2.0, 5.0), (5.0, 9.0)]);
        assert_eq!(editor.breakpoints(), vec![2.0, 5.0]);
        let colors = editor.bins().colors();
        assert_eq!(colors[0], viridis().color_at(0.0, 3));
        assert_eq!(colors[1], viridis().color_at(0.5, 3));
        assert_eq!(colors[2], viridis().color_at(1.0, 3));
        assert_eq!(editor.current_color(), colors[0]);
    }

    #[test]
    fn test_initialize_widens_to_outlying_breaks() {
        let mut editor = ManualBinEditor::new();
        let scale = Scale::threshold(vec![-1.0, 12.0], SchemeRef::new("viridis"));
        editor.initialize_from(&scale, 0.0, 9.0, viridis()).unwrap();
        assert_eq!(edges(&editor), vec![(-1.0, -1.0), (-1.0, 12.0), (12.0, 12.0)]);

        let linear = Scale::linear(0.0, 9.0, SchemeRef::new("viridis"));
        editor.initialize_from(&linear, 0.0, 9.0, viridis()).unwrap();
        assert_eq!(edges(&editor), vec![(0.0, 9.0)]);
        assert_eq!(editor.bins().colors(), vec![viridis().color_at(0.0, 1)]);

        assert!(editor.initialize_from(&linear, f64::NAN, 9.0, viridis()).is_err());
    }

    #[test]
    fn test_paint_extends_target_upwards() {
        let mut editor = three_bins();
        let c0 = editor.bins().colors()[0];
        let direction = editor.paint_boundary(4.0, c0).unwrap();
        assert_eq!(direction, BoundaryDirection::DomainTo);
        assert_eq!(edges(&editor), vec![(0.0, 4.0), (4.0, 5.0), (5.0, 9.0)]);
        assert_eq!(editor.fill_for(Some(4.0)), c0);
        editor.check_invariants().unwrap();
    }

    #[test]
    fn test_paint_absorbs_collapsed_bins() {
        let mut editor = three_bins();
        let c0 = editor.bins().colors()[0];
        let c2 = editor.bins().colors()[2];
        editor.paint_boundary(7.0, c0).unwrap();
        assert_eq!(edges(&editor), vec![(0.0, 7.0), (7.0, 9.0)]);
        assert_eq!(editor.bins().colors(), vec![c0, c2]);
    }

    #[test]
    fn test_paint_extends_target_downwards() {
        let mut editor = three_bins();
        let c0 = editor.bins().colors()[0];
        let c2 = editor.bins().colors()[2];
        let direction = editor.paint_boundary(1.0, c2).unwrap();
        assert_eq!(direction, BoundaryDirection::DomainFrom);
        assert_eq!(edges(&editor), vec![(0.0, 1.0), (1.0, 9.0)]);
        assert_eq!(editor.bins().colors(), vec![c0, c2]);
        assert_eq!(editor.fill_for(Some(1.0)), c2);
        assert_eq!(editor.fill_for(Some(0.99)), c0);
    }

    #[test]
    fn test_paint_inside_target_is_noop() {
        let mut editor = three_bins();
        let c1 = editor.bins().colors()[1];
        let before = edges(&editor);
        editor.paint_boundary(3.0, c1).unwrap();
        assert_eq!(edges(&editor), before);
    }

    #[test]
    fn test_paint_onto_existing_edge_keeps_target_color() {
        let mut editor = three_bins();
        let c1 = editor.bins().colors()[1];

        // lower edge of the target bin
        assert_eq!(editor.paint_boundary(2.0, c1).unwrap(), BoundaryDirection::DomainFrom);
        assert_eq!(edges(&editor), vec![(0.0, 2.0), (2.0, 5.0), (5.0, 9.0)]);
        assert_eq!(editor.fill_for(Some(2.0)), c1);

        // upper edge, right after a downward recompute
        assert_eq!(editor.paint_boundary(5.0, c1).unwrap(), BoundaryDirection::DomainTo);
        assert_eq!(editor.fill_for(Some(5.0)), c1);

        // the first bin's lower edge has no boundary to nudge
        let c0 = editor.bins().colors()[0];
        assert_eq!(editor.paint_boundary(0.0, c0).unwrap(), BoundaryDirection::DomainTo);
        assert_eq!(editor.fill_for(Some(0.0)), c0);
    }

    #[test]
    fn test_paint_at_population_scale() {
        let mut editor = ManualBinEditor::new();
        let scale = Scale::threshold(vec![2e7, 5e7], SchemeRef::new("viridis"));
        editor.initialize_from(&scale, 0.0, 9e7, viridis()).unwrap();
        let [c0, c1, c2] = [0, 1, 2].map(|i| editor.bins().colors()[i]);

        editor.paint_boundary(4e7, c0).unwrap();
        assert_eq!(edges(&editor), vec![(0.0, 4e7), (4e7, 5e7), (5e7, 9e7)]);
        assert_eq!(editor.fill_for(Some(4e7)), c0);
        assert_eq!(editor.fill_for(Some(4.0000001e7)), c1);

        editor.paint_boundary(4.5e7, c2).unwrap();
        assert_eq!(editor.fill_for(Some(4.5e7)), c2);
        assert_eq!(editor.fill_for(Some(4.4999999e7)), c1);
    }

    #[test]
    fn test_paint_rejects_unknown_color_and_nan() {
        let mut editor = three_bins();
        let unknown = Color::rgb(1, 2, 3);
        assert!(matches!(
            editor.paint_boundary(3.0, unknown),
            Err(Error::UnknownColor(_))
        ));
        let c0 = editor.bins().colors()[0];
        assert!(editor.paint_boundary(f64::NAN, c0).is_err());
    }

    #[test]
    fn test_add_bin_and_deduplicate() {
        let mut editor = three_bins();
        editor.add_bin().unwrap();
        assert_eq!(editor.len(), 4);
        let last = *editor.bins().last().unwrap();
        assert_eq!((last.domain_from, last.domain_to), (9.0, 9.0));
        assert_eq!(last.color, Color::WHITE);
        editor.check_invariants().unwrap();

        assert_eq!(editor.deduplicate(), 1);
        assert_eq!(editor.len(), 3);
    }

    #[test]
    fn test_add_bin_then_drag_open() {
        let mut editor = three_bins();
        editor.add_bin().unwrap();
        editor.paint_boundary(12.0, Color::WHITE).unwrap();
        assert_eq!(edges(&editor).last(), Some(&(9.0, 12.0)));
    }

    #[test]
    fn test_set_boundary_clamps() {
        let mut editor = three_bins();
        assert_eq!(editor.set_boundary(1, 3.0).unwrap(), 3.0);
        assert_eq!(edges(&editor), vec![(0.0, 3.0), (3.0, 5.0), (5.0, 9.0)]);

        assert_eq!(editor.set_boundary(2, 100.0).unwrap(), 9.0);
        assert_eq!(edges(&editor), vec![(0.0, 3.0), (3.0, 9.0), (9.0, 9.0)]);

        assert_eq!(editor.set_boundary(1, -50.0).unwrap(), 0.0);
        assert_eq!(editor.set_boundary(0, -50.0).unwrap(), -50.0);
        editor.check_invariants().unwrap();

        assert!(editor.set_boundary(7, 1.0).is_err());
        assert!(editor.set_boundary(1, f64::NAN).is_err());
    }

    #[test]
    fn test_restore_keeps_breakpoints_and_recolors() {
        let editor = three_bins();
        let committed = editor.commit().unwrap();

        let blues = ColorScheme::builtin("blues").unwrap();
        let mut other = ManualBinEditor::new();
        other.restore(&committed, blues).unwrap();
        assert_eq!(other.breakpoints(), committed.breakpoints());
        assert_eq!(other.bins().colors(), blues.colors_for(3));

        assert!(matches!(
            other.restore(&ManualBinSet::default(), blues),
            Err(Error::EmptyBinSet)
        ));
    }

    #[test]
    fn test_set_color_updates_presets() {
        let mut editor = three_bins();
        let old = editor.current_color();
        editor.set_color(0, Color::BLACK).unwrap();
        assert_eq!(editor.preset_colors()[0], Color::BLACK);
        // the old paint color disappeared, so the first preset takes over
        assert_ne!(old, Color::BLACK);
        assert_eq!(editor.current_color(), Color::BLACK);
        assert!(editor.set_color(3, Color::WHITE).is_err());

        let c2 = editor.preset_colors()[2];
        editor.set_current_color(c2).unwrap();
        assert_eq!(editor.current_color(), c2);
        assert!(editor.set_current_color(Color::rgb(9, 9, 9)).is_err());
    }

    #[test]
    fn test_reset_and_fill() {
        let mut editor = three_bins().with_invalid_color(Color::GRAY);
        editor.reset();
        assert_eq!(editor.len(), 1);
        assert_eq!(edges(&editor), vec![(f64::NEG_INFINITY, f64::INFINITY)]);
        assert_eq!(editor.fill_for(Some(1e12)), Color::WHITE);
        assert_eq!(editor.fill_for(None), Color::GRAY);
        assert_eq!(editor.fill_for(Some(f64::NAN)), Color::GRAY);
    }

    #[test]
    fn test_commit_round_trip_through_json() {
        let mut editor = ManualBinEditor::new();
        editor.set_boundary(0, 1.0).unwrap();
        editor.add_bin().unwrap();
        let committed = editor.commit().unwrap();
        let json = serde_json::to_string(&committed).unwrap();
        let back: ManualBinSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, committed);
    }
}
