//! Cross-method consistency analysis

use crate::record::ConsistencyReport;
use chorobin_core::{Classifier, MethodId, Sample, Scale};
use chorobin_histogram::assign_all;
use chorobin_scale::MethodRegistry;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Methods compared by default for the resiliency view
pub const DEFAULT_SELECTION: [Classifier; 6] = [
    Classifier::EqualInterval,
    Classifier::Quantile,
    Classifier::MaximumBreaks,
    Classifier::FisherJenks,
    Classifier::CkMeans,
    Classifier::GeometricInterval,
];

/// Default resiliency selection as method ids
pub fn default_selection() -> Vec<MethodId> {
    DEFAULT_SELECTION.iter().map(|c| MethodId::from(*c)).collect()
}

/// Computes per-entity modal bins across a selection of methods
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsistencyAnalyzer {
    selection: Vec<MethodId>,
}

impl Default for ConsistencyAnalyzer {
    fn default() -> Self {
        Self::new(default_selection())
    }
}

impl ConsistencyAnalyzer {
    /// Analyzer over `selection`; repeated ids are kept once
    pub fn new(selection: impl IntoIterator<Item = MethodId>) -> Self {
        let mut unique: Vec<MethodId> = Vec::new();
        for id in selection {
            if !unique.contains(&id) {
                unique.push(id);
            }
        }
        Self { selection: unique }
    }

    pub fn selection(&self) -> &[MethodId] {
        &self.selection
    }

    pub fn is_selected(&self, id: &MethodId) -> bool {
        self.selection.contains(id)
    }

    /// Add `id` to the selection, or drop it if already selected
    pub fn toggle(&mut self, id: MethodId) {
        match self.selection.iter().position(|m| m == &id) {
            Some(index) => {
                self.selection.remove(index);
            }
            None => self.selection.push(id),
        }
    }

    /// Fold the given scales over one shared sample
    ///
    /// Methods outside the selection are skipped.
    pub fn analyze<'a, I>(&self, sample: &Sample, scales: I) -> ConsistencyReport
    where
        I: IntoIterator<Item = (&'a MethodId, &'a Scale)>,
    {
        let mut report = ConsistencyReport::new();
        for (id, scale) in scales {
            if !self.is_selected(id) {
                continue;
            }
            let bins = assign_all(scale, sample);
            report.add_method(id, sample.keys().zip(bins));
        }
        report
    }

    /// Fold each selected method's stored scale from the registry
    ///
    /// Unregistered and non-comparable ids are ignored.
    #[instrument(skip_all, fields(selected = self.selection.len(), entities = sample.len()))]
    pub fn analyze_registry(&self, sample: &Sample, registry: &MethodRegistry) -> ConsistencyReport {
        let mut report = ConsistencyReport::new();
        for id in &self.selection {
            let Some(method) = registry.get(id) else {
                debug!(%id, "ignoring unregistered method in resiliency selection");
                continue;
            };
            if !method.is_comparable() {
                debug!(%id, "ignoring non-comparable method in resiliency selection");
                continue;
            }
            let bins = assign_all(&method.scale, sample);
            report.add_method(id, sample.keys().zip(bins));
        }
        debug!(entities = report.len(), methods = report.methods().len(), "consistency computed");
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chorobin_core::SchemeRef;

    fn threshold(breaks: Vec<f64>) -> Scale {
        Scale::threshold(breaks, SchemeRef::new("viridis"))
    }

    #[test]
    fn test_default_selection() {
        let analyzer = ConsistencyAnalyzer::default();
        assert_eq!(analyzer.selection().len(), 6);
        assert!(analyzer.is_selected(&MethodId::from(Classifier::FisherJenks)));
        assert!(!analyzer.is_selected(&MethodId::from(Classifier::Percentile)));
    }

    #[test]
    fn test_toggle_and_dedup() {
        let mut analyzer = ConsistencyAnalyzer::new(vec![MethodId::new("a"), MethodId::new("a")]);
        assert_eq!(analyzer.selection().len(), 1);
        analyzer.toggle(MethodId::new("b"));
        analyzer.toggle(MethodId::new("a"));
        assert_eq!(analyzer.selection(), &[MethodId::new("b")]);
    }

    #[test]
    fn test_four_methods_two_two_two_five() {
        let sample = Sample::new(vec![("e", 10.0)]);
        let ids: Vec<MethodId> = ["m1", "m2", "m3", "m4"].into_iter().map(MethodId::new).collect();
        // 10 lands in bin 2 for the first three scales and bin 5 for the last
        let scales = [
            threshold(vec![5.0, 20.0]),
            threshold(vec![1.0, 11.0, 12.0]),
            threshold(vec![10.0, 30.0]),
            threshold(vec![1.0, 2.0, 3.0, 4.0]),
        ];
        let analyzer = ConsistencyAnalyzer::new(ids.clone());
        let report = analyzer.analyze(&sample, ids.iter().zip(scales.iter()));

        let record = report.get("e").unwrap();
        let bins: Vec<_> = record.bin_id_by_method.values().copied().collect();
        assert_eq!(bins, vec![2, 2, 2, 5]);
        assert_eq!(record.modal_bin_id, 2);
        assert_eq!(record.modal_frequency, 3);
    }

    #[test]
    fn test_unselected_scales_are_skipped() {
        let sample = Sample::from_values(&[1.0, 5.0]);
        let a = MethodId::new("a");
        let b = MethodId::new("b");
        let s = threshold(vec![3.0]);
        let analyzer = ConsistencyAnalyzer::new(vec![a.clone()]);
        let report = analyzer.analyze(&sample, [(&a, &s), (&b, &s)]);
        assert_eq!(report.methods(), &[a]);
        assert_eq!(report.get("1").unwrap().modal_bin_id, 2);
    }

    #[test]
    fn test_invalid_entities_are_absent() {
        let sample = Sample::new(vec![("a", "1"), ("b", "NA"), ("c", "9")]);
        let id = MethodId::new("m");
        let s = threshold(vec![5.0]);
        let report = ConsistencyAnalyzer::new(vec![id.clone()]).analyze(&sample, [(&id, &s)]);
        assert_eq!(report.len(), 2);
        assert!(report.get("b").is_none());
        assert_eq!(report.get("c").unwrap().modal_bin_id, 2);
    }

    #[test]
    fn test_registry_selection_ignores_unknown_and_pseudo_methods() {
        let mut registry = MethodRegistry::new();
        let quantile = MethodId::from(Classifier::Quantile);
        registry
            .update(&quantile, threshold(vec![2.0]), Default::default())
            .unwrap();
        let analyzer = ConsistencyAnalyzer::new(vec![
            quantile.clone(),
            MethodId::new("missing"),
            MethodId::unclassed(),
        ]);
        let sample = Sample::from_values(&[1.0, 3.0]);
        let report = analyzer.analyze_registry(&sample, &registry);
        assert_eq!(report.methods(), &[quantile]);
        assert_eq!(report.get("0").unwrap().modal_bin_id, 1);
        assert_eq!(report.get("1").unwrap().modal_bin_id, 2);
    }
}
