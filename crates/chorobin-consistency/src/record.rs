//! Per-entity agreement records and the report built from them

use chorobin_core::{BinId, MethodId, Scale};
use chorobin_histogram::{histogram_values, BinSizes};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Modal bin and its frequency over a multiset of bin ids
///
/// Ties go to the smaller bin id. `None` for an empty input.
pub fn modal_bin<I>(bins: I) -> Option<(BinId, usize)>
where
    I: IntoIterator<Item = BinId>,
{
    let mut counts: BTreeMap<BinId, usize> = BTreeMap::new();
    for bin in bins {
        *counts.entry(bin).or_insert(0) += 1;
    }
    let mut best: Option<(BinId, usize)> = None;
    for (bin, count) in counts {
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((bin, count)),
        }
    }
    best
}

/// Bin ids one entity received across the selected methods
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsistencyRecord {
    pub bin_id_by_method: BTreeMap<MethodId, BinId>,
    pub modal_bin_id: BinId,
    pub modal_frequency: usize,
}

impl ConsistencyRecord {
    fn first(method: MethodId, bin: BinId) -> Self {
        let mut bin_id_by_method = BTreeMap::new();
        bin_id_by_method.insert(method, bin);
        Self {
            bin_id_by_method,
            modal_bin_id: bin,
            modal_frequency: 1,
        }
    }

    /// Record `bin` for `method` and recompute the mode from the full multiset
    pub fn record(&mut self, method: MethodId, bin: BinId) {
        self.bin_id_by_method.insert(method, bin);
        if let Some((mode, frequency)) = modal_bin(self.bin_id_by_method.values().copied()) {
            self.modal_bin_id = mode;
            self.modal_frequency = frequency;
        }
    }

    /// Number of methods that assigned this entity a bin
    pub fn method_count(&self) -> usize {
        self.bin_id_by_method.len()
    }

    /// Whether every method agreed on one bin
    pub fn is_unanimous(&self) -> bool {
        self.modal_frequency == self.method_count()
    }

    pub fn bin_for(&self, method: &MethodId) -> Option<BinId> {
        self.bin_id_by_method.get(method).copied()
    }
}

/// One row of the combined view: the entity with its mode, frequency and
/// per-method bins
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinedRow {
    pub key: String,
    pub most_frequent_bin: BinId,
    pub frequency: usize,
    pub bins: BTreeMap<MethodId, BinId>,
}

/// Agreement records for every entity that got at least one bin id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsistencyReport {
    methods: Vec<MethodId>,
    records: BTreeMap<String, ConsistencyRecord>,
}

impl ConsistencyReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one method's assignments into the report
    ///
    /// Entities with `None` are skipped for this method only.
    pub fn add_method<'a, I>(&mut self, method: &MethodId, assignments: I)
    where
        I: IntoIterator<Item = (&'a str, Option<BinId>)>,
    {
        if !self.methods.contains(method) {
            self.methods.push(method.clone());
        }
        for (key, bin) in assignments {
            let Some(bin) = bin else { continue };
            match self.records.get_mut(key) {
                Some(record) => record.record(method.clone(), bin),
                None => {
                    self.records
                        .insert(key.to_string(), ConsistencyRecord::first(method.clone(), bin));
                }
            }
        }
    }

    /// Methods folded in, in the order they were added
    pub fn methods(&self) -> &[MethodId] {
        &self.methods
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&ConsistencyRecord> {
        self.records.get(key)
    }

    /// Records in ascending entity key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConsistencyRecord)> + '_ {
        self.records.iter().map(|(k, r)| (k.as_str(), r))
    }

    /// Most consistent bin per entity
    pub fn most_frequent_bins(&self) -> BTreeMap<&str, BinId> {
        self.iter().map(|(k, r)| (k, r.modal_bin_id)).collect()
    }

    /// Frequency of the most consistent bin per entity
    pub fn frequencies(&self) -> BTreeMap<&str, usize> {
        self.iter().map(|(k, r)| (k, r.modal_frequency)).collect()
    }

    pub fn combined(&self) -> Vec<CombinedRow> {
        self.iter()
            .map(|(key, r)| CombinedRow {
                key: key.to_string(),
                most_frequent_bin: r.modal_bin_id,
                frequency: r.modal_frequency,
                bins: r.bin_id_by_method.clone(),
            })
            .collect()
    }

    /// Modal bin ids as values, in ascending entity key order
    pub fn modal_values(&self) -> Vec<f64> {
        self.records.values().map(|r| r.modal_bin_id as f64).collect()
    }

    /// Bin sizes of the modal bin ids under the resiliency scale
    pub fn modal_histogram(&self, scale: &Scale) -> BinSizes {
        histogram_values(scale, &self.modal_values())
    }

    /// Entities on which every method agreed
    pub fn unanimous_count(&self) -> usize {
        self.records.values().filter(|r| r.is_unanimous()).count()
    }
}
