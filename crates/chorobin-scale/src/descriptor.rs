//! Method descriptors and dispatch strategies

use chorobin_core::{
    Classifier, ManualBinSet, MethodCategory, MethodId, Scale,
};
use chorobin_histogram::BinSizes;
use serde::{Deserialize, Serialize};

/// How a method turns a sample into a scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum MethodStrategy {
    /// Continuous ramp over the data range
    Unclassed,
    /// Breaks from the classification library
    Library { classifier: Classifier },
    /// Breaks frozen when the user committed a manual partition
    UserDefined { breaks: Vec<f64> },
    /// Modal bin ids across a selection of methods
    Resiliency,
}

impl MethodStrategy {
    pub fn classifier(&self) -> Option<Classifier> {
        match self {
            MethodStrategy::Library { classifier } => Some(*classifier),
            _ => None,
        }
    }
}

/// A registered classification method and its latest results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDescriptor {
    pub id: MethodId,
    pub name: String,
    pub description: String,
    pub category: MethodCategory,
    pub strategy: MethodStrategy,
    /// Scale from the last recompute
    pub scale: Scale,
    /// Bin sizes from the last recompute
    pub bin_sizes: BinSizes,
    pub is_user_created: bool,
    /// Manual partition this method was committed from
    pub source_bins: Option<ManualBinSet>,
}

impl MethodDescriptor {
    fn new(
        id: MethodId,
        name: impl Into<String>,
        description: impl Into<String>,
        category: MethodCategory,
        strategy: MethodStrategy,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            category,
            strategy,
            scale: Scale::fallback(),
            bin_sizes: BinSizes::new(),
            is_user_created: false,
            source_bins: None,
        }
    }

    /// Built-in descriptor backed by a library family
    pub fn library(classifier: Classifier) -> Self {
        Self::new(
            MethodId::from(classifier),
            classifier.name(),
            classifier.description(),
            classifier.category(),
            MethodStrategy::Library { classifier },
        )
    }

    pub fn unclassed() -> Self {
        Self::new(
            MethodId::unclassed(),
            "Unclassed",
            "Continuous color ramp from the minimum to the maximum value.",
            MethodCategory::Other,
            MethodStrategy::Unclassed,
        )
    }

    pub fn resiliency() -> Self {
        Self::new(
            MethodId::resiliency(),
            "Resiliency",
            "Most frequent bin of each entity across the selected methods.",
            MethodCategory::Other,
            MethodStrategy::Resiliency,
        )
    }

    /// User method frozen from a manual partition
    ///
    /// The id is the name with whitespace removed.
    pub fn user_defined(name: &str, description: impl Into<String>, bins: ManualBinSet) -> Self {
        let mut descriptor = Self::new(
            MethodId::from_user_name(name),
            name,
            description,
            MethodCategory::UserDefined,
            MethodStrategy::UserDefined {
                breaks: bins.breakpoints(),
            },
        );
        descriptor.is_user_created = true;
        descriptor.source_bins = Some(bins);
        descriptor
    }

    pub fn is_builtin(&self) -> bool {
        !self.is_user_created
    }

    /// Whether the method can take part in a resiliency selection
    pub fn is_comparable(&self) -> bool {
        !matches!(
            self.strategy,
            MethodStrategy::Unclassed | MethodStrategy::Resiliency
        )
    }
}
