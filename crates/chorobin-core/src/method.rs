//! Method identifiers, categories and the built-in classifier families

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a registered classification method
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MethodId(String);

impl MethodId {
    pub const UNCLASSED: &'static str = "unclassed";
    pub const RESILIENCY: &'static str = "resiliency";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Id for a user-created method: the display name without whitespace
    pub fn from_user_name(name: &str) -> Self {
        Self(name.split_whitespace().collect())
    }

    pub fn unclassed() -> Self {
        Self::new(Self::UNCLASSED)
    }

    pub fn resiliency() -> Self {
        Self::new(Self::RESILIENCY)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MethodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MethodId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<Classifier> for MethodId {
    fn from(c: Classifier) -> Self {
        Self::new(c.id())
    }
}

impl AsRef<str> for MethodId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Family a method belongs to, used for filtering in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MethodCategory {
    Interval,
    Statistical,
    Iterative,
    HumanCentered,
    Other,
    UserDefined,
}

impl MethodCategory {
    pub const ALL: [MethodCategory; 6] = [
        MethodCategory::Interval,
        MethodCategory::Statistical,
        MethodCategory::Iterative,
        MethodCategory::HumanCentered,
        MethodCategory::Other,
        MethodCategory::UserDefined,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Interval => "Interval",
            Self::Statistical => "Statistical",
            Self::Iterative => "Iterative",
            Self::HumanCentered => "Human-Centered",
            Self::Other => "Other",
            Self::UserDefined => "User-Defined",
        }
    }
}

impl fmt::Display for MethodCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classification families provided by the classification library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classifier {
    EqualInterval,
    Percentile,
    Quantile,
    StandardDeviation,
    ManualInterval,
    PrettyBreaks,
    MaximumBreaks,
    HeadTailBreaks,
    CkMeans,
    BoxPlot,
    DefinedInterval,
    ExponentialBinSizes,
    GeometricInterval,
    FisherJenks,
}

impl Classifier {
    pub const ALL: [Classifier; 14] = [
        Classifier::EqualInterval,
        Classifier::Percentile,
        Classifier::Quantile,
        Classifier::StandardDeviation,
        Classifier::ManualInterval,
        Classifier::PrettyBreaks,
        Classifier::MaximumBreaks,
        Classifier::HeadTailBreaks,
        Classifier::CkMeans,
        Classifier::BoxPlot,
        Classifier::DefinedInterval,
        Classifier::ExponentialBinSizes,
        Classifier::GeometricInterval,
        Classifier::FisherJenks,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Self::EqualInterval => "equal_interval",
            Self::Percentile => "percentile",
            Self::Quantile => "quantile",
            Self::StandardDeviation => "standard_deviation",
            Self::ManualInterval => "manual_interval",
            Self::PrettyBreaks => "pretty_breaks",
            Self::MaximumBreaks => "maximum_breaks",
            Self::HeadTailBreaks => "head_tail_breaks",
            Self::CkMeans => "ck_means",
            Self::BoxPlot => "box_plot",
            Self::DefinedInterval => "defined_interval",
            Self::ExponentialBinSizes => "exponential_bin_sizes",
            Self::GeometricInterval => "geometric_interval",
            Self::FisherJenks => "fisher_jenks",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.id() == id)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::EqualInterval => "Equal Interval",
            Self::Percentile => "Percentile",
            Self::Quantile => "Quantile",
            Self::StandardDeviation => "Standard Deviation",
            Self::ManualInterval => "Manual Interval",
            Self::PrettyBreaks => "Pretty Breaks",
            Self::MaximumBreaks => "Maximum Breaks",
            Self::HeadTailBreaks => "Head/Tail Breaks",
            Self::CkMeans => "CK-Means",
            Self::BoxPlot => "Box Plot",
            Self::DefinedInterval => "Defined Interval",
            Self::ExponentialBinSizes => "Exponential Bin Sizes",
            Self::GeometricInterval => "Geometric Interval",
            Self::FisherJenks => "Fisher-Jenks",
        }
    }

    pub fn category(&self) -> MethodCategory {
        match self {
            Self::EqualInterval
            | Self::DefinedInterval
            | Self::ExponentialBinSizes
            | Self::GeometricInterval => MethodCategory::Interval,
            Self::Percentile | Self::Quantile | Self::StandardDeviation | Self::BoxPlot => {
                MethodCategory::Statistical
            }
            Self::MaximumBreaks | Self::HeadTailBreaks | Self::CkMeans | Self::FisherJenks => {
                MethodCategory::Iterative
            }
            Self::ManualInterval | Self::PrettyBreaks => MethodCategory::HumanCentered,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::EqualInterval => "Divides the data range into classes of equal width.",
            Self::Percentile => "Breaks at the 1st, 10th, 50th, 90th and 99th percentiles.",
            Self::Quantile => "Places an equal number of observations in each class.",
            Self::StandardDeviation => "Classes one standard deviation wide, centred on the mean.",
            Self::ManualInterval => "Breaks supplied by the user.",
            Self::PrettyBreaks => "Equal-width classes with round break values.",
            Self::MaximumBreaks => "Breaks at the largest gaps between sorted values.",
            Self::HeadTailBreaks => "Recursively splits the head of heavy-tailed data at the mean.",
            Self::CkMeans => "Optimal one-dimensional k-means clustering.",
            Self::BoxPlot => "Breaks at the box plot hinges and 1.5 IQR fences.",
            Self::DefinedInterval => "Classes of a fixed, user-defined width.",
            Self::ExponentialBinSizes => "Class widths grow geometrically across the range.",
            Self::GeometricInterval => "Breaks follow a geometric progression over the range.",
            Self::FisherJenks => "Natural breaks minimising within-class variance.",
        }
    }

    /// Whether the family keeps the library's own rounding of breaks
    pub fn keeps_library_rounding(&self) -> bool {
        matches!(self, Self::PrettyBreaks)
    }

    /// Whether the family decides its own number of classes
    pub fn has_intrinsic_bin_count(&self) -> bool {
        matches!(
            self,
            Self::Percentile
                | Self::PrettyBreaks
                | Self::HeadTailBreaks
                | Self::BoxPlot
                | Self::DefinedInterval
        )
    }

    /// Whether repeated runs on the same data may disagree
    pub fn is_randomized(&self) -> bool {
        matches!(self, Self::ManualInterval)
    }
}

impl fmt::Display for Classifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
