//! Core types for choropleth binning
//!
//! This crate provides the shared vocabulary every other chorobin crate is
//! written against: the attribute [`Sample`], [`Scale`]s, method identifiers,
//! colors and schemes, the [`ManualBinSet`] edited interactively, and the
//! error taxonomy.
//!
//! # Example
//!
//! ```rust
//! use chorobin_core::{Sample, Scale, SchemeRef};
//!
//! let sample = Sample::new(vec![("a", 1.0), ("b", 4.0), ("c", f64::NAN)]);
//! assert_eq!(sample.valid_count(), 2);
//!
//! let scale = Scale::threshold(vec![4.0, 2.0], SchemeRef::new("viridis"));
//! assert_eq!(scale.breaks(), &[2.0, 4.0]);
//! assert_eq!(scale.bin_count(), 3);
//! ```

pub mod bins;
pub mod color;
pub mod error;
pub mod method;
pub mod sample;
pub mod scale;

pub use bins::{ManualBin, ManualBinSet};
pub use color::{class_offset, Color, ColorScheme, Interpolator, SchemeRef, GRAY_SCHEME};
pub use error::{Error, Result};
pub use method::{Classifier, MethodCategory, MethodId};
pub use sample::{DataShape, RawValue, Sample, SampleEntry, NA_TOKEN};
pub use scale::{
    normalize_breaks, round_to, threshold_index, Scale, ScaleKind, BREAK_DECIMALS,
};

/// 1-indexed bin identifier
pub type BinId = usize;
