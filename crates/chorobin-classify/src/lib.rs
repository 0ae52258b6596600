//! Break computation for choropleth classification families
//!
//! This crate provides the [`ClassificationLibrary`] seam the scale resolver
//! delegates to, and [`BreakLibrary`], a built-in implementation covering
//! every family in the method catalog.
//!
//! # Families
//!
//! - **Interval**: equal interval, defined interval, exponential bin sizes,
//!   geometric interval
//! - **Statistical**: percentile, quantile, standard deviation, box plot
//! - **Iterative**: maximum breaks, head/tail breaks, CK-means, Fisher-Jenks
//! - **Human-centered**: pretty breaks, manual interval
//!
//! # Example
//!
//! ```rust
//! use chorobin_classify::{BreakLibrary, BreakParams, ClassificationLibrary};
//! use chorobin_core::Classifier;
//!
//! let values = vec![1.0, 1.5, 2.0, 10.0, 10.5, 11.0, 30.0, 31.0, 32.0];
//! let breaks = BreakLibrary
//!     .compute_breaks(Classifier::CkMeans, &values, 3, &BreakParams::default())
//!     .unwrap();
//! assert_eq!(breaks, vec![10.0, 30.0]);
//! ```

pub mod families;
pub mod library;
pub mod params;
pub mod sorted;
pub mod traits;

pub use library::BreakLibrary;
pub use params::BreakParams;
pub use traits::ClassificationLibrary;

pub use chorobin_core::{Error, Result};
