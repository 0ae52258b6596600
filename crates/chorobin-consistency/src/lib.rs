//! Cross-method consistency ("resiliency") for choropleth classifications
//!
//! Every selected method assigns each entity a bin id; the analyzer reports,
//! per entity, the modal bin id across methods and how many methods agreed
//! on it. Ties go to the smaller bin id. Entities whose value is invalid for
//! a method simply have no bin id for that method.
//!
//! # Example
//!
//! ```rust
//! use chorobin_consistency::ConsistencyAnalyzer;
//! use chorobin_core::{MethodId, Sample, Scale, SchemeRef};
//!
//! let sample = Sample::new(vec![("a", 1.0), ("b", 6.0)]);
//! let (m1, m2) = (MethodId::new("m1"), MethodId::new("m2"));
//! let s1 = Scale::threshold(vec![5.0], SchemeRef::new("viridis"));
//! let s2 = Scale::threshold(vec![0.5, 7.0], SchemeRef::new("viridis"));
//!
//! let analyzer = ConsistencyAnalyzer::new(vec![m1.clone(), m2.clone()]);
//! let report = analyzer.analyze(&sample, [(&m1, &s1), (&m2, &s2)]);
//! assert_eq!(report.get("b").unwrap().modal_bin_id, 2);
//! assert_eq!(report.get("b").unwrap().modal_frequency, 2);
//! ```

pub mod analyzer;
pub mod record;

pub use analyzer::{default_selection, ConsistencyAnalyzer, DEFAULT_SELECTION};
pub use record::{modal_bin, CombinedRow, ConsistencyRecord, ConsistencyReport};
