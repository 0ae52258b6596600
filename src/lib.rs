//! Choropleth binning toolkit
//!
//! `chorobin` re-exports the workspace crates behind one facade:
//!
//! - [`base`]: samples, scales, colors, method ids and the error type
//! - [`histogram`]: bin assignment and bin size counting
//! - [`classify`]: break computation for every classification family
//! - [`scale`]: the method registry and the scale resolver
//! - [`consistency`]: cross-method modal bins (resiliency)
//! - [`editor`]: interactive manual bin editing
//! - [`session`]: the orchestrating session
//!
//! # Example
//!
//! ```rust
//! use chorobin::prelude::*;
//!
//! let sample = Sample::from_values(&[3.1, 6.8, 4.4, 2.9, 5.2, 7.7, 3.6, 12.4]);
//! let mut session = Session::new(SessionConfig::builder().bin_count(4).seed(3).build());
//! session.load_sample("unemployment", sample);
//!
//! let jenks = MethodId::from(Classifier::FisherJenks);
//! assert_eq!(session.scale_of(&jenks).unwrap().bin_count(), 4);
//! assert_eq!(session.report().len(), 8);
//! ```

pub use chorobin_classify as classify;
pub use chorobin_consistency as consistency;
pub use chorobin_core as base;
pub use chorobin_editor as editor;
pub use chorobin_histogram as histogram;
pub use chorobin_scale as scale;
pub use chorobin_session as session;

pub use chorobin_core::{Error, Result};

/// Commonly used types
pub mod prelude {
    pub use chorobin_classify::{BreakLibrary, BreakParams, ClassificationLibrary};
    pub use chorobin_consistency::{ConsistencyAnalyzer, ConsistencyRecord, ConsistencyReport};
    pub use chorobin_core::{
        BinId, Classifier, Color, ColorScheme, DataShape, Error, ManualBin, ManualBinSet,
        MethodCategory, MethodId, Result, Sample, Scale, SchemeRef,
    };
    pub use chorobin_editor::{BoundaryDirection, ManualBinEditor};
    pub use chorobin_histogram::{assign, histogram, BinAssigner, BinSizes};
    pub use chorobin_scale::{MethodDescriptor, MethodFilter, MethodRegistry, ScaleResolver};
    pub use chorobin_session::{GenerationTicket, Session, SessionConfig};
}
