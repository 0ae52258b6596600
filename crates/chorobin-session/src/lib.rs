//! Orchestration for a choropleth binning session
//!
//! [`Session`] ties the workspace together: it owns the
//! [`MethodRegistry`](chorobin_scale::MethodRegistry), the active sample and
//! the [`SessionConfig`], recomputes every method's scale and bin sizes when
//! the attribute, bin count or color scheme changes, keeps the resiliency
//! report current and seeds the manual bin editor.
//!
//! Everything runs synchronously. Work finishing elsewhere is handed back
//! through [`Session::complete`] with the [`GenerationTicket`] taken when it
//! was started; completions from an older generation are dropped.
//!
//! # Example
//!
//! ```rust
//! use chorobin_core::{Classifier, MethodId, Sample};
//! use chorobin_session::{Session, SessionConfig};
//!
//! let config = SessionConfig::builder().bin_count(3).seed(7).build();
//! let mut session = Session::new(config);
//! session.load_sample("rate", Sample::from_values(&[1.0, 2.0, 3.0, 4.0, 5.0, 100.0]));
//!
//! let quantile = MethodId::from(Classifier::Quantile);
//! assert_eq!(session.bin_sizes_of(&quantile).unwrap().total(), 6);
//!
//! let ticket = session.ticket();
//! session.set_bin_count(4);
//! assert_eq!(session.complete(&ticket, |s| s.generation()), None);
//! ```

pub mod config;
pub mod session;
pub mod ticket;

pub use config::{
    SessionConfig, SessionConfigBuilder, DEFAULT_BIN_COUNT, DEFAULT_SCHEME, MAX_BIN_COUNT,
    MIN_BIN_COUNT,
};
pub use session::{scale_color, Session};
pub use ticket::{GenerationCounter, GenerationTicket};

pub use chorobin_core::{Error, Result};
