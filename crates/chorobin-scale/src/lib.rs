//! Method registry and scale resolution
//!
//! The [`MethodRegistry`] is the ordered catalog of every method a session
//! can show: the unclassed ramp, the library-backed classifiers, the
//! resiliency pseudo-method and any user methods committed from a manual
//! partition. The [`ScaleResolver`] turns one of those descriptors into a
//! concrete [`Scale`](chorobin_core::Scale) for the current sample.
//!
//! # Example
//!
//! ```rust
//! use chorobin_core::{Classifier, MethodId, Sample, SchemeRef};
//! use chorobin_scale::{MethodRegistry, ScaleResolver};
//!
//! let registry = MethodRegistry::new();
//! let mut resolver = ScaleResolver::seeded(42);
//! let sample = Sample::from_values(&[1.0, 2.0, 3.0, 4.0, 5.0]);
//!
//! let id = MethodId::from(Classifier::EqualInterval);
//! let scale = resolver.resolve_id(&registry, &id, &sample, 2, &SchemeRef::new("viridis"));
//! assert_eq!(scale.breaks(), &[3.0]);
//! ```

pub mod descriptor;
pub mod registry;
pub mod resolver;

pub use descriptor::{MethodDescriptor, MethodStrategy};
pub use registry::{MethodFilter, MethodRegistry};
pub use resolver::{resiliency_breaks, ScaleResolver};

pub use chorobin_core::{Error, Result};
