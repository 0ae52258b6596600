//! Interactive manual bin editing
//!
//! [`ManualBinEditor`] owns the live [`ManualBinSet`](chorobin_core::ManualBinSet)
//! behind the manual-interval view. Boundaries can be typed in
//! ([`set_boundary`](ManualBinEditor::set_boundary)) or painted on the map
//! ([`paint_boundary`](ManualBinEditor::paint_boundary)); painting propagates
//! the new boundary through the neighbouring bins and collapses the ones it
//! swallows. After each edit the editor derives a [`ColorThreshold`] whose
//! boundaries carry an explicit [`BoundaryNudge`], so a painted value always
//! renders in the bin it was painted into.
//!
//! # Example
//!
//! ```rust
//! use chorobin_core::{ColorScheme, Scale, SchemeRef};
//! use chorobin_editor::ManualBinEditor;
//!
//! let scheme = ColorScheme::builtin("viridis").unwrap();
//! let scale = Scale::threshold(vec![2.0, 5.0], SchemeRef::new("viridis"));
//!
//! let mut editor = ManualBinEditor::new();
//! editor.initialize_from(&scale, 0.0, 9.0, scheme).unwrap();
//!
//! let first = editor.bins().colors()[0];
//! editor.paint_boundary(4.0, first).unwrap();
//! assert_eq!(editor.breakpoints(), vec![4.0, 5.0]);
//! assert_eq!(editor.fill_for(Some(4.0)), first);
//! ```

pub mod editor;
pub mod threshold;

pub use editor::ManualBinEditor;
pub use threshold::{BoundaryDirection, BoundaryNudge, ColorThreshold, DEFAULT_NUDGE_MAGNITUDE};

pub use chorobin_core::{Error, Result};
