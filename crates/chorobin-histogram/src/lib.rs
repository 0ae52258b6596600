//! Bin assignment and per-bin counts for choropleth scales
//!
//! Every valid value of a sample is mapped onto a 1-indexed bin id by walking
//! the scale's breaks. A value exactly on a break belongs to the upper bin.
//! Invalid values are skipped but keep their position, so per-position
//! results stay aligned with the sample's entity keys.
//!
//! # Examples
//!
//! ```rust
//! use chorobin_core::{Sample, Scale, SchemeRef};
//! use chorobin_histogram::{assign_all, histogram};
//!
//! let sample = Sample::from_values(&[1.0, 2.0, 3.0, 4.0, 5.0, 100.0]);
//! let scale = Scale::threshold(vec![2.0, 4.0], SchemeRef::new("viridis"));
//!
//! let bins: Vec<_> = assign_all(&scale, &sample).into_iter().flatten().collect();
//! assert_eq!(bins, vec![1, 2, 2, 3, 3, 3]);
//!
//! let sizes = histogram(&scale, &sample);
//! assert_eq!(sizes.get(1), Some(1));
//! assert_eq!(sizes.get(2), Some(2));
//! assert_eq!(sizes.get(3), Some(3));
//! ```

pub mod ops;
pub mod traits;
pub mod types;

pub use ops::{assign, assign_all, bin_extents, histogram, histogram_values};
pub use traits::BinAssigner;
pub use types::{BinExtent, BinSizes};

pub use chorobin_core::{BinId, Result};

#[cfg(test)]
mod tests {
    use super::*;
    use chorobin_core::{RawValue, Sample, Scale, SchemeRef};

    fn scale(breaks: Vec<f64>) -> Scale {
        Scale::threshold(breaks, SchemeRef::new("viridis"))
    }

    #[test]
    fn test_break_values_go_to_upper_bin() {
        let s = scale(vec![2.0, 4.0]);
        assert_eq!(assign(&s, 1.999), 1);
        assert_eq!(assign(&s, 2.0), 2);
        assert_eq!(assign(&s, 3.999), 2);
        assert_eq!(assign(&s, 4.0), 3);
        assert_eq!(assign(&s, -1e9), 1);
        assert_eq!(assign(&s, 1e9), 3);
    }

    #[test]
    fn test_histogram_is_lazily_keyed() {
        let s = scale(vec![2.0, 4.0, 50.0, 60.0]);
        let sample = Sample::from_values(&[1.0, 2.0, 3.0, 4.0, 5.0, 100.0]);
        let sizes = histogram(&s, &sample);

        assert_eq!(sizes.get(1), Some(1));
        assert_eq!(sizes.get(2), Some(2));
        assert_eq!(sizes.get(3), Some(2));
        assert_eq!(sizes.get(4), None);
        assert_eq!(sizes.get(5), Some(1));
        assert_eq!(sizes.len(), 4);
        assert_eq!(sizes.dense(5), vec![1, 2, 2, 0, 1]);
        assert_eq!(sizes.to_string(), "{1: 1, 2: 2, 3: 2, 5: 1}");
    }

    #[test]
    fn test_invalid_values_keep_position() {
        let sample = Sample::new(vec![
            ("a", RawValue::from(1.0)),
            ("b", RawValue::from("NA")),
            ("c", RawValue::from(5.0)),
            ("d", RawValue::Missing),
        ]);
        let s = scale(vec![2.0]);

        assert_eq!(assign_all(&s, &sample), vec![Some(1), None, Some(2), None]);
        let sizes = histogram(&s, &sample);
        assert_eq!(sizes.total(), sample.valid_count());
    }

    #[test]
    fn test_linear_scale_single_bin() {
        let s = Scale::linear(0.0, 10.0, SchemeRef::new("viridis"));
        let sample = Sample::from_values(&[0.0, 3.0, 10.0]);
        let sizes = histogram(&s, &sample);
        assert_eq!(sizes.get(1), Some(3));
        assert_eq!(sizes.len(), 1);
    }

    #[test]
    fn test_histogram_values_skips_non_finite() {
        let s = scale(vec![0.0]);
        let sizes = histogram_values(&s, &[-1.0, f64::NAN, 1.0, f64::INFINITY]);
        assert_eq!(sizes.total(), 2);
        assert_eq!(sizes.max_count(), 1);
    }

    #[test]
    fn test_bin_extents_widen_to_breaks() {
        let s = scale(vec![-5.0, 4.0]);
        let extents = bin_extents(&s, 1.0, 100.0);
        assert_eq!(extents.len(), 3);
        assert_eq!((extents[0].min, extents[0].max), (-5.0, -5.0));
        assert_eq!((extents[1].min, extents[1].max), (-5.0, 4.0));
        assert_eq!((extents[2].min, extents[2].max), (4.0, 100.0));
        assert!(extents.iter().all(|e| e.width() >= 0.0));

        let empty = bin_extents(&scale(vec![]), 1.0, 3.0);
        assert_eq!(empty.len(), 1);
        assert_eq!(empty[0].center(), 2.0);
    }

    #[test]
    fn test_bin_sizes_serialize_as_map() {
        let sizes: BinSizes = vec![1, 3, 3].into_iter().collect();
        let json = serde_json::to_string(&sizes).unwrap();
        assert_eq!(json, r#"{"1":1,"3":2}"#);
    }
}
