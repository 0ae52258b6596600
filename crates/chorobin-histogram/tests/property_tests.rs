//! Property-based tests for bin assignment
//!
//! Assignment must be monotone in the value for any scale, and the histogram
//! must account for every valid value exactly once.

use chorobin_core::{Sample, Scale, SchemeRef};
use chorobin_histogram::{assign, assign_all, histogram, BinAssigner};
use proptest::prelude::*;

fn arb_breaks() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1000.0..1000.0f64, 0..12)
}

fn arb_cell() -> impl Strategy<Value = Option<f64>> {
    prop_oneof![
        4 => (-2000.0..2000.0f64).prop_map(Some),
        1 => Just(None),
        1 => Just(Some(f64::NAN)),
    ]
}

proptest! {
    #[test]
    fn prop_assign_is_monotone(breaks in arb_breaks(), a in -2000.0..2000.0f64, b in -2000.0..2000.0f64) {
        let scale = Scale::threshold(breaks, SchemeRef::new("viridis"));
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(assign(&scale, lo) <= assign(&scale, hi));
    }

    #[test]
    fn prop_bin_ids_in_range(breaks in arb_breaks(), v in -2000.0..2000.0f64) {
        let scale = Scale::threshold(breaks, SchemeRef::new("viridis"));
        let bin = assign(&scale, v);
        prop_assert!(bin >= 1);
        prop_assert!(bin <= scale.bin_count());
    }

    #[test]
    fn prop_breaks_strictly_increasing(breaks in arb_breaks()) {
        let scale = Scale::threshold(breaks, SchemeRef::new("viridis"));
        prop_assert!(scale.breaks().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn prop_histogram_sums_to_valid_count(breaks in arb_breaks(), cells in prop::collection::vec(arb_cell(), 0..200)) {
        let scale = Scale::threshold(breaks, SchemeRef::new("viridis"));
        let sample = Sample::new(cells.iter().enumerate().map(|(i, c)| (i.to_string(), *c)));

        let sizes = histogram(&scale, &sample);
        prop_assert_eq!(sizes.total(), sample.valid_count());
        prop_assert!(sizes.iter().all(|(_, count)| count > 0));

        let per_position = assign_all(&scale, &sample);
        prop_assert_eq!(per_position.len(), sample.len());
        for (slot, entry) in per_position.iter().zip(sample.entries()) {
            prop_assert_eq!(slot.is_some(), entry.is_valid());
        }
    }

    #[test]
    fn prop_value_on_break_goes_up(breaks in prop::collection::vec(-1000.0..1000.0f64, 1..12)) {
        let scale = Scale::threshold(breaks, SchemeRef::new("viridis"));
        for (i, b) in scale.breaks().iter().enumerate() {
            prop_assert_eq!(scale.assign(*b), i + 2);
        }
    }
}
