//! Break computation per classification family
//!
//! Every function takes ascending-sorted, finite, non-empty data.

mod human;
mod interval;
mod iterative;
mod statistical;

pub use human::{manual_interval, pretty_breaks};
pub use interval::{defined_interval, equal_interval, exponential_bin_sizes, geometric_interval};
pub use iterative::{ck_means, fisher_jenks, head_tail_breaks, maximum_breaks};
pub use statistical::{box_plot, percentile, quantile, standard_deviation};
