//! Distance and proximity algorithms

pub mod geodesic;
pub mod proximity;

pub use geodesic::distance_meters;
pub use proximity::{is_within_range, within_threshold, ProximityTracker, ProximityTransition};
