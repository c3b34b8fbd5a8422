//! Proximity decisions between the user and the tracked truck

use crate::algorithms::geodesic::distance_meters;
use crate::core::Coordinate;

/// Strict threshold comparison on an already computed distance
#[inline]
pub fn within_threshold(distance_m: f64, threshold_m: f64) -> bool {
    distance_m < threshold_m
}

/// Whether the truck is closer to the user than `threshold_m`.
///
/// Equality with the threshold does not count as in range.
pub fn is_within_range(user: Coordinate, entity: Coordinate, threshold_m: f64) -> bool {
    within_threshold(distance_meters(user, entity), threshold_m)
}

/// Change in proximity between two consecutive evaluations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProximityTransition {
    /// Was out of range, now in range
    Entered,
    /// In range on both evaluations
    Stayed,
    /// Was in range, now out of range
    Left,
    /// Out of range on both evaluations
    Outside,
}

impl ProximityTransition {
    pub fn is_in_range(&self) -> bool {
        matches!(self, ProximityTransition::Entered | ProximityTransition::Stayed)
    }
}

/// Remembers the previous in-range state to detect range edges
#[derive(Debug, Clone, Default)]
pub struct ProximityTracker {
    in_range: bool,
}

impl ProximityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new evaluation and return the transition it caused
    pub fn update(&mut self, in_range: bool) -> ProximityTransition {
        let transition = match (self.in_range, in_range) {
            (false, true) => ProximityTransition::Entered,
            (true, true) => ProximityTransition::Stayed,
            (true, false) => ProximityTransition::Left,
            (false, false) => ProximityTransition::Outside,
        };
        self.in_range = in_range;
        transition
    }
}
