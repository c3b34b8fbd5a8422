//! Truck position generators
//!
//! The truck has no telemetry feed. Its position is drawn around the sector
//! centre each time somebody asks for it. Draws are memoryless: two
//! consecutive positions can be anywhere in the sector relative to each
//! other.

use crate::core::Coordinate;
use crate::utils::SectorConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Arc, Mutex, MutexGuard};

/// Source of tracked-entity positions
pub trait PositionSource {
    /// Next position of the truck inside `sector`
    fn next_position(&mut self, sector: &SectorConfig) -> Coordinate;
}

/// Uniform random offsets around the sector centre.
///
/// Latitude and longitude are drawn independently, each in the open interval
/// `(-radius, +radius)` degrees.
#[derive(Debug, Clone)]
pub struct RandomWalkSimulator {
    rng: StdRng,
}

impl RandomWalkSimulator {
    /// Simulator seeded from OS entropy
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic simulator
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn offset(&mut self, radius: f64) -> f64 {
        // gen_range is half-open; drop the lower bound to keep the interval open
        loop {
            let offset = self.rng.gen_range(-radius..radius);
            if offset > -radius {
                return offset;
            }
        }
    }
}

impl Default for RandomWalkSimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl PositionSource for RandomWalkSimulator {
    fn next_position(&mut self, sector: &SectorConfig) -> Coordinate {
        let center = sector.center();
        let radius = sector.movement_radius_deg();
        let latitude = center.latitude + self.offset(radius);
        let longitude = center.longitude + self.offset(radius);
        Coordinate::new(latitude, longitude)
    }
}

/// Always reports the same position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPosition(pub Coordinate);

impl PositionSource for FixedPosition {
    fn next_position(&mut self, _sector: &SectorConfig) -> Coordinate {
        self.0
    }
}

struct SharedTrack {
    source: Box<dyn PositionSource + Send>,
    latest: Option<Coordinate>,
}

/// Cloneable handle that routes every draw through one underlying source.
///
/// Clones handed to the display timer and to the background handler see a
/// single truck trajectory, and `latest` reports whichever draw came last.
#[derive(Clone)]
pub struct SharedPositionSource {
    inner: Arc<Mutex<SharedTrack>>,
}

impl SharedPositionSource {
    pub fn new(source: Box<dyn PositionSource + Send>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(SharedTrack {
                source,
                latest: None,
            })),
        }
    }

    /// Most recent position drawn by any clone
    pub fn latest(&self) -> Option<Coordinate> {
        self.track().latest
    }

    /// Swap the underlying source for every clone at once
    pub fn replace_source(&self, source: Box<dyn PositionSource + Send>) {
        let mut track = self.track();
        track.source = source;
        track.latest = None;
    }

    fn track(&self) -> MutexGuard<'_, SharedTrack> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl PositionSource for SharedPositionSource {
    fn next_position(&mut self, sector: &SectorConfig) -> Coordinate {
        let mut track = self.track();
        let position = track.source.next_position(sector);
        track.latest = Some(position);
        position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pitalito() -> SectorConfig {
        SectorConfig::new(Coordinate::new(1.8537, -76.0515), 0.01, 500.0).unwrap()
    }

    #[test]
    fn test_draws_stay_inside_sector() {
        let sector = pitalito();
        let mut simulator = RandomWalkSimulator::new();
        let eps = 1e-9;

        for _ in 0..10_000 {
            let position = simulator.next_position(&sector);
            assert!(
                position.latitude >= 1.8437 - eps && position.latitude <= 1.8637 + eps,
                "latitude {} out of sector",
                position.latitude
            );
            assert!(
                position.longitude >= -76.0615 - eps && position.longitude <= -76.0415 + eps,
                "longitude {} out of sector",
                position.longitude
            );
        }
    }

    #[test]
    fn test_offsets_are_strictly_inside_radius() {
        let sector = pitalito();
        let mut simulator = RandomWalkSimulator::with_seed(7);
        for _ in 0..1_000 {
            let position = simulator.next_position(&sector);
            assert!((position.latitude - 1.8537).abs() < 0.01 + 1e-12);
            assert!((position.longitude + 76.0515).abs() < 0.01 + 1e-12);
        }
    }

    #[test]
    fn test_widest_accepted_sector_yields_valid_coordinates() {
        let sector = SectorConfig::new(Coordinate::new(0.0, 0.0), 90.0, 500.0).unwrap();
        let mut simulator = RandomWalkSimulator::with_seed(5);
        for _ in 0..1_000 {
            assert!(simulator.next_position(&sector).is_valid());
        }
    }

    #[test]
    fn test_seeded_simulators_repeat() {
        let sector = pitalito();
        let mut a = RandomWalkSimulator::with_seed(42);
        let mut b = RandomWalkSimulator::with_seed(42);
        for _ in 0..10 {
            assert_eq!(a.next_position(&sector), b.next_position(&sector));
        }
    }

    #[test]
    fn test_draws_are_not_constant() {
        let sector = pitalito();
        let mut simulator = RandomWalkSimulator::with_seed(1);
        let first = simulator.next_position(&sector);
        let moved = (0..10).any(|_| simulator.next_position(&sector) != first);
        assert!(moved);
    }

    #[test]
    fn test_fixed_position() {
        let here = Coordinate::new(1.85, -76.05);
        let mut source = FixedPosition(here);
        assert_eq!(source.next_position(&pitalito()), here);
    }

    #[test]
    fn test_shared_source_reports_latest_draw() {
        let sector = pitalito();
        let shared = SharedPositionSource::new(Box::new(RandomWalkSimulator::with_seed(3)));
        let mut display = shared.clone();
        let mut evaluation = shared.clone();
        assert!(shared.latest().is_none());

        let shown = display.next_position(&sector);
        assert_eq!(shared.latest(), Some(shown));

        let evaluated = evaluation.next_position(&sector);
        assert_eq!(shared.latest(), Some(evaluated));

        // One stream: the second draw matches a lone simulator's second draw
        let mut lone = RandomWalkSimulator::with_seed(3);
        lone.next_position(&sector);
        assert_eq!(lone.next_position(&sector), evaluated);
    }

    #[test]
    fn test_replace_source_reaches_existing_clones() {
        let sector = pitalito();
        let shared = SharedPositionSource::new(Box::new(RandomWalkSimulator::with_seed(3)));
        let mut handed_out = shared.clone();
        handed_out.next_position(&sector);

        let here = Coordinate::new(1.85, -76.05);
        shared.replace_source(Box::new(FixedPosition(here)));
        assert!(shared.latest().is_none());
        assert_eq!(handed_out.next_position(&sector), here);
        assert_eq!(shared.latest(), Some(here));
    }
}
