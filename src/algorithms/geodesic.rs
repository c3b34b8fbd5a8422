//! Great-circle distance on a spherical Earth

use crate::core::{Coordinate, EARTH_RADIUS_M};

/// Haversine distance between two coordinates in meters.
///
/// Uses a sphere of radius [`EARTH_RADIUS_M`]. Identical points give exactly
/// zero; antipodal points give half the circumference. Inputs outside the
/// valid latitude/longitude ranges produce an unspecified result.
pub fn distance_meters(a: Coordinate, b: Coordinate) -> f64 {
    let phi1 = a.latitude.to_radians();
    let phi2 = b.latitude.to_radians();
    let delta_phi = (b.latitude - a.latitude).to_radians();
    let delta_lambda = (b.longitude - a.longitude).to_radians();

    let sin_half_phi = (delta_phi / 2.0).sin();
    let sin_half_lambda = (delta_lambda / 2.0).sin();

    let h = sin_half_phi * sin_half_phi
        + phi1.cos() * phi2.cos() * sin_half_lambda * sin_half_lambda;
    // Rounding can push h marginally outside [0, 1] near antipodes
    let h = h.clamp(0.0, 1.0);

    EARTH_RADIUS_M * 2.0 * h.sqrt().atan2((1.0 - h).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn coordinate() -> impl Strategy<Value = Coordinate> {
        (-90.0f64..=90.0, -180.0f64..=180.0).prop_map(|(lat, lon)| Coordinate::new(lat, lon))
    }

    #[test]
    fn test_origin_to_itself() {
        let origin = Coordinate::new(0.0, 0.0);
        assert_eq!(distance_meters(origin, origin), 0.0);
    }

    #[test]
    fn test_antipodal_points() {
        let d = distance_meters(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 180.0));
        assert!((d - 20_015_086.0).abs() <= 1.0, "distance was {}", d);
    }

    #[test]
    fn test_meridian_arc_matches_angle() {
        // Along a meridian the haversine reduces to R * delta_phi
        let user = Coordinate::new(1.8537, -76.0515);
        let offset_deg = (10_000.0 / EARTH_RADIUS_M).to_degrees();
        let north = Coordinate::new(user.latitude + offset_deg, user.longitude);

        let d = distance_meters(user, north);
        assert!((d - 10_000.0).abs() < 1e-3, "distance was {}", d);
    }

    #[test]
    fn test_short_distance_in_sector() {
        // 0.01 deg of latitude is roughly 1.1 km
        let a = Coordinate::new(1.8537, -76.0515);
        let b = Coordinate::new(1.8637, -76.0515);
        let d = distance_meters(a, b);
        assert!(d > 1100.0 && d < 1115.0, "distance was {}", d);
    }

    proptest! {
        #[test]
        fn prop_distance_to_self_is_zero(a in coordinate()) {
            prop_assert_eq!(distance_meters(a, a), 0.0);
        }

        #[test]
        fn prop_distance_is_symmetric(a in coordinate(), b in coordinate()) {
            prop_assert_eq!(distance_meters(a, b), distance_meters(b, a));
        }

        #[test]
        fn prop_distance_bounded_by_half_circumference(a in coordinate(), b in coordinate()) {
            let d = distance_meters(a, b);
            prop_assert!(d >= 0.0);
            prop_assert!(d <= std::f64::consts::PI * EARTH_RADIUS_M + 1e-6);
        }
    }
}
