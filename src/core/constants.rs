//! Physical constants and default sector parameters

/// Mean Earth radius used for great-circle distances (m)
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Default sector centre: Pitalito, Huila
pub const DEFAULT_SECTOR_LATITUDE: f64 = 1.8537;
pub const DEFAULT_SECTOR_LONGITUDE: f64 = -76.0515;

/// Default truck movement radius around the sector centre (degrees, ~1 km)
pub const DEFAULT_MOVEMENT_RADIUS_DEG: f64 = 0.01;

/// Default distance below which the user is notified (m)
pub const DEFAULT_PROXIMITY_THRESHOLD_M: f64 = 500.0;

/// Location update cadence
pub const DEFAULT_UPDATE_INTERVAL_MS: u64 = 5000;
pub const DEFAULT_UPDATE_DISTANCE_M: f64 = 10.0;

/// Display refresh period for the rendered truck
pub const DEFAULT_DISPLAY_REFRESH_MS: u64 = 5000;

/// Map span shown around the user on first render (degrees)
pub const DEFAULT_MAP_SPAN_DEG: f64 = 0.05;
