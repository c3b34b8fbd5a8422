//! Core data types for the proximity alert system

use serde::{Deserialize, Serialize};

/// Geographic coordinate in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Whether the coordinate lies inside the valid latitude/longitude ranges
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Location fix delivered by the host platform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationSample {
    pub coordinate: Coordinate,
    /// Milliseconds since the Unix epoch
    pub timestamp_ms: u64,
}

impl LocationSample {
    pub fn new(coordinate: Coordinate, timestamp_ms: u64) -> Self {
        Self { coordinate, timestamp_ms }
    }
}

/// Content of a local notification handed to the dispatcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    pub title: String,
    pub body: String,
}

impl NotificationRequest {
    /// Standard "truck is near" alert for the given threshold
    pub fn truck_nearby(threshold_m: f64) -> Self {
        Self {
            title: "🚛 El camión está cerca".to_string(),
            body: format!("El camión pasó a menos de {}m de tu ubicación.", threshold_m),
        }
    }
}
