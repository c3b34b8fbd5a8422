//! Location provider trait and subscription options

use crate::core::{LocationSample, DEFAULT_UPDATE_DISTANCE_M, DEFAULT_UPDATE_INTERVAL_MS};
use crate::platform::{PermissionStatus, PlatformError, PlatformResult};
use serde::{Deserialize, Serialize};

/// One batch of background location samples, or the error the host reported.
/// A successful batch is ordered; the first sample is the current position.
pub type LocationDelivery = Result<Vec<LocationSample>, PlatformError>;

/// Callback the host invokes for every delivery, possibly while suspended
pub type LocationCallback = Box<dyn FnMut(LocationDelivery) + Send>;

/// Host location subsystem
pub trait LocationProvider {
    /// Ask for location access while the app is visible
    fn request_foreground_permission(&mut self) -> PlatformResult<PermissionStatus>;

    /// Ask for location access while the app is suspended or terminated
    fn request_background_permission(&mut self) -> PlatformResult<PermissionStatus>;

    /// One-shot fix of the current position
    fn current_position(&mut self) -> PlatformResult<LocationSample>;

    /// Register `callback` for periodic updates. The host fires it when either
    /// the time or the distance trigger in `options` is met.
    fn start_location_updates(
        &mut self,
        options: &LocationUpdateOptions,
        callback: LocationCallback,
    ) -> PlatformResult<()>;

    /// Whether a location-update subscription is registered
    fn has_subscription(&self) -> bool;
}

/// Requested fix accuracy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AccuracyTier {
    Lowest,
    Low,
    Balanced,
    #[default]
    High,
    Highest,
}

/// Persistent notice shown while location runs as a foreground service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForegroundServiceNotice {
    pub title: String,
    pub body: String,
}

impl Default for ForegroundServiceNotice {
    fn default() -> Self {
        Self {
            title: "Rastreo en segundo plano".to_string(),
            body: "La app está rastreando tu ubicación".to_string(),
        }
    }
}

/// Location-update subscription parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationUpdateOptions {
    /// Fix accuracy requested from the host
    pub accuracy: AccuracyTier,
    /// Time trigger (milliseconds)
    pub min_time_interval_ms: u64,
    /// Distance trigger (meters)
    pub min_distance_m: f64,
    /// Show the OS background-location indicator
    pub show_background_indicator: bool,
    /// Foreground service notice
    pub foreground_service: ForegroundServiceNotice,
}

impl Default for LocationUpdateOptions {
    fn default() -> Self {
        Self {
            accuracy: AccuracyTier::High,
            min_time_interval_ms: DEFAULT_UPDATE_INTERVAL_MS,
            min_distance_m: DEFAULT_UPDATE_DISTANCE_M,
            show_background_indicator: true,
            foreground_service: ForegroundServiceNotice::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_update_options() {
        let options = LocationUpdateOptions::default();
        assert_eq!(options.accuracy, AccuracyTier::High);
        assert_eq!(options.min_time_interval_ms, 5000);
        assert_eq!(options.min_distance_m, 10.0);
        assert!(options.show_background_indicator);
        assert_eq!(options.foreground_service.title, "Rastreo en segundo plano");
    }
}
