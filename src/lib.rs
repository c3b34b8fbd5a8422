//! Collection Truck Proximity Alerts
//!
//! Notifies a user when the (simulated) garbage collection truck passes
//! within a fixed distance of their position, including while the app runs
//! in the background.

pub mod core;
pub mod algorithms;
pub mod simulation;
pub mod utils;
pub mod platform;
pub mod api;

// Re-export commonly used types
pub use crate::core::{Coordinate, LocationSample, NotificationRequest, EARTH_RADIUS_M};
pub use algorithms::{distance_meters, is_within_range};
pub use simulation::{PositionSource, RandomWalkSimulator};
pub use utils::{ConfigurationManager, NotificationPolicy, SectorConfig, TrackingConfig};
pub use api::{BackgroundUpdateHandler, DisplayState, ForegroundSession, HandlerOutcome, Readiness};
