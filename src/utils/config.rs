use crate::core::{
    Coordinate, DEFAULT_DISPLAY_REFRESH_MS, DEFAULT_MOVEMENT_RADIUS_DEG,
    DEFAULT_PROXIMITY_THRESHOLD_M, DEFAULT_SECTOR_LATITUDE, DEFAULT_SECTOR_LONGITUDE,
};
use crate::platform::LocationUpdateOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Geographic sector the truck moves in, and the alert distance.
///
/// Radius and threshold are strictly positive, and `center ± radius` stays
/// on the globe; the value is read-only once built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SectorConfigData")]
pub struct SectorConfig {
    center: Coordinate,
    movement_radius_deg: f64,
    proximity_threshold_m: f64,
}

/// Unchecked on-disk form of [`SectorConfig`]
#[derive(Debug, Clone, Deserialize)]
struct SectorConfigData {
    center: Coordinate,
    movement_radius_deg: f64,
    proximity_threshold_m: f64,
}

impl TryFrom<SectorConfigData> for SectorConfig {
    type Error = ConfigError;

    fn try_from(data: SectorConfigData) -> Result<Self, Self::Error> {
        SectorConfig::new(data.center, data.movement_radius_deg, data.proximity_threshold_m)
    }
}

impl SectorConfig {
    pub fn new(
        center: Coordinate,
        movement_radius_deg: f64,
        proximity_threshold_m: f64,
    ) -> Result<Self, ConfigError> {
        if !center.is_valid() {
            return Err(ConfigError::InvalidParameter {
                parameter: "center".to_string(),
                value: format!("({}, {})", center.latitude, center.longitude),
                reason: "Latitude must be within [-90, 90] and longitude within [-180, 180]".to_string(),
            });
        }
        if !(movement_radius_deg.is_finite() && movement_radius_deg > 0.0) {
            return Err(ConfigError::InvalidParameter {
                parameter: "movement_radius_deg".to_string(),
                value: movement_radius_deg.to_string(),
                reason: "Movement radius must be a positive number of degrees".to_string(),
            });
        }
        // Every draw must stay a valid coordinate
        if center.latitude - movement_radius_deg < -90.0
            || center.latitude + movement_radius_deg > 90.0
            || center.longitude - movement_radius_deg < -180.0
            || center.longitude + movement_radius_deg > 180.0
        {
            return Err(ConfigError::InvalidParameter {
                parameter: "movement_radius_deg".to_string(),
                value: movement_radius_deg.to_string(),
                reason: "Movement radius takes the sector outside [-90, 90] / [-180, 180]".to_string(),
            });
        }
        if !(proximity_threshold_m.is_finite() && proximity_threshold_m > 0.0) {
            return Err(ConfigError::InvalidParameter {
                parameter: "proximity_threshold_m".to_string(),
                value: proximity_threshold_m.to_string(),
                reason: "Proximity threshold must be a positive distance in meters".to_string(),
            });
        }

        Ok(Self {
            center,
            movement_radius_deg,
            proximity_threshold_m,
        })
    }

    pub fn center(&self) -> Coordinate {
        self.center
    }

    pub fn movement_radius_deg(&self) -> f64 {
        self.movement_radius_deg
    }

    pub fn proximity_threshold_m(&self) -> f64 {
        self.proximity_threshold_m
    }
}

impl Default for SectorConfig {
    fn default() -> Self {
        Self {
            center: Coordinate::new(DEFAULT_SECTOR_LATITUDE, DEFAULT_SECTOR_LONGITUDE),
            movement_radius_deg: DEFAULT_MOVEMENT_RADIUS_DEG,
            proximity_threshold_m: DEFAULT_PROXIMITY_THRESHOLD_M,
        }
    }
}

/// When an in-range evaluation produces a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum NotificationPolicy {
    /// Every in-range update notifies, even if the previous one did
    #[default]
    EveryUpdate,
    /// Only the out-of-range to in-range edge notifies
    OnEnter,
}

/// Logging levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LogLevel {
    /// No logging
    None,
    /// Error messages only
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and info messages
    #[default]
    Info,
    /// All messages including debug
    Debug,
}

impl LogLevel {
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::None => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
        }
    }
}

/// Process-wide tracking configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingConfig {
    /// Truck sector and alert distance
    pub sector: SectorConfig,
    /// Location subscription settings handed to the platform
    pub location_updates: LocationUpdateOptions,
    /// Period of the rendered truck refresh (milliseconds)
    pub display_refresh_interval_ms: u64,
    /// Notification deduplication policy
    #[serde(default)]
    pub notification_policy: NotificationPolicy,
    /// Render and evaluate the truck from a single position stream
    #[serde(default)]
    pub shared_entity_track: bool,
    /// Default log filter for the binary
    #[serde(default)]
    pub log_level: LogLevel,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            sector: SectorConfig::default(),
            location_updates: LocationUpdateOptions::default(),
            display_refresh_interval_ms: DEFAULT_DISPLAY_REFRESH_MS,
            notification_policy: NotificationPolicy::default(),
            shared_entity_track: false,
            log_level: LogLevel::default(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Invalid parameter value
    InvalidParameter { parameter: String, value: String, reason: String },
    /// Configuration file I/O error
    IoError { message: String },
    /// JSON serialization/deserialization error
    SerializationError { message: String },
}

/// Loads, validates and saves the tracking configuration
#[derive(Debug, Default)]
pub struct ConfigurationManager {
    config: TrackingConfig,
    config_file_path: Option<String>,
}

impl ConfigurationManager {
    /// Create a new configuration manager with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create configuration manager and load from file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut manager = Self::new();
        manager.load_from_file(path)?;
        Ok(manager)
    }

    pub fn config(&self) -> &TrackingConfig {
        &self.config
    }

    pub fn file_path(&self) -> Option<&str> {
        self.config_file_path.as_deref()
    }

    /// Replace the configuration after validating it
    pub fn update_config(&mut self, config: TrackingConfig) -> Result<(), ConfigError> {
        Self::validate(&config)?;
        self.config = config;
        Ok(())
    }

    /// Load configuration from JSON file
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ConfigError> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let content = fs::read_to_string(&path).map_err(|e| ConfigError::IoError {
            message: format!("Failed to read config file '{}': {}", path_str, e),
        })?;

        let config: TrackingConfig =
            serde_json::from_str(&content).map_err(|e| ConfigError::SerializationError {
                message: format!("Failed to parse config file '{}': {}", path_str, e),
            })?;

        // Validate before applying
        Self::validate(&config)?;

        log::debug!("Loaded tracking configuration from {}", path_str);
        self.config = config;
        self.config_file_path = Some(path_str);
        Ok(())
    }

    /// Save configuration to JSON file
    pub fn save_to_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ConfigError> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let content = serde_json::to_string_pretty(&self.config).map_err(|e| {
            ConfigError::SerializationError {
                message: format!("Failed to serialize config: {}", e),
            }
        })?;

        fs::write(&path, content).map_err(|e| ConfigError::IoError {
            message: format!("Failed to write config file '{}': {}", path_str, e),
        })?;

        self.config_file_path = Some(path_str);
        Ok(())
    }

    /// Check the parts of the configuration not enforced by construction
    pub fn validate(config: &TrackingConfig) -> Result<(), ConfigError> {
        // Re-run the sector checks; a default or hand-built value may bypass serde
        let sector = &config.sector;
        SectorConfig::new(
            sector.center(),
            sector.movement_radius_deg(),
            sector.proximity_threshold_m(),
        )?;

        if config.display_refresh_interval_ms == 0 {
            return Err(ConfigError::InvalidParameter {
                parameter: "display_refresh_interval_ms".to_string(),
                value: "0".to_string(),
                reason: "Refresh interval must be greater than zero".to_string(),
            });
        }

        let updates = &config.location_updates;
        if updates.min_time_interval_ms == 0 {
            return Err(ConfigError::InvalidParameter {
                parameter: "location_updates.min_time_interval_ms".to_string(),
                value: "0".to_string(),
                reason: "Update interval must be greater than zero".to_string(),
            });
        }
        if !(updates.min_distance_m.is_finite() && updates.min_distance_m >= 0.0) {
            return Err(ConfigError::InvalidParameter {
                parameter: "location_updates.min_distance_m".to_string(),
                value: updates.min_distance_m.to_string(),
                reason: "Minimum displacement must be a non-negative distance".to_string(),
            });
        }

        Ok(())
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidParameter { parameter, value, reason } => {
                write!(f, "Invalid parameter '{}' = '{}': {}", parameter, value, reason)
            }
            ConfigError::IoError { message } => {
                write!(f, "I/O error: {}", message)
            }
            ConfigError::SerializationError { message } => {
                write!(f, "Serialization error: {}", message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_config_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("truck_proximity_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_default_tracking_config() {
        let config = TrackingConfig::default();
        assert_eq!(config.sector.center(), Coordinate::new(1.8537, -76.0515));
        assert_eq!(config.sector.movement_radius_deg(), 0.01);
        assert_eq!(config.sector.proximity_threshold_m(), 500.0);
        assert_eq!(config.display_refresh_interval_ms, 5000);
        assert_eq!(config.notification_policy, NotificationPolicy::EveryUpdate);
        assert!(!config.shared_entity_track);
        assert!(ConfigurationManager::validate(&config).is_ok());
    }

    #[test]
    fn test_sector_rejects_non_positive_values() {
        let center = Coordinate::new(1.8537, -76.0515);
        assert!(SectorConfig::new(center, 0.0, 500.0).is_err());
        assert!(SectorConfig::new(center, -0.01, 500.0).is_err());
        assert!(SectorConfig::new(center, 0.01, 0.0).is_err());
        assert!(SectorConfig::new(center, 0.01, f64::NAN).is_err());
        assert!(SectorConfig::new(Coordinate::new(95.0, 0.0), 0.01, 500.0).is_err());
        assert!(SectorConfig::new(center, 0.01, 500.0).is_ok());
    }

    #[test]
    fn test_sector_rejects_radius_leaving_valid_range() {
        let origin = Coordinate::new(0.0, 0.0);
        assert!(SectorConfig::new(origin, 1e308, 500.0).is_err());
        assert!(SectorConfig::new(origin, 200.0, 500.0).is_err());
        assert!(SectorConfig::new(origin, 90.0, 500.0).is_ok());
        assert!(SectorConfig::new(Coordinate::new(89.995, 0.0), 0.01, 500.0).is_err());
        assert!(SectorConfig::new(Coordinate::new(0.0, 179.995), 0.01, 500.0).is_err());

        let mut value = serde_json::to_value(TrackingConfig::default()).unwrap();
        value["sector"]["movement_radius_deg"] = serde_json::json!(1e308);
        let result: Result<TrackingConfig, _> = serde_json::from_value(value);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_sector_in_json_is_rejected() {
        let mut value = serde_json::to_value(TrackingConfig::default()).unwrap();
        value["sector"]["proximity_threshold_m"] = serde_json::json!(-1.0);

        let result: Result<TrackingConfig, _> = serde_json::from_value(value);
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_refresh_interval_rejected() {
        let mut manager = ConfigurationManager::new();
        let config = TrackingConfig {
            display_refresh_interval_ms: 0,
            ..TrackingConfig::default()
        };

        let err = manager.update_config(config).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidParameter { ref parameter, .. } if parameter == "display_refresh_interval_ms"));
    }

    #[test]
    fn test_config_serialization() {
        let mut manager = ConfigurationManager::new();
        let config = TrackingConfig {
            notification_policy: NotificationPolicy::OnEnter,
            shared_entity_track: true,
            log_level: LogLevel::Debug,
            ..TrackingConfig::default()
        };
        manager.update_config(config.clone()).unwrap();

        let temp_path = temp_config_path("roundtrip");
        manager.save_to_file(&temp_path).unwrap();
        let loaded = ConfigurationManager::from_file(&temp_path).unwrap();

        assert_eq!(loaded.config(), &config);
        assert_eq!(loaded.file_path(), Some(temp_path.to_string_lossy().as_ref()));

        let _ = fs::remove_file(temp_path);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = ConfigurationManager::from_file(temp_config_path("does_not_exist")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError { .. }));
    }

    #[test]
    fn test_log_level_mapping() {
        assert_eq!(LogLevel::None.to_level_filter(), log::LevelFilter::Off);
        assert_eq!(LogLevel::Debug.to_level_filter(), log::LevelFilter::Debug);
    }
}
