//! Configuration utilities

pub mod config;

pub use config::{
    ConfigError, ConfigurationManager, LogLevel, NotificationPolicy, SectorConfig, TrackingConfig,
};
