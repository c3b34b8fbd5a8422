//! Platform error types and handling

use std::fmt;

/// Permission tiers requested from the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PermissionTier {
    /// Location while the app is visible
    ForegroundLocation,
    /// Location while the app is suspended or terminated
    BackgroundLocation,
    /// Posting local notifications
    Notifications,
}

impl fmt::Display for PermissionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PermissionTier::ForegroundLocation => write!(f, "foreground location"),
            PermissionTier::BackgroundLocation => write!(f, "background location"),
            PermissionTier::Notifications => write!(f, "notifications"),
        }
    }
}

/// Errors reported by the host platform
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformError {
    /// The user refused a permission prompt
    PermissionDenied { tier: PermissionTier },
    /// No position fix could be obtained
    LocationUnavailable { reason: String },
    /// A background location batch arrived as an error
    DeliveryFailed { reason: String },
    /// The notification center refused the request
    DispatchRejected { reason: String },
    /// The location-update subscription could not be registered
    SubscriptionFailed { reason: String },
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformError::PermissionDenied { tier } => {
                write!(f, "Permission denied: {}", tier)
            }
            PlatformError::LocationUnavailable { reason } => {
                write!(f, "Location unavailable: {}", reason)
            }
            PlatformError::DeliveryFailed { reason } => {
                write!(f, "Location delivery failed: {}", reason)
            }
            PlatformError::DispatchRejected { reason } => {
                write!(f, "Notification dispatch rejected: {}", reason)
            }
            PlatformError::SubscriptionFailed { reason } => {
                write!(f, "Location subscription failed: {}", reason)
            }
        }
    }
}

impl std::error::Error for PlatformError {}

/// Result type for platform operations
pub type PlatformResult<T> = Result<T, PlatformError>;
