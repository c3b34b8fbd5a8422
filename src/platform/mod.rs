//! Host platform abstraction layer
//!
//! The location subsystem, the notification center and the permission
//! prompts belong to the host. This module describes them as traits so the
//! proximity engine can run against a real platform binding or the mocks.

pub mod location;
pub mod notifications;
pub mod mock;
pub mod error;

pub use location::{
    AccuracyTier, ForegroundServiceNotice, LocationCallback, LocationDelivery, LocationProvider,
    LocationUpdateOptions,
};
pub use notifications::{NotificationDispatcher, NotificationTrigger};
pub use mock::{MockLocationProvider, MockNotificationDispatcher};
pub use error::{PermissionTier, PlatformError, PlatformResult};

/// Answer to a permission prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
    /// The user dismissed the prompt without answering
    Undetermined,
}

impl PermissionStatus {
    pub fn is_granted(&self) -> bool {
        matches!(self, PermissionStatus::Granted)
    }
}
