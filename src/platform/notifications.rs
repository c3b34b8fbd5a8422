//! Notification dispatch trait

use crate::core::NotificationRequest;
use crate::platform::{PermissionStatus, PlatformResult};

/// When the host should present a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationTrigger {
    /// Present as soon as it is accepted
    Immediate,
}

/// Host notification center.
///
/// Shared between the foreground session and the background handler, so
/// implementations take `&self` and synchronize internally.
pub trait NotificationDispatcher: Send + Sync {
    /// Ask for permission to post notifications
    fn request_permission(&self) -> PlatformResult<PermissionStatus>;

    /// Hand a notification to the host. Returns once it is accepted; the
    /// host's delivery outcome is not reported back.
    fn dispatch(&self, request: NotificationRequest, trigger: NotificationTrigger) -> PlatformResult<()>;
}
