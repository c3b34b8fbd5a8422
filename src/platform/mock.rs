//! Mock platform implementations for testing and development

use crate::core::{Coordinate, LocationSample, NotificationRequest};
use crate::platform::{
    LocationCallback, LocationDelivery, LocationProvider, LocationUpdateOptions,
    NotificationDispatcher, NotificationTrigger, PermissionStatus, PermissionTier, PlatformError,
    PlatformResult,
};
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};
use std::time::{SystemTime, UNIX_EPOCH};

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

/// Mock location subsystem with scripted answers and manual delivery
pub struct MockLocationProvider {
    position: Coordinate,
    position_available: bool,
    foreground_permission: PermissionStatus,
    background_permission: PermissionStatus,
    subscription_fails: bool,
    callback: Option<LocationCallback>,
    options: Option<LocationUpdateOptions>,
    pending: VecDeque<LocationDelivery>,
    simulate_errors: bool,
    error_probability: f32,
    permission_requests: u32,
}

impl MockLocationProvider {
    /// Create a provider that grants everything and reports `position`
    pub fn new(position: Coordinate) -> Self {
        Self {
            position,
            position_available: true,
            foreground_permission: PermissionStatus::Granted,
            background_permission: PermissionStatus::Granted,
            subscription_fails: false,
            callback: None,
            options: None,
            pending: VecDeque::new(),
            simulate_errors: false,
            error_probability: 0.0,
            permission_requests: 0,
        }
    }

    pub fn with_foreground_permission(mut self, status: PermissionStatus) -> Self {
        self.foreground_permission = status;
        self
    }

    pub fn with_background_permission(mut self, status: PermissionStatus) -> Self {
        self.background_permission = status;
        self
    }

    /// Make `current_position` fail
    pub fn without_position(mut self) -> Self {
        self.position_available = false;
        self
    }

    /// Make `start_location_updates` fail
    pub fn with_failing_subscription(mut self) -> Self {
        self.subscription_fails = true;
        self
    }

    /// Move the user
    pub fn set_position(&mut self, position: Coordinate) {
        self.position = position;
    }

    /// Queue a single-sample delivery at the given coordinate
    pub fn queue_sample(&mut self, coordinate: Coordinate) {
        self.pending
            .push_back(Ok(vec![LocationSample::new(coordinate, now_ms())]));
    }

    /// Queue an error delivery
    pub fn queue_error(&mut self, reason: &str) {
        self.pending.push_back(Err(PlatformError::DeliveryFailed {
            reason: reason.to_string(),
        }));
    }

    /// Replace queued samples with errors at the given probability (0.0 to 1.0)
    pub fn simulate_errors(&mut self, enable: bool, probability: f32) {
        self.simulate_errors = enable;
        self.error_probability = probability.clamp(0.0, 1.0);
    }

    /// Invoke the registered callback with `delivery`.
    /// Returns false when nothing is subscribed.
    pub fn deliver(&mut self, delivery: LocationDelivery) -> bool {
        match self.callback.as_mut() {
            Some(callback) => {
                callback(delivery);
                true
            }
            None => false,
        }
    }

    /// Deliver the current position as a one-sample batch
    pub fn deliver_current(&mut self) -> bool {
        let sample = LocationSample::new(self.position, now_ms());
        self.deliver(Ok(vec![sample]))
    }

    /// Deliver every queued batch, returning how many reached the callback
    pub fn flush(&mut self) -> usize {
        let mut delivered = 0;
        while let Some(delivery) = self.pending.pop_front() {
            let delivery = if delivery.is_ok() && self.should_simulate_error() {
                Err(PlatformError::DeliveryFailed {
                    reason: "simulated fix loss".to_string(),
                })
            } else {
                delivery
            };
            if self.deliver(delivery) {
                delivered += 1;
            }
        }
        delivered
    }

    pub fn queued_delivery_count(&self) -> usize {
        self.pending.len()
    }

    /// Options passed to the active subscription
    pub fn subscription_options(&self) -> Option<&LocationUpdateOptions> {
        self.options.as_ref()
    }

    pub fn permission_request_count(&self) -> u32 {
        self.permission_requests
    }

    fn should_simulate_error(&self) -> bool {
        if !self.simulate_errors {
            return false;
        }

        use rand::Rng;
        let mut rng = rand::thread_rng();
        rng.gen::<f32>() < self.error_probability
    }
}

impl LocationProvider for MockLocationProvider {
    fn request_foreground_permission(&mut self) -> PlatformResult<PermissionStatus> {
        self.permission_requests += 1;
        Ok(self.foreground_permission)
    }

    fn request_background_permission(&mut self) -> PlatformResult<PermissionStatus> {
        self.permission_requests += 1;
        Ok(self.background_permission)
    }

    fn current_position(&mut self) -> PlatformResult<LocationSample> {
        if !self.foreground_permission.is_granted() {
            return Err(PlatformError::PermissionDenied {
                tier: PermissionTier::ForegroundLocation,
            });
        }
        if !self.position_available {
            return Err(PlatformError::LocationUnavailable {
                reason: "no fix".to_string(),
            });
        }
        Ok(LocationSample::new(self.position, now_ms()))
    }

    fn start_location_updates(
        &mut self,
        options: &LocationUpdateOptions,
        callback: LocationCallback,
    ) -> PlatformResult<()> {
        if self.subscription_fails {
            return Err(PlatformError::SubscriptionFailed {
                reason: "task manager unavailable".to_string(),
            });
        }
        self.options = Some(options.clone());
        self.callback = Some(callback);
        Ok(())
    }

    fn has_subscription(&self) -> bool {
        self.callback.is_some()
    }
}

/// Mock notification center recording every accepted request
pub struct MockNotificationDispatcher {
    permission: PermissionStatus,
    rejecting: Mutex<bool>,
    sent: Mutex<Vec<NotificationRequest>>,
}

impl MockNotificationDispatcher {
    pub fn new() -> Self {
        Self {
            permission: PermissionStatus::Granted,
            rejecting: Mutex::new(false),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn with_permission(mut self, status: PermissionStatus) -> Self {
        self.permission = status;
        self
    }

    /// Reject every following dispatch
    pub fn set_rejecting(&self, rejecting: bool) {
        *lock(&self.rejecting) = rejecting;
    }

    /// Notifications accepted so far
    pub fn sent(&self) -> Vec<NotificationRequest> {
        lock(&self.sent).clone()
    }

    pub fn sent_count(&self) -> usize {
        lock(&self.sent).len()
    }

    pub fn clear(&self) {
        lock(&self.sent).clear();
    }
}

impl Default for MockNotificationDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationDispatcher for MockNotificationDispatcher {
    fn request_permission(&self) -> PlatformResult<PermissionStatus> {
        Ok(self.permission)
    }

    fn dispatch(&self, request: NotificationRequest, _trigger: NotificationTrigger) -> PlatformResult<()> {
        if *lock(&self.rejecting) {
            return Err(PlatformError::DispatchRejected {
                reason: "mock dispatcher rejecting".to_string(),
            });
        }
        lock(&self.sent).push(request);
        Ok(())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
