//! Background location callback
//!
//! The host invokes this handler for every location batch, whether the app is
//! visible, suspended, or terminated with the task still registered. Each
//! invocation draws a fresh truck position, compares it with the user's first
//! sample, and posts at most one notification.

use crate::algorithms::{distance_meters, within_threshold, ProximityTracker, ProximityTransition};
use crate::api::types::HandlerOutcome;
use crate::core::NotificationRequest;
use crate::platform::{LocationCallback, LocationDelivery, NotificationDispatcher, NotificationTrigger};
use crate::simulation::PositionSource;
use crate::utils::{NotificationPolicy, SectorConfig};
use log::{debug, info, warn};
use std::sync::Arc;

/// Proximity check run on every background location delivery
pub struct BackgroundUpdateHandler {
    sector: SectorConfig,
    simulator: Box<dyn PositionSource + Send>,
    dispatcher: Arc<dyn NotificationDispatcher>,
    policy: NotificationPolicy,
    /// Only consulted under `NotificationPolicy::OnEnter`
    tracker: ProximityTracker,
}

impl BackgroundUpdateHandler {
    pub fn new(
        sector: SectorConfig,
        simulator: Box<dyn PositionSource + Send>,
        dispatcher: Arc<dyn NotificationDispatcher>,
    ) -> Self {
        Self {
            sector,
            simulator,
            dispatcher,
            policy: NotificationPolicy::EveryUpdate,
            tracker: ProximityTracker::new(),
        }
    }

    pub fn with_policy(mut self, policy: NotificationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> NotificationPolicy {
        self.policy
    }

    /// Process one delivery from the host.
    ///
    /// Never blocks and never fails: delivery errors and dispatch failures
    /// only cost this cycle's notification.
    pub fn handle(&mut self, delivery: LocationDelivery) -> HandlerOutcome {
        let samples = match delivery {
            Ok(samples) => samples,
            Err(e) => {
                debug!("Dropping location delivery: {}", e);
                return HandlerOutcome::DeliveryError;
            }
        };
        let Some(user) = samples.first().map(|sample| sample.coordinate) else {
            debug!("Location delivery contained no samples");
            return HandlerOutcome::NoSamples;
        };

        let truck = self.simulator.next_position(&self.sector);
        let threshold_m = self.sector.proximity_threshold_m();
        let distance_m = distance_meters(user, truck);
        let in_range = within_threshold(distance_m, threshold_m);

        let transition = self.tracker.update(in_range);
        if !transition.is_in_range() {
            debug!("Truck {:.0} m away, outside {} m", distance_m, threshold_m);
            return HandlerOutcome::OutOfRange { distance_m };
        }
        if self.policy == NotificationPolicy::OnEnter && transition == ProximityTransition::Stayed {
            debug!("Truck still within range ({:.0} m), notification suppressed", distance_m);
            return HandlerOutcome::Suppressed { distance_m };
        }

        let request = NotificationRequest::truck_nearby(threshold_m);
        match self.dispatcher.dispatch(request, NotificationTrigger::Immediate) {
            Ok(()) => {
                info!("Truck within {} m ({:.0} m), user notified", threshold_m, distance_m);
                HandlerOutcome::Notified { distance_m }
            }
            Err(e) => {
                warn!("Proximity notification not dispatched: {}", e);
                HandlerOutcome::DispatchFailed { distance_m }
            }
        }
    }

    /// Box the handler as the callback the location provider stores
    pub fn into_callback(mut self) -> LocationCallback {
        Box::new(move |delivery: LocationDelivery| {
            self.handle(delivery);
        })
    }
}
