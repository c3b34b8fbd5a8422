//! Foreground session lifecycle
//!
//! Startup runs in order: location permissions, notification permission,
//! first fix, background subscription, display timer. Any denial stops the
//! sequence and leaves a blocking message; nothing is retried.

use crate::api::background::BackgroundUpdateHandler;
use crate::api::types::{DisplayState, Readiness, SessionError, SessionResult};
use crate::core::LocationSample;
use crate::platform::{
    LocationProvider, NotificationDispatcher, PermissionStatus, PermissionTier,
};
use crate::simulation::{PositionSource, RandomWalkSimulator, SharedPositionSource};
use crate::utils::TrackingConfig;
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Fixed-period timer polled with explicit instants
#[derive(Debug, Clone)]
pub struct RefreshTimer {
    interval: Duration,
    next_due: Option<Instant>,
}

impl RefreshTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    /// Arm the timer; the first tick is one interval after `now`
    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.interval);
    }

    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.next_due
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether a tick is due at `now`. Missed periods collapse into one tick.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                let mut next = due + self.interval;
                if next <= now {
                    next = now + self.interval;
                }
                self.next_due = Some(next);
                true
            }
            _ => false,
        }
    }
}

/// Visible session: permissions, first fix, subscription and display refresh
pub struct ForegroundSession<P: LocationProvider> {
    config: TrackingConfig,
    provider: P,
    dispatcher: Arc<dyn NotificationDispatcher>,
    display_source: Box<dyn PositionSource + Send>,
    /// Present when `shared_entity_track` is set; `display_source` is a clone
    shared_track: Option<SharedPositionSource>,
    display: DisplayState,
    readiness: Readiness,
    timer: RefreshTimer,
}

impl<P: LocationProvider> ForegroundSession<P> {
    /// Create a loading session; the rendered truck comes from its own
    /// random simulator
    pub fn new(config: TrackingConfig, provider: P, dispatcher: Arc<dyn NotificationDispatcher>) -> Self {
        let timer = RefreshTimer::new(Duration::from_millis(config.display_refresh_interval_ms));
        let shared_track = config
            .shared_entity_track
            .then(|| SharedPositionSource::new(Box::new(RandomWalkSimulator::new())));
        let display_source: Box<dyn PositionSource + Send> = match &shared_track {
            Some(shared) => Box::new(shared.clone()),
            None => Box::new(RandomWalkSimulator::new()),
        };
        Self {
            config,
            provider,
            dispatcher,
            display_source,
            shared_track,
            display: DisplayState::default(),
            readiness: Readiness::Loading,
            timer,
        }
    }

    /// Replace the source of the rendered truck position.
    ///
    /// On a shared track the source is swapped behind the shared handle, so
    /// handlers built earlier follow it too.
    pub fn with_display_source(mut self, source: Box<dyn PositionSource + Send>) -> Self {
        match &self.shared_track {
            Some(shared) => shared.replace_source(source),
            None => self.display_source = source,
        }
        self
    }

    /// Build the background handler for this session's configuration.
    ///
    /// With `shared_entity_track` the handler and the display timer draw from
    /// one shared source; otherwise the handler gets an independent
    /// simulator and the rendered truck is decorative.
    pub fn background_handler(&self) -> BackgroundUpdateHandler {
        let simulator: Box<dyn PositionSource + Send> = match &self.shared_track {
            Some(shared) => Box::new(shared.clone()),
            None => Box::new(RandomWalkSimulator::new()),
        };

        BackgroundUpdateHandler::new(self.config.sector, simulator, Arc::clone(&self.dispatcher))
            .with_policy(self.config.notification_policy)
    }

    /// Run the startup sequence with `handler` as the background callback
    pub fn start(&mut self, handler: BackgroundUpdateHandler) -> SessionResult<()> {
        self.start_at(handler, Instant::now())
    }

    /// `start` with an explicit clock for the display timer
    pub fn start_at(&mut self, handler: BackgroundUpdateHandler, now: Instant) -> SessionResult<()> {
        if self.readiness != Readiness::Loading {
            return Err(SessionError::NotLoading);
        }

        match self.initialize(handler) {
            Ok(()) => {
                self.timer.start(now);
                self.readiness = Readiness::Ready;
                info!(
                    "Tracking session ready, refreshing truck every {:?}",
                    self.timer.interval()
                );
                Ok(())
            }
            Err(e) => {
                warn!("Tracking session not started: {}", e);
                self.readiness = match &e {
                    SessionError::PermissionDenied { tier } => Readiness::Blocked { tier: *tier },
                    SessionError::Platform { error } => Readiness::Failed { error: error.clone() },
                    SessionError::NotLoading => self.readiness.clone(),
                };
                Err(e)
            }
        }
    }

    fn initialize(&mut self, handler: BackgroundUpdateHandler) -> SessionResult<()> {
        let status = self.provider.request_foreground_permission()?;
        require(PermissionTier::ForegroundLocation, status)?;

        let status = self.provider.request_background_permission()?;
        require(PermissionTier::BackgroundLocation, status)?;

        let status = self.dispatcher.request_permission()?;
        require(PermissionTier::Notifications, status)?;

        let sample = self.provider.current_position()?;
        self.display.user_position = Some(sample.coordinate);
        debug!(
            "Initial position ({:.6}, {:.6})",
            sample.coordinate.latitude, sample.coordinate.longitude
        );

        self.provider
            .start_location_updates(&self.config.location_updates, handler.into_callback())?;
        Ok(())
    }

    /// Advance the display timer; returns true when the truck was refreshed
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.readiness.is_ready() {
            return false;
        }
        if self.timer.poll(now) {
            self.refresh_entity();
            true
        } else {
            false
        }
    }

    /// Draw a new rendered truck position
    pub fn refresh_entity(&mut self) {
        let position = self.display_source.next_position(&self.config.sector);
        debug!("Truck displayed at ({:.6}, {:.6})", position.latitude, position.longitude);
        self.display.entity_position = Some(position);
    }

    /// Foreground location update for the rendered user marker
    pub fn update_user_position(&mut self, sample: &LocationSample) {
        self.display.user_position = Some(sample.coordinate);
    }

    pub fn readiness(&self) -> &Readiness {
        &self.readiness
    }

    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    pub fn config(&self) -> &TrackingConfig {
        &self.config
    }

    /// The single truck stream, when `shared_entity_track` is enabled
    pub fn shared_track(&self) -> Option<&SharedPositionSource> {
        self.shared_track.as_ref()
    }

    /// When the next display refresh is due, once the session is ready
    pub fn next_refresh_due(&self) -> Option<Instant> {
        self.timer.next_due()
    }

    /// Explanation shown under the map
    pub fn info_message(&self) -> String {
        format!(
            "Recibirás una notificación cuando el camión esté a menos de {}m de tu ubicación.",
            self.config.sector.proximity_threshold_m()
        )
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }
}

fn require(tier: PermissionTier, status: PermissionStatus) -> SessionResult<()> {
    if status.is_granted() {
        Ok(())
    } else {
        Err(SessionError::PermissionDenied { tier })
    }
}
