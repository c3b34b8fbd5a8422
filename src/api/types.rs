//! Common API types and data structures

use crate::core::{Coordinate, DEFAULT_MAP_SPAN_DEG};
use crate::platform::{PermissionTier, PlatformError};
use std::fmt;

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;

/// Foreground session errors
#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    /// The user refused a permission the session needs
    PermissionDenied { tier: PermissionTier },
    /// The host failed while the session was starting
    Platform { error: PlatformError },
    /// `start` was called on a session that is not loading
    NotLoading,
}

impl From<PlatformError> for SessionError {
    fn from(error: PlatformError) -> Self {
        match error {
            PlatformError::PermissionDenied { tier } => SessionError::PermissionDenied { tier },
            error => SessionError::Platform { error },
        }
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::PermissionDenied { tier } => write!(f, "Permission denied: {}", tier),
            SessionError::Platform { error } => write!(f, "Platform error: {}", error),
            SessionError::NotLoading => write!(f, "Session already started"),
        }
    }
}

impl std::error::Error for SessionError {}

/// What one background invocation did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HandlerOutcome {
    /// The host delivered an error; nothing was evaluated
    DeliveryError,
    /// The host delivered an empty batch
    NoSamples,
    /// Truck farther than the threshold
    OutOfRange { distance_m: f64 },
    /// In range, but the policy held the notification back
    Suppressed { distance_m: f64 },
    /// A notification was accepted by the dispatcher
    Notified { distance_m: f64 },
    /// In range, but the dispatcher refused the notification
    DispatchFailed { distance_m: f64 },
}

impl HandlerOutcome {
    /// Whether a notification was handed to the dispatcher
    pub fn dispatched(&self) -> bool {
        matches!(self, HandlerOutcome::Notified { .. } | HandlerOutcome::DispatchFailed { .. })
    }

    /// Distance to the truck, when one was evaluated
    pub fn distance_m(&self) -> Option<f64> {
        match self {
            HandlerOutcome::OutOfRange { distance_m }
            | HandlerOutcome::Suppressed { distance_m }
            | HandlerOutcome::Notified { distance_m }
            | HandlerOutcome::DispatchFailed { distance_m } => Some(*distance_m),
            HandlerOutcome::DeliveryError | HandlerOutcome::NoSamples => None,
        }
    }
}

/// Session readiness as seen by the UI
#[derive(Debug, Clone, PartialEq)]
pub enum Readiness {
    /// Waiting for permissions or the first fix
    Loading,
    /// Subscribed and refreshing
    Ready,
    /// A permission was denied; the session will not proceed
    Blocked { tier: PermissionTier },
    /// The host failed during startup
    Failed { error: PlatformError },
}

impl Readiness {
    pub fn is_ready(&self) -> bool {
        matches!(self, Readiness::Ready)
    }

    /// Blocking or loading text to show instead of the map
    pub fn user_message(&self) -> Option<String> {
        match self {
            Readiness::Loading => Some("Obteniendo ubicación...".to_string()),
            Readiness::Ready => None,
            Readiness::Blocked { tier } => Some(
                match tier {
                    PermissionTier::ForegroundLocation => "Permiso de ubicación denegado",
                    PermissionTier::BackgroundLocation => {
                        "Permiso de ubicación en segundo plano denegado"
                    }
                    PermissionTier::Notifications => "Permiso de notificaciones denegado",
                }
                .to_string(),
            ),
            Readiness::Failed { error } => Some(format!("No se pudo iniciar el rastreo: {}", error)),
        }
    }
}

/// Map viewport around a point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapRegion {
    pub center: Coordinate,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

/// What a marker on the map represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    User,
    Truck,
}

/// Labelled point for the renderer
#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    pub kind: MarkerKind,
    pub position: Coordinate,
    pub title: &'static str,
}

/// Positions the renderer draws
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayState {
    pub user_position: Option<Coordinate>,
    pub entity_position: Option<Coordinate>,
}

impl DisplayState {
    /// Initial viewport centred on the user, once known
    pub fn initial_region(&self) -> Option<MapRegion> {
        self.user_position.map(|center| MapRegion {
            center,
            latitude_delta: DEFAULT_MAP_SPAN_DEG,
            longitude_delta: DEFAULT_MAP_SPAN_DEG,
        })
    }

    /// Markers for every known position
    pub fn markers(&self) -> Vec<MapMarker> {
        let mut markers = Vec::with_capacity(2);
        if let Some(position) = self.user_position {
            markers.push(MapMarker {
                kind: MarkerKind::User,
                position,
                title: "Tu ubicación",
            });
        }
        if let Some(position) = self.entity_position {
            markers.push(MapMarker {
                kind: MarkerKind::Truck,
                position,
                title: "Camión",
            });
        }
        markers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_error_from_platform() {
        let denied = PlatformError::PermissionDenied { tier: PermissionTier::Notifications };
        assert_eq!(
            SessionError::from(denied),
            SessionError::PermissionDenied { tier: PermissionTier::Notifications }
        );

        let unavailable = PlatformError::LocationUnavailable { reason: "no fix".to_string() };
        assert!(matches!(SessionError::from(unavailable), SessionError::Platform { .. }));
    }

    #[test]
    fn test_readiness_messages() {
        assert_eq!(Readiness::Ready.user_message(), None);
        assert_eq!(
            Readiness::Loading.user_message().as_deref(),
            Some("Obteniendo ubicación...")
        );
        assert_eq!(
            Readiness::Blocked { tier: PermissionTier::ForegroundLocation }
                .user_message()
                .as_deref(),
            Some("Permiso de ubicación denegado")
        );
    }

    #[test]
    fn test_outcome_accessors() {
        assert!(HandlerOutcome::Notified { distance_m: 0.0 }.dispatched());
        assert!(!HandlerOutcome::Suppressed { distance_m: 10.0 }.dispatched());
        assert_eq!(HandlerOutcome::OutOfRange { distance_m: 900.0 }.distance_m(), Some(900.0));
        assert_eq!(HandlerOutcome::DeliveryError.distance_m(), None);
    }

    #[test]
    fn test_display_state_markers() {
        let mut display = DisplayState::default();
        assert!(display.initial_region().is_none());
        assert!(display.markers().is_empty());

        let user = Coordinate::new(1.8537, -76.0515);
        display.user_position = Some(user);
        let region = display.initial_region().unwrap();
        assert_eq!(region.center, user);
        assert_eq!(region.latitude_delta, 0.05);

        display.entity_position = Some(Coordinate::new(1.85, -76.05));
        let markers = display.markers();
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].kind, MarkerKind::User);
        assert_eq!(markers[1].title, "Camión");
    }
}
