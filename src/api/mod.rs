//! Proximity alert API
//!
//! `background` holds the callback the host runs for every location
//! delivery; `session` owns the visible lifecycle around it.

pub mod background;
pub mod session;
pub mod types;

// Re-export commonly used API types
pub use types::{
    DisplayState, HandlerOutcome, MapMarker, MapRegion, MarkerKind, Readiness, SessionError,
    SessionResult,
};
pub use background::BackgroundUpdateHandler;
pub use session::{ForegroundSession, RefreshTimer};
