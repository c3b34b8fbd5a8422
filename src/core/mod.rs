//! Core types and constants for the proximity alert system

pub mod types;
pub mod constants;

pub use types::*;
pub use constants::*;
