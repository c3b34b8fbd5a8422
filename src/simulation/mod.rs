//! Synthetic truck positions

pub mod entity;

pub use entity::{FixedPosition, PositionSource, RandomWalkSimulator, SharedPositionSource};
