//! Utility helpers: slot arenas, math extensions, and logging.

pub mod arena;
pub mod logging;
pub mod math;

pub use arena::{Arena, ConstraintId, ParticleId, SlotKey};
