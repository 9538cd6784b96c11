//! Corpuscle – a deterministic 2D particle physics engine.
//!
//! The crate owns particle state, integrates motion with semi-implicit Euler,
//! resolves circle–circle collisions with impulses plus Baumgarte positional
//! correction, enforces domain boundaries (wrap / bounce / absorb), and
//! relaxes pairwise constraints with Gauss–Seidel passes. Transport,
//! persistence, and rendering layers are external collaborators that consume
//! the plain-data [`StateSnapshot`] it emits each tick.

pub mod collision;
pub mod config;
pub mod core;
pub mod dynamics;
pub mod engine;
pub mod error;
pub mod registry;
pub mod utils;

pub use glam::DVec2;

pub use crate::collision::{CollisionDetector, CollisionPair, CollisionResolver};
pub use crate::config::PhysicsParameters;
pub use crate::core::{
    AngleLimits, BoundaryConfig, BoundaryKind, CollisionFilter, Constraint, ConstraintBuilder,
    ConstraintProperties, Particle, ParticleBuilder, ParticleState, PerformanceMetrics,
    StateSnapshot,
};
pub use crate::dynamics::{
    ConstantForce, ConstraintSolver, DragForce, ForceGenerator, ForceRegistry, PointAttractor,
};
pub use crate::engine::PhysicsEngine;
pub use crate::error::{PhysicsError, PhysicsResult};
pub use crate::registry::{SharedEngine, SimulationRegistry};
pub use crate::utils::arena::{Arena, ConstraintId, ParticleId, SlotKey};
