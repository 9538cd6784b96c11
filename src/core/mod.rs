//! Core types describing particles, boundaries, constraints, and snapshots.

pub mod boundary;
pub mod constraints;
pub mod particle;
pub mod snapshot;

pub use boundary::{BoundaryConfig, BoundaryKind, BoundaryOutcome};
pub use constraints::{AngleLimits, Constraint, ConstraintBuilder, ConstraintProperties};
pub use particle::{CollisionFilter, Particle, ParticleBuilder};
pub use snapshot::{ParticleState, PerformanceMetrics, StateSnapshot};
