//! Default simulation constants and the engine parameter block.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::{PhysicsError, PhysicsResult};

/// Default gravity vector (Y-up world, gravity pulls down).
pub const DEFAULT_GRAVITY: [f64; 2] = [0.0, -9.81];

/// Default fixed timestep (in seconds).
pub const DEFAULT_TIME_STEP: f64 = 1.0 / 60.0;

/// Default velocity damping factor applied each step.
pub const DEFAULT_AIR_RESISTANCE: f64 = 0.01;

/// Default bounciness for newly created particles.
pub const DEFAULT_RESTITUTION: f64 = 0.6;

/// Default surface friction for newly created particles.
pub const DEFAULT_FRICTION: f64 = 0.1;

/// Detect/resolve rounds performed per step.
pub const DEFAULT_COLLISION_ITERATIONS: u32 = 4;

/// Constraint relaxation passes performed per step.
pub const DEFAULT_POSITION_ITERATIONS: u32 = 4;

/// Impulse passes performed per collision resolution round.
pub const DEFAULT_VELOCITY_ITERATIONS: u32 = 4;

/// Particle capacity of a freshly constructed engine.
pub const DEFAULT_MAX_PARTICLES: usize = 1000;

/// Constraint capacity of a freshly constructed engine.
pub const DEFAULT_MAX_CONSTRAINTS: usize = 256;

/// Default simulation domain, `[x_min, x_max, y_min, y_max]`.
pub const DEFAULT_BOUNDS: [f64; 4] = [-1000.0, 1000.0, -1000.0, 1000.0];

/// Default edge elasticity for the bounce boundary.
pub const DEFAULT_BOUNDARY_ELASTICITY: f64 = 0.9;

/// Tunable simulation parameters, validated wholesale at engine construction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsParameters {
    pub gravity: DVec2,
    /// Velocity damping multiplier base; applied as `1 - air_resistance * dt`.
    pub air_resistance: f64,
    /// Default restitution handed to particles that do not specify one.
    pub restitution: f64,
    /// Default friction handed to particles that do not specify one.
    pub friction: f64,
    pub time_step: f64,
    pub collision_iterations: u32,
    pub position_iterations: u32,
    pub velocity_iterations: u32,
    pub max_particles: usize,
    pub max_constraints: usize,
}

impl Default for PhysicsParameters {
    fn default() -> Self {
        Self {
            gravity: DVec2::from_array(DEFAULT_GRAVITY),
            air_resistance: DEFAULT_AIR_RESISTANCE,
            restitution: DEFAULT_RESTITUTION,
            friction: DEFAULT_FRICTION,
            time_step: DEFAULT_TIME_STEP,
            collision_iterations: DEFAULT_COLLISION_ITERATIONS,
            position_iterations: DEFAULT_POSITION_ITERATIONS,
            velocity_iterations: DEFAULT_VELOCITY_ITERATIONS,
            max_particles: DEFAULT_MAX_PARTICLES,
            max_constraints: DEFAULT_MAX_CONSTRAINTS,
        }
    }
}

impl PhysicsParameters {
    pub fn validate(&self) -> PhysicsResult<()> {
        if !self.gravity.is_finite() {
            return Err(PhysicsError::Configuration(
                "gravity must be finite".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.air_resistance) {
            return Err(PhysicsError::Configuration(
                "air_resistance must lie in [0, 1]".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(PhysicsError::Configuration(
                "restitution must lie in [0, 1]".into(),
            ));
        }
        if !self.friction.is_finite() || self.friction < 0.0 {
            return Err(PhysicsError::Configuration(
                "friction must be non-negative".into(),
            ));
        }
        if !self.time_step.is_finite() || self.time_step <= 0.0 {
            return Err(PhysicsError::Configuration(
                "time_step must be strictly positive".into(),
            ));
        }
        if self.collision_iterations == 0 || self.position_iterations == 0 {
            return Err(PhysicsError::Configuration(
                "iteration counts must be at least 1".into(),
            ));
        }
        if self.velocity_iterations == 0 {
            return Err(PhysicsError::Configuration(
                "velocity_iterations must be at least 1".into(),
            ));
        }
        if self.max_particles == 0 {
            return Err(PhysicsError::Configuration(
                "max_particles must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
