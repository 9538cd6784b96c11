use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_FRICTION, DEFAULT_RESTITUTION};
use crate::error::{PhysicsError, PhysicsResult};
use crate::utils::arena::ParticleId;

/// Bitmask collision filtering with a group override.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CollisionFilter {
    pub category: u32,
    pub mask: u32,
    /// Two particles sharing the same non-zero group always collide when it
    /// is positive and never when it is negative, regardless of masks.
    pub group: i32,
}

impl Default for CollisionFilter {
    fn default() -> Self {
        Self {
            category: 1,
            mask: u32::MAX,
            group: 0,
        }
    }
}

impl CollisionFilter {
    /// The category/mask test must pass in both directions unless a shared
    /// group decides first.
    pub fn allows(&self, other: &CollisionFilter) -> bool {
        if self.group != 0 && self.group == other.group {
            return self.group > 0;
        }
        (self.category & other.mask) != 0 && (other.category & self.mask) != 0
    }
}

/// Physical body: a circle with linear kinematic state and material
/// coefficients. Accelerations accumulate across `apply_force` calls; the
/// engine zeroes them once per step before gravity is applied.
#[derive(Debug, Clone)]
pub struct Particle {
    pub id: ParticleId,
    pub position: DVec2,
    pub velocity: DVec2,
    pub acceleration: DVec2,
    pub mass: f64,
    pub radius: f64,
    pub restitution: f64,
    pub friction: f64,
    /// Orientation placeholder; no rotational dynamics act on it.
    pub angle: f64,
    pub is_static: bool,
    pub is_sensor: bool,
    pub collision_filter: CollisionFilter,
    pub inverse_mass: f64,
}

impl Particle {
    pub fn builder() -> ParticleBuilder {
        ParticleBuilder::new()
    }

    /// Accumulates `force / mass` into the acceleration. A complete no-op for
    /// static particles.
    pub fn apply_force(&mut self, force: DVec2) {
        if self.is_static {
            return;
        }
        self.acceleration += force * self.inverse_mass;
    }

    /// Semi-implicit Euler step. The velocity update runs first, but the
    /// position update still reads the velocity from before this call, so
    /// `position += v0*dt + 0.5*a*dt^2` holds exactly for constant forces.
    pub fn integrate(&mut self, dt: f64) {
        if self.is_static {
            return;
        }
        let v0 = self.velocity;
        self.velocity += self.acceleration * dt;
        self.position += v0 * dt + 0.5 * self.acceleration * dt * dt;
    }
}

/// Builder for [`Particle`]. Restitution and friction left unset inherit the
/// owning engine's global defaults at `add_particle` time.
#[derive(Debug, Clone)]
pub struct ParticleBuilder {
    position: DVec2,
    velocity: DVec2,
    mass: f64,
    radius: f64,
    restitution: Option<f64>,
    friction: Option<f64>,
    is_static: bool,
    is_sensor: bool,
    filter: CollisionFilter,
}

impl Default for ParticleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ParticleBuilder {
    pub fn new() -> Self {
        Self {
            position: DVec2::ZERO,
            velocity: DVec2::ZERO,
            mass: 1.0,
            radius: 1.0,
            restitution: None,
            friction: None,
            is_static: false,
            is_sensor: false,
            filter: CollisionFilter::default(),
        }
    }

    pub fn position(mut self, position: DVec2) -> Self {
        self.position = position;
        self
    }

    pub fn velocity(mut self, velocity: DVec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    pub fn radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    pub fn restitution(mut self, restitution: f64) -> Self {
        self.restitution = Some(restitution);
        self
    }

    pub fn friction(mut self, friction: f64) -> Self {
        self.friction = Some(friction);
        self
    }

    pub fn is_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    pub fn is_sensor(mut self, is_sensor: bool) -> Self {
        self.is_sensor = is_sensor;
        self
    }

    pub fn filter(mut self, category: u32, mask: u32, group: i32) -> Self {
        self.filter = CollisionFilter {
            category,
            mask,
            group,
        };
        self
    }

    /// Fills unset material fields; used by the engine to hand its global
    /// defaults to particles that did not specify their own.
    pub(crate) fn with_material_defaults(mut self, restitution: f64, friction: f64) -> Self {
        self.restitution.get_or_insert(restitution);
        self.friction.get_or_insert(friction);
        self
    }

    /// Validates every field invariant and produces the particle. The engine
    /// overwrites the placeholder id after arena insertion.
    pub fn build(self) -> PhysicsResult<Particle> {
        let restitution = self.restitution.unwrap_or(DEFAULT_RESTITUTION);
        let friction = self.friction.unwrap_or(DEFAULT_FRICTION);

        if !self.position.is_finite() || !self.velocity.is_finite() {
            return Err(PhysicsError::Validation(
                "position and velocity must be finite".into(),
            ));
        }
        if !self.mass.is_finite() || self.mass <= 0.0 {
            return Err(PhysicsError::Validation(
                "mass must be strictly positive".into(),
            ));
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(PhysicsError::Validation(
                "radius must be strictly positive".into(),
            ));
        }
        if !(0.0..=1.0).contains(&restitution) {
            return Err(PhysicsError::Validation(
                "restitution must lie in [0, 1]".into(),
            ));
        }
        if !friction.is_finite() || friction < 0.0 {
            return Err(PhysicsError::Validation(
                "friction must be non-negative".into(),
            ));
        }

        let inverse_mass = if self.is_static { 0.0 } else { 1.0 / self.mass };
        Ok(Particle {
            id: ParticleId::default(),
            position: self.position,
            velocity: self.velocity,
            acceleration: DVec2::ZERO,
            mass: self.mass,
            radius: self.radius,
            restitution,
            friction,
            angle: 0.0,
            is_static: self.is_static,
            is_sensor: self.is_sensor,
            collision_filter: self.filter,
            inverse_mass,
        })
    }
}
