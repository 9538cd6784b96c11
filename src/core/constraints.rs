use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::{PhysicsError, PhysicsResult};
use crate::utils::arena::{ConstraintId, ParticleId};

/// Allowed relative angle range for a revolute constraint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AngleLimits {
    pub min: f64,
    pub max: f64,
}

/// Per-kind constraint payload. Each variant carries only its own typed
/// fields and is validated exhaustively before a constraint is accepted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum ConstraintProperties {
    Distance { min_length: f64, max_length: f64 },
    Revolute { angle_limits: AngleLimits },
    Prismatic { axis: DVec2 },
}

impl ConstraintProperties {
    pub fn kind_name(&self) -> &'static str {
        match self {
            ConstraintProperties::Distance { .. } => "distance",
            ConstraintProperties::Revolute { .. } => "revolute",
            ConstraintProperties::Prismatic { .. } => "prismatic",
        }
    }

    pub fn validate(&self) -> PhysicsResult<()> {
        match self {
            ConstraintProperties::Distance {
                min_length,
                max_length,
            } => {
                if !min_length.is_finite() || !max_length.is_finite() {
                    return Err(PhysicsError::Validation(
                        "distance limits must be finite".into(),
                    ));
                }
                if *min_length < 0.0 {
                    return Err(PhysicsError::Validation(
                        "min_length must be non-negative".into(),
                    ));
                }
                if min_length > max_length {
                    return Err(PhysicsError::Validation(
                        "min_length must not exceed max_length".into(),
                    ));
                }
            }
            ConstraintProperties::Revolute { angle_limits } => {
                if !angle_limits.min.is_finite() || !angle_limits.max.is_finite() {
                    return Err(PhysicsError::Validation(
                        "angle_limits must be finite".into(),
                    ));
                }
                if angle_limits.max <= angle_limits.min {
                    return Err(PhysicsError::Validation(
                        "angle_limits.max must be greater than angle_limits.min".into(),
                    ));
                }
            }
            ConstraintProperties::Prismatic { axis } => {
                if !axis.is_finite() || axis.length_squared() < f64::EPSILON {
                    return Err(PhysicsError::Validation(
                        "axis must be a non-zero vector".into(),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Pairwise constraint between two particles, relaxed iteratively each step.
#[derive(Debug, Clone)]
pub struct Constraint {
    pub id: ConstraintId,
    pub particle_a: ParticleId,
    pub particle_b: ParticleId,
    /// Attachment point relative to each particle's center.
    pub anchor_a: DVec2,
    pub anchor_b: DVec2,
    pub stiffness: f64,
    pub damping: f64,
    pub properties: ConstraintProperties,
}

/// Builder for [`Constraint`]; one constructor per kind.
#[derive(Debug, Clone)]
pub struct ConstraintBuilder {
    particle_a: ParticleId,
    particle_b: ParticleId,
    anchor_a: DVec2,
    anchor_b: DVec2,
    stiffness: f64,
    damping: f64,
    properties: ConstraintProperties,
}

impl ConstraintBuilder {
    fn with_properties(
        particle_a: ParticleId,
        particle_b: ParticleId,
        properties: ConstraintProperties,
    ) -> Self {
        Self {
            particle_a,
            particle_b,
            anchor_a: DVec2::ZERO,
            anchor_b: DVec2::ZERO,
            stiffness: 1.0,
            damping: 0.0,
            properties,
        }
    }

    pub fn distance(
        particle_a: ParticleId,
        particle_b: ParticleId,
        min_length: f64,
        max_length: f64,
    ) -> Self {
        Self::with_properties(
            particle_a,
            particle_b,
            ConstraintProperties::Distance {
                min_length,
                max_length,
            },
        )
    }

    pub fn revolute(
        particle_a: ParticleId,
        particle_b: ParticleId,
        min_angle: f64,
        max_angle: f64,
    ) -> Self {
        Self::with_properties(
            particle_a,
            particle_b,
            ConstraintProperties::Revolute {
                angle_limits: AngleLimits {
                    min: min_angle,
                    max: max_angle,
                },
            },
        )
    }

    pub fn prismatic(particle_a: ParticleId, particle_b: ParticleId, axis: DVec2) -> Self {
        Self::with_properties(
            particle_a,
            particle_b,
            ConstraintProperties::Prismatic { axis },
        )
    }

    pub fn anchor_a(mut self, anchor: DVec2) -> Self {
        self.anchor_a = anchor;
        self
    }

    pub fn anchor_b(mut self, anchor: DVec2) -> Self {
        self.anchor_b = anchor;
        self
    }

    pub fn stiffness(mut self, stiffness: f64) -> Self {
        self.stiffness = stiffness;
        self
    }

    pub fn damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    pub fn particles(&self) -> (ParticleId, ParticleId) {
        (self.particle_a, self.particle_b)
    }

    /// Validates the payload and shared fields, producing the constraint. The
    /// engine overwrites the placeholder id after arena insertion.
    pub fn build(self) -> PhysicsResult<Constraint> {
        self.properties.validate()?;
        if self.particle_a == self.particle_b {
            return Err(PhysicsError::Validation(
                "a constraint must join two distinct particles".into(),
            ));
        }
        if !self.anchor_a.is_finite() || !self.anchor_b.is_finite() {
            return Err(PhysicsError::Validation("anchors must be finite".into()));
        }
        if !(0.0..=1.0).contains(&self.stiffness) {
            return Err(PhysicsError::Validation(
                "stiffness must lie in [0, 1]".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.damping) {
            return Err(PhysicsError::Validation(
                "damping must lie in [0, 1]".into(),
            ));
        }

        Ok(Constraint {
            id: ConstraintId::default(),
            particle_a: self.particle_a,
            particle_b: self.particle_b,
            anchor_a: self.anchor_a,
            anchor_b: self.anchor_b,
            stiffness: self.stiffness,
            damping: self.damping,
            properties: self.properties,
        })
    }
}
