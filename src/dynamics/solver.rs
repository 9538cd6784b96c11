use glam::DVec2;

use crate::config::DEFAULT_POSITION_ITERATIONS;
use crate::core::constraints::{Constraint, ConstraintProperties};
use crate::core::particle::Particle;
use crate::utils::arena::{Arena, ConstraintId, ParticleId};
use crate::utils::math::contact_normal;

/// Gauss–Seidel relaxation over the constraint set.
///
/// Constraints are visited sequentially and each one reads the most recently
/// updated particle state, so the solve is approximate and converges over
/// repeated passes rather than exactly in one. Order of application affects
/// the transient path, not the fixed point.
#[derive(Debug, Clone, Copy)]
pub struct ConstraintSolver {
    pub position_iterations: u32,
}

impl Default for ConstraintSolver {
    fn default() -> Self {
        Self::new(DEFAULT_POSITION_ITERATIONS)
    }
}

impl ConstraintSolver {
    pub fn new(position_iterations: u32) -> Self {
        Self {
            position_iterations: position_iterations.max(1),
        }
    }

    pub fn relax(
        &self,
        particles: &mut Arena<ParticleId, Particle>,
        constraints: &Arena<ConstraintId, Constraint>,
    ) {
        for _ in 0..self.position_iterations {
            for (_, constraint) in constraints.iter() {
                let Some((a, b)) = particles.pair_mut(constraint.particle_a, constraint.particle_b)
                else {
                    continue;
                };

                match constraint.properties {
                    ConstraintProperties::Distance {
                        min_length,
                        max_length,
                    } => Self::relax_distance(a, b, constraint, min_length, max_length),
                    ConstraintProperties::Revolute { .. } => Self::relax_revolute(a, b, constraint),
                    ConstraintProperties::Prismatic { axis } => {
                        Self::relax_prismatic(a, b, constraint, axis)
                    }
                }
            }
        }
    }

    /// Clamps the anchor separation into `[min_length, max_length]`.
    fn relax_distance(
        a: &mut Particle,
        b: &mut Particle,
        constraint: &Constraint,
        min_length: f64,
        max_length: f64,
    ) {
        let inverse_mass_sum = a.inverse_mass + b.inverse_mass;
        if inverse_mass_sum <= 0.0 {
            return;
        }

        let anchor_a = a.position + constraint.anchor_a;
        let anchor_b = b.position + constraint.anchor_b;
        let axis = contact_normal(anchor_a, anchor_b);
        let distance = (anchor_b - anchor_a).length();
        let target = distance.clamp(min_length, max_length);
        let error = distance - target;

        if error.abs() > f64::EPSILON {
            // positive error: too long, pull the anchors together
            let correction = axis * (error * constraint.stiffness / inverse_mass_sum);
            a.position += correction * a.inverse_mass;
            b.position -= correction * b.inverse_mass;
        }

        Self::damp_along(a, b, axis, constraint.damping);
    }

    /// Pins the two anchor points coincident. Angle limits are validated at
    /// creation but not dynamically enforced; the particle angle field has no
    /// dynamics to constrain.
    fn relax_revolute(a: &mut Particle, b: &mut Particle, constraint: &Constraint) {
        let inverse_mass_sum = a.inverse_mass + b.inverse_mass;
        if inverse_mass_sum <= 0.0 {
            return;
        }

        let anchor_a = a.position + constraint.anchor_a;
        let anchor_b = b.position + constraint.anchor_b;
        let delta = anchor_b - anchor_a;
        if delta.length_squared() > f64::EPSILON {
            let correction = delta * (constraint.stiffness / inverse_mass_sum);
            a.position += correction * a.inverse_mass;
            b.position -= correction * b.inverse_mass;
        }

        if constraint.damping > 0.0 {
            let relative = b.velocity - a.velocity;
            let impulse = relative * (constraint.damping / inverse_mass_sum);
            a.velocity += impulse * a.inverse_mass;
            b.velocity -= impulse * b.inverse_mass;
        }
    }

    /// Removes the anchor separation component perpendicular to the axis.
    fn relax_prismatic(a: &mut Particle, b: &mut Particle, constraint: &Constraint, axis: DVec2) {
        let inverse_mass_sum = a.inverse_mass + b.inverse_mass;
        if inverse_mass_sum <= 0.0 {
            return;
        }

        let direction = axis.normalize();
        let anchor_a = a.position + constraint.anchor_a;
        let anchor_b = b.position + constraint.anchor_b;
        let delta = anchor_b - anchor_a;
        let perpendicular = delta - direction * delta.dot(direction);

        if perpendicular.length_squared() > f64::EPSILON {
            let correction = perpendicular * (constraint.stiffness / inverse_mass_sum);
            a.position += correction * a.inverse_mass;
            b.position -= correction * b.inverse_mass;
        }

        if constraint.damping > 0.0 {
            let relative = b.velocity - a.velocity;
            let off_axis = relative - direction * relative.dot(direction);
            let impulse = off_axis * (constraint.damping / inverse_mass_sum);
            a.velocity += impulse * a.inverse_mass;
            b.velocity -= impulse * b.inverse_mass;
        }
    }

    /// Bleeds off relative velocity along `axis`, scaled by `damping`.
    fn damp_along(a: &mut Particle, b: &mut Particle, axis: DVec2, damping: f64) {
        if damping <= 0.0 {
            return;
        }
        let inverse_mass_sum = a.inverse_mass + b.inverse_mass;
        if inverse_mass_sum <= 0.0 {
            return;
        }

        let relative = (b.velocity - a.velocity).dot(axis);
        let impulse = axis * (relative * damping / inverse_mass_sum);
        a.velocity += impulse * a.inverse_mass;
        b.velocity -= impulse * b.inverse_mass;
    }
}
