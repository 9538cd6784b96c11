use crate::config::DEFAULT_VELOCITY_ITERATIONS;
use crate::core::particle::Particle;
use crate::utils::arena::{Arena, ParticleId};

use super::contact::CollisionPair;

/// Allowed residual penetration before positional correction kicks in.
pub const PENETRATION_SLOP: f64 = 0.01;

/// Fraction of the remaining penetration corrected per resolve call.
pub const CORRECTION_PERCENT: f64 = 0.2;

/// Impulse-based collision response with Baumgarte positional correction.
///
/// Velocity impulses run for `velocity_iterations` passes; once a pair is
/// separating the repeat applications are no-ops. The positional pass runs
/// once per resolve call to bleed off penetration left over from discrete
/// time stepping.
#[derive(Debug, Clone, Copy)]
pub struct CollisionResolver {
    pub velocity_iterations: u32,
    pub slop: f64,
    pub correction_percent: f64,
}

impl Default for CollisionResolver {
    fn default() -> Self {
        Self::new(DEFAULT_VELOCITY_ITERATIONS)
    }
}

impl CollisionResolver {
    pub fn new(velocity_iterations: u32) -> Self {
        Self {
            velocity_iterations: velocity_iterations.max(1),
            slop: PENETRATION_SLOP,
            correction_percent: CORRECTION_PERCENT,
        }
    }

    pub fn resolve(&self, particles: &mut Arena<ParticleId, Particle>, pairs: &[CollisionPair]) {
        for _ in 0..self.velocity_iterations {
            for pair in pairs {
                let Some((a, b)) = particles.pair_mut(pair.particle_a, pair.particle_b) else {
                    continue;
                };
                if a.is_sensor || b.is_sensor {
                    continue;
                }
                Self::apply_impulse(a, b, pair);
            }
        }

        for pair in pairs {
            let Some((a, b)) = particles.pair_mut(pair.particle_a, pair.particle_b) else {
                continue;
            };
            if a.is_sensor || b.is_sensor {
                continue;
            }
            self.correct_position(a, b, pair);
        }
    }

    fn apply_impulse(a: &mut Particle, b: &mut Particle, pair: &CollisionPair) {
        let relative_velocity = b.velocity - a.velocity;
        let velocity_along_normal = relative_velocity.dot(pair.normal);
        if velocity_along_normal >= 0.0 {
            // already separating
            return;
        }

        let inverse_mass_sum = a.inverse_mass + b.inverse_mass;
        if inverse_mass_sum <= 0.0 {
            return;
        }

        let restitution = a.restitution.min(b.restitution);
        let magnitude = -(1.0 + restitution) * velocity_along_normal / inverse_mass_sum;
        let impulse = pair.normal * magnitude;

        a.velocity -= impulse * a.inverse_mass;
        b.velocity += impulse * b.inverse_mass;
    }

    fn correct_position(&self, a: &mut Particle, b: &mut Particle, pair: &CollisionPair) {
        let inverse_mass_sum = a.inverse_mass + b.inverse_mass;
        if inverse_mass_sum <= 0.0 {
            return;
        }

        let magnitude =
            (pair.penetration - self.slop).max(0.0) / inverse_mass_sum * self.correction_percent;
        let correction = pair.normal * magnitude;

        a.position -= correction * a.inverse_mass;
        b.position += correction * b.inverse_mass;
    }
}
