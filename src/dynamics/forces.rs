use glam::DVec2;

use crate::core::particle::Particle;
use crate::utils::arena::{Arena, ParticleId};

/// External force generator applied to every particle each step, after
/// gravity and before integration.
pub trait ForceGenerator: Send + Sync {
    fn apply(&self, particle: &mut Particle, dt: f64);
}

/// Uniform force field, e.g. wind.
pub struct ConstantForce {
    pub force: DVec2,
}

impl ForceGenerator for ConstantForce {
    fn apply(&self, particle: &mut Particle, _dt: f64) {
        particle.apply_force(self.force);
    }
}

/// Quadratic drag opposing the direction of motion.
pub struct DragForce {
    pub coefficient: f64,
}

impl ForceGenerator for DragForce {
    fn apply(&self, particle: &mut Particle, _dt: f64) {
        if particle.is_static {
            return;
        }
        let speed = particle.velocity.length();
        if speed < 1e-6 {
            return;
        }
        let drag = -particle.velocity / speed * speed * speed * self.coefficient;
        particle.apply_force(drag);
    }
}

/// Mass-proportional pull toward a fixed point.
pub struct PointAttractor {
    pub center: DVec2,
    pub strength: f64,
}

impl ForceGenerator for PointAttractor {
    fn apply(&self, particle: &mut Particle, _dt: f64) {
        if particle.is_static {
            return;
        }
        let offset = self.center - particle.position;
        let distance = offset.length();
        if distance < 1e-6 {
            return;
        }
        particle.apply_force(offset / distance * self.strength * particle.mass);
    }
}

/// Collection of force generators run once per step.
#[derive(Default)]
pub struct ForceRegistry {
    forces: Vec<Box<dyn ForceGenerator>>,
}

impl ForceRegistry {
    pub fn new() -> Self {
        Self { forces: Vec::new() }
    }

    pub fn add<F: ForceGenerator + 'static>(&mut self, force: F) {
        self.forces.push(Box::new(force));
    }

    pub fn clear(&mut self) {
        self.forces.clear();
    }

    pub fn len(&self) -> usize {
        self.forces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forces.is_empty()
    }

    pub fn apply_all(&self, particles: &mut Arena<ParticleId, Particle>, dt: f64) {
        for force in &self.forces {
            for (_, particle) in particles.iter_mut() {
                force.apply(particle, dt);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn constant_force_accelerates_by_inverse_mass() {
        let mut arena: Arena<ParticleId, Particle> = Arena::new();
        let id = arena.insert(Particle::builder().mass(4.0).build().unwrap());

        let mut registry = ForceRegistry::new();
        registry.add(ConstantForce {
            force: DVec2::new(8.0, 0.0),
        });
        registry.apply_all(&mut arena, 1.0 / 60.0);

        assert_relative_eq!(arena.get(id).unwrap().acceleration.x, 2.0);
    }

    #[test]
    fn drag_opposes_motion() {
        let mut arena: Arena<ParticleId, Particle> = Arena::new();
        let id = arena.insert(
            Particle::builder()
                .velocity(DVec2::new(3.0, 0.0))
                .build()
                .unwrap(),
        );

        let mut registry = ForceRegistry::new();
        registry.add(DragForce { coefficient: 0.5 });
        registry.apply_all(&mut arena, 1.0 / 60.0);

        assert!(arena.get(id).unwrap().acceleration.x < 0.0);
    }
}
