//! The simulation orchestrator: owns all particle and constraint state and
//! advances it one fixed step at a time.

use std::time::Instant;

use glam::DVec2;

use crate::collision::{CollisionDetector, CollisionResolver};
use crate::config::PhysicsParameters;
use crate::core::boundary::{BoundaryConfig, BoundaryOutcome};
use crate::core::constraints::{Constraint, ConstraintBuilder};
use crate::core::particle::{Particle, ParticleBuilder};
use crate::core::snapshot::{ParticleState, PerformanceMetrics, StateSnapshot};
use crate::dynamics::{ConstraintSolver, ForceRegistry};
use crate::error::{PhysicsError, PhysicsResult};
use crate::utils::arena::{Arena, ConstraintId, ParticleId};
use crate::utils::logging::{warn_if_over_budget, PhaseTimer};

/// A self-contained 2D particle world.
///
/// `step` is synchronous, single-threaded, and runs to completion; a host
/// that interleaves mutation commands with a step driver must serialize them
/// per engine (see [`crate::registry::SimulationRegistry`]). Two engines
/// share no state, and identical command sequences produce identical
/// trajectories.
pub struct PhysicsEngine {
    particles: Arena<ParticleId, Particle>,
    constraints: Arena<ConstraintId, Constraint>,
    boundary: BoundaryConfig,
    params: PhysicsParameters,
    resolver: CollisionResolver,
    solver: ConstraintSolver,
    forces: ForceRegistry,
    metrics: PerformanceMetrics,
}

impl PhysicsEngine {
    pub fn new(params: PhysicsParameters) -> PhysicsResult<Self> {
        params.validate()?;
        Ok(Self {
            particles: Arena::new(),
            constraints: Arena::new(),
            boundary: BoundaryConfig::default(),
            resolver: CollisionResolver::new(params.velocity_iterations),
            solver: ConstraintSolver::new(params.position_iterations),
            forces: ForceRegistry::new(),
            metrics: PerformanceMetrics::default(),
            params,
        })
    }

    pub fn params(&self) -> &PhysicsParameters {
        &self.params
    }

    pub fn boundary(&self) -> &BoundaryConfig {
        &self.boundary
    }

    /// Replaces the active boundary wholesale after validation.
    pub fn set_boundary(&mut self, boundary: BoundaryConfig) -> PhysicsResult<()> {
        boundary.validate()?;
        self.boundary = boundary;
        Ok(())
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    pub fn particle(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.get(id)
    }

    pub fn constraint(&self, id: ConstraintId) -> Option<&Constraint> {
        self.constraints.get(id)
    }

    /// Registered force generators, applied each step after gravity.
    pub fn forces_mut(&mut self) -> &mut ForceRegistry {
        &mut self.forces
    }

    /// Validates and inserts a new particle. Nothing is mutated on rejection.
    pub fn add_particle(&mut self, builder: ParticleBuilder) -> PhysicsResult<ParticleId> {
        if self.particles.len() >= self.params.max_particles {
            return Err(PhysicsError::Capacity {
                kind: "particle",
                limit: self.params.max_particles,
            });
        }

        let particle = builder
            .with_material_defaults(self.params.restitution, self.params.friction)
            .build()?;
        let id = self.particles.insert(particle);
        if let Some(stored) = self.particles.get_mut(id) {
            stored.id = id;
        }
        Ok(id)
    }

    /// Removes a particle and every constraint referencing it.
    pub fn remove_particle(&mut self, id: ParticleId) -> PhysicsResult<()> {
        if self.particles.remove(id).is_none() {
            return Err(PhysicsError::NotFound(format!("particle {id}")));
        }
        self.drop_constraints_of(id);
        Ok(())
    }

    /// Drops every particle, cascading to the whole constraint set.
    pub fn clear_particles(&mut self) {
        self.particles.clear();
        self.constraints.clear();
    }

    /// Accumulates an external force on one particle. A no-op on static
    /// particles; the accumulator is rezeroed at the start of the next step.
    pub fn apply_force(&mut self, id: ParticleId, force: DVec2) -> PhysicsResult<()> {
        let particle = self
            .particles
            .get_mut(id)
            .ok_or_else(|| PhysicsError::NotFound(format!("particle {id}")))?;
        particle.apply_force(force);
        Ok(())
    }

    /// Validates and inserts a new constraint. Both endpoints must already
    /// exist; nothing is mutated on rejection.
    pub fn add_constraint(&mut self, builder: ConstraintBuilder) -> PhysicsResult<ConstraintId> {
        if self.constraints.len() >= self.params.max_constraints {
            return Err(PhysicsError::Capacity {
                kind: "constraint",
                limit: self.params.max_constraints,
            });
        }

        let constraint = builder.build()?;
        for endpoint in [constraint.particle_a, constraint.particle_b] {
            if !self.particles.contains(endpoint) {
                return Err(PhysicsError::NotFound(format!("particle {endpoint}")));
            }
        }

        let id = self.constraints.insert(constraint);
        if let Some(stored) = self.constraints.get_mut(id) {
            stored.id = id;
        }
        Ok(id)
    }

    pub fn remove_constraint(&mut self, id: ConstraintId) -> PhysicsResult<()> {
        if self.constraints.remove(id).is_none() {
            return Err(PhysicsError::NotFound(format!("constraint {id}")));
        }
        Ok(())
    }

    pub fn clear_constraints(&mut self) {
        self.constraints.clear();
    }

    /// Advances the simulation by `dt` seconds and returns the new state.
    ///
    /// Phase order is load-bearing: forces accumulate onto zeroed
    /// accelerations, damping touches velocities before integration reads
    /// them, and the boundary runs last so no emitted snapshot ever shows a
    /// particle outside the domain rules.
    pub fn step(&mut self, dt: f64) -> StateSnapshot {
        let started = Instant::now();

        self.accumulate_forces(dt);
        self.damp_velocities(dt);

        {
            let _timer = PhaseTimer::start("integrate");
            for (_, particle) in self.particles.iter_mut() {
                particle.integrate(dt);
            }
        }

        let collision_count = {
            let _timer = PhaseTimer::start("collisions");
            self.run_collision_rounds()
        };

        {
            let _timer = PhaseTimer::start("constraints");
            self.solver.relax(&mut self.particles, &self.constraints);
        }

        {
            let _timer = PhaseTimer::start("boundary");
            self.enforce_boundary();
        }

        let frame_time = started.elapsed();
        warn_if_over_budget(frame_time, self.params.time_step);
        self.metrics = PerformanceMetrics {
            frame_time: frame_time.as_secs_f64(),
            collision_count,
            particle_count: self.particles.len(),
        };

        self.snapshot()
    }

    /// Plain-data view of the world as of the last completed step.
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            particles: self
                .particles
                .iter()
                .map(|(id, particle)| ParticleState {
                    id,
                    position: particle.position,
                    velocity: particle.velocity,
                    mass: particle.mass,
                    radius: particle.radius,
                })
                .collect(),
            boundary: self.boundary,
            performance: self.metrics,
        }
    }

    /// Zeroes the per-step accumulators, then applies gravity and any
    /// registered generators. Gravity enters as `gravity * mass`, so its
    /// acceleration contribution is mass-independent.
    fn accumulate_forces(&mut self, dt: f64) {
        let gravity = self.params.gravity;
        for (_, particle) in self.particles.iter_mut() {
            if particle.is_static {
                continue;
            }
            particle.acceleration = DVec2::ZERO;
            let mass = particle.mass;
            particle.apply_force(gravity * mass);
        }
        self.forces.apply_all(&mut self.particles, dt);
    }

    /// Air resistance is a direct velocity multiplier, not a force: it only
    /// shrinks the speed and the clamp keeps it from reversing direction.
    fn damp_velocities(&mut self, dt: f64) {
        if self.params.air_resistance <= 0.0 {
            return;
        }
        let factor = (1.0 - self.params.air_resistance * dt).max(0.0);
        for (_, particle) in self.particles.iter_mut() {
            if particle.is_static {
                continue;
            }
            particle.velocity *= factor;
        }
    }

    fn run_collision_rounds(&mut self) -> usize {
        let mut collision_count = 0;
        for _ in 0..self.params.collision_iterations {
            let pairs = CollisionDetector::detect(&self.particles);
            collision_count = pairs.len();
            self.resolver.resolve(&mut self.particles, &pairs);
        }
        collision_count
    }

    fn enforce_boundary(&mut self) {
        let mut absorbed = Vec::new();
        for (id, particle) in self.particles.iter_mut() {
            if self.boundary.apply(particle) == BoundaryOutcome::Absorbed {
                absorbed.push(id);
            }
        }
        for id in absorbed {
            self.particles.remove(id);
            self.drop_constraints_of(id);
        }
    }

    fn drop_constraints_of(&mut self, id: ParticleId) {
        let affected: Vec<ConstraintId> = self
            .constraints
            .iter()
            .filter(|(_, constraint)| constraint.particle_a == id || constraint.particle_b == id)
            .map(|(constraint_id, _)| constraint_id)
            .collect();
        for constraint_id in affected {
            self.constraints.remove(constraint_id);
        }
    }
}
