use glam::DVec2;

use crate::utils::arena::ParticleId;

/// Candidate collision between two overlapping circles. Transient: rebuilt
/// from scratch on every detection pass.
#[derive(Debug, Clone, Copy)]
pub struct CollisionPair {
    pub particle_a: ParticleId,
    pub particle_b: ParticleId,
    /// Point on the surface of `particle_a` along the contact normal.
    pub contact_point: DVec2,
    /// Unit vector from `particle_a` toward `particle_b`.
    pub normal: DVec2,
    pub penetration: f64,
}
