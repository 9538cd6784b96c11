use crate::core::particle::Particle;
use crate::utils::arena::{Arena, ParticleId};
use crate::utils::math::contact_normal;

use super::contact::CollisionPair;

/// All-pairs circle–circle overlap scan.
///
/// Every particle in this engine is a circle; there is no other narrow-phase
/// shape, and no broad-phase culling in front of the O(n²) scan. Pairs are
/// visited in arena index order, so detection is deterministic for identical
/// world states.
pub struct CollisionDetector;

impl CollisionDetector {
    pub fn detect(particles: &Arena<ParticleId, Particle>) -> Vec<CollisionPair> {
        let live: Vec<(ParticleId, &Particle)> = particles.iter().collect();
        let mut pairs = Vec::new();

        for i in 0..live.len() {
            for j in (i + 1)..live.len() {
                let (id_a, a) = live[i];
                let (id_b, b) = live[j];

                if a.is_static && b.is_static {
                    continue;
                }
                if !a.collision_filter.allows(&b.collision_filter) {
                    continue;
                }
                if let Some(pair) = Self::circle_circle(id_a, a, id_b, b) {
                    pairs.push(pair);
                }
            }
        }

        pairs
    }

    fn circle_circle(
        id_a: ParticleId,
        a: &Particle,
        id_b: ParticleId,
        b: &Particle,
    ) -> Option<CollisionPair> {
        let radius_sum = a.radius + b.radius;
        let distance_squared = (b.position - a.position).length_squared();
        if distance_squared >= radius_sum * radius_sum {
            return None;
        }

        let distance = distance_squared.sqrt();
        let normal = contact_normal(a.position, b.position);
        Some(CollisionPair {
            particle_a: id_a,
            particle_b: id_b,
            contact_point: a.position + normal * a.radius,
            normal,
            penetration: radius_sum - distance,
        })
    }
}
