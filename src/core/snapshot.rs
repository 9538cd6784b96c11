use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::utils::arena::ParticleId;

use super::boundary::BoundaryConfig;

/// Per-particle state exposed to transport and persistence layers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ParticleState {
    pub id: ParticleId,
    pub position: DVec2,
    pub velocity: DVec2,
    pub mass: f64,
    pub radius: f64,
}

/// Step-level counters recorded after each tick.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    /// Wall-clock duration of the last step, in seconds.
    pub frame_time: f64,
    /// Pair count of the last detection pass.
    pub collision_count: usize,
    pub particle_count: usize,
}

/// Immutable world snapshot emitted by `step` and `snapshot`. Plain data; any
/// wire or storage format is the consumer's concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub particles: Vec<ParticleState>,
    pub boundary: BoundaryConfig,
    pub performance: PerformanceMetrics,
}
