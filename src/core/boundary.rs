use std::str::FromStr;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_BOUNDARY_ELASTICITY, DEFAULT_BOUNDS};
use crate::error::{PhysicsError, PhysicsResult};
use crate::utils::math::wrap_component;

use super::particle::Particle;

/// Exit behavior at the domain edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryKind {
    Wrap,
    Bounce,
    Absorb,
}

impl FromStr for BoundaryKind {
    type Err = PhysicsError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "wrap" => Ok(BoundaryKind::Wrap),
            "bounce" => Ok(BoundaryKind::Bounce),
            "absorb" => Ok(BoundaryKind::Absorb),
            other => Err(PhysicsError::Configuration(format!(
                "unknown boundary kind '{other}'"
            ))),
        }
    }
}

/// What happened to a particle when the boundary was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryOutcome {
    Kept,
    Absorbed,
}

/// Active domain edges and exit behavior. Replaced wholesale by
/// `set_boundary`; a single instance is live per engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BoundaryConfig {
    pub kind: BoundaryKind,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub elasticity: f64,
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        let [x_min, x_max, y_min, y_max] = DEFAULT_BOUNDS;
        Self {
            kind: BoundaryKind::Bounce,
            x_min,
            x_max,
            y_min,
            y_max,
            elasticity: DEFAULT_BOUNDARY_ELASTICITY,
        }
    }
}

impl BoundaryConfig {
    pub fn new(
        kind: BoundaryKind,
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
        elasticity: f64,
    ) -> PhysicsResult<Self> {
        let config = Self {
            kind,
            x_min,
            x_max,
            y_min,
            y_max,
            elasticity,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> PhysicsResult<()> {
        let edges = [self.x_min, self.x_max, self.y_min, self.y_max];
        if edges.iter().any(|edge| !edge.is_finite()) {
            return Err(PhysicsError::Configuration(
                "boundary edges must be finite".into(),
            ));
        }
        if self.x_min >= self.x_max || self.y_min >= self.y_max {
            return Err(PhysicsError::Configuration(
                "boundary minima must be strictly below maxima".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.elasticity) {
            return Err(PhysicsError::Configuration(
                "boundary elasticity must lie in [0, 1]".into(),
            ));
        }
        Ok(())
    }

    pub fn contains(&self, point: DVec2) -> bool {
        point.x >= self.x_min
            && point.x <= self.x_max
            && point.y >= self.y_min
            && point.y <= self.y_max
    }

    /// Applies the exit behavior to one particle. `Absorbed` asks the engine
    /// to drop the particle from its active set.
    pub(crate) fn apply(&self, particle: &mut Particle) -> BoundaryOutcome {
        match self.kind {
            BoundaryKind::Wrap => {
                particle.position.x = wrap_component(particle.position.x, self.x_min, self.x_max);
                particle.position.y = wrap_component(particle.position.y, self.y_min, self.y_max);
                BoundaryOutcome::Kept
            }
            BoundaryKind::Bounce => {
                self.bounce_axis(
                    &mut particle.position.x,
                    &mut particle.velocity.x,
                    self.x_min,
                    self.x_max,
                );
                self.bounce_axis(
                    &mut particle.position.y,
                    &mut particle.velocity.y,
                    self.y_min,
                    self.y_max,
                );
                BoundaryOutcome::Kept
            }
            BoundaryKind::Absorb => {
                if self.contains(particle.position) {
                    BoundaryOutcome::Kept
                } else {
                    BoundaryOutcome::Absorbed
                }
            }
        }
    }

    fn bounce_axis(&self, position: &mut f64, velocity: &mut f64, min: f64, max: f64) {
        if *position < min {
            *position = min;
            *velocity = -*velocity * self.elasticity;
        } else if *position > max {
            *position = max;
            *velocity = -*velocity * self.elasticity;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn particle_at(x: f64, y: f64, vx: f64, vy: f64) -> Particle {
        let mut particle = Particle::builder()
            .position(DVec2::new(x, y))
            .velocity(DVec2::new(vx, vy))
            .build()
            .unwrap();
        particle.acceleration = DVec2::ZERO;
        particle
    }

    #[test]
    fn unknown_kind_string_is_a_configuration_error() {
        let parsed = "teleport".parse::<BoundaryKind>();
        assert!(matches!(parsed, Err(PhysicsError::Configuration(_))));
        assert_eq!("bounce".parse::<BoundaryKind>().unwrap(), BoundaryKind::Bounce);
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let result = BoundaryConfig::new(BoundaryKind::Wrap, 10.0, -10.0, 0.0, 10.0, 1.0);
        assert!(matches!(result, Err(PhysicsError::Configuration(_))));
    }

    #[test]
    fn wrap_pulls_positions_back_into_range() {
        let boundary = BoundaryConfig::new(BoundaryKind::Wrap, 0.0, 10.0, 0.0, 10.0, 1.0).unwrap();
        let mut particle = particle_at(12.0, -3.0, 0.0, 0.0);

        assert_eq!(boundary.apply(&mut particle), BoundaryOutcome::Kept);
        assert_relative_eq!(particle.position.x, 2.0);
        assert_relative_eq!(particle.position.y, 7.0);
    }

    #[test]
    fn bounce_clamps_and_reflects_with_elasticity() {
        let boundary = BoundaryConfig::new(BoundaryKind::Bounce, 0.0, 10.0, 0.0, 10.0, 0.5).unwrap();
        let mut particle = particle_at(11.0, 5.0, 2.0, 0.0);

        boundary.apply(&mut particle);
        assert_relative_eq!(particle.position.x, 10.0);
        assert_relative_eq!(particle.velocity.x, -1.0);
    }

    #[test]
    fn absorb_flags_particles_outside_the_domain() {
        let boundary = BoundaryConfig::new(BoundaryKind::Absorb, 0.0, 10.0, 0.0, 10.0, 1.0).unwrap();
        let mut inside = particle_at(5.0, 5.0, 0.0, 0.0);
        let mut outside = particle_at(5.0, 10.5, 0.0, 0.0);

        assert_eq!(boundary.apply(&mut inside), BoundaryOutcome::Kept);
        assert_eq!(boundary.apply(&mut outside), BoundaryOutcome::Absorbed);
    }
}
