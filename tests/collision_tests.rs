use approx::{assert_abs_diff_eq, assert_relative_eq};
use corpuscle::*;

const DT: f64 = 1.0 / 60.0;

fn isolated_params() -> PhysicsParameters {
    PhysicsParameters {
        gravity: DVec2::ZERO,
        air_resistance: 0.0,
        ..Default::default()
    }
}

#[test]
fn head_on_equal_mass_elastic_collision_exchanges_velocities() {
    let mut engine = PhysicsEngine::new(isolated_params()).unwrap();
    let left = engine
        .add_particle(
            Particle::builder()
                .position(DVec2::new(-1.0, 0.0))
                .velocity(DVec2::new(1.0, 0.0))
                .restitution(1.0)
                .friction(0.0),
        )
        .unwrap();
    let right = engine
        .add_particle(
            Particle::builder()
                .position(DVec2::new(1.0, 0.0))
                .velocity(DVec2::new(-1.0, 0.0))
                .restitution(1.0)
                .friction(0.0),
        )
        .unwrap();

    engine.step(DT);

    assert_relative_eq!(engine.particle(left).unwrap().velocity.x, -1.0);
    assert_relative_eq!(engine.particle(right).unwrap().velocity.x, 1.0);
}

#[test]
fn isolated_elastic_collision_conserves_kinetic_energy() {
    let mut engine = PhysicsEngine::new(isolated_params()).unwrap();
    engine
        .add_particle(
            Particle::builder()
                .position(DVec2::new(-1.1, 0.05))
                .velocity(DVec2::new(3.0, 0.0))
                .mass(2.0)
                .restitution(1.0)
                .friction(0.0),
        )
        .unwrap();
    engine
        .add_particle(
            Particle::builder()
                .position(DVec2::new(0.8, -0.05))
                .velocity(DVec2::new(-0.5, 0.2))
                .mass(1.0)
                .restitution(1.0)
                .friction(0.0),
        )
        .unwrap();

    let kinetic_energy = |snapshot: &StateSnapshot| -> f64 {
        snapshot
            .particles
            .iter()
            .map(|p| 0.5 * p.mass * p.velocity.length_squared())
            .sum()
    };

    let before = kinetic_energy(&engine.snapshot());
    for _ in 0..60 {
        engine.step(DT);
    }
    let after = kinetic_energy(&engine.snapshot());

    assert_abs_diff_eq!(after, before, epsilon = before * 1e-9);
}

#[test]
fn momentum_is_conserved_between_dynamic_particles() {
    let mut engine = PhysicsEngine::new(isolated_params()).unwrap();
    engine
        .add_particle(
            Particle::builder()
                .position(DVec2::new(-1.0, 0.0))
                .velocity(DVec2::new(2.0, 0.0))
                .mass(3.0)
                .restitution(0.4),
        )
        .unwrap();
    engine
        .add_particle(
            Particle::builder()
                .position(DVec2::new(1.0, 0.0))
                .velocity(DVec2::new(-1.0, 0.0))
                .mass(1.0)
                .restitution(0.4),
        )
        .unwrap();

    let momentum = |snapshot: &StateSnapshot| -> DVec2 {
        snapshot
            .particles
            .iter()
            .map(|p| p.velocity * p.mass)
            .fold(DVec2::ZERO, |sum, p| sum + p)
    };

    let before = momentum(&engine.snapshot());
    for _ in 0..30 {
        engine.step(DT);
    }
    let after = momentum(&engine.snapshot());

    assert_abs_diff_eq!(after.x, before.x, epsilon = 1e-9);
    assert_abs_diff_eq!(after.y, before.y, epsilon = 1e-9);
}

#[test]
fn restitution_uses_the_less_bouncy_surface() {
    let mut engine = PhysicsEngine::new(isolated_params()).unwrap();
    let ball = engine
        .add_particle(
            Particle::builder()
                .position(DVec2::new(-1.2, 0.0))
                .velocity(DVec2::new(1.0, 0.0))
                .restitution(0.0),
        )
        .unwrap();
    engine
        .add_particle(
            Particle::builder()
                .position(DVec2::new(1.2, 0.0))
                .restitution(1.0)
                .is_static(true),
        )
        .unwrap();

    for _ in 0..120 {
        engine.step(DT);
    }

    // fully inelastic pairing: the ball stops instead of rebounding
    let vx = engine.particle(ball).unwrap().velocity.x;
    assert_abs_diff_eq!(vx, 0.0, epsilon = 1e-9);
}

#[test]
fn filtered_particles_pass_through_each_other() {
    let mut engine = PhysicsEngine::new(isolated_params()).unwrap();
    let ghost = engine
        .add_particle(
            Particle::builder()
                .position(DVec2::new(-1.0, 0.0))
                .velocity(DVec2::new(2.0, 0.0))
                .filter(2, 2, 0),
        )
        .unwrap();
    engine
        .add_particle(
            Particle::builder()
                .position(DVec2::new(1.0, 0.0))
                .filter(4, 4, 0),
        )
        .unwrap();

    for _ in 0..60 {
        engine.step(DT);
    }

    // never deflected: still traveling at full speed along +x
    assert_relative_eq!(engine.particle(ghost).unwrap().velocity.x, 2.0);
    assert_relative_eq!(engine.particle(ghost).unwrap().velocity.y, 0.0);
}

#[test]
fn overlapping_stack_relaxes_apart_over_steps() {
    let mut engine = PhysicsEngine::new(isolated_params()).unwrap();
    let a = engine
        .add_particle(Particle::builder().position(DVec2::new(0.0, 0.0)))
        .unwrap();
    let b = engine
        .add_particle(Particle::builder().position(DVec2::new(0.5, 0.0)))
        .unwrap();

    for _ in 0..240 {
        engine.step(DT);
    }

    // correction converges until only the slop-sized residual remains
    let separation = (engine.particle(b).unwrap().position
        - engine.particle(a).unwrap().position)
        .length();
    assert!(
        separation >= 2.0 - 0.011,
        "positional correction should push overlapping circles apart, separation = {separation}"
    );
}
