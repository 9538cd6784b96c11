use approx::assert_relative_eq;
use corpuscle::*;

fn drifting_params() -> PhysicsParameters {
    PhysicsParameters {
        gravity: DVec2::ZERO,
        air_resistance: 0.0,
        ..Default::default()
    }
}

fn unit_box(kind: BoundaryKind, elasticity: f64) -> BoundaryConfig {
    BoundaryConfig::new(kind, 0.0, 10.0, 0.0, 10.0, elasticity).unwrap()
}

#[test]
fn wrap_keeps_every_particle_inside_the_domain() {
    let mut engine = PhysicsEngine::new(drifting_params()).unwrap();
    engine
        .set_boundary(unit_box(BoundaryKind::Wrap, 1.0))
        .unwrap();

    engine
        .add_particle(
            Particle::builder()
                .position(DVec2::new(9.5, 5.0))
                .velocity(DVec2::new(40.0, -13.0)),
        )
        .unwrap();
    engine
        .add_particle(
            Particle::builder()
                .position(DVec2::new(0.5, 0.5))
                .velocity(DVec2::new(-7.0, 25.0)),
        )
        .unwrap();

    for _ in 0..180 {
        let snapshot = engine.step(1.0 / 60.0);
        for particle in &snapshot.particles {
            assert!(
                (0.0..=10.0).contains(&particle.position.x),
                "x escaped: {}",
                particle.position.x
            );
            assert!(
                (0.0..=10.0).contains(&particle.position.y),
                "y escaped: {}",
                particle.position.y
            );
        }
    }
}

#[test]
fn bounce_reflects_velocity_at_the_edge() {
    let mut engine = PhysicsEngine::new(drifting_params()).unwrap();
    engine
        .set_boundary(unit_box(BoundaryKind::Bounce, 1.0))
        .unwrap();
    let id = engine
        .add_particle(
            Particle::builder()
                .position(DVec2::new(9.0, 5.0))
                .velocity(DVec2::new(2.0, 0.0)),
        )
        .unwrap();

    engine.step(1.0);

    let particle = engine.particle(id).unwrap();
    assert!(particle.velocity.x < 0.0, "vx = {}", particle.velocity.x);
    assert_relative_eq!(particle.position.x, 10.0);
}

#[test]
fn bounce_elasticity_scales_the_reflected_speed() {
    let mut engine = PhysicsEngine::new(drifting_params()).unwrap();
    engine
        .set_boundary(unit_box(BoundaryKind::Bounce, 0.25))
        .unwrap();
    let id = engine
        .add_particle(
            Particle::builder()
                .position(DVec2::new(9.0, 5.0))
                .velocity(DVec2::new(4.0, 0.0)),
        )
        .unwrap();

    engine.step(1.0);

    assert_relative_eq!(engine.particle(id).unwrap().velocity.x, -1.0);
}

#[test]
fn absorb_removes_exactly_the_escaping_particle() {
    let mut engine = PhysicsEngine::new(drifting_params()).unwrap();
    engine
        .set_boundary(unit_box(BoundaryKind::Absorb, 1.0))
        .unwrap();

    let escaping = engine
        .add_particle(
            Particle::builder()
                .position(DVec2::new(9.5, 5.0))
                .velocity(DVec2::new(60.0, 0.0)),
        )
        .unwrap();
    let resting = engine
        .add_particle(Particle::builder().position(DVec2::new(5.0, 5.0)))
        .unwrap();

    let before = engine.particle_count();
    let snapshot = engine.step(1.0 / 60.0);

    assert_eq!(before, 2);
    assert_eq!(snapshot.performance.particle_count, 1);
    assert!(engine.particle(escaping).is_none());
    assert!(engine.particle(resting).is_some());
}

#[test]
fn absorb_cascades_to_attached_constraints() {
    let mut engine = PhysicsEngine::new(drifting_params()).unwrap();
    engine
        .set_boundary(unit_box(BoundaryKind::Absorb, 1.0))
        .unwrap();

    let escaping = engine
        .add_particle(
            Particle::builder()
                .position(DVec2::new(9.9, 5.0))
                .velocity(DVec2::new(120.0, 0.0)),
        )
        .unwrap();
    let anchor = engine
        .add_particle(Particle::builder().position(DVec2::new(5.0, 5.0)).is_static(true))
        .unwrap();
    engine
        .add_constraint(ConstraintBuilder::distance(escaping, anchor, 0.0, 100.0))
        .unwrap();

    engine.step(1.0 / 60.0);

    assert_eq!(engine.particle_count(), 1);
    assert_eq!(engine.constraint_count(), 0);
}

#[test]
fn rejected_boundary_leaves_the_active_one_in_place() {
    let mut engine = PhysicsEngine::new(drifting_params()).unwrap();
    engine
        .set_boundary(unit_box(BoundaryKind::Wrap, 1.0))
        .unwrap();

    let inverted = BoundaryConfig {
        kind: BoundaryKind::Bounce,
        x_min: 5.0,
        x_max: -5.0,
        y_min: 0.0,
        y_max: 1.0,
        elasticity: 1.0,
    };
    assert!(matches!(
        engine.set_boundary(inverted),
        Err(PhysicsError::Configuration(_))
    ));

    assert_eq!(engine.boundary().kind, BoundaryKind::Wrap);
    assert_relative_eq!(engine.boundary().x_max, 10.0);
}
