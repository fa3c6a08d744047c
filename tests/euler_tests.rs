use weft::{
    EulerConstants, ExternalForce, GridSize, Interaction, InteractionKind, IntegratorKind, Simulation,
    SimulationConfig, SpringSettings, Topology, TopologySource, Vec3,
};

fn euler(spring_damping: f64, air_damping: f64) -> IntegratorKind<f64> {
    IntegratorKind::Euler(EulerConstants { spring_damping, air_damping })
}

fn lone_particle() -> Topology<f64> {
    Topology::new(vec![Vec3::new(0.0, 10.0, 0.0)], Vec::new())
}

#[test]
fn free_fall_matches_symplectic_sum() {
    let dt = 0.01;
    let g = 9.8;
    let config = SimulationConfig::new()
        .with_integrator(euler(0.0, 0.0))
        .with_particle_mass(3.0)
        .with_forces(vec![ExternalForce::gravity(g)]);
    let mut sim = Simulation::new(config);
    sim.seed(lone_particle()).unwrap();

    let steps = 50;
    for _ in 0..steps {
        sim.step(dt).unwrap();
    }

    // x_n = x_0 - g dt^2 n (n + 1) / 2, independent of mass.
    let n = steps as f64;
    let expected = 10.0 - g * dt * dt * n * (n + 1.0) / 2.0;
    let y = sim.positions()[0].y;
    assert!((y - expected).abs() < 1e-9, "y = {}, expected {}", y, expected);

    let velocity = sim.integrator().and_then(|i| i.as_euler()).unwrap().euler_particle(0).unwrap().velocity;
    assert!((velocity.y + g * dt * n).abs() < 1e-9);
}

#[test]
fn air_damping_slows_a_moving_particle() {
    let config = SimulationConfig::new().with_integrator(euler(0.0, 3.0)).with_forces(Vec::new());
    let mut sim = Simulation::new(config);
    sim.seed(lone_particle()).unwrap();
    sim.drag(0, Vec3::new(0.2, 10.0, 0.0)).unwrap();

    let speed = |sim: &Simulation<f64>| {
        sim.integrator().and_then(|i| i.as_euler()).unwrap().euler_particle(0).unwrap().velocity.length()
    };
    let initial = speed(&sim);
    sim.step(0.02).unwrap();
    assert!(speed(&sim) < initial);
}

#[test]
fn stretched_spring_pulls_first_particle_only() {
    let config = SimulationConfig::new()
        .with_integrator(euler(0.0, 0.0))
        .with_forces(Vec::new());
    let mut sim = Simulation::new(config);
    sim.seed(Topology::new(
        vec![Vec3::zero(), Vec3::new(3.0, 0.0, 0.0)],
        vec![Interaction::new(0, 1, 1.0, InteractionKind::Stretch)],
    ))
    .unwrap();

    sim.step(0.01).unwrap();
    let p = sim.positions();
    assert!(p[0].x > 0.0, "first particle should move towards the second");
    assert_eq!(p[1], Vec3::new(3.0, 0.0, 0.0));
}

#[test]
fn grid_springs_stay_near_rest_under_gravity() {
    let size = GridSize::new(4, 4);
    let top_row: Vec<usize> = (0..size.width).map(|x| size.index(x, 0)).collect();
    let config = SimulationConfig::new()
        .with_integrator(euler(3.0, 3.0))
        .with_springs(SpringSettings::default())
        .with_forces(vec![ExternalForce::gravity(9.8)])
        .with_fixed_particles(top_row.clone());
    let mut sim = Simulation::new(config);
    sim.load(&TopologySource::Grid(size)).unwrap();
    let initial = sim.positions();

    for _ in 0..200 {
        sim.step(0.005).unwrap();
    }

    let positions = sim.positions();
    for p in &positions {
        assert!(p.x.is_finite() && p.y.is_finite() && p.z.is_finite());
    }
    for &i in &top_row {
        assert_eq!(positions[i], initial[i]);
    }
    let bottom = size.index(0, size.height - 1);
    assert!(positions[bottom].y < initial[bottom].y);
}

#[test]
fn drag_sets_velocity_from_displacement() {
    let config = SimulationConfig::new()
        .with_integrator(euler(3.0, 3.0))
        .with_timestep(0.02)
        .with_fixed_particles(vec![0]);
    let mut sim = Simulation::new(config);
    sim.seed(lone_particle()).unwrap();

    // Before any tick the configured timestep is used.
    sim.drag(0, Vec3::new(0.1, 10.0, 0.0)).unwrap();
    assert_eq!(sim.positions()[0], Vec3::new(0.1, 10.0, 0.0));
    let v = sim.integrator().and_then(|i| i.as_euler()).unwrap().euler_particle(0).unwrap().velocity;
    assert!((v.x - 5.0).abs() < 1e-9);

    // Afterwards the last tick's dt is used.
    sim.step(0.05).unwrap();
    sim.drag(0, Vec3::new(0.1, 10.5, 0.0)).unwrap();
    let v = sim.integrator().and_then(|i| i.as_euler()).unwrap().euler_particle(0).unwrap().velocity;
    assert!((v.y - 10.0).abs() < 1e-9);
    assert!(sim.particle(0).unwrap().fixed);
}

#[test]
fn drag_after_zero_length_tick_stays_finite() {
    let config = SimulationConfig::new()
        .with_integrator(euler(3.0, 3.0))
        .with_forces(vec![ExternalForce::gravity(9.8)]);
    let mut sim = Simulation::new(config);
    sim.seed(lone_particle()).unwrap();

    sim.step(0.0).unwrap();
    sim.drag(0, Vec3::new(1.0, 0.0, 0.0)).unwrap();
    sim.step(0.02).unwrap();

    let p = sim.positions()[0];
    assert!(p.x.is_finite() && p.y.is_finite() && p.z.is_finite(), "{:?}", p);
    assert_eq!(p.x, 1.0);
}
