use weft::{
    EulerConstants, ExternalForce, GridSize, IntegratorKind, Simulation, SimulationConfig, SimulationState,
    SpringParameters, SpringSettings, Topology, TopologySource, Vec3,
};

fn lone_euler(forces: Vec<ExternalForce<f64>>) -> Simulation<f64> {
    let config = SimulationConfig::new()
        .with_integrator(IntegratorKind::Euler(EulerConstants { spring_damping: 0.0, air_damping: 0.0 }))
        .with_forces(forces);
    let mut sim = Simulation::new(config);
    sim.seed(Topology::new(vec![Vec3::zero()], Vec::new())).unwrap();
    sim
}

#[test]
fn wind_reads_time_at_start_of_tick() {
    let mut sim = lone_euler(vec![ExternalForce::wind(5.0, 0.2, Vec3::right())]);

    // The gust is zero at t = 0, so the first tick leaves the particle alone.
    sim.step(0.1).unwrap();
    assert_eq!(sim.positions()[0], Vec3::zero());

    sim.step(0.1).unwrap();
    let s = (std::f64::consts::PI * 0.2 * 0.1).sin();
    let expected = 5.0 * s * s * 0.1 * 0.1;
    assert!((sim.positions()[0].x - expected).abs() < 1e-12);
    assert!((sim.elapsed() - 0.2).abs() < 1e-12);
}

#[test]
fn disabled_force_has_no_effect() {
    let mut gravity = ExternalForce::gravity(9.8);
    gravity.set_enabled(false);
    let mut sim = lone_euler(vec![gravity]);
    sim.step(0.1).unwrap();
    assert_eq!(sim.positions()[0], Vec3::zero());

    for force in sim.forces_mut() {
        force.set_enabled(true);
    }
    sim.step(0.1).unwrap();
    assert!(sim.positions()[0].y < 0.0);
}

#[test]
fn spring_changes_apply_to_the_next_tick() {
    let config = SimulationConfig::new()
        .with_integrator(IntegratorKind::Euler(EulerConstants::default()))
        .with_forces(Vec::new());
    let mut sim: Simulation<f64> = Simulation::new(config);
    sim.seed(Topology::new(
        vec![Vec3::zero(), Vec3::new(3.0, 0.0, 0.0)],
        vec![weft::Interaction::new(0, 1, 1.0, weft::InteractionKind::Stretch)],
    ))
    .unwrap();

    let mut springs = *sim.springs();
    springs.stretch.enabled = false;
    sim.set_springs(springs);
    sim.step(0.02).unwrap();
    assert_eq!(sim.positions()[0], Vec3::zero());

    sim.restore_spring_defaults(&SpringSettings::default());
    assert!(sim.springs().stretch.enabled);
    sim.step(0.02).unwrap();
    assert!(sim.positions()[0].x > 0.0);
}

#[test]
fn grid_rest_lengths_come_from_configured_springs() {
    let springs = SpringSettings::default().with_stretch(SpringParameters::new(true, 0.5, 5.0));
    let sim: Simulation<f32> = Simulation::new(SimulationConfig::new().with_springs(springs));
    let topology = sim.build_topology(&TopologySource::Grid(GridSize::new(3, 3))).unwrap();
    let stretch = topology
        .interactions
        .iter()
        .find(|i| i.kind == weft::InteractionKind::Stretch)
        .unwrap();
    assert_eq!(stretch.rest_length, 0.5);
}

#[test]
fn reset_allows_reseeding() {
    let mut sim: Simulation<f32> = Simulation::new(SimulationConfig::new());
    sim.load(&TopologySource::Grid(GridSize::new(3, 3))).unwrap();
    sim.step(0.02).unwrap();
    sim.reset();
    assert_eq!(sim.state(), SimulationState::Uninitialized);
    assert_eq!(sim.elapsed(), 0.0);

    sim.load(&TopologySource::Grid(GridSize::new(2, 2))).unwrap();
    assert_eq!(sim.state(), SimulationState::Ready);
    assert_eq!(sim.particle_count(), 4);
}

#[test]
fn set_fixed_pins_a_falling_particle() {
    let config = SimulationConfig::new().with_forces(vec![ExternalForce::gravity(9.8)]);
    let mut sim: Simulation<f64> = Simulation::new(config);
    sim.load(&TopologySource::Grid(GridSize::new(2, 2))).unwrap();
    for i in 0..4 {
        sim.set_fixed(i, true).unwrap();
    }
    let before = sim.positions();
    sim.step(0.02).unwrap();
    assert_eq!(sim.positions(), before);
}
