//! The simulation driver: seeds an integrator once, then ticks it.

use crate::config::SimulationConfig;
use crate::error::{check_index, ClothError};
use crate::float::Float;
use crate::force::ExternalForce;
use crate::integrator::{Integrate, Integrator, StepContext};
use crate::interaction::Interaction;
use crate::observer::{NoOpStepObserver, StepObserver};
use crate::particle::Particle;
use crate::spring::SpringSettings;
use crate::topology::{Topology, TopologySource};
use crate::vec::Vec3;
use alloc::vec::Vec as AllocVec;

/// Lifecycle of a [`Simulation`].
///
/// Tearing does not change the state; a torn cloth keeps ticking as `Running`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SimulationState {
    /// No topology seeded yet.
    Uninitialized,
    /// Seeded, not ticked yet.
    Ready,
    /// Ticked at least once.
    Running,
}

/// Owns the configuration and the seeded integrator.
///
/// Every mutation takes `&mut self`, so a drag always fully resolves before
/// the next tick reads particle state.
pub struct Simulation<F: Float> {
    config: SimulationConfig<F>,
    integrator: Option<Integrator<F>>,
    state: SimulationState,
    elapsed: F,
    last_dt: Option<F>,
    seeded_interactions: usize,
}

impl<F: Float> Simulation<F> {
    pub fn new(config: SimulationConfig<F>) -> Self {
        Simulation {
            config,
            integrator: None,
            state: SimulationState::Uninitialized,
            elapsed: F::zero(),
            last_dt: None,
            seeded_interactions: 0,
        }
    }

    pub fn config(&self) -> &SimulationConfig<F> {
        &self.config
    }

    pub fn state(&self) -> SimulationState {
        self.state
    }

    /// Simulation time accumulated over all ticks.
    pub fn elapsed(&self) -> F {
        self.elapsed
    }

    /// Build a topology using the configured spring rest lengths for grids.
    pub fn build_topology(&self, source: &TopologySource<F>) -> Result<Topology<F>, ClothError> {
        source.build(&self.config.springs)
    }

    /// Seed particles and interactions. Only valid while `Uninitialized`.
    pub fn seed(&mut self, topology: Topology<F>) -> Result<(), ClothError> {
        if self.state != SimulationState::Uninitialized {
            return Err(ClothError::AlreadySeeded);
        }
        topology.validate()?;
        let count = topology.particle_count();
        for &index in &self.config.fixed_particles {
            check_index(index, count)?;
        }

        let interactions = topology.interactions.len();
        let mut integrator = Integrator::seed(&self.config.integrator, topology, self.config.particle_mass)?;
        for &index in &self.config.fixed_particles {
            integrator.set_fixed(index, true)?;
        }

        log::debug!("seeded {} particles and {} interactions", count, interactions);
        self.integrator = Some(integrator);
        self.seeded_interactions = interactions;
        self.elapsed = F::zero();
        self.last_dt = None;
        self.state = SimulationState::Ready;
        Ok(())
    }

    /// Build from `source` and seed in one go.
    pub fn load(&mut self, source: &TopologySource<F>) -> Result<(), ClothError> {
        let topology = self.build_topology(source)?;
        self.seed(topology)
    }

    /// Drop the seeded state and return to `Uninitialized`.
    pub fn reset(&mut self) {
        log::debug!("simulation reset");
        self.integrator = None;
        self.seeded_interactions = 0;
        self.elapsed = F::zero();
        self.last_dt = None;
        self.state = SimulationState::Uninitialized;
    }

    pub fn step(&mut self, dt: F) -> Result<(), ClothError> {
        self.step_with(dt, &mut NoOpStepObserver)
    }

    /// Advance one fixed tick of length `dt`, reporting progress to `observer`.
    pub fn step_with<O: StepObserver>(&mut self, dt: F, observer: &mut O) -> Result<(), ClothError> {
        let integrator = self.integrator.as_mut().ok_or(ClothError::NotSeeded)?;
        let ctx = StepContext {
            dt,
            time: self.elapsed,
            springs: &self.config.springs,
            forces: &self.config.forces,
            tearing: &self.config.tearing,
        };
        integrator.step(&ctx, observer);
        self.elapsed = self.elapsed + dt;
        self.last_dt = Some(dt);
        self.state = SimulationState::Running;
        Ok(())
    }

    /// Externally override a particle's position (e.g. user dragging).
    ///
    /// Bypasses the fixed flag. Euler derives the new velocity from the last
    /// tick's `dt` (or the configured timestep before any tick).
    pub fn drag(&mut self, index: usize, position: Vec3<F>) -> Result<(), ClothError> {
        let dt = self.last_dt.unwrap_or(self.config.timestep);
        self.integrator_mut()?.drag(index, position, dt)
    }

    pub fn set_fixed(&mut self, index: usize, fixed: bool) -> Result<(), ClothError> {
        self.integrator_mut()?.set_fixed(index, fixed)
    }

    pub fn springs(&self) -> &SpringSettings<F> {
        &self.config.springs
    }

    /// Replace the spring parameters read by the next tick.
    pub fn set_springs(&mut self, springs: SpringSettings<F>) {
        self.config.springs = springs;
    }

    pub fn restore_spring_defaults(&mut self, defaults: &SpringSettings<F>) {
        self.config.springs = self.config.springs.restore_defaults(defaults);
    }

    pub fn forces_mut(&mut self) -> &mut AllocVec<ExternalForce<F>> {
        &mut self.config.forces
    }

    pub fn integrator(&self) -> Option<&Integrator<F>> {
        self.integrator.as_ref()
    }

    fn integrator_mut(&mut self) -> Result<&mut Integrator<F>, ClothError> {
        self.integrator.as_mut().ok_or(ClothError::NotSeeded)
    }

    pub fn particle(&self, index: usize) -> Result<&Particle<F>, ClothError> {
        let integrator = self.integrator.as_ref().ok_or(ClothError::NotSeeded)?;
        integrator.particle(index).ok_or(ClothError::ParticleOutOfBounds {
            index,
            count: integrator.particle_count(),
        })
    }

    pub fn particle_count(&self) -> usize {
        self.integrator.as_ref().map_or(0, |i| i.particle_count())
    }

    /// Current positions; empty before seeding.
    pub fn positions(&self) -> AllocVec<Vec3<F>> {
        self.integrator.as_ref().map_or_else(AllocVec::new, |i| i.positions())
    }

    /// Live interactions; empty before seeding.
    pub fn interactions(&self) -> &[Interaction<F>] {
        match &self.integrator {
            Some(integrator) => integrator.interactions(),
            None => &[],
        }
    }

    /// Interactions removed by tearing since seeding.
    pub fn torn_count(&self) -> usize {
        self.seeded_interactions - self.interactions().len()
    }
}
