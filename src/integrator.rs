//! The integrator capability and the Euler/Verlet selector.

use crate::config::{IntegratorKind, TearingConfig};
use crate::error::{check_index, ClothError};
use crate::euler::EulerSolver;
use crate::float::Float;
use crate::force::ExternalForce;
use crate::interaction::Interaction;
use crate::observer::StepObserver;
use crate::particle::Particle;
use crate::spring::SpringSettings;
use crate::topology::Topology;
use crate::verlet::VerletSolver;
use crate::vec::Vec3;
use alloc::vec::Vec as AllocVec;

/// Per-tick inputs read by an integrator.
#[derive(Copy, Clone, Debug)]
pub struct StepContext<'a, F: Float> {
    pub dt: F,
    /// Simulation time at the start of the tick.
    pub time: F,
    pub springs: &'a SpringSettings<F>,
    pub forces: &'a [ExternalForce<F>],
    pub tearing: &'a TearingConfig<F>,
}

/// What the driver needs from an integrator.
pub trait Integrate<F: Float> {
    /// Advance one fixed tick.
    fn step<O: StepObserver>(&mut self, ctx: &StepContext<'_, F>, observer: &mut O);

    /// Relocate a particle, bypassing forces and the fixed flag.
    fn drag(&mut self, index: usize, position: Vec3<F>, dt: F) -> Result<(), ClothError>;

    fn particle(&self, index: usize) -> Option<&Particle<F>>;

    fn particle_mut(&mut self, index: usize) -> Option<&mut Particle<F>>;

    fn particle_count(&self) -> usize;

    fn positions(&self) -> AllocVec<Vec3<F>>;

    fn interactions(&self) -> &[Interaction<F>];

    fn set_fixed(&mut self, index: usize, fixed: bool) -> Result<(), ClothError> {
        let count = self.particle_count();
        check_index(index, count)?;
        if let Some(p) = self.particle_mut(index) {
            p.fixed = fixed;
        }
        Ok(())
    }
}

/// A seeded integrator of either kind.
#[derive(Clone, Debug)]
pub enum Integrator<F: Float> {
    Euler(EulerSolver<F>),
    Verlet(VerletSolver<F>),
}

impl<F: Float> Integrator<F> {
    /// Seed an integrator of `kind` from `topology`, every particle of mass `mass`.
    pub fn seed(kind: &IntegratorKind<F>, topology: Topology<F>, mass: F) -> Result<Self, ClothError> {
        match kind {
            IntegratorKind::Euler(constants) => Ok(Integrator::Euler(EulerSolver::new(topology, mass, *constants)?)),
            IntegratorKind::Verlet(constants) => Ok(Integrator::Verlet(VerletSolver::new(topology, mass, *constants)?)),
        }
    }

    pub fn as_euler(&self) -> Option<&EulerSolver<F>> {
        match self {
            Integrator::Euler(s) => Some(s),
            Integrator::Verlet(_) => None,
        }
    }

    pub fn as_verlet(&self) -> Option<&VerletSolver<F>> {
        match self {
            Integrator::Verlet(s) => Some(s),
            Integrator::Euler(_) => None,
        }
    }
}

impl<F: Float> Integrate<F> for Integrator<F> {
    fn step<O: StepObserver>(&mut self, ctx: &StepContext<'_, F>, observer: &mut O) {
        match self {
            Integrator::Euler(s) => s.step(ctx, observer),
            Integrator::Verlet(s) => s.step(ctx, observer),
        }
    }

    fn drag(&mut self, index: usize, position: Vec3<F>, dt: F) -> Result<(), ClothError> {
        match self {
            Integrator::Euler(s) => s.drag(index, position, dt),
            Integrator::Verlet(s) => s.drag(index, position, dt),
        }
    }

    fn set_fixed(&mut self, index: usize, fixed: bool) -> Result<(), ClothError> {
        match self {
            Integrator::Euler(s) => s.set_fixed(index, fixed),
            Integrator::Verlet(s) => s.set_fixed(index, fixed),
        }
    }

    fn particle(&self, index: usize) -> Option<&Particle<F>> {
        match self {
            Integrator::Euler(s) => s.particle(index),
            Integrator::Verlet(s) => s.particle(index),
        }
    }

    fn particle_mut(&mut self, index: usize) -> Option<&mut Particle<F>> {
        match self {
            Integrator::Euler(s) => s.particle_mut(index),
            Integrator::Verlet(s) => s.particle_mut(index),
        }
    }

    fn particle_count(&self) -> usize {
        match self {
            Integrator::Euler(s) => s.particle_count(),
            Integrator::Verlet(s) => s.particle_count(),
        }
    }

    fn positions(&self) -> AllocVec<Vec3<F>> {
        match self {
            Integrator::Euler(s) => s.positions(),
            Integrator::Verlet(s) => s.positions(),
        }
    }

    fn interactions(&self) -> &[Interaction<F>] {
        match self {
            Integrator::Euler(s) => s.interactions(),
            Integrator::Verlet(s) => s.interactions(),
        }
    }
}
