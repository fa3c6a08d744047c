//! Configuration types for the simulation.

use crate::float::Float;
use crate::force::{default_forces, ExternalForce};
use crate::spring::SpringSettings;
use alloc::vec::Vec as AllocVec;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Constants of the Euler integrator.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EulerConstants<F: Float> {
    /// Scales the relative velocity of a spring's endpoints. Default: 3.
    pub spring_damping: F,
    /// Scales each particle's velocity as a drag force. Default: 3.
    pub air_damping: F,
}

impl<F: Float> EulerConstants<F> {
    /// Tearing ratio used when [`TearingConfig::max_ratio`] is unset.
    pub fn default_max_tearing_ratio() -> F {
        F::from_f32(3.0)
    }
}

impl<F: Float> Default for EulerConstants<F> {
    fn default() -> Self {
        EulerConstants { spring_damping: F::from_f32(3.0), air_damping: F::from_f32(3.0) }
    }
}

/// Constants of the Verlet integrator.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VerletConstants<F: Float> {
    /// Relaxation passes per tick. Default: 3.
    pub constraint_iterations: usize,
    /// Fraction of implicit velocity lost each tick, in [0, 1]. Default: 0.01.
    pub damping_ratio: F,
}

impl<F: Float> VerletConstants<F> {
    /// Tearing ratio used when [`TearingConfig::max_ratio`] is unset.
    pub fn default_max_tearing_ratio() -> F {
        F::two()
    }
}

impl<F: Float> Default for VerletConstants<F> {
    fn default() -> Self {
        VerletConstants { constraint_iterations: 3, damping_ratio: F::from_f32(0.01) }
    }
}

/// Which integrator drives the simulation, with its constants.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum IntegratorKind<F: Float> {
    Euler(EulerConstants<F>),
    Verlet(VerletConstants<F>),
}

impl<F: Float> Default for IntegratorKind<F> {
    fn default() -> Self {
        IntegratorKind::Verlet(VerletConstants::default())
    }
}

/// Permanent removal of interactions stretched past `max_ratio * rest_length`.
///
/// Without an explicit `max_ratio` each integrator uses its own default:
/// 3 for Euler, 2 for Verlet.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TearingConfig<F: Float> {
    pub enabled: bool,
    pub max_ratio: Option<F>,
}

impl<F: Float> TearingConfig<F> {
    /// Tearing on, at an explicit ratio shared by both integrators.
    pub fn enabled(max_ratio: F) -> Self {
        TearingConfig { enabled: true, max_ratio: Some(max_ratio) }
    }

    /// Tearing on, at the running integrator's default ratio.
    pub fn integrator_default() -> Self {
        TearingConfig { enabled: true, max_ratio: None }
    }

    /// The ratio to tear at, if tearing is on.
    pub fn ratio_or(&self, default: F) -> Option<F> {
        self.enabled.then_some(self.max_ratio.unwrap_or(default))
    }
}

/// Everything the driver needs besides the topology.
///
/// # Builder Pattern
/// ```
/// use weft::config::{IntegratorKind, SimulationConfig, TearingConfig, EulerConstants};
/// use weft::force::ExternalForce;
///
/// let config: SimulationConfig<f32> = SimulationConfig::new()
///     .with_integrator(IntegratorKind::Euler(EulerConstants::default()))
///     .with_particle_mass(0.5)
///     .with_forces(vec![ExternalForce::gravity(9.8)])
///     .with_tearing(TearingConfig::enabled(3.0))
///     .with_fixed_particles(vec![0, 1, 2]);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SimulationConfig<F: Float> {
    pub integrator: IntegratorKind<F>,
    /// Mass of every particle. Default: 1.
    pub particle_mass: F,
    pub springs: SpringSettings<F>,
    pub forces: AllocVec<ExternalForce<F>>,
    pub tearing: TearingConfig<F>,
    /// Fixed timestep; used by drag before the first tick. Default: 0.02.
    pub timestep: F,
    /// Particles fixed at seeding.
    pub fixed_particles: AllocVec<usize>,
}

impl<F: Float> SimulationConfig<F> {
    /// Create a new config with default values.
    pub fn new() -> Self {
        SimulationConfig {
            integrator: IntegratorKind::default(),
            particle_mass: F::one(),
            springs: SpringSettings::default(),
            forces: default_forces().to_vec(),
            tearing: TearingConfig::default(),
            timestep: F::from_f32(0.02),
            fixed_particles: AllocVec::new(),
        }
    }

    pub fn with_integrator(mut self, integrator: IntegratorKind<F>) -> Self {
        self.integrator = integrator;
        self
    }

    pub fn with_particle_mass(mut self, mass: F) -> Self {
        self.particle_mass = mass;
        self
    }

    pub fn with_springs(mut self, springs: SpringSettings<F>) -> Self {
        self.springs = springs;
        self
    }

    /// Replace the external force set.
    pub fn with_forces(mut self, forces: AllocVec<ExternalForce<F>>) -> Self {
        self.forces = forces;
        self
    }

    /// Add one external force to the set.
    pub fn with_force(mut self, force: ExternalForce<F>) -> Self {
        self.forces.push(force);
        self
    }

    pub fn with_tearing(mut self, tearing: TearingConfig<F>) -> Self {
        self.tearing = tearing;
        self
    }

    pub fn with_timestep(mut self, timestep: F) -> Self {
        self.timestep = timestep;
        self
    }

    pub fn with_fixed_particles(mut self, fixed: AllocVec<usize>) -> Self {
        self.fixed_particles = fixed;
        self
    }
}

impl<F: Float> Default for SimulationConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}
