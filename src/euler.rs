//! Semi-implicit (symplectic) Euler integration with damped springs.

use crate::config::{EulerConstants, TearingConfig};
use crate::error::{check_index, ClothError};
use crate::float::Float;
use crate::force::apply_external_forces;
use crate::integrator::{Integrate, StepContext};
use crate::interaction::Interaction;
use crate::observer::StepObserver;
use crate::particle::Particle;
use crate::spring::SpringSettings;
use crate::topology::Topology;
use crate::vec::Vec3;
use alloc::vec::Vec as AllocVec;

/// A particle with an explicit velocity.
#[derive(Clone, Debug)]
pub struct EulerParticle<F: Float> {
    pub base: Particle<F>,
    pub velocity: Vec3<F>,
}

impl<F: Float> EulerParticle<F> {
    pub fn new(position: Vec3<F>, mass: F, index: usize) -> Self {
        EulerParticle { base: Particle::new(position, mass, index), velocity: Vec3::zero() }
    }

    /// `v += a dt`, then `x += v dt`; the accumulator is cleared even when fixed.
    pub fn integrate(&mut self, dt: F) {
        if !self.base.fixed {
            self.velocity += self.base.acceleration().scale(dt);
            self.base.offset(self.velocity.scale(dt));
        }
        self.base.reset_force();
    }
}

/// Euler solver state: particles with velocities and the live interactions.
#[derive(Clone, Debug)]
pub struct EulerSolver<F: Float> {
    particles: AllocVec<EulerParticle<F>>,
    interactions: AllocVec<Interaction<F>>,
    constants: EulerConstants<F>,
}

impl<F: Float> EulerSolver<F> {
    pub fn new(topology: Topology<F>, mass: F, constants: EulerConstants<F>) -> Result<Self, ClothError> {
        topology.validate()?;
        let particles = topology
            .positions
            .iter()
            .enumerate()
            .map(|(i, &pos)| EulerParticle::new(pos, mass, i))
            .collect();
        Ok(EulerSolver { particles, interactions: topology.interactions, constants })
    }

    pub fn constants(&self) -> &EulerConstants<F> {
        &self.constants
    }

    pub fn euler_particle(&self, index: usize) -> Option<&EulerParticle<F>> {
        self.particles.get(index)
    }

    /// Spring and damping forces on the first particle of each enabled interaction.
    ///
    /// The reaction on the second particle is not applied. Interactions
    /// stretched past the tearing ratio are removed without applying force.
    fn add_internal_forces<O: StepObserver>(
        &mut self,
        springs: &SpringSettings<F>,
        tearing: &TearingConfig<F>,
        observer: &mut O,
    ) {
        let tear_ratio = tearing.ratio_or(EulerConstants::default_max_tearing_ratio());
        for i in (0..self.interactions.len()).rev() {
            let interaction = self.interactions[i];
            let params = springs.get(interaction.kind);
            if !params.enabled {
                continue;
            }

            let p1 = &self.particles[interaction.a];
            let p2 = &self.particles[interaction.b];
            let direction = p1.base.position() - p2.base.position();
            let magnitude = direction.length();

            if tear_ratio.is_some_and(|ratio| interaction.exceeds(magnitude, ratio)) {
                self.interactions.remove(i);
                log::debug!("interaction {}-{} torn at length {}", interaction.a, interaction.b, magnitude);
                observer.on_tear(interaction.a, interaction.b);
                continue;
            }

            let damping = (p2.velocity - p1.velocity).scale(self.constants.spring_damping);
            let spring = if magnitude.is_near_zero(F::from_f32(1e-10)) {
                log::warn!(
                    "particles {} and {} coincide; skipping spring force",
                    interaction.a,
                    interaction.b
                );
                Vec3::zero()
            } else {
                direction.scale((interaction.rest_length - magnitude) * params.stiffness / magnitude)
            };

            self.particles[interaction.a].base.add_force(spring + damping);
        }
    }

    fn add_air_damping(&mut self) {
        let c = self.constants.air_damping;
        for p in self.particles.iter_mut() {
            let damping = -p.velocity.scale(c);
            p.base.add_force(damping);
        }
    }
}

impl<F: Float> Integrate<F> for EulerSolver<F> {
    fn step<O: StepObserver>(&mut self, ctx: &StepContext<'_, F>, observer: &mut O) {
        self.add_internal_forces(ctx.springs, ctx.tearing, observer);
        apply_external_forces(self.particles.iter_mut().map(|p| &mut p.base), ctx.forces, ctx.time);
        self.add_air_damping();
        observer.on_external_forces();

        for p in self.particles.iter_mut() {
            p.integrate(ctx.dt);
        }
        observer.on_integrate();
        observer.on_step_complete();
    }

    fn drag(&mut self, index: usize, position: Vec3<F>, dt: F) -> Result<(), ClothError> {
        check_index(index, self.particles.len())?;
        let p = &mut self.particles[index];
        p.velocity = if dt > F::zero() {
            (position - p.base.position()).scale(F::one() / dt)
        } else {
            log::warn!("drag of particle {} with non-positive dt; velocity cleared", index);
            Vec3::zero()
        };
        p.base.force_move(position);
        Ok(())
    }

    fn particle(&self, index: usize) -> Option<&Particle<F>> {
        self.particles.get(index).map(|p| &p.base)
    }

    fn particle_mut(&mut self, index: usize) -> Option<&mut Particle<F>> {
        self.particles.get_mut(index).map(|p| &mut p.base)
    }

    fn particle_count(&self) -> usize {
        self.particles.len()
    }

    fn positions(&self) -> AllocVec<Vec3<F>> {
        self.particles.iter().map(|p| p.base.position()).collect()
    }

    fn interactions(&self) -> &[Interaction<F>] {
        &self.interactions
    }
}
