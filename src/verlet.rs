//! Position Verlet integration with iterative constraint relaxation.

use crate::config::VerletConstants;
use crate::error::{check_index, ClothError};
use crate::float::Float;
use crate::force::apply_external_forces;
use crate::integrator::{Integrate, StepContext};
use crate::interaction::Interaction;
use crate::observer::StepObserver;
use crate::particle::Particle;
use crate::topology::Topology;
use crate::vec::Vec3;
use alloc::vec::Vec as AllocVec;

/// A Verlet particle: velocity is implicit in `position - prev_position`.
#[derive(Clone, Debug)]
pub struct VerletParticle<F: Float> {
    pub base: Particle<F>,
    pub prev_position: Vec3<F>,
}

impl<F: Float> VerletParticle<F> {
    pub fn new(position: Vec3<F>, mass: F, index: usize) -> Self {
        VerletParticle { base: Particle::new(position, mass, index), prev_position: position }
    }

    pub fn integrate(&mut self, dt: F, damping_ratio: F) {
        if !self.base.fixed {
            let pos = self.base.position();
            let velocity = (pos - self.prev_position).scale(F::one() - damping_ratio);
            let new_pos = pos + velocity + self.base.acceleration().scale(dt * dt);
            self.prev_position = pos;
            self.base.set_position(new_pos);
        }
        self.base.reset_force();
    }

    /// Implicit velocity over `dt`.
    pub fn velocity(&self, dt: F) -> Vec3<F> {
        if dt.is_near_zero(F::from_f32(1e-30)) {
            return Vec3::zero();
        }
        (self.base.position() - self.prev_position).scale(F::one() / dt)
    }
}

/// Verlet solver state: particles with history and the live constraints.
#[derive(Clone, Debug)]
pub struct VerletSolver<F: Float> {
    particles: AllocVec<VerletParticle<F>>,
    interactions: AllocVec<Interaction<F>>,
    constants: VerletConstants<F>,
}

impl<F: Float> VerletSolver<F> {
    pub fn new(topology: Topology<F>, mass: F, constants: VerletConstants<F>) -> Result<Self, ClothError> {
        topology.validate()?;
        let particles = topology
            .positions
            .iter()
            .enumerate()
            .map(|(i, &pos)| VerletParticle::new(pos, mass, i))
            .collect();
        Ok(VerletSolver { particles, interactions: topology.interactions, constants })
    }

    pub fn constants(&self) -> &VerletConstants<F> {
        &self.constants
    }

    pub fn verlet_particle(&self, index: usize) -> Option<&VerletParticle<F>> {
        self.particles.get(index)
    }

    /// Move both endpoints of `interaction` towards its rest length.
    ///
    /// Both free: each takes half the correction. One fixed: the other takes all
    /// of it. Both fixed: nothing moves.
    fn satisfy(&mut self, interaction: &Interaction<F>) {
        let p1 = self.particles[interaction.a].base.position();
        let p2 = self.particles[interaction.b].base.position();
        let delta = p2 - p1;
        let distance = delta.length();
        if distance.is_near_zero(F::from_f32(1e-10)) {
            log::warn!(
                "particles {} and {} coincide; skipping constraint correction",
                interaction.a,
                interaction.b
            );
            return;
        }

        let correction = delta.scale(F::one() - interaction.rest_length / distance);
        let fixed1 = self.particles[interaction.a].base.fixed;
        let fixed2 = self.particles[interaction.b].base.fixed;
        match (fixed1, fixed2) {
            (false, false) => {
                let half = correction.scale(F::half());
                self.particles[interaction.a].base.offset(half);
                self.particles[interaction.b].base.offset(-half);
            }
            (true, false) => self.particles[interaction.b].base.offset(-correction),
            (false, true) => self.particles[interaction.a].base.offset(correction),
            (true, true) => {}
        }
    }

    /// One relaxation pass over every live interaction, newest first.
    ///
    /// With tearing on, interactions stretched past `max_ratio` are removed
    /// and not corrected.
    pub fn relax<O: StepObserver>(&mut self, tear_ratio: Option<F>, observer: &mut O) {
        for i in (0..self.interactions.len()).rev() {
            let interaction = self.interactions[i];
            if let Some(max_ratio) = tear_ratio {
                let length = self.particles[interaction.a]
                    .base
                    .position()
                    .distance(self.particles[interaction.b].base.position());
                if interaction.exceeds(length, max_ratio) {
                    self.interactions.remove(i);
                    log::debug!("interaction {}-{} torn at length {}", interaction.a, interaction.b, length);
                    observer.on_tear(interaction.a, interaction.b);
                    continue;
                }
            }
            self.satisfy(&interaction);
        }
    }
}

impl<F: Float> Integrate<F> for VerletSolver<F> {
    fn step<O: StepObserver>(&mut self, ctx: &StepContext<'_, F>, observer: &mut O) {
        apply_external_forces(self.particles.iter_mut().map(|p| &mut p.base), ctx.forces, ctx.time);
        observer.on_external_forces();

        for p in self.particles.iter_mut() {
            p.integrate(ctx.dt, self.constants.damping_ratio);
        }
        observer.on_integrate();

        let tear_ratio = ctx.tearing.ratio_or(VerletConstants::default_max_tearing_ratio());
        for i in 0..self.constants.constraint_iterations {
            self.relax(tear_ratio, observer);
            observer.on_relaxation_pass(i);
        }
        observer.on_step_complete();
    }

    fn drag(&mut self, index: usize, position: Vec3<F>, _dt: F) -> Result<(), ClothError> {
        check_index(index, self.particles.len())?;
        let p = &mut self.particles[index];
        p.prev_position = p.base.position();
        p.base.force_move(position);
        Ok(())
    }

    fn set_fixed(&mut self, index: usize, fixed: bool) -> Result<(), ClothError> {
        check_index(index, self.particles.len())?;
        let p = &mut self.particles[index];
        p.base.fixed = fixed;
        p.prev_position = p.base.position();
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
