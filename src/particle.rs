//! Point masses shared by both integrators.

use crate::float::Float;
use crate::vec::Vec3;

/// A point mass with a per-tick force accumulator.
///
/// Integrators extend this by composition: [`EulerParticle`](crate::euler::EulerParticle)
/// adds a velocity, [`VerletParticle`](crate::verlet::VerletParticle) a previous position.
#[derive(Clone, Debug)]
pub struct Particle<F: Float> {
    position: Vec3<F>,
    pub mass: F,
    pub fixed: bool,
    pub accumulated_force: Vec3<F>,
    /// Diagnostic only.
    pub index: usize,
}

impl<F: Float> Particle<F> {
    pub fn new(position: Vec3<F>, mass: F, index: usize) -> Self {
        Particle {
            position,
            mass,
            fixed: false,
            accumulated_force: Vec3::zero(),
            index,
        }
    }

    pub fn position(&self) -> Vec3<F> {
        self.position
    }

    /// Guarded write: ignored (with a warning) when the particle is fixed.
    pub fn set_position(&mut self, position: Vec3<F>) {
        if self.fixed {
            log::warn!("ignoring position write on fixed particle {}", self.index);
            return;
        }
        self.position = position;
    }

    /// Move by `offset` unless fixed.
    pub fn offset(&mut self, offset: Vec3<F>) {
        if !self.fixed {
            self.position += offset;
        }
    }

    /// Write the position even if the particle is fixed.
    pub fn force_move(&mut self, position: Vec3<F>) {
        self.position = position;
    }

    pub fn add_force(&mut self, force: Vec3<F>) {
        self.accumulated_force += force;
    }

    pub fn reset_force(&mut self) {
        self.accumulated_force = Vec3::zero();
    }

    /// Current acceleration from the accumulated force.
    pub fn acceleration(&self) -> Vec3<F> {
        self.accumulated_force.scale(F::one() / self.mass)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_particle_ignores_guarded_writes() {
        let mut p = Particle::new(Vec3::new(1.0f32, 2.0, 3.0), 1.0, 0);
        p.fixed = true;
        p.set_position(Vec3::zero());
        p.offset(Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(p.position(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn force_move_bypasses_fixed() {
        let mut p = Particle::new(Vec3::new(1.0f32, 2.0, 3.0), 1.0, 0);
        p.fixed = true;
        p.force_move(Vec3::new(4.0, 5.0, 6.0));
        assert_eq!(p.position(), Vec3::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn forces_accumulate_until_reset() {
        let mut p = Particle::new(Vec3::<f32>::zero(), 2.0, 0);
        p.add_force(Vec3::new(1.0, 0.0, 0.0));
        p.add_force(Vec3::new(3.0, 2.0, 0.0));
        assert_eq!(p.accumulated_force, Vec3::new(4.0, 2.0, 0.0));
        assert_eq!(p.acceleration(), Vec3::new(2.0, 1.0, 0.0));
        p.reset_force();
        assert_eq!(p.accumulated_force, Vec3::zero());
    }
}
