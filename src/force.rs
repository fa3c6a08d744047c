//! Uniform external force fields: gravity and pulsing wind.

use crate::float::Float;
use crate::particle::Particle;
use crate::vec::Vec3;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An external force applied uniformly to every unfixed particle.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ExternalForce<F: Float> {
    /// Downward acceleration; the force scales with particle mass.
    Gravity { enabled: bool, magnitude: F },
    /// Gust along `direction` pulsing between zero and `strength`, independent of mass.
    Wind {
        enabled: bool,
        strength: F,
        frequency: F,
        direction: Vec3<F>,
    },
}

impl<F: Float> ExternalForce<F> {
    /// Enabled gravity of the given magnitude.
    pub fn gravity(magnitude: F) -> Self {
        ExternalForce::Gravity { enabled: true, magnitude }
    }

    /// Enabled wind.
    pub fn wind(strength: F, frequency: F, direction: Vec3<F>) -> Self {
        ExternalForce::Wind { enabled: true, strength, frequency, direction }
    }

    pub fn enabled(&self) -> bool {
        match self {
            ExternalForce::Gravity { enabled, .. } | ExternalForce::Wind { enabled, .. } => *enabled,
        }
    }

    pub fn set_enabled(&mut self, value: bool) {
        match self {
            ExternalForce::Gravity { enabled, .. } | ExternalForce::Wind { enabled, .. } => *enabled = value,
        }
    }

    /// The field value at simulation time `time`, before any mass scaling.
    pub fn field(&self, time: F) -> Vec3<F> {
        match *self {
            ExternalForce::Gravity { magnitude, .. } => Vec3::new(F::zero(), -magnitude, F::zero()),
            ExternalForce::Wind { strength, frequency, direction, .. } => {
                let c = (F::pi() * frequency * time).cos();
                direction.normalize().scale(strength * (F::one() - c * c))
            }
        }
    }

    /// Force on a particle of `mass` at `time`; zero when disabled.
    pub fn contribution(&self, mass: F, time: F) -> Vec3<F> {
        if !self.enabled() {
            return Vec3::zero();
        }
        match self {
            ExternalForce::Gravity { .. } => self.field(time).scale(mass),
            ExternalForce::Wind { .. } => self.field(time),
        }
    }
}

/// Default force set: gravity 9.8 and wind (strength 5, 0.2 Hz, +X), both disabled.
pub fn default_forces<F: Float>() -> [ExternalForce<F>; 2] {
    [
        ExternalForce::Gravity { enabled: false, magnitude: F::from_f32(9.8) },
        ExternalForce::Wind {
            enabled: false,
            strength: F::from_f32(5.0),
            frequency: F::from_f32(0.2),
            direction: Vec3::right(),
        },
    ]
}

/// Accumulate every enabled force on each unfixed particle.
pub fn apply_external_forces<'a, F, I>(particles: I, forces: &[ExternalForce<F>], time: F)
where
    F: Float + 'a,
    I: IntoIterator<Item = &'a mut Particle<F>>,
{
    for p in particles {
        if p.fixed {
            continue;
        }
        for force in forces {
            let f = force.contribution(p.mass, time);
            p.add_force(f);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec as AllocVec;

    #[test]
    fn wind_is_zero_at_start() {
        let wind = ExternalForce::wind(5.0f64, 0.2, Vec3::new(2.0, 0.0, 0.0));
        assert!(wind.contribution(1.0, 0.0).length() < 1e-12);
    }

    #[test]
    fn wind_peaks_at_half_period() {
        let frequency = 0.2f64;
        let wind = ExternalForce::wind(5.0, frequency, Vec3::new(0.0, 0.0, 3.0));
        let f = wind.contribution(1.0, 1.0 / (2.0 * frequency));
        assert!((f.length() - 5.0).abs() < 1e-9, "got {:?}", f);
        assert!(f.z > 0.0);
    }

    #[test]
    fn wind_never_pulls_back() {
        let wind = ExternalForce::wind(5.0f32, 0.7, Vec3::right());
        for i in 0..200 {
            let f = wind.field(i as f32 * 0.05);
            assert!(f.x >= 0.0 && f.x <= 5.0 + 1e-5, "x = {}", f.x);
        }
    }

    #[test]
    fn wind_ignores_mass() {
        let wind = ExternalForce::wind(5.0f32, 0.2, Vec3::right());
        assert_eq!(wind.contribution(1.0, 1.3), wind.contribution(10.0, 1.3));
    }

    #[test]
    fn gravity_scales_with_mass() {
        let g = ExternalForce::gravity(9.8f32);
        let f = g.contribution(2.0, 0.0);
        assert!((f.y + 19.6).abs() < 1e-5);
    }

    #[test]
    fn disabled_force_contributes_nothing() {
        let mut g = ExternalForce::gravity(9.8f32);
        g.set_enabled(false);
        assert_eq!(g.contribution(1.0, 0.0), Vec3::zero());
    }

    #[test]
    fn fixed_particles_receive_no_external_force() {
        let mut particles: AllocVec<Particle<f32>> = (0..2)
            .map(|i| Particle::new(Vec3::zero(), 1.0, i))
            .collect();
        particles[0].fixed = true;
        apply_external_forces(particles.iter_mut(), &[ExternalForce::gravity(9.8)], 0.0);
        assert_eq!(particles[0].accumulated_force, Vec3::zero());
        assert!((particles[1].accumulated_force.y + 9.8).abs() < 1e-6);
    }
}
