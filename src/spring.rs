//! Per-category spring parameters.

use crate::float::Float;
use crate::interaction::InteractionKind;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parameters of one spring category.
///
/// `stiffness` is only read by the Euler integrator; Verlet relaxation
/// uses the interaction's rest length alone.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpringParameters<F: Float> {
    pub enabled: bool,
    pub rest_length: F,
    pub stiffness: F,
}

impl<F: Float> SpringParameters<F> {
    pub fn new(enabled: bool, rest_length: F, stiffness: F) -> Self {
        SpringParameters { enabled, rest_length, stiffness }
    }

    /// The parameters to use after restoring `defaults`.
    pub fn restore_defaults(&self, defaults: &SpringParameters<F>) -> Self {
        *defaults
    }
}

/// Spring parameters for every [`InteractionKind`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpringSettings<F: Float> {
    pub stretch: SpringParameters<F>,
    pub shear: SpringParameters<F>,
    pub bend: SpringParameters<F>,
}

impl<F: Float> SpringSettings<F> {
    /// Derive all categories from one rest length and stiffness.
    ///
    /// Shear rest length is `sqrt(2) * rest_length`, bend is `2 * rest_length`.
    pub fn from_global(rest_length: F, stiffness: F) -> Self {
        SpringSettings {
            stretch: SpringParameters::new(true, rest_length, stiffness),
            shear: SpringParameters::new(true, F::two().sqrt() * rest_length, stiffness),
            bend: SpringParameters::new(true, F::two() * rest_length, stiffness),
        }
    }

    /// Like [`from_global`](Self::from_global) but keeping the current enabled flags.
    pub fn rescaled(&self, rest_length: F, stiffness: F) -> Self {
        let mut settings = Self::from_global(rest_length, stiffness);
        for kind in InteractionKind::ALL {
            settings.get_mut(kind).enabled = self.get(kind).enabled;
        }
        settings
    }

    pub fn get(&self, kind: InteractionKind) -> &SpringParameters<F> {
        match kind {
            InteractionKind::Stretch => &self.stretch,
            InteractionKind::Shear => &self.shear,
            InteractionKind::Bend => &self.bend,
        }
    }

    pub fn get_mut(&mut self, kind: InteractionKind) -> &mut SpringParameters<F> {
        match kind {
            InteractionKind::Stretch => &mut self.stretch,
            InteractionKind::Shear => &mut self.shear,
            InteractionKind::Bend => &mut self.bend,
        }
    }

    /// The settings to use after restoring `defaults`.
    pub fn restore_defaults(&self, defaults: &SpringSettings<F>) -> Self {
        SpringSettings {
            stretch: self.stretch.restore_defaults(&defaults.stretch),
            shear: self.shear.restore_defaults(&defaults.shear),
            bend: self.bend.restore_defaults(&defaults.bend),
        }
    }

    pub fn with_stretch(mut self, params: SpringParameters<F>) -> Self {
        self.stretch = params;
        self
    }

    pub fn with_shear(mut self, params: SpringParameters<F>) -> Self {
        self.shear = params;
        self
    }

    pub fn with_bend(mut self, params: SpringParameters<F>) -> Self {
        self.bend = params;
        self
    }
}

impl<F: Float> Default for SpringSettings<F> {
    fn default() -> Self {
        SpringSettings {
            stretch: SpringParameters::new(true, F::one(), F::from_f32(5.0)),
            shear: SpringParameters::new(true, F::two().sqrt(), F::half()),
            bend: SpringParameters::new(true, F::two(), F::half()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_defaults_scale_by_category() {
        let s: SpringSettings<f64> = SpringSettings::from_global(2.0, 3.0);
        assert_eq!(s.stretch.rest_length, 2.0);
        assert!((s.shear.rest_length - 2.0 * core::f64::consts::SQRT_2).abs() < 1e-12);
        assert_eq!(s.bend.rest_length, 4.0);
        for kind in InteractionKind::ALL {
            assert_eq!(s.get(kind).stiffness, 3.0);
        }
    }

    #[test]
    fn rescaled_keeps_enabled_flags() {
        let mut s: SpringSettings<f32> = SpringSettings::default();
        s.shear.enabled = false;
        let r = s.rescaled(1.5, 2.0);
        assert!(r.stretch.enabled);
        assert!(!r.shear.enabled);
        assert_eq!(r.stretch.rest_length, 1.5);
    }

    #[test]
    fn restore_defaults_returns_originals() {
        let defaults: SpringSettings<f32> = SpringSettings::default();
        let mut tuned = defaults;
        tuned.bend = SpringParameters::new(false, 9.0, 9.0);
        tuned.stretch.stiffness = 42.0;
        assert_eq!(tuned.restore_defaults(&defaults), defaults);
    }
}
