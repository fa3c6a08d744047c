//! Error types for cloth simulation operations.

use core::fmt;

/// Errors that can occur while building or driving a simulation.
#[derive(Debug, Clone, PartialEq)]
pub enum ClothError {
    /// The topology cannot seed a simulation (non-quad face, bad index, no particles).
    InvalidTopology { reason: &'static str },
    /// Particle index is out of bounds.
    ParticleOutOfBounds { index: usize, count: usize },
    /// The simulation has not been seeded with a topology yet.
    NotSeeded,
    /// The simulation was already seeded; reset it before seeding again.
    AlreadySeeded,
}

impl fmt::Display for ClothError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClothError::InvalidTopology { reason } => write!(f, "invalid topology: {}", reason),
            ClothError::ParticleOutOfBounds { index, count } => {
                write!(f, "particle index {} out of bounds (count: {})", index, count)
            }
            ClothError::NotSeeded => write!(f, "simulation has not been seeded"),
            ClothError::AlreadySeeded => write!(f, "simulation was already seeded"),
        }
    }
}

impl core::error::Error for ClothError {}

/// Check `index` against `count`, reporting [`ClothError::ParticleOutOfBounds`].
pub(crate) fn check_index(index: usize, count: usize) -> Result<(), ClothError> {
    if index < count {
        Ok(())
    } else {
        Err(ClothError::ParticleOutOfBounds { index, count })
    }
}
