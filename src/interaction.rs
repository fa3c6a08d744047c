//! Spring interactions (constraints) between particle pairs.

use crate::float::Float;
use crate::vec::Vec3;
use alloc::collections::BTreeSet;
use alloc::vec::Vec as AllocVec;
use core::cmp::Ordering;
use core::hash::{Hash, Hasher};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Structural category of an interaction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum InteractionKind {
    /// Axis neighbors (or quad edges).
    Stretch,
    /// Diagonal neighbors (or quad diagonals).
    Shear,
    /// Neighbors two apart (or across a shared quad edge).
    Bend,
}

impl InteractionKind {
    pub const ALL: [InteractionKind; 3] =
        [InteractionKind::Stretch, InteractionKind::Shear, InteractionKind::Bend];
}

/// An edge between two particles with a target rest length.
///
/// Equality, hashing and ordering ignore both the order of `a`/`b` and
/// the rest length: two interactions are the same edge when they share
/// a kind and an unordered index pair.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Interaction<F: Float> {
    pub a: usize,
    pub b: usize,
    pub kind: InteractionKind,
    pub rest_length: F,
}

impl<F: Float> Interaction<F> {
    pub fn new(a: usize, b: usize, rest_length: F, kind: InteractionKind) -> Self {
        Interaction { a, b, kind, rest_length }
    }

    /// Interaction whose rest length is the current distance between its particles.
    pub fn from_positions(a: usize, b: usize, positions: &[Vec3<F>], kind: InteractionKind) -> Self {
        let rest_length = positions[a].distance(positions[b]);
        Interaction { a, b, kind, rest_length }
    }

    /// `(min, max)` of the two indices.
    pub fn pair(&self) -> (usize, usize) {
        if self.a <= self.b { (self.a, self.b) } else { (self.b, self.a) }
    }

    /// The endpoint opposite `index`, if `index` is an endpoint.
    pub fn other(&self, index: usize) -> Option<usize> {
        if index == self.a {
            Some(self.b)
        } else if index == self.b {
            Some(self.a)
        } else {
            None
        }
    }

    pub fn connects(&self, index: usize) -> bool {
        self.a == index || self.b == index
    }

    /// Current length given particle positions.
    pub fn length(&self, positions: &[Vec3<F>]) -> F {
        positions[self.a].distance(positions[self.b])
    }

    /// Whether a separation of `length` tears this interaction at `max_ratio`.
    pub fn exceeds(&self, length: F, max_ratio: F) -> bool {
        length > self.rest_length * max_ratio
    }

    fn key(&self) -> (InteractionKind, usize, usize) {
        let (lo, hi) = self.pair();
        (self.kind, lo, hi)
    }
}

impl<F: Float> PartialEq for Interaction<F> {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl<F: Float> Eq for Interaction<F> {}

impl<F: Float> Hash for Interaction<F> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl<F: Float> PartialOrd for Interaction<F> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<F: Float> Ord for Interaction<F> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// Drop repeated edges, keeping the first occurrence and the original order.
pub fn dedup_interactions<F: Float>(interactions: AllocVec<Interaction<F>>) -> AllocVec<Interaction<F>> {
    let mut seen = BTreeSet::new();
    interactions
        .into_iter()
        .filter(|interaction| seen.insert(interaction.key()))
        .collect()
}
