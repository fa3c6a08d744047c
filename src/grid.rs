//! Rectangular cloth topology with stretch, shear, and bend interactions.

use crate::float::Float;
use crate::interaction::{Interaction, InteractionKind};
use crate::spring::SpringSettings;
use crate::topology::Topology;
use crate::vec::Vec3;
use alloc::vec::Vec as AllocVec;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Lattice offsets `(dx, dy)` per category, in emission order.
const NEIGHBOR_OFFSETS: [(InteractionKind, [(isize, isize); 4]); 3] = [
    (InteractionKind::Stretch, [(0, 1), (0, -1), (-1, 0), (1, 0)]),
    (InteractionKind::Shear, [(-1, 1), (1, 1), (-1, -1), (1, -1)]),
    (InteractionKind::Bend, [(0, 2), (0, -2), (-2, 0), (2, 0)]),
];

/// Dimensions of a rectangular cloth, in particles.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridSize {
    pub width: usize,
    pub height: usize,
}

impl GridSize {
    /// Negative dimensions clamp to zero.
    pub fn new(width: i64, height: i64) -> Self {
        GridSize {
            width: width.max(0) as usize,
            height: height.max(0) as usize,
        }
    }

    pub fn particle_count(&self) -> usize {
        self.width * self.height
    }

    /// Flattened index of cell `(x, y)`.
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    fn contains(&self, x: isize, y: isize) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Rest positions on the XZ plane with unit spacing, centered by integer halving.
    pub fn positions<F: Float>(&self) -> AllocVec<Vec3<F>> {
        let half_w = (self.width / 2) as f32;
        let half_h = (self.height / 2) as f32;
        let mut positions = AllocVec::with_capacity(self.particle_count());
        for y in 0..self.height {
            for x in 0..self.width {
                positions.push(Vec3::new(
                    F::from_f32(x as f32 - half_w),
                    F::zero(),
                    F::from_f32(y as f32 - half_h),
                ));
            }
        }
        positions
    }

    /// Interactions for every cell towards each in-bounds lattice neighbor.
    ///
    /// Every unordered pair is emitted twice, once from each endpoint. Rest
    /// lengths are the configured spring rest lengths, not the geometry.
    pub fn interactions<F: Float>(&self, springs: &SpringSettings<F>) -> AllocVec<Interaction<F>> {
        let mut interactions = AllocVec::new();
        for x in 0..self.width {
            for y in 0..self.height {
                let from = self.index(x, y);
                for (kind, offsets) in NEIGHBOR_OFFSETS.iter() {
                    let rest_length = springs.get(*kind).rest_length;
                    for (dx, dy) in offsets.iter() {
                        let nx = x as isize + dx;
                        let ny = y as isize + dy;
                        if self.contains(nx, ny) {
                            let to = self.index(nx as usize, ny as usize);
                            interactions.push(Interaction::new(from, to, rest_length, *kind));
                        }
                    }
                }
            }
        }
        interactions
    }

    pub fn build<F: Float>(&self, springs: &SpringSettings<F>) -> Topology<F> {
        Topology::new(self.positions(), self.interactions(springs))
    }
}
