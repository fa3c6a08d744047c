//! Initial particle layout and interaction set that seeds a simulation.

use crate::error::ClothError;
use crate::float::Float;
use crate::grid::GridSize;
use crate::interaction::{Interaction, InteractionKind};
use crate::mesh::PolygonMesh;
use crate::spring::SpringSettings;
use crate::vec::Vec3;
use alloc::vec::Vec as AllocVec;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Rest positions plus the interactions between them.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Topology<F: Float> {
    pub positions: AllocVec<Vec3<F>>,
    pub interactions: AllocVec<Interaction<F>>,
}

impl<F: Float> Topology<F> {
    pub fn new(positions: AllocVec<Vec3<F>>, interactions: AllocVec<Interaction<F>>) -> Self {
        Topology { positions, interactions }
    }

    pub fn particle_count(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Number of interactions of `kind`.
    pub fn count_of(&self, kind: InteractionKind) -> usize {
        self.interactions.iter().filter(|i| i.kind == kind).count()
    }

    /// Check that the topology can seed a simulation.
    pub fn validate(&self) -> Result<(), ClothError> {
        if self.positions.is_empty() {
            return Err(ClothError::InvalidTopology { reason: "topology has no particles" });
        }
        let count = self.positions.len();
        if self.interactions.iter().any(|i| i.a >= count || i.b >= count) {
            return Err(ClothError::InvalidTopology { reason: "interaction references a missing particle" });
        }
        Ok(())
    }
}

/// Where the initial topology comes from.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TopologySource<F: Float> {
    /// Rectangular cloth; rest lengths from the configured springs.
    Grid(GridSize),
    /// Quad mesh; rest lengths from the mesh geometry.
    Mesh(PolygonMesh<F>),
}

impl<F: Float> TopologySource<F> {
    pub fn build(&self, springs: &SpringSettings<F>) -> Result<Topology<F>, ClothError> {
        let topology = match self {
            TopologySource::Grid(size) => size.build(springs),
            TopologySource::Mesh(mesh) => mesh.derive_topology()?,
        };
        log::debug!(
            "built topology: {} particles, {} interactions",
            topology.particle_count(),
            topology.interactions.len()
        );
        Ok(topology)
    }
}
