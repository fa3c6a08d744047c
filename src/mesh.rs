//! Interaction inference for quad meshes.
//!
//! Mesh formats often split a vertex per face for normal/UV seams, so
//! vertices are first merged by exact position. The merged indices become
//! particle indices, and interactions are inferred from quad adjacency:
//!
//! - **Stretch**: consecutive corners of a quad
//! - **Shear**: opposite corners of a quad
//! - **Bend**: for a particle `p` and each quad neighbor `n` of `p`, every
//!   quad neighbor of `n` that does not share a face with `p`
//!
//! Rest lengths are the distances between the merged rest positions and
//! the result contains no repeated edges.

use crate::error::ClothError;
use crate::float::Float;
use crate::interaction::{dedup_interactions, Interaction, InteractionKind};
use crate::topology::Topology;
use crate::vec::Vec3;
use alloc::collections::{BTreeMap, BTreeSet};
use alloc::vec;
use alloc::vec::Vec as AllocVec;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

type Quad = [usize; 4];

/// A polygon mesh: vertex positions and faces as vertex index lists in winding order.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PolygonMesh<F: Float> {
    pub vertices: AllocVec<Vec3<F>>,
    pub faces: AllocVec<AllocVec<usize>>,
}

impl<F: Float> PolygonMesh<F> {
    pub fn new(vertices: AllocVec<Vec3<F>>, faces: AllocVec<AllocVec<usize>>) -> Self {
        PolygonMesh { vertices, faces }
    }

    /// Build from a flat quad index buffer (four indices per face).
    pub fn from_quad_indices(vertices: AllocVec<Vec3<F>>, indices: &[usize]) -> Result<Self, ClothError> {
        if indices.len() % 4 != 0 {
            return Err(ClothError::InvalidTopology { reason: "quad index buffer length is not a multiple of 4" });
        }
        let faces = indices.chunks_exact(4).map(|face| face.to_vec()).collect();
        Ok(PolygonMesh { vertices, faces })
    }

    fn quads(&self) -> Result<AllocVec<Quad>, ClothError> {
        let count = self.vertices.len();
        self.faces
            .iter()
            .map(|face| {
                let quad: Quad = face
                    .as_slice()
                    .try_into()
                    .map_err(|_| ClothError::InvalidTopology { reason: "mesh must have quad topology" })?;
                if quad.iter().any(|&v| v >= count) {
                    return Err(ClothError::InvalidTopology { reason: "face references a missing vertex" });
                }
                Ok(quad)
            })
            .collect()
    }

    /// Merge vertices sharing a position (first seen wins), skipping vertices no face uses.
    ///
    /// Returns the merged positions and, per original vertex, its particle index.
    fn merge_vertices(&self, quads: &[Quad]) -> (AllocVec<Vec3<F>>, AllocVec<Option<usize>>) {
        let mut referenced = vec![false; self.vertices.len()];
        for quad in quads {
            for &v in quad {
                referenced[v] = true;
            }
        }

        let mut by_position = BTreeMap::new();
        let mut positions = AllocVec::new();
        let mut remap = vec![None; self.vertices.len()];
        for (vertex, position) in self.vertices.iter().enumerate() {
            if !referenced[vertex] {
                continue;
            }
            let particle = *by_position.entry(position.position_key()).or_insert_with(|| {
                positions.push(*position);
                positions.len() - 1
            });
            remap[vertex] = Some(particle);
        }
        (positions, remap)
    }

    /// Derive particles and deduplicated interactions.
    ///
    /// Fails with [`ClothError::InvalidTopology`] on any non-quad face. A mesh
    /// without faces yields an empty topology.
    pub fn derive_topology(&self) -> Result<Topology<F>, ClothError> {
        let raw_quads = self.quads()?;
        let (positions, remap) = self.merge_vertices(&raw_quads);
        let quads: AllocVec<Quad> = raw_quads
            .iter()
            .map(|quad| quad.map(|v| remap[v].unwrap_or(v)))
            .collect();
        let adjacency = QuadAdjacency::new(&quads, positions.len());

        let mut interactions = AllocVec::new();
        for (kind, partners) in [
            (InteractionKind::Stretch, adjacency.stretch_partners()),
            (InteractionKind::Shear, adjacency.shear_partners()),
            (InteractionKind::Bend, adjacency.bend_partners()),
        ] {
            for (p, set) in partners.iter().enumerate() {
                for &q in set {
                    interactions.push(Interaction::from_positions(p, q, &positions, kind));
                }
            }
        }

        log::debug!(
            "mesh: {} vertices merged into {} particles over {} quads",
            self.vertices.len(),
            positions.len(),
            quads.len()
        );
        Ok(Topology::new(positions, dedup_interactions(interactions)))
    }
}

/// Quads over particle indices plus, per particle, the `(quad, corner)` slots holding it.
struct QuadAdjacency<'a> {
    quads: &'a [Quad],
    incidence: AllocVec<AllocVec<(usize, usize)>>,
}

impl<'a> QuadAdjacency<'a> {
    fn new(quads: &'a [Quad], particle_count: usize) -> Self {
        let mut incidence = vec![AllocVec::new(); particle_count];
        for (q, quad) in quads.iter().enumerate() {
            for (corner, &p) in quad.iter().enumerate() {
                incidence[p].push((q, corner));
            }
        }
        QuadAdjacency { quads, incidence }
    }

    /// Corner `offset` steps around the quad from `corner`.
    fn around(&self, quad: usize, corner: usize, offset: usize) -> usize {
        self.quads[quad][(corner + offset) % 4]
    }

    fn partners_at_offsets(&self, offsets: &[usize]) -> AllocVec<BTreeSet<usize>> {
        self.incidence
            .iter()
            .enumerate()
            .map(|(p, slots)| {
                slots
                    .iter()
                    .flat_map(|&(q, corner)| offsets.iter().map(move |&o| (q, corner, o)))
                    .map(|(q, corner, o)| self.around(q, corner, o))
                    .filter(|&other| other != p)
                    .collect()
            })
            .collect()
    }

    fn stretch_partners(&self) -> AllocVec<BTreeSet<usize>> {
        self.partners_at_offsets(&[1, 3])
    }

    fn shear_partners(&self) -> AllocVec<BTreeSet<usize>> {
        self.partners_at_offsets(&[2])
    }

    fn bend_partners(&self) -> AllocVec<BTreeSet<usize>> {
        (0..self.incidence.len()).map(|p| self.bend_partners_of(p)).collect()
    }

    fn bend_partners_of(&self, p: usize) -> BTreeSet<usize> {
        let own_faces: BTreeSet<usize> = self.incidence[p]
            .iter()
            .flat_map(|&(q, _)| self.quads[q].iter().copied())
            .collect();

        let mut partners = BTreeSet::new();
        for &(q, corner) in &self.incidence[p] {
            for n in [self.around(q, corner, 1), self.around(q, corner, 3)] {
                for &(nq, ncorner) in &self.incidence[n] {
                    partners.insert(self.around(nq, ncorner, 1));
                    partners.insert(self.around(nq, ncorner, 3));
                }
            }
        }
        partners.retain(|candidate| !own_faces.contains(candidate));
        partners
    }
}
