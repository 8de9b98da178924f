//! A mesh viewed through a quadrature set.

use crate::mesh::tet_mesh::{TetMesh, dot};
use crate::mesh::traits::{FaceAdjacency, TransportGeometry};
use crate::quadrature::Quadrature;
use crate::types::{AngleIndex, CellIndex};

/// |Ω·n| below this is treated as a face parallel to the direction.
///
/// Both cells sharing such a face then see exactly zero area, so neither
/// side waits on the other during the sweep.
const PARALLEL_FACE_TOL: f64 = 1e-12;

/// [`TransportGeometry`] for a [`TetMesh`] and a [`Quadrature`].
#[derive(Clone, Copy, Debug)]
pub struct OrientedMesh<'a> {
    pub mesh: &'a TetMesh,
    pub quadrature: &'a Quadrature,
}

impl<'a> OrientedMesh<'a> {
    pub fn new(mesh: &'a TetMesh, quadrature: &'a Quadrature) -> Self {
        Self { mesh, quadrature }
    }

    /// Ω·n for the outward normal of a face, with near-parallel faces snapped to zero.
    #[inline]
    pub fn omega_dot_n(&self, cell: CellIndex, face: usize, angle: AngleIndex) -> f64 {
        let value = dot(self.quadrature.omega(angle), self.mesh.face_normal(cell, face));
        if value.abs() < PARALLEL_FACE_TOL {
            0.0
        } else {
            value
        }
    }
}

impl TransportGeometry for OrientedMesh<'_> {
    #[inline]
    fn n_cells(&self) -> usize {
        self.mesh.n_cells()
    }

    #[inline]
    fn n_angles(&self) -> usize {
        self.quadrature.n_angles()
    }

    #[inline]
    fn n_sides(&self) -> usize {
        self.mesh.sides().len()
    }

    #[inline]
    fn cell_volume(&self, cell: CellIndex) -> f64 {
        self.mesh.cell_volume(cell)
    }

    #[inline]
    fn signed_face_area(&self, cell: CellIndex, face: usize, angle: AngleIndex) -> f64 {
        self.mesh.face_area(cell, face) * self.omega_dot_n(cell, face, angle)
    }

    #[inline]
    fn face_vertex(&self, cell: CellIndex, face: usize, vertex: usize) -> usize {
        self.mesh.face_vertex(cell, face, vertex)
    }

    #[inline]
    fn neighbor_vertex(&self, cell: CellIndex, face: usize, face_vertex: usize) -> usize {
        self.mesh.neighbor_vertex(cell, face, face_vertex)
    }

    #[inline]
    fn face_adjacency(&self, cell: CellIndex, face: usize) -> FaceAdjacency {
        self.mesh.face_adjacency(cell, face)
    }
}
