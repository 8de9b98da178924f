//! Upwind face coupling.
//!
//! Each face contributes the surface mass pattern `a/12 · (1 + δ_rc)` over
//! its three vertices. Outgoing faces carry the cell's own trace, so the term
//! goes into the matrix. Incoming faces carry upwind data that is already
//! known, so the term moves to the right-hand side.

use super::mass::mass_weight;
use crate::mesh::{TransportGeometry, is_outgoing};
use crate::solver::{CellGroupData, LocalPsiBound, Matrix4};
use crate::types::{CellIndex, FACE_LOCAL_VERTICES, N_FACE_PER_CELL};

/// Add face terms to the cell matrix and load vector.
///
/// - outgoing (`a > 0`): `A[r][c] += a/12 · (1 + δ_rc)`
/// - incoming (`a ≤ 0`): `b[r][g] -= a/12 · (1 + δ_rc) · ψ_in[fv(c)][face][g]`
///
/// for `r, c` on the face. `psi_in` must have been gathered for the same
/// cell and direction that produced `signed_areas`.
pub fn couple_faces<G>(
    geometry: &G,
    cell: CellIndex,
    signed_areas: &[f64; 4],
    psi_in: &LocalPsiBound,
    matrix: &mut Matrix4,
    rhs: &mut CellGroupData,
) where
    G: TransportGeometry + ?Sized,
{
    debug_assert_eq!(psi_in.n_groups(), rhs.n_groups());
    for face in 0..N_FACE_PER_CELL {
        let area = signed_areas[face];
        let vertices = &FACE_LOCAL_VERTICES[face];
        if is_outgoing(area) {
            for &row in vertices {
                for &col in vertices {
                    matrix[(row, col)] += area / 12.0 * mass_weight(row, col);
                }
            }
        } else {
            for &row in vertices {
                for &col in vertices {
                    let coef = area / 12.0 * mass_weight(row, col);
                    let upwind = psi_in.face_vertex(face, geometry.face_vertex(cell, face, col));
                    for (b, psi) in rhs.vertex_mut(row).iter_mut().zip(upwind) {
                        *b -= coef * psi;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::FaceAdjacency;
    use crate::types::AngleIndex;

    /// One cell whose face-vertex index equals the position in the face table.
    struct SingleCell {
        areas: [f64; 4],
    }

    impl TransportGeometry for SingleCell {
        fn n_cells(&self) -> usize {
            1
        }
        fn n_angles(&self) -> usize {
            1
        }
        fn n_sides(&self) -> usize {
            0
        }
        fn cell_volume(&self, _: CellIndex) -> f64 {
            1.0
        }
        fn signed_face_area(&self, _: CellIndex, face: usize, _: AngleIndex) -> f64 {
            self.areas[face]
        }
        fn face_vertex(&self, _: CellIndex, face: usize, vertex: usize) -> usize {
            FACE_LOCAL_VERTICES[face]
                .iter()
                .position(|&v| v == vertex)
                .unwrap()
        }
        fn neighbor_vertex(&self, _: CellIndex, _: usize, _: usize) -> usize {
            unreachable!()
        }
        fn face_adjacency(&self, _: CellIndex, _: usize) -> FaceAdjacency {
            FaceAdjacency::Vacuum
        }
    }

    #[test]
    fn test_outgoing_face_touches_matrix_only() {
        let geom = SingleCell {
            areas: [0.0, 0.0, 0.0, 1.2],
        };
        let mut psi_in = LocalPsiBound::zeros(1);
        psi_in.face_mut(3).fill(5.0);
        let mut matrix = Matrix4::zeros();
        let mut rhs = CellGroupData::zeros(1);
        couple_faces(&geom, CellIndex::new(0), &geom.areas, &psi_in, &mut matrix, &mut rhs);

        // Face 3 spans vertices 0, 1, 2.
        assert!((matrix[(0, 0)] - 0.2).abs() < 1e-15);
        assert!((matrix[(0, 1)] - 0.1).abs() < 1e-15);
        assert_eq!(matrix[(3, 3)], 0.0);
        assert_eq!(matrix[(0, 3)], 0.0);
        assert!(rhs.as_slice().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_incoming_face_touches_rhs_only() {
        let geom = SingleCell {
            areas: [-0.6, 0.0, 0.0, 0.0],
        };
        let mut psi_in = LocalPsiBound::zeros(2);
        psi_in.face_mut(0).copy_from_slice(&[1.0, 10.0, 2.0, 20.0, 3.0, 30.0]);
        let mut matrix = Matrix4::zeros();
        let mut rhs = CellGroupData::zeros(2);
        couple_faces(&geom, CellIndex::new(0), &geom.areas, &psi_in, &mut matrix, &mut rhs);

        assert_eq!(matrix, Matrix4::zeros());
        // Face 0 spans vertices 1, 2, 3 with face vertices 0, 1, 2.
        // Row 1: 0.05 * (2·1 + 2 + 3) = 0.35
        assert!((rhs.get(1, 0) - 0.35).abs() < 1e-14);
        assert!((rhs.get(1, 1) - 3.5).abs() < 1e-13);
        assert_eq!(rhs.get(0, 0), 0.0);
    }
}
