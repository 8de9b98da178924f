//! Staging of upwind boundary flux.
//!
//! For one (cell, angle), every incoming face gets the flux on the upwind
//! side of the face:
//!
//! - neighbor in the same partition: its already-solved ψ at the matching vertex
//! - neighbor in another partition: the exchange buffer entry for that side
//! - exterior face: zero (vacuum)
//!
//! Outgoing faces are left at zero whatever the neighbor holds.

use crate::mesh::{FaceAdjacency, TransportGeometry};
use crate::solver::{AngleFlux, LocalPsiBound, PsiBound};
use crate::types::{AngleIndex, CellIndex, N_FACE_PER_CELL, N_VERTEX_PER_FACE};

/// Rebuild `out` with the incoming flux of `cell` for direction `angle`.
///
/// `psi` must be the flux slab of the same angle. The caller guarantees that
/// every upwind neighbor in this partition has already been solved.
pub fn gather_incoming_flux<G>(
    geometry: &G,
    angle: AngleIndex,
    cell: CellIndex,
    psi: AngleFlux<'_>,
    psi_bound: &PsiBound,
    out: &mut LocalPsiBound,
) where
    G: TransportGeometry + ?Sized,
{
    debug_assert_eq!(psi.angle(), angle);
    out.reset();
    for face in 0..N_FACE_PER_CELL {
        if !geometry.is_incoming(cell, face, angle) {
            continue;
        }
        match geometry.face_adjacency(cell, face) {
            FaceAdjacency::Interior { cell: neighbor } => {
                for fv in 0..N_VERTEX_PER_FACE {
                    let nv = geometry.neighbor_vertex(cell, face, fv);
                    out.face_vertex_mut(face, fv)
                        .copy_from_slice(psi.vertex(neighbor, nv));
                }
            }
            FaceAdjacency::Partition { side, .. } => {
                out.face_mut(face).copy_from_slice(psi_bound.face(side, angle));
            }
            FaceAdjacency::Vacuum => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{OrientedMesh, TetMesh};
    use crate::quadrature::Quadrature;
    use crate::solver::PsiData;
    use crate::types::SideIndex;

    fn setup() -> (TetMesh, Quadrature) {
        (TetMesh::cube(1.0, 2).unwrap(), Quadrature::s2())
    }

    #[test]
    fn test_outgoing_faces_stay_zero() {
        let (mesh, quad) = setup();
        let geom = OrientedMesh::new(&mesh, &quad);
        let psi = PsiData::filled(quad.n_angles(), mesh.n_cells(), 2, 3.0);
        let bound = PsiBound::new(0, quad.n_angles(), 2);
        let mut out = LocalPsiBound::zeros(2);

        for angle in AngleIndex::iter(quad.n_angles()) {
            for cell in CellIndex::iter(mesh.n_cells()) {
                gather_incoming_flux(&geom, angle, cell, psi.angle_slab(angle), &bound, &mut out);
                for face in 0..4 {
                    let expected = match mesh.face_adjacency(cell, face) {
                        FaceAdjacency::Interior { .. } if geom.is_incoming(cell, face, angle) => 3.0,
                        _ => 0.0,
                    };
                    assert!(out.face(face).iter().all(|&x| x == expected));
                }
            }
        }
    }

    #[test]
    fn test_neighbor_vertex_mapping() {
        let (mesh, quad) = setup();
        let geom = OrientedMesh::new(&mesh, &quad);
        let mut psi = PsiData::new(quad.n_angles(), mesh.n_cells(), 1);
        let angle = AngleIndex::new(0);
        // Store the global node id at every vertex.
        for cell in CellIndex::iter(mesh.n_cells()) {
            for v in 0..4 {
                psi.set(v, angle, cell, 0, mesh.cell_node(cell, v) as f64);
            }
        }
        let bound = PsiBound::new(0, quad.n_angles(), 1);
        let mut out = LocalPsiBound::zeros(1);
        for cell in CellIndex::iter(mesh.n_cells()) {
            gather_incoming_flux(&geom, angle, cell, psi.angle_slab(angle), &bound, &mut out);
            for face in 0..4 {
                let interior = matches!(mesh.face_adjacency(cell, face), FaceAdjacency::Interior { .. });
                if !interior || !geom.is_incoming(cell, face, angle) {
                    continue;
                }
                for v in (0..4).filter(|&v| v != face) {
                    let fv = mesh.face_vertex(cell, face, v);
                    assert_eq!(out.get(fv, face, 0), mesh.cell_node(cell, v) as f64);
                }
            }
        }
    }

    #[test]
    fn test_partition_faces_read_exchange_buffer() {
        let (mesh, quad) = setup();
        let owner: Vec<usize> = CellIndex::iter(mesh.n_cells())
            .map(|c| usize::from(mesh.cell_centroid(c)[0] > 0.5))
            .collect();
        let parts = mesh.partition(&owner).unwrap();
        let left = &parts[0];
        let geom = OrientedMesh::new(left, &quad);

        let mut bound = PsiBound::new(left.sides().len(), quad.n_angles(), 1);
        for side in SideIndex::iter(left.sides().len()) {
            for angle in AngleIndex::iter(quad.n_angles()) {
                for fv in 0..3 {
                    bound.set(side, angle, fv, 0, (side.get() * 10 + fv + 1) as f64);
                }
            }
        }
        let psi = PsiData::new(quad.n_angles(), left.n_cells(), 1);
        let mut out = LocalPsiBound::zeros(1);

        let mut n_checked = 0;
        for angle in AngleIndex::iter(quad.n_angles()) {
            for cell in CellIndex::iter(left.n_cells()) {
                gather_incoming_flux(&geom, angle, cell, psi.angle_slab(angle), &bound, &mut out);
                for face in 0..4 {
                    if let FaceAdjacency::Partition { side, .. } = left.face_adjacency(cell, face) {
                        if geom.is_incoming(cell, face, angle) {
                            n_checked += 1;
                            assert_eq!(out.face(face), bound.face(side, angle));
                        } else {
                            assert!(out.face(face).iter().all(|&x| x == 0.0));
                        }
                    }
                }
            }
        }
        assert!(n_checked > 0);
    }
}
