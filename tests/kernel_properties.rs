//! Properties of the per-(cell, angle) kernel.
//!
//! Checks the kernel on single cells and on small structured meshes:
//! zero in gives zero out, positivity for positive sources, gathering leaves
//! outgoing faces at zero, direction reversal swaps the face treatment, and
//! the dense solvers agree with an independent LU factorization.

use approx::assert_relative_eq;
use faer::{Mat, linalg::solvers::Solve};
use sn_rs::flux::gather_incoming_flux;
use sn_rs::mesh::{OrientedMesh, TetMesh, TransportGeometry};
use sn_rs::operators::{assemble_cell_source, couple_faces, streaming_collision_matrix};
use sn_rs::quadrature::Quadrature;
use sn_rs::solver::{
    CellGroupData, CofactorInverse, DenseSolveStrategy, DenseSolver, LocalPsiBound, Matrix4,
    NoPivotElimination, PsiBound, PsiData, TransportContext, solve_cell_angle,
};
use sn_rs::types::{AngleIndex, CellIndex, SideIndex};

/// Single-cell meshes of various shapes.
fn single_cells() -> Vec<TetMesh> {
    let shapes = [
        [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
        ],
        [
            [0.0, 0.0, 0.0],
            [2.0, 0.3, 0.0],
            [0.5, 1.5, 0.2],
            [0.3, 0.4, 1.7],
        ],
    ];
    let mut meshes: Vec<TetMesh> = shapes
        .iter()
        .map(|nodes| TetMesh::new(nodes.to_vec(), vec![[0, 1, 2, 3]], vec![1]).unwrap())
        .collect();

    // Every Kuhn tetrahedron of a unit hex, on its own.
    let cube = TetMesh::cube(1.0, 1).unwrap();
    for cell in CellIndex::iter(cube.n_cells()) {
        let nodes = (0..4).map(|v| cube.vertex_coord(cell, v)).collect();
        meshes.push(TetMesh::new(nodes, vec![[0, 1, 2, 3]], vec![1]).unwrap());
    }
    meshes
}

#[test]
fn test_zero_source_zero_inflow_gives_zero() {
    let quad = Quadrature::s2();
    for mesh in single_cells() {
        let geom = OrientedMesh::new(&mesh, &quad);
        for solver in DenseSolveStrategy::ALL {
            let ctx = TransportContext::new(&geom, 4).with_solver(solver);
            let psi_in = LocalPsiBound::zeros(4);
            let source = CellGroupData::zeros(4);
            for angle in AngleIndex::iter(quad.n_angles()) {
                for sigma_t in [0.1, 1.0, 10.0] {
                    let mut psi = CellGroupData::zeros(4);
                    psi.fill(f64::MAX);
                    solve_cell_angle(&ctx, CellIndex::ZERO, angle, sigma_t, &psi_in, &source, &mut psi);
                    assert!(
                        psi.as_slice().iter().all(|&x| x == 0.0),
                        "{} gave non-zero flux for {angle}",
                        solver.name()
                    );
                }
            }
        }
    }
}

#[test]
fn test_uniform_source_gives_non_negative_flux() {
    let quad = Quadrature::s2();
    let mut min_psi = f64::INFINITY;
    for mesh in single_cells() {
        let geom = OrientedMesh::new(&mesh, &quad);
        let ctx = TransportContext::new(&geom, 2);
        let psi_in = LocalPsiBound::zeros(2);
        let mut source = CellGroupData::zeros(2);
        source.fill(1.0);
        for angle in AngleIndex::iter(quad.n_angles()) {
            for sigma_t in [0.01, 0.5, 1.0, 10.0] {
                let mut psi = CellGroupData::zeros(2);
                solve_cell_angle(&ctx, CellIndex::ZERO, angle, sigma_t, &psi_in, &source, &mut psi);
                for &x in psi.as_slice() {
                    assert!(x.is_finite());
                    min_psi = min_psi.min(x);
                }
            }
        }
    }
    assert!(min_psi >= 0.0, "negative flux {min_psi}");
}

#[test]
fn test_gather_ignores_neighbor_data_on_outgoing_faces() {
    let mesh = TetMesh::cube(1.0, 2).unwrap();
    let owner: Vec<usize> = CellIndex::iter(mesh.n_cells())
        .map(|c| usize::from(mesh.cell_centroid(c)[1] > 0.5))
        .collect();
    let quad = Quadrature::s2();
    let parts = mesh.partition(&owner).unwrap();

    for part in &parts {
        let geom = OrientedMesh::new(part, &quad);
        // Poison everything a gather could read.
        let psi = PsiData::filled(quad.n_angles(), part.n_cells(), 3, 1.0e300);
        let mut bound = PsiBound::new(part.sides().len(), quad.n_angles(), 3);
        for side in SideIndex::iter(part.sides().len()) {
            for angle in AngleIndex::iter(quad.n_angles()) {
                bound.face_mut(side, angle).fill(-1.0e300);
            }
        }
        let mut out = LocalPsiBound::zeros(3);

        for angle in AngleIndex::iter(quad.n_angles()) {
            for cell in CellIndex::iter(part.n_cells()) {
                gather_incoming_flux(&geom, angle, cell, psi.angle_slab(angle), &bound, &mut out);
                for face in 0..4 {
                    let values = out.face(face);
                    if !geom.is_incoming(cell, face, angle) || part.face_adjacency(cell, face).is_vacuum() {
                        assert!(values.iter().all(|&x| x == 0.0));
                    } else {
                        assert!(values.iter().all(|&x| x.abs() == 1.0e300));
                    }
                }
            }
        }
    }
}

/// Whether coupling a single face touched the matrix and the right-hand side.
fn face_treatment(
    geom: &OrientedMesh<'_>,
    cell: CellIndex,
    angle: AngleIndex,
    face: usize,
) -> (bool, bool) {
    let mut areas = [0.0; 4];
    areas[face] = geom.signed_face_area(cell, face, angle);
    let mut psi_in = LocalPsiBound::zeros(1);
    psi_in.face_mut(face).fill(1.0);
    let mut matrix = Matrix4::zeros();
    let mut rhs = CellGroupData::zeros(1);
    couple_faces(geom, cell, &areas, &psi_in, &mut matrix, &mut rhs);
    (
        matrix != Matrix4::zeros(),
        rhs.as_slice().iter().any(|&x| x != 0.0),
    )
}

#[test]
fn test_reversed_direction_swaps_face_treatment() {
    let mesh = TetMesh::cube(1.0, 2).unwrap();
    let quad = Quadrature::s2();
    let geom = OrientedMesh::new(&mesh, &quad);

    for angle in AngleIndex::iter(quad.n_angles()) {
        let reversed = quad.opposite(angle).unwrap();
        for cell in CellIndex::iter(mesh.n_cells()) {
            for face in 0..4 {
                let area = geom.signed_face_area(cell, face, angle);
                assert_eq!(geom.signed_face_area(cell, face, reversed), -area);
                if area == 0.0 {
                    continue;
                }
                assert_ne!(
                    geom.is_incoming(cell, face, angle),
                    geom.is_incoming(cell, face, reversed)
                );

                let forward = face_treatment(&geom, cell, angle, face);
                let backward = face_treatment(&geom, cell, reversed, face);
                if area > 0.0 {
                    assert_eq!(forward, (true, false));
                    assert_eq!(backward, (false, true));
                } else {
                    assert_eq!(forward, (false, true));
                    assert_eq!(backward, (true, false));
                }
            }
        }
    }
}

/// Reference solve with faer's full-pivot LU.
fn faer_solve(a: &Matrix4, b: &[f64; 4]) -> [f64; 4] {
    let m = Mat::from_fn(4, 4, |i, j| a[(i, j)]);
    let mut rhs = Mat::<f64>::zeros(4, 1);
    for i in 0..4 {
        rhs[(i, 0)] = b[i];
    }
    let lu = m.as_ref().full_piv_lu();
    let x = lu.solve(&rhs);
    std::array::from_fn(|i| x[(i, 0)])
}

#[test]
fn test_dense_solvers_agree_on_assembled_systems() {
    let mesh = TetMesh::cube(100.0, 2).unwrap();
    let quad = Quadrature::s2();
    let geom = OrientedMesh::new(&mesh, &quad);
    let mut psi_in = LocalPsiBound::zeros(1);
    for face in 0..4 {
        psi_in.face_mut(face).copy_from_slice(&[0.3, 1.1, 0.7]);
    }
    let mut source = CellGroupData::zeros(1);
    source.set_group(0, [1.0, 0.2, 0.6, 0.9]);

    let mut n_systems = 0;
    for angle in AngleIndex::iter(quad.n_angles()) {
        for cell in CellIndex::iter(mesh.n_cells()) {
            for sigma_t in [0.05, 1.0, 20.0] {
                let volume = geom.cell_volume(cell);
                let areas = geom.signed_face_areas(cell, angle);
                let mut rhs = CellGroupData::zeros(1);
                assemble_cell_source(volume, &source, &mut rhs);
                let mut matrix = streaming_collision_matrix(volume, &areas, sigma_t);
                couple_faces(&geom, cell, &areas, &psi_in, &mut matrix, &mut rhs);
                let b = rhs.group(0);

                let reference = faer_solve(&matrix, &b);

                let (mut a, mut x_no_pivot) = (matrix, b);
                NoPivotElimination.try_solve(&mut a, &mut x_no_pivot).unwrap();
                let (mut a, mut x_cofactor) = (matrix, b);
                CofactorInverse.try_solve(&mut a, &mut x_cofactor).unwrap();

                // Relative to the largest component.
                let scale = reference.iter().fold(0.0_f64, |m, x| m.max(x.abs()));
                for i in 0..4 {
                    assert_relative_eq!(
                        x_no_pivot[i],
                        x_cofactor[i],
                        epsilon = 1e-9 * scale,
                        max_relative = 1e-9
                    );
                    assert_relative_eq!(
                        x_no_pivot[i],
                        reference[i],
                        epsilon = 1e-9 * scale,
                        max_relative = 1e-9
                    );
                }
                n_systems += 1;
            }
        }
    }
    assert_eq!(n_systems, 8 * 48 * 3);
}
