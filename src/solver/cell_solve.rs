//! Local solve for one (cell, angle) pair.
//!
//! Assembles `A ψ = b` from the source load, the streaming/collision base
//! matrix and the upwind face terms, then solves it once per group. The
//! matrix does not depend on the group: one σ_t covers every group of the
//! call. Group-dependent cross sections need one call per group, each with a
//! single-group context and that group's σ_t.

use super::context::TransportContext;
use super::core::{CellGroupData, LocalPsiBound};
use super::dense::{DenseSolver, Matrix4};
use crate::error::{Result, TransportError};
use crate::mesh::TransportGeometry;
use crate::operators::{assemble_cell_source, couple_faces, streaming_collision_matrix};
use crate::types::{AngleIndex, CellIndex};

/// Fill `rhs` with the load vector and return the cell matrix.
#[inline]
fn assemble<G>(
    ctx: &TransportContext<'_, G>,
    cell: CellIndex,
    angle: AngleIndex,
    sigma_t: f64,
    psi_in: &LocalPsiBound,
    local_source: &CellGroupData,
    rhs: &mut CellGroupData,
) -> Matrix4
where
    G: TransportGeometry + ?Sized,
{
    debug_assert_eq!(local_source.n_groups(), ctx.n_groups());
    debug_assert_eq!(rhs.n_groups(), ctx.n_groups());

    let geometry = ctx.geometry();
    let volume = geometry.cell_volume(cell);
    let areas = geometry.signed_face_areas(cell, angle);

    assemble_cell_source(volume, local_source, rhs);
    let mut matrix = streaming_collision_matrix(volume, &areas, sigma_t);
    couple_faces(geometry, cell, &areas, psi_in, &mut matrix, rhs);
    matrix
}

/// Solve the local system of `cell` for direction `angle`.
///
/// `psi_in` must hold the incoming flux gathered for this (cell, angle).
/// On return `local_psi` holds ψ per `(vertex, group)`. A zero pivot is only
/// caught by a debug assertion; see [`try_solve_cell_angle`].
pub fn solve_cell_angle<G>(
    ctx: &TransportContext<'_, G>,
    cell: CellIndex,
    angle: AngleIndex,
    sigma_t: f64,
    psi_in: &LocalPsiBound,
    local_source: &CellGroupData,
    local_psi: &mut CellGroupData,
) where
    G: TransportGeometry + ?Sized,
{
    let matrix = assemble(ctx, cell, angle, sigma_t, psi_in, local_source, local_psi);
    let solver = ctx.solver();
    for group in 0..ctx.n_groups() {
        let mut a = matrix;
        let mut b = local_psi.group(group);
        solver.solve(&mut a, &mut b);
        local_psi.set_group(group, b);
    }
}

/// [`solve_cell_angle`] that reports a singular local system.
pub fn try_solve_cell_angle<G>(
    ctx: &TransportContext<'_, G>,
    cell: CellIndex,
    angle: AngleIndex,
    sigma_t: f64,
    psi_in: &LocalPsiBound,
    local_source: &CellGroupData,
    local_psi: &mut CellGroupData,
) -> Result<()>
where
    G: TransportGeometry + ?Sized,
{
    let matrix = assemble(ctx, cell, angle, sigma_t, psi_in, local_source, local_psi);
    let solver = ctx.solver();
    for group in 0..ctx.n_groups() {
        let mut a = matrix;
        let mut b = local_psi.group(group);
        solver
            .try_solve(&mut a, &mut b)
            .map_err(|cause| TransportError::SingularSystem {
                cell,
                angle,
                group,
                cause,
            })?;
        local_psi.set_group(group, b);
    }
    Ok(())
}
