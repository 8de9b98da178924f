//! Consistent mass pattern for linear tetrahedra.
//!
//! For the barycentric shape functions λ_i of a tetrahedron with volume V,
//!
//! ∫ λ_i λ_j dV = V/20 · (1 + δ_ij)
//!
//! so the mass matrix is V/20 with weight 2 on the diagonal and 1 elsewhere.
//! On a triangular face of area A the same pattern holds with A/12.

use crate::solver::{CellGroupData, Matrix4};
use crate::types::N_VERTEX_PER_CELL;

/// Consistent-mass weight: 2 on the diagonal, 1 off it.
#[inline(always)]
pub fn mass_weight(row: usize, col: usize) -> f64 {
    if row == col { 2.0 } else { 1.0 }
}

/// Cell mass matrix `V/20 · (1 + δ_ij)`.
pub fn mass_matrix(volume: f64) -> Matrix4 {
    let scale = volume / 20.0;
    Matrix4::from_fn(|row, col| scale * mass_weight(row, col))
}

/// Load vector for a per-vertex, per-group source: `out = M q`.
///
/// For each vertex `v` and group `g`:
/// `out[v][g] = V/20 · (2 q[v][g] + Σ_{w≠v} q[w][g])`.
/// Groups are independent.
pub fn assemble_cell_source(volume: f64, source: &CellGroupData, out: &mut CellGroupData) {
    debug_assert_eq!(source.n_groups(), out.n_groups());
    let scale = volume / 20.0;
    for v in 0..N_VERTEX_PER_CELL {
        let out_v = out.vertex_mut(v);
        for (g, value) in out_v.iter_mut().enumerate() {
            let mut others = 0.0;
            for w in 0..N_VERTEX_PER_CELL {
                if w != v {
                    others += source.get(w, g);
                }
            }
            *value = scale * (2.0 * source.get(v, g) + others);
        }
    }
}
