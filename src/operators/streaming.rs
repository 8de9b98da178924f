//! Streaming and collision terms of the local system.

use super::mass::mass_weight;
use crate::solver::Matrix4;

/// Base cell matrix from streaming and collision.
///
/// `A[r][c] = a_r/12 + σ_t V/20 (1 + δ_rc)` where `a_r` is the signed outflow
/// area of face `r` (the face opposite vertex `r`).
///
/// The streaming part is keyed on the row only. With face `r` opposite vertex
/// `r`, the gradient of λ_r is `-a_r n_r / (3V)`, so `-∫(Ω·∇λ_r) λ_c dV`
/// evaluates to `a_r/12` for every column `c`.
#[inline]
pub fn streaming_collision_matrix(volume: f64, signed_areas: &[f64; 4], sigma_t: f64) -> Matrix4 {
    let collision = sigma_t * volume / 20.0;
    Matrix4::from_fn(|row, col| signed_areas[row] / 12.0 + collision * mass_weight(row, col))
}
