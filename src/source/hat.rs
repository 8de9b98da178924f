//! Manufactured "hat" problem.
//!
//! The exact solution is isotropic and radially symmetric about the center
//! of the cube `[0, L]³`:
//!
//! ψ(x) = 1 − r/R for r < R, 0 otherwise
//!
//! With isotropic scattering `σ_s/4π · φ = σ_s ψ`, the source that produces
//! it is
//!
//! q = Ω·∇ψ + (σ_t − σ_s) ψ = −(Ω·(x − c))/(R r) + (σ_t − σ_s)(1 − r/R)
//!
//! inside the closed ball r ≤ R and zero outside. The streaming part is taken as zero at
//! the center, where the gradient is undefined.

use super::traits::{AngularSource, SourceContext, project_source};
use crate::error::{Result, TransportError};
use crate::materials::CrossSections;
use crate::mesh::TetMesh;
use crate::quadrature::Quadrature;
use crate::solver::PsiData;
use crate::types::{AngleIndex, CellIndex, N_VERTEX_PER_CELL};

/// Hat of radius `radius` centered in a cube of side `cube_size`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HatProblem {
    pub cube_size: f64,
    pub radius: f64,
}

impl Default for HatProblem {
    fn default() -> Self {
        Self {
            cube_size: 100.0,
            radius: 30.0,
        }
    }
}

/// Partial sums of the relative L2 error.
///
/// Sums from several partitions add up with [`HatL2Sums::combine`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HatL2Sums {
    /// Σ (ψ̄ − ψ_exact)²
    pub diff: f64,
    /// Σ ψ̄²
    pub norm: f64,
}

impl HatL2Sums {
    pub fn combine(self, other: Self) -> Self {
        Self {
            diff: self.diff + other.diff,
            norm: self.norm + other.norm,
        }
    }

    /// `sqrt(diff / norm)`, or infinity for an all-zero solution.
    pub fn relative_error(&self) -> f64 {
        if self.norm > 0.0 {
            (self.diff / self.norm).sqrt()
        } else {
            f64::INFINITY
        }
    }
}

impl HatProblem {
    pub fn center(&self) -> [f64; 3] {
        [0.5 * self.cube_size; 3]
    }

    fn offset(&self, point: [f64; 3]) -> ([f64; 3], f64) {
        let c = self.center();
        let d = [point[0] - c[0], point[1] - c[1], point[2] - c[2]];
        let r = (d[0] * d[0] + d[1] * d[1] + d[2] * d[2]).sqrt();
        (d, r)
    }

    /// Analytic ψ at a point (the same for every direction and group).
    pub fn exact(&self, point: [f64; 3]) -> f64 {
        let (_, r) = self.offset(point);
        if r < self.radius {
            1.0 - r / self.radius
        } else {
            0.0
        }
    }

    /// Fixed source at every (vertex, angle, cell, group).
    pub fn fixed_source(
        &self,
        mesh: &TetMesh,
        quadrature: &Quadrature,
        cross_sections: &CrossSections,
        n_groups: usize,
    ) -> Result<PsiData> {
        project_source(mesh, quadrature, cross_sections, self, n_groups)
    }

    /// Error sums of the cell-averaged ψ against ψ_exact at the centroid,
    /// over every cell, angle and group.
    pub fn l2_sums(&self, mesh: &TetMesh, psi: &PsiData) -> Result<HatL2Sums> {
        TransportError::check_len("psi cells", mesh.n_cells(), psi.n_cells())?;
        let n_groups = psi.n_groups();
        let mut sums = HatL2Sums::default();
        for cell in CellIndex::iter(mesh.n_cells()) {
            let exact = self.exact(mesh.cell_centroid(cell));
            for angle in AngleIndex::iter(psi.n_angles()) {
                for group in 0..n_groups {
                    let mean = (0..N_VERTEX_PER_CELL)
                        .map(|v| psi.get(v, angle, cell, group))
                        .sum::<f64>()
                        / N_VERTEX_PER_CELL as f64;
                    sums.diff += (mean - exact) * (mean - exact);
                    sums.norm += mean * mean;
                }
            }
        }
        Ok(sums)
    }

    /// Relative L2 error `sqrt(Σ(ψ̄ − ψ_exact)² / Σψ̄²)`.
    pub fn l2_error(&self, mesh: &TetMesh, psi: &PsiData) -> Result<f64> {
        Ok(self.l2_sums(mesh, psi)?.relative_error())
    }
}

impl AngularSource for HatProblem {
    fn evaluate(&self, ctx: &SourceContext) -> f64 {
        let (d, r) = self.offset(ctx.position);
        if r > self.radius {
            return 0.0;
        }
        let streaming = if r > 0.0 {
            -(d[0] * ctx.omega[0] + d[1] * ctx.omega[1] + d[2] * ctx.omega[2]) / (self.radius * r)
        } else {
            0.0
        };
        streaming + (ctx.sigma_t - ctx.sigma_s) * (1.0 - r / self.radius)
    }

    fn name(&self) -> &'static str {
        "hat"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_profile() {
        let hat = HatProblem::default();
        assert_eq!(hat.exact([50.0, 50.0, 50.0]), 1.0);
        assert!((hat.exact([65.0, 50.0, 50.0]) - 0.5).abs() < 1e-15);
        assert_eq!(hat.exact([0.0, 0.0, 0.0]), 0.0);
    }

    #[test]
    fn test_source_is_streaming_plus_removal() {
        let hat = HatProblem::default();
        let ctx = SourceContext {
            position: [50.0, 50.0, 65.0],
            omega: [0.0, 0.0, 1.0],
            sigma_t: 1.0,
            sigma_s: 0.25,
            group: 0,
        };
        // dψ/dz = -1/R along +z, ψ = 0.5
        let expected = -1.0 / 30.0 + 0.75 * 0.5;
        assert!((hat.evaluate(&ctx) - expected).abs() < 1e-15);

        let center = SourceContext {
            position: hat.center(),
            ..ctx
        };
        assert!((hat.evaluate(&center) - 0.75).abs() < 1e-15);
    }

    #[test]
    fn test_source_keeps_streaming_on_the_sphere() {
        // Node (80, 50, 50) of a 10-division cube sits exactly at r = R.
        let hat = HatProblem::default();
        let on_sphere = SourceContext {
            position: [80.0, 50.0, 50.0],
            omega: [1.0, 0.0, 0.0],
            sigma_t: 1.0,
            sigma_s: 0.0,
            group: 0,
        };
        assert_eq!(hat.exact(on_sphere.position), 0.0);
        assert!((hat.evaluate(&on_sphere) + 1.0 / 30.0).abs() < 1e-15);

        let outside = SourceContext {
            position: [80.5, 50.0, 50.0],
            ..on_sphere
        };
        assert_eq!(hat.evaluate(&outside), 0.0);
    }

    #[test]
    fn test_exact_field_has_no_error() {
        let hat = HatProblem::default();
        let mesh = TetMesh::cube(100.0, 4).unwrap();
        let mut psi = PsiData::new(2, mesh.n_cells(), 1);
        for cell in CellIndex::iter(mesh.n_cells()) {
            let exact = hat.exact(mesh.cell_centroid(cell));
            for angle in AngleIndex::iter(2) {
                psi.cell_mut(angle, cell).fill(exact);
            }
        }
        assert!(hat.l2_error(&mesh, &psi).unwrap() < 1e-14);
    }

    #[test]
    fn test_zero_solution_error_is_infinite() {
        let hat = HatProblem::default();
        let mesh = TetMesh::cube(100.0, 1).unwrap();
        let psi = PsiData::new(8, mesh.n_cells(), 1);
        assert_eq!(hat.l2_error(&mesh, &psi).unwrap(), f64::INFINITY);
    }
}
