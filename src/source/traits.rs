//! Angular source terms.
//!
//! A source is evaluated pointwise at every cell vertex for every direction
//! and group, then stored in the same layout as ψ so a sweep can read it
//! cell by cell.

use tracing::debug;

use crate::error::{Result, TransportError};
use crate::materials::CrossSections;
use crate::mesh::TetMesh;
use crate::quadrature::Quadrature;
use crate::solver::PsiData;
use crate::types::{AngleIndex, CellIndex, N_VERTEX_PER_CELL};

/// Everything a source may depend on at one evaluation point.
#[derive(Clone, Copy, Debug)]
pub struct SourceContext {
    /// Physical position (x, y, z)
    pub position: [f64; 3],
    /// Direction cosines (ξ, η, μ)
    pub omega: [f64; 3],
    /// Total cross section of the cell
    pub sigma_t: f64,
    /// Scattering cross section of the cell
    pub sigma_s: f64,
    /// Energy group
    pub group: usize,
}

/// A fixed angular source q(x, Ω, g).
///
/// Implementations must be thread-safe (`Send + Sync`).
pub trait AngularSource: Send + Sync {
    /// Source density at one point and direction.
    fn evaluate(&self, ctx: &SourceContext) -> f64;

    /// Name for logging.
    fn name(&self) -> &'static str {
        "unnamed"
    }
}

/// Isotropic source with the same density everywhere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UniformSource(pub f64);

impl AngularSource for UniformSource {
    fn evaluate(&self, _ctx: &SourceContext) -> f64 {
        self.0
    }

    fn name(&self) -> &'static str {
        "uniform"
    }
}

/// Evaluate `source` at every (vertex, angle, cell, group).
pub fn project_source<S>(
    mesh: &TetMesh,
    quadrature: &Quadrature,
    cross_sections: &CrossSections,
    source: &S,
    n_groups: usize,
) -> Result<PsiData>
where
    S: AngularSource + ?Sized,
{
    TransportError::check_len("cross sections", mesh.n_cells(), cross_sections.n_cells())?;
    debug!(
        source = source.name(),
        n_nodes = mesh.n_nodes(),
        n_cells = mesh.n_cells(),
        n_angles = quadrature.n_angles(),
        n_groups,
        "projecting angular source"
    );
    let mut field = PsiData::new(quadrature.n_angles(), mesh.n_cells(), n_groups);
    for angle in AngleIndex::iter(quadrature.n_angles()) {
        let omega = quadrature.omega(angle);
        let mut slab = field.angle_slab_mut(angle);
        for cell in CellIndex::iter(mesh.n_cells()) {
            let block = slab.cell_mut(cell);
            for vertex in 0..N_VERTEX_PER_CELL {
                for group in 0..n_groups {
                    let ctx = SourceContext {
                        position: mesh.vertex_coord(cell, vertex),
                        omega,
                        sigma_t: cross_sections.sigma_t[cell],
                        sigma_s: cross_sections.sigma_s[cell],
                        group,
                    };
                    block[vertex * n_groups + group] = source.evaluate(&ctx);
                }
            }
        }
    }
    Ok(field)
}
