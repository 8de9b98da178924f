//! Mesh sweeps and source iteration.
//!
//! A sweep solves every (cell, angle) pair once, walking each angle's cells
//! in upwind order so that every same-partition neighbor feeding a cell has
//! already been solved. Angles are independent: each one reads and writes
//! only its own slab of ψ. With the `parallel` feature they run on the rayon
//! pool.

use std::f64::consts::PI;

use tracing::{debug, info, warn};

use super::cell_solve::{solve_cell_angle, try_solve_cell_angle};
use super::config::SweepConfig;
use super::context::TransportContext;
use super::core::{AngleFluxMut, CellGroupData, LocalPsiBound, PsiBound, PsiData, ScalarFlux};
use super::dense::DenseSolver;
use super::schedule::SweepSchedule;
use crate::error::{Result, TransportError};
use crate::flux::gather_incoming_flux;
use crate::materials::CrossSections;
use crate::mesh::TransportGeometry;
use crate::quadrature::Quadrature;
use crate::types::{AngleIndex, CellIndex};

/// Isotropic scattering contribution `σ_s / 4π · φ`.
#[derive(Clone, Copy, Debug)]
pub struct Scattering<'a> {
    /// Per-cell scattering cross section
    pub sigma_s: &'a [f64],
    /// Scalar flux from the previous iterate
    pub phi: &'a ScalarFlux,
}

/// Angular source seen by one sweep.
#[derive(Clone, Copy, Debug)]
pub struct SweepSource<'a> {
    /// Fixed source per (vertex, angle, cell, group)
    pub fixed: &'a PsiData,
    pub scattering: Option<Scattering<'a>>,
}

impl<'a> SweepSource<'a> {
    /// Fixed source only.
    pub fn fixed(fixed: &'a PsiData) -> Self {
        Self {
            fixed,
            scattering: None,
        }
    }

    /// Add isotropic scattering from `phi`.
    pub fn with_scattering(mut self, sigma_s: &'a [f64], phi: &'a ScalarFlux) -> Self {
        self.scattering = Some(Scattering { sigma_s, phi });
        self
    }

    /// Per-(vertex, group) source of one cell for one angle.
    fn load_cell(&self, angle: AngleIndex, cell: CellIndex, out: &mut CellGroupData) {
        out.as_mut_slice()
            .copy_from_slice(self.fixed.cell(angle, cell));
        if let Some(Scattering { sigma_s, phi }) = self.scattering {
            let scale = sigma_s[cell] / (4.0 * PI);
            for (q, p) in out.as_mut_slice().iter_mut().zip(phi.cell(cell)) {
                *q += scale * p;
            }
        }
    }

    fn check_dims(&self, n_angles: usize, n_cells: usize, n_groups: usize) -> Result<()> {
        self.fixed.check_dims("source", n_angles, n_cells, n_groups)?;
        if let Some(Scattering { sigma_s, phi }) = self.scattering {
            TransportError::check_len("sigma_s", n_cells, sigma_s.len())?;
            TransportError::check_len("scalar flux cells", n_cells, phi.n_cells())?;
            TransportError::check_len("scalar flux groups", n_groups, phi.n_groups())?;
        }
        Ok(())
    }
}

/// Per-worker buffers reused across cells.
struct CellWorkspace {
    psi_in: LocalPsiBound,
    source: CellGroupData,
    solution: CellGroupData,
}

impl CellWorkspace {
    fn new(n_groups: usize) -> Self {
        Self {
            psi_in: LocalPsiBound::zeros(n_groups),
            source: CellGroupData::zeros(n_groups),
            solution: CellGroupData::zeros(n_groups),
        }
    }
}

/// Sweep one angle into its slab.
fn sweep_angle<G>(
    ctx: &TransportContext<'_, G>,
    schedule: &SweepSchedule,
    sigma_t: &[f64],
    source: &SweepSource<'_>,
    psi_bound: &PsiBound,
    mut slab: AngleFluxMut<'_>,
) -> Result<()>
where
    G: TransportGeometry + ?Sized,
{
    let angle = slab.angle();
    let geometry = ctx.geometry();
    let mut work = CellWorkspace::new(ctx.n_groups());

    for &cell in schedule.order(angle) {
        gather_incoming_flux(
            geometry,
            angle,
            cell,
            slab.as_flux(),
            psi_bound,
            &mut work.psi_in,
        );
        source.load_cell(angle, cell, &mut work.source);
        if ctx.checked() {
            try_solve_cell_angle(
                ctx,
                cell,
                angle,
                sigma_t[cell],
                &work.psi_in,
                &work.source,
                &mut work.solution,
            )?;
        } else {
            solve_cell_angle(
                ctx,
                cell,
                angle,
                sigma_t[cell],
                &work.psi_in,
                &work.source,
                &mut work.solution,
            );
        }
        slab.cell_mut(cell).copy_from_slice(work.solution.as_slice());
    }
    debug!(%angle, n_cells = schedule.order(angle).len(), "angle swept");
    Ok(())
}

/// One transport sweep over every angle.
///
/// `sigma_t` holds one total cross section per cell, shared by all groups.
/// `psi_bound` must already hold the incoming flux on partition faces.
/// Every (cell, angle, group) entry of `psi` is overwritten.
pub fn sweep<G>(
    ctx: &TransportContext<'_, G>,
    schedule: &SweepSchedule,
    sigma_t: &[f64],
    source: &SweepSource<'_>,
    psi_bound: &PsiBound,
    psi: &mut PsiData,
) -> Result<()>
where
    G: TransportGeometry + ?Sized,
{
    let geometry = ctx.geometry();
    let (n_angles, n_cells, n_groups) = (geometry.n_angles(), geometry.n_cells(), ctx.n_groups());
    TransportError::check_len("schedule angles", n_angles, schedule.n_angles())?;
    TransportError::check_len("sigma_t", n_cells, sigma_t.len())?;
    source.check_dims(n_angles, n_cells, n_groups)?;
    psi_bound.check_dims(geometry.n_sides(), n_angles, n_groups)?;
    psi.check_dims("psi", n_angles, n_cells, n_groups)?;

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        psi.par_angle_slabs_mut()
            .try_for_each(|slab| sweep_angle(ctx, schedule, sigma_t, source, psi_bound, slab))?;
    }

    #[cfg(not(feature = "parallel"))]
    {
        for slab in psi.angle_slabs_mut() {
            sweep_angle(ctx, schedule, sigma_t, source, psi_bound, slab)?;
        }
    }

    Ok(())
}

/// Scalar flux `φ = Σ_a w_a ψ_a`.
pub fn scalar_flux(psi: &PsiData, quadrature: &Quadrature) -> Result<ScalarFlux> {
    TransportError::check_len("psi angles", quadrature.n_angles(), psi.n_angles())?;
    let mut phi = ScalarFlux::new(psi.n_cells(), psi.n_groups());
    for angle in AngleIndex::iter(psi.n_angles()) {
        let weight = quadrature.weight(angle);
        let slab = psi.angle_slab(angle);
        for cell in CellIndex::iter(psi.n_cells()) {
            for (p, value) in phi.cell_mut(cell).iter_mut().zip(slab.cell(cell)) {
                *p += weight * value;
            }
        }
    }
    Ok(phi)
}

/// Result of [`source_iteration`].
#[derive(Clone, Debug)]
pub struct IterationOutcome {
    /// Scalar flux of the last sweep
    pub scalar_flux: ScalarFlux,
    /// Sweeps performed
    pub iterations: usize,
    /// Max relative change of φ in the last iteration
    pub change: f64,
    pub converged: bool,
}

/// Source iteration with isotropic scattering.
///
/// Each iteration sweeps with the source `q_fixed + σ_s/4π · φ`, starting from
/// φ = 0, until the max relative change of φ falls below
/// `config.tolerance` or `config.max_iterations` sweeps have run. Hitting the
/// cap is not an error; check [`IterationOutcome::converged`].
#[allow(clippy::too_many_arguments)]
pub fn source_iteration<G>(
    config: &SweepConfig,
    geometry: &G,
    quadrature: &Quadrature,
    schedule: &SweepSchedule,
    cross_sections: &CrossSections,
    fixed: &PsiData,
    psi_bound: &PsiBound,
    psi: &mut PsiData,
) -> Result<IterationOutcome>
where
    G: TransportGeometry + ?Sized,
{
    let ctx = config.context(geometry);
    let mut phi = ScalarFlux::new(geometry.n_cells(), config.n_groups);
    let mut change = f64::INFINITY;

    for iteration in 1..=config.max_iterations {
        let source = SweepSource::fixed(fixed).with_scattering(&cross_sections.sigma_s, &phi);
        sweep(&ctx, schedule, &cross_sections.sigma_t, &source, psi_bound, psi)?;
        let next = scalar_flux(psi, quadrature)?;
        change = next.max_relative_change(&phi);
        phi = next;
        debug!(iteration, change, "source iteration");

        if change < config.tolerance {
            info!(
                iterations = iteration,
                change,
                solver = ctx.solver().name(),
                "source iteration converged"
            );
            return Ok(IterationOutcome {
                scalar_flux: phi,
                iterations: iteration,
                change,
                converged: true,
            });
        }
    }

    warn!(
        max_iterations = config.max_iterations,
        change, "source iteration hit the iteration cap"
    );
    Ok(IterationOutcome {
        scalar_flux: phi,
        iterations: config.max_iterations,
        change,
        converged: false,
    })
}
