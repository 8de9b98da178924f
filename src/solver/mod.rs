//! Per-cell transport kernel and the sweep around it.
//!
//! # Submodules
//!
//! - [`core`]: flux storage (ψ, exchange buffer, local buffers, φ)
//! - [`dense`]: 4×4 dense solvers behind the [`DenseSolver`] strategy trait
//! - [`cell_solve`]: assembly and solve for one (cell, angle)
//! - [`schedule`]: upwind cell order per angle
//! - [`sweep`]: full sweeps, scalar flux and source iteration
//!
//! # Example
//! ```
//! use sn_rs::mesh::{OrientedMesh, TetMesh};
//! use sn_rs::quadrature::Quadrature;
//! use sn_rs::solver::{PsiBound, PsiData, SweepConfig, SweepSchedule, SweepSource, sweep};
//!
//! let mesh = TetMesh::cube(1.0, 2).unwrap();
//! let quad = Quadrature::s2();
//! let geom = OrientedMesh::new(&mesh, &quad);
//! let schedule = SweepSchedule::new(&geom).unwrap();
//!
//! let config = SweepConfig::default();
//! let ctx = config.context(&geom);
//! let source = PsiData::filled(quad.n_angles(), mesh.n_cells(), 1, 1.0);
//! let bound = PsiBound::new(0, quad.n_angles(), 1);
//! let mut psi = PsiData::new(quad.n_angles(), mesh.n_cells(), 1);
//! let sigma_t = vec![1.0; mesh.n_cells()];
//!
//! sweep(&ctx, &schedule, &sigma_t, &SweepSource::fixed(&source), &bound, &mut psi).unwrap();
//! assert!(psi.max_abs() > 0.0);
//! ```

pub mod cell_solve;
mod config;
mod context;
pub mod core;
pub mod dense;
pub mod schedule;
pub mod sweep;

pub use cell_solve::{solve_cell_angle, try_solve_cell_angle};
pub use config::SweepConfig;
pub use context::TransportContext;
pub use core::{
    AngleFlux, AngleFluxMut, CellGroupData, LocalPsiBound, PsiBound, PsiData, ScalarFlux,
};
pub use dense::{
    CofactorInverse, DenseSolveStrategy, DenseSolver, Matrix4, NoPivotElimination,
    PartialPivotElimination, SingularMatrix, Vector4,
};
pub use schedule::SweepSchedule;
pub use sweep::{
    IterationOutcome, Scattering, SweepSource, scalar_flux, source_iteration, sweep,
};
