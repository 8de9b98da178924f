//! # sn-rs
//!
//! Discrete-ordinates (SN) transport with linear discontinuous finite
//! elements on unstructured tetrahedral meshes.
//!
//! The core is the per-cell kernel, run once for every (cell, angle) pair of
//! a sweep:
//! - stage incoming flux from upwind neighbors ([`flux::gather_incoming_flux`])
//! - assemble the 4×4 system ([`operators`])
//! - solve it once per energy group ([`solver::dense`])
//!
//! Around it sit the pieces needed to run full sweeps:
//! - Tetrahedral meshes with partition splitting ([`mesh`])
//! - Quadrature sets ([`quadrature`])
//! - Upwind scheduling, sweeps and source iteration ([`solver`])
//! - Cross sections ([`materials`]) and fixed sources ([`source`])
//!
//! # Example
//! ```
//! use sn_rs::{
//!     CrossSections, HatProblem, OrientedMesh, PsiBound, PsiData, Quadrature, SweepConfig,
//!     SweepSchedule, TetMesh, source_iteration,
//! };
//!
//! let hat = HatProblem::default();
//! let mesh = TetMesh::cube(hat.cube_size, 2).unwrap();
//! let quad = Quadrature::s2();
//! let geom = OrientedMesh::new(&mesh, &quad);
//! let xs = CrossSections::uniform(mesh.n_cells(), 1.0, 0.0);
//!
//! let fixed = hat.fixed_source(&mesh, &quad, &xs, 1).unwrap();
//! let schedule = SweepSchedule::new(&geom).unwrap();
//! let bound = PsiBound::new(0, quad.n_angles(), 1);
//! let mut psi = PsiData::new(quad.n_angles(), mesh.n_cells(), 1);
//!
//! let outcome = source_iteration(
//!     &SweepConfig::default(), &geom, &quad, &schedule, &xs, &fixed, &bound, &mut psi,
//! ).unwrap();
//! assert!(outcome.converged);
//! assert!(hat.l2_error(&mesh, &psi).unwrap().is_finite());
//! ```

pub mod error;
pub mod flux;
pub mod materials;
pub mod mesh;
pub mod operators;
pub mod quadrature;
pub mod solver;
pub mod source;
pub mod types;

pub use error::{Result, TransportError};
pub use materials::{CrossSections, MaterialTable};
pub use mesh::{FaceAdjacency, OrientedMesh, PartitionSide, TetMesh, TransportGeometry};
pub use quadrature::Quadrature;
pub use solver::{
    CellGroupData, DenseSolveStrategy, DenseSolver, IterationOutcome, LocalPsiBound, Matrix4,
    PsiBound, PsiData, ScalarFlux, SweepConfig, SweepSchedule, SweepSource, TransportContext,
    Vector4, scalar_flux, solve_cell_angle, source_iteration, sweep, try_solve_cell_angle,
};
pub use source::{AngularSource, HatProblem, UniformSource};
pub use types::{AngleIndex, CellIndex, SideIndex};
