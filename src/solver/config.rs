//! Sweep configuration.

use super::context::TransportContext;
use super::dense::DenseSolveStrategy;
use crate::mesh::TransportGeometry;

/// Settings for sweeps and source iteration.
///
/// # Example
/// ```
/// use sn_rs::solver::{DenseSolveStrategy, SweepConfig};
///
/// let config = SweepConfig::default()
///     .with_groups(2)
///     .with_solver(DenseSolveStrategy::Cofactor)
///     .with_tolerance(1e-10);
/// assert_eq!(config.n_groups, 2);
/// assert!(!config.checked);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SweepConfig {
    /// Number of energy groups
    pub n_groups: usize,
    /// Dense solver for the local 4×4 systems
    pub solver: DenseSolveStrategy,
    /// Report singular local systems as errors instead of asserting in debug builds
    pub checked: bool,
    /// Source-iteration cap
    pub max_iterations: usize,
    /// Source iteration stops when the max relative change of φ drops below this
    pub tolerance: f64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            n_groups: 1,
            solver: DenseSolveStrategy::NoPivot,
            checked: false,
            max_iterations: 100,
            tolerance: 1e-8,
        }
    }
}

impl SweepConfig {
    pub fn with_groups(mut self, n_groups: usize) -> Self {
        self.n_groups = n_groups;
        self
    }

    pub fn with_solver(mut self, solver: DenseSolveStrategy) -> Self {
        self.solver = solver;
        self
    }

    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Kernel context for a geometry.
    pub fn context<'a, G>(&self, geometry: &'a G) -> TransportContext<'a, G>
    where
        G: TransportGeometry + ?Sized,
    {
        TransportContext::new(geometry, self.n_groups)
            .with_solver(self.solver)
            .with_checked(self.checked)
    }
}
