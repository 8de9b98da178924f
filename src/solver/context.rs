//! Immutable per-call context for the kernel.

use super::dense::DenseSolveStrategy;
use crate::mesh::TransportGeometry;

/// Everything the per-(cell, angle) kernel needs besides its buffers.
///
/// Built once per sweep and passed by reference to every kernel call.
pub struct TransportContext<'a, G: ?Sized> {
    geometry: &'a G,
    n_groups: usize,
    solver: DenseSolveStrategy,
    checked: bool,
}

impl<G: ?Sized> Clone for TransportContext<'_, G> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<G: ?Sized> Copy for TransportContext<'_, G> {}

impl<G: ?Sized> std::fmt::Debug for TransportContext<'_, G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportContext")
            .field("n_groups", &self.n_groups)
            .field("solver", &self.solver)
            .field("checked", &self.checked)
            .finish_non_exhaustive()
    }
}

impl<'a, G: TransportGeometry + ?Sized> TransportContext<'a, G> {
    /// Context with the default (no-pivot, unchecked) solver.
    pub fn new(geometry: &'a G, n_groups: usize) -> Self {
        Self {
            geometry,
            n_groups,
            solver: DenseSolveStrategy::default(),
            checked: false,
        }
    }

    /// Set the dense-solve strategy.
    pub fn with_solver(mut self, solver: DenseSolveStrategy) -> Self {
        self.solver = solver;
        self
    }

    /// Report singular local systems as errors instead of asserting.
    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    #[inline]
    pub fn geometry(&self) -> &'a G {
        self.geometry
    }

    #[inline]
    pub fn n_groups(&self) -> usize {
        self.n_groups
    }

    #[inline]
    pub fn solver(&self) -> DenseSolveStrategy {
        self.solver
    }

    #[inline]
    pub fn checked(&self) -> bool {
        self.checked
    }
}
