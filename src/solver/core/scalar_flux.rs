//! Scalar flux φ = Σ_a w_a ψ_a.

use crate::types::{CellIndex, N_VERTEX_PER_CELL};

/// Scalar flux per `(cell, vertex, group)`, group fastest.
#[derive(Clone, Debug, PartialEq)]
pub struct ScalarFlux {
    data: Vec<f64>,
    n_cells: usize,
    n_groups: usize,
}

impl ScalarFlux {
    pub fn new(n_cells: usize, n_groups: usize) -> Self {
        Self {
            data: vec![0.0; n_cells * N_VERTEX_PER_CELL * n_groups],
            n_cells,
            n_groups,
        }
    }

    #[inline]
    pub fn n_cells(&self) -> usize {
        self.n_cells
    }

    #[inline]
    pub fn n_groups(&self) -> usize {
        self.n_groups
    }

    #[inline]
    pub fn get(&self, vertex: usize, cell: CellIndex, group: usize) -> f64 {
        self.data[(cell.get() * N_VERTEX_PER_CELL + vertex) * self.n_groups + group]
    }

    /// The `(vertex, group)` block of one cell.
    #[inline]
    pub fn cell(&self, cell: CellIndex) -> &[f64] {
        let len = N_VERTEX_PER_CELL * self.n_groups;
        &self.data[cell.get() * len..(cell.get() + 1) * len]
    }

    #[inline]
    pub fn cell_mut(&mut self, cell: CellIndex) -> &mut [f64] {
        let len = N_VERTEX_PER_CELL * self.n_groups;
        &mut self.data[cell.get() * len..(cell.get() + 1) * len]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Largest `|φ - φ_prev| / max(|φ|)` over all entries.
    ///
    /// Returns the absolute change when the field is identically zero.
    pub fn max_relative_change(&self, previous: &ScalarFlux) -> f64 {
        debug_assert_eq!(self.data.len(), previous.data.len());
        let scale = self.data.iter().map(|x| x.abs()).fold(0.0, f64::max);
        let change = self
            .data
            .iter()
            .zip(previous.data.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max);
        if scale > 0.0 { change / scale } else { change }
    }
}
