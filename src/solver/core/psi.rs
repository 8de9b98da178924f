//! Angular flux field.

use crate::error::{Result, TransportError};
use crate::types::{AngleIndex, CellIndex, N_VERTEX_PER_CELL};

/// Angular flux ψ(vertex, angle, cell, group).
///
/// Stored angle-major so that every angle owns one contiguous slab:
/// `data[((angle * n_cells + cell) * 4 + vertex) * n_groups + group]`.
/// The group index varies fastest, and a sweep over one angle only touches
/// that angle's slab, so slabs can be handed to separate threads.
///
/// The same layout also carries per-(vertex, angle, cell, group) source terms.
#[derive(Clone, Debug, PartialEq)]
pub struct PsiData {
    data: Vec<f64>,
    n_angles: usize,
    n_cells: usize,
    n_groups: usize,
}

impl PsiData {
    /// Zero-initialized field.
    pub fn new(n_angles: usize, n_cells: usize, n_groups: usize) -> Self {
        Self {
            data: vec![0.0; n_angles * n_cells * N_VERTEX_PER_CELL * n_groups],
            n_angles,
            n_cells,
            n_groups,
        }
    }

    /// Field with every entry set to `value`.
    pub fn filled(n_angles: usize, n_cells: usize, n_groups: usize, value: f64) -> Self {
        let mut field = Self::new(n_angles, n_cells, n_groups);
        field.fill(value);
        field
    }

    #[inline]
    pub fn n_angles(&self) -> usize {
        self.n_angles
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
    fn slab_len(&self) -> usize {
        self.n_cells * N_VERTEX_PER_CELL * self.n_groups
    }

    #[inline]
    fn index(&self, vertex: usize, angle: AngleIndex, cell: CellIndex, group: usize) -> usize {
        debug_assert!(vertex < N_VERTEX_PER_CELL && group < self.n_groups);
        ((angle.get() * self.n_cells + cell.get()) * N_VERTEX_PER_CELL + vertex) * self.n_groups
            + group
    }

    #[inline]
    pub fn get(&self, vertex: usize, angle: AngleIndex, cell: CellIndex, group: usize) -> f64 {
        self.data[self.index(vertex, angle, cell, group)]
    }

    #[inline]
    pub fn set(
        &mut self,
        vertex: usize,
        angle: AngleIndex,
        cell: CellIndex,
        group: usize,
        value: f64,
    ) {
        let i = self.index(vertex, angle, cell, group);
        self.data[i] = value;
    }

    /// The `(vertex, group)` block of one cell for one angle.
    #[inline]
    pub fn cell(&self, angle: AngleIndex, cell: CellIndex) -> &[f64] {
        self.angle_slab(angle).into_cell(cell)
    }

    /// Mutable `(vertex, group)` block of one cell for one angle.
    #[inline]
    pub fn cell_mut(&mut self, angle: AngleIndex, cell: CellIndex) -> &mut [f64] {
        self.angle_slab_mut(angle).into_cell_mut(cell)
    }

    /// Read view of one angle.
    #[inline]
    pub fn angle_slab(&self, angle: AngleIndex) -> AngleFlux<'_> {
        let len = self.slab_len();
        let start = angle.get() * len;
        AngleFlux {
            angle,
            n_groups: self.n_groups,
            data: &self.data[start..start + len],
        }
    }

    /// Write view of one angle.
    #[inline]
    pub fn angle_slab_mut(&mut self, angle: AngleIndex) -> AngleFluxMut<'_> {
        let len = self.slab_len();
        let start = angle.get() * len;
        AngleFluxMut {
            angle,
            n_groups: self.n_groups,
            data: &mut self.data[start..start + len],
        }
    }

    /// Write views of every angle, in angle order.
    pub fn angle_slabs_mut(&mut self) -> impl Iterator<Item = AngleFluxMut<'_>> {
        let len = self.slab_len().max(1);
        let n_groups = self.n_groups;
        self.data
            .chunks_mut(len)
            .enumerate()
            .map(move |(a, data)| AngleFluxMut {
                angle: AngleIndex::new(a),
                n_groups,
                data,
            })
    }

    /// Parallel write views of every angle.
    #[cfg(feature = "parallel")]
    pub fn par_angle_slabs_mut(
        &mut self,
    ) -> impl rayon::iter::IndexedParallelIterator<Item = AngleFluxMut<'_>> {
        use rayon::prelude::*;

        let len = self.slab_len().max(1);
        let n_groups = self.n_groups;
        self.data
            .par_chunks_mut(len)
            .enumerate()
            .map(move |(a, data)| AngleFluxMut {
                angle: AngleIndex::new(a),
                n_groups,
                data,
            })
    }

    /// Set every entry to `value`.
    pub fn fill(&mut self, value: f64) {
        self.data.fill(value);
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Maximum absolute entry.
    pub fn max_abs(&self) -> f64 {
        self.data.iter().map(|x| x.abs()).fold(0.0, f64::max)
    }

    /// Check the field was sized for a problem with these dimensions.
    pub fn check_dims(
        &self,
        what: &'static str,
        n_angles: usize,
        n_cells: usize,
        n_groups: usize,
    ) -> Result<()> {
        TransportError::check_len(what, n_angles, self.n_angles)?;
        TransportError::check_len(what, n_cells, self.n_cells)?;
        TransportError::check_len(what, n_groups, self.n_groups)
    }
}

/// Read view of the flux for one angle: `(cell, vertex, group)`.
#[derive(Clone, Copy, Debug)]
pub struct AngleFlux<'a> {
    angle: AngleIndex,
    n_groups: usize,
    data: &'a [f64],
}

impl<'a> AngleFlux<'a> {
    #[inline]
    pub fn angle(&self) -> AngleIndex {
        self.angle
    }

    #[inline]
    pub fn n_groups(&self) -> usize {
        self.n_groups
    }

    #[inline]
    pub fn get(&self, vertex: usize, cell: CellIndex, group: usize) -> f64 {
        self.data[(cell.get() * N_VERTEX_PER_CELL + vertex) * self.n_groups + group]
    }

    /// Groups at one vertex of one cell.
    #[inline]
    pub fn vertex(&self, cell: CellIndex, vertex: usize) -> &'a [f64] {
        let start = (cell.get() * N_VERTEX_PER_CELL + vertex) * self.n_groups;
        &self.data[start..start + self.n_groups]
    }

    #[inline]
    pub fn cell(&self, cell: CellIndex) -> &'a [f64] {
        self.into_cell(cell)
    }

    #[inline]
    fn into_cell(self, cell: CellIndex) -> &'a [f64] {
        let len = N_VERTEX_PER_CELL * self.n_groups;
        let start = cell.get() * len;
        &self.data[start..start + len]
    }
}

/// Write view of the flux for one angle.
#[derive(Debug)]
pub struct AngleFluxMut<'a> {
    angle: AngleIndex,
    n_groups: usize,
    data: &'a mut [f64],
}

impl<'a> AngleFluxMut<'a> {
    #[inline]
    pub fn angle(&self) -> AngleIndex {
        self.angle
    }

    /// Reborrow as a read view.
    #[inline]
    pub fn as_flux(&self) -> AngleFlux<'_> {
        AngleFlux {
            angle: self.angle,
            n_groups: self.n_groups,
            data: &*self.data,
        }
    }

    #[inline]
    pub fn cell_mut(&mut self, cell: CellIndex) -> &mut [f64] {
        let len = N_VERTEX_PER_CELL * self.n_groups;
        let start = cell.get() * len;
        &mut self.data[start..start + len]
    }

    #[inline]
    fn into_cell_mut(self, cell: CellIndex) -> &'a mut [f64] {
        let len = N_VERTEX_PER_CELL * self.n_groups;
        let start = cell.get() * len;
        &mut self.data[start..start + len]
    }
}
