//! Per-(cell, angle) working buffers.
//!
//! Both are sized by the group count only, so a sweep allocates one of each
//! per worker and reuses it for every cell.

use crate::types::{N_FACE_PER_CELL, N_VERTEX_PER_CELL, N_VERTEX_PER_FACE};

/// Incoming flux staged for one (cell, angle): `(face, face_vertex, group)`.
#[derive(Clone, Debug, PartialEq)]
pub struct LocalPsiBound {
    data: Vec<f64>,
    n_groups: usize,
}

impl LocalPsiBound {
    pub fn zeros(n_groups: usize) -> Self {
        Self {
            data: vec![0.0; N_FACE_PER_CELL * N_VERTEX_PER_FACE * n_groups],
            n_groups,
        }
    }

    #[inline]
    pub fn n_groups(&self) -> usize {
        self.n_groups
    }

    /// Zero every entry.
    #[inline]
    pub fn reset(&mut self) {
        self.data.fill(0.0);
    }

    /// The `(face_vertex, group)` block of one face.
    #[inline]
    pub fn face(&self, face: usize) -> &[f64] {
        let len = N_VERTEX_PER_FACE * self.n_groups;
        &self.data[face * len..(face + 1) * len]
    }

    #[inline]
    pub fn face_mut(&mut self, face: usize) -> &mut [f64] {
        let len = N_VERTEX_PER_FACE * self.n_groups;
        &mut self.data[face * len..(face + 1) * len]
    }

    /// Groups at one face vertex.
    #[inline]
    pub fn face_vertex(&self, face: usize, face_vertex: usize) -> &[f64] {
        let start = (face * N_VERTEX_PER_FACE + face_vertex) * self.n_groups;
        &self.data[start..start + self.n_groups]
    }

    #[inline]
    pub fn face_vertex_mut(&mut self, face: usize, face_vertex: usize) -> &mut [f64] {
        let start = (face * N_VERTEX_PER_FACE + face_vertex) * self.n_groups;
        &mut self.data[start..start + self.n_groups]
    }

    #[inline]
    pub fn get(&self, face_vertex: usize, face: usize, group: usize) -> f64 {
        self.data[(face * N_VERTEX_PER_FACE + face_vertex) * self.n_groups + group]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

/// Per-vertex, per-group values for one cell: `(vertex, group)`.
///
/// Used for the raw local source, the assembled load vector and the local
/// solution. The layout matches one cell block of [`PsiData`](super::PsiData).
#[derive(Clone, Debug, PartialEq)]
pub struct CellGroupData {
    data: Vec<f64>,
    n_groups: usize,
}

impl CellGroupData {
    pub fn zeros(n_groups: usize) -> Self {
        Self {
            data: vec![0.0; N_VERTEX_PER_CELL * n_groups],
            n_groups,
        }
    }

    #[inline]
    pub fn n_groups(&self) -> usize {
        self.n_groups
    }

    #[inline]
    pub fn vertex(&self, vertex: usize) -> &[f64] {
        &self.data[vertex * self.n_groups..(vertex + 1) * self.n_groups]
    }

    #[inline]
    pub fn vertex_mut(&mut self, vertex: usize) -> &mut [f64] {
        &mut self.data[vertex * self.n_groups..(vertex + 1) * self.n_groups]
    }

    #[inline]
    pub fn get(&self, vertex: usize, group: usize) -> f64 {
        self.data[vertex * self.n_groups + group]
    }

    #[inline]
    pub fn set(&mut self, vertex: usize, group: usize, value: f64) {
        self.data[vertex * self.n_groups + group] = value;
    }

    /// The four vertex values of one group.
    #[inline]
    pub fn group(&self, group: usize) -> [f64; N_VERTEX_PER_CELL] {
        std::array::from_fn(|v| self.get(v, group))
    }

    #[inline]
    pub fn set_group(&mut self, group: usize, values: [f64; N_VERTEX_PER_CELL]) {
        for (v, value) in values.into_iter().enumerate() {
            self.set(v, group, value);
        }
    }

    #[inline]
    pub fn fill(&mut self, value: f64) {
        self.data.fill(value);
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }
}
