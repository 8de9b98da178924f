//! Partition boundary exchange buffer.

use crate::error::{Result, TransportError};
use crate::types::{AngleIndex, N_VERTEX_PER_FACE, SideIndex};

/// Incoming flux on partition-boundary faces: `(side, angle, face_vertex, group)`.
///
/// Filled by whatever moves data between partitions before the sweep reaches
/// the cells behind those faces; the kernel only reads it.
#[derive(Clone, Debug, PartialEq)]
pub struct PsiBound {
    data: Vec<f64>,
    n_sides: usize,
    n_angles: usize,
    n_groups: usize,
}

impl PsiBound {
    pub fn new(n_sides: usize, n_angles: usize, n_groups: usize) -> Self {
        Self {
            data: vec![0.0; n_sides * n_angles * N_VERTEX_PER_FACE * n_groups],
            n_sides,
            n_angles,
            n_groups,
        }
    }

    #[inline]
    pub fn n_sides(&self) -> usize {
        self.n_sides
    }

    #[inline]
    pub fn n_groups(&self) -> usize {
        self.n_groups
    }

    #[inline]
    fn face_start(&self, side: SideIndex, angle: AngleIndex) -> usize {
        (side.get() * self.n_angles + angle.get()) * N_VERTEX_PER_FACE * self.n_groups
    }

    /// The `(face_vertex, group)` block for one side and angle.
    #[inline]
    pub fn face(&self, side: SideIndex, angle: AngleIndex) -> &[f64] {
        let start = self.face_start(side, angle);
        &self.data[start..start + N_VERTEX_PER_FACE * self.n_groups]
    }

    #[inline]
    pub fn face_mut(&mut self, side: SideIndex, angle: AngleIndex) -> &mut [f64] {
        let start = self.face_start(side, angle);
        let len = N_VERTEX_PER_FACE * self.n_groups;
        &mut self.data[start..start + len]
    }

    #[inline]
    pub fn get(&self, side: SideIndex, angle: AngleIndex, face_vertex: usize, group: usize) -> f64 {
        self.face(side, angle)[face_vertex * self.n_groups + group]
    }

    #[inline]
    pub fn set(
        &mut self,
        side: SideIndex,
        angle: AngleIndex,
        face_vertex: usize,
        group: usize,
        value: f64,
    ) {
        let n_groups = self.n_groups;
        self.face_mut(side, angle)[face_vertex * n_groups + group] = value;
    }

    pub fn check_dims(&self, n_sides: usize, n_angles: usize, n_groups: usize) -> Result<()> {
        TransportError::check_len("psi_bound sides", n_sides, self.n_sides)?;
        TransportError::check_len("psi_bound angles", n_angles, self.n_angles)?;
        TransportError::check_len("psi_bound groups", n_groups, self.n_groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_block() {
        let mut bound = PsiBound::new(2, 3, 2);
        bound.set(SideIndex::new(1), AngleIndex::new(2), 2, 1, 4.5);
        let face = bound.face(SideIndex::new(1), AngleIndex::new(2));
        assert_eq!(face, &[0.0, 0.0, 0.0, 0.0, 0.0, 4.5]);
        assert_eq!(bound.get(SideIndex::new(0), AngleIndex::new(2), 2, 1), 0.0);
    }
}
