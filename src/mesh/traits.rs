//! Geometry queries consumed by the transport kernel.
//!
//! The kernel never builds or partitions a mesh. It only asks the questions
//! below about one cell at a time, so any mesh representation that can answer
//! them (including a test double) can drive a sweep.

use crate::types::{AngleIndex, CellIndex, SideIndex};

/// What lies on the other side of a cell face.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FaceAdjacency {
    /// Neighbor cell in the same partition.
    Interior { cell: CellIndex },
    /// Neighbor owned by another partition; incoming values arrive through
    /// the exchange buffer at `side`.
    Partition { rank: usize, side: SideIndex },
    /// Exterior mesh boundary (vacuum).
    Vacuum,
}

impl FaceAdjacency {
    /// True for exterior faces.
    #[inline]
    pub fn is_vacuum(&self) -> bool {
        matches!(self, FaceAdjacency::Vacuum)
    }
}

/// Face classification shared by boundary gathering and face coupling.
///
/// A face is outgoing iff its signed outflow area is strictly positive.
/// Zero-area faces count as incoming and contribute nothing.
#[inline]
pub fn is_outgoing(signed_area: f64) -> bool {
    signed_area > 0.0
}

/// Per-cell geometry for linear tetrahedra as seen from one direction.
///
/// Local conventions:
/// - face `f` is the face opposite local vertex `f`;
/// - a face has three face vertices `0..3`, ordered identically from both
///   cells sharing the face (and across partitions).
pub trait TransportGeometry: Sync {
    /// Number of cells.
    fn n_cells(&self) -> usize;

    /// Number of directions the signed areas are defined for.
    fn n_angles(&self) -> usize;

    /// Number of partition-boundary sides.
    fn n_sides(&self) -> usize;

    /// Cell volume.
    fn cell_volume(&self, cell: CellIndex) -> f64;

    /// Face area times Ω·n for the outward normal: positive for outflow.
    fn signed_face_area(&self, cell: CellIndex, face: usize, angle: AngleIndex) -> f64;

    /// Face-vertex index of cell-local `vertex` on `face` (`vertex != face`).
    fn face_vertex(&self, cell: CellIndex, face: usize, vertex: usize) -> usize;

    /// Local vertex in the neighbor cell matching `face_vertex` of `face`.
    ///
    /// Only meaningful for [`FaceAdjacency::Interior`] faces.
    fn neighbor_vertex(&self, cell: CellIndex, face: usize, face_vertex: usize) -> usize;

    /// Adjacency across `face`.
    fn face_adjacency(&self, cell: CellIndex, face: usize) -> FaceAdjacency;

    /// Signed areas of all four faces.
    #[inline]
    fn signed_face_areas(&self, cell: CellIndex, angle: AngleIndex) -> [f64; 4] {
        std::array::from_fn(|face| self.signed_face_area(cell, face, angle))
    }

    /// Whether `face` receives flux from upwind for this direction.
    #[inline]
    fn is_incoming(&self, cell: CellIndex, face: usize, angle: AngleIndex) -> bool {
        !is_outgoing(self.signed_face_area(cell, face, angle))
    }
}
