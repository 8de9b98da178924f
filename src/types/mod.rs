//! Strongly-typed indices and fixed element dimensions.
//!
//! Cells and angles are both plain integers in the underlying storage, and
//! every kernel entry point takes one of each. The newtypes keep them from
//! being swapped at call sites.
//!
//! # Example
//!
//! ```
//! use sn_rs::types::{AngleIndex, CellIndex, N_VERTEX_PER_CELL};
//!
//! let cell = CellIndex::new(12);
//! let angle = AngleIndex::new(3);
//! assert_eq!(cell.get(), 12);
//! assert_eq!(format!("{cell}/{angle}"), "C12/A3");
//! assert_eq!(N_VERTEX_PER_CELL, 4);
//! ```

mod indices;

pub use indices::{AngleIndex, CellIndex, SideIndex};

/// Vertices of a linear tetrahedron.
pub const N_VERTEX_PER_CELL: usize = 4;

/// Faces of a tetrahedron. Face `f` is the face opposite local vertex `f`.
pub const N_FACE_PER_CELL: usize = 4;

/// Vertices of a triangular face.
pub const N_VERTEX_PER_FACE: usize = 3;

/// Local vertices lying on each face, in ascending order.
///
/// Face `f` excludes vertex `f`.
pub const FACE_LOCAL_VERTICES: [[usize; N_VERTEX_PER_FACE]; N_FACE_PER_CELL] =
    [[1, 2, 3], [0, 2, 3], [0, 1, 3], [0, 1, 2]];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_table_excludes_opposite_vertex() {
        for (face, vertices) in FACE_LOCAL_VERTICES.iter().enumerate() {
            assert!(!vertices.contains(&face));
            assert!(vertices.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
