//! Local operators for one (cell, angle) system.
//!
//! - [`mass`]: consistent mass pattern and the source load vector
//! - [`streaming`]: base matrix from streaming and collision
//! - [`face_coupling`]: upwind face terms into matrix and right-hand side

pub mod face_coupling;
pub mod mass;
pub mod streaming;

pub use face_coupling::couple_faces;
pub use mass::{assemble_cell_source, mass_matrix, mass_weight};
pub use streaming::streaming_collision_matrix;
