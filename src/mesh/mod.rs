//! Mesh representation.
//!
//! - [`TransportGeometry`]: the per-cell queries the transport kernel consumes
//! - [`TetMesh`]: conforming tetrahedral mesh with precomputed geometry,
//!   structured cube generation and partition splitting
//! - [`OrientedMesh`]: a mesh paired with a quadrature set, answering
//!   direction-dependent queries (signed face areas)

mod oriented;
mod tet_mesh;
pub mod traits;

pub use oriented::OrientedMesh;
pub use tet_mesh::{PartitionSide, TetMesh};
pub use traits::{FaceAdjacency, TransportGeometry, is_outgoing};
