//! Error types for transport sweeps.
//!
//! The kernel itself has a single numerical failure mode (a zero pivot in the
//! local 4×4 solve). Everything else reported here is a setup error: bad mesh
//! input, buffers sized for a different problem, or unknown materials. None of
//! them are transient, so callers should surface them rather than retry.

use thiserror::Error;

use crate::solver::SingularMatrix;
use crate::types::{AngleIndex, CellIndex};

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TransportError>;

/// Errors raised while setting up or running a transport sweep.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The local system for a (cell, angle, group) has a zero or non-finite pivot.
    #[error("Singular local system at {cell}, {angle}, group {group}: {cause}")]
    SingularSystem {
        cell: CellIndex,
        angle: AngleIndex,
        group: usize,
        #[source]
        cause: SingularMatrix,
    },

    /// A cell references a material with no cross-section data.
    #[error("Material index {material} out of bounds for {cell}")]
    InvalidMaterial { cell: CellIndex, material: usize },

    /// A buffer does not match the dimensions of the problem it is used with.
    #[error("Dimension mismatch for {what}: expected {expected}, got {actual}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Mesh input is not a valid conforming tetrahedral mesh.
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    /// Invalid quadrature set.
    #[error("Invalid quadrature: {0}")]
    InvalidQuadrature(String),

    /// Upwind dependencies for an angle contain a cycle.
    #[error("Cyclic upwind dependency for {angle}: {remaining} cells could not be scheduled")]
    CyclicDependency { angle: AngleIndex, remaining: usize },
}

impl TransportError {
    /// Create a dimension mismatch error.
    pub fn dimension_mismatch(what: &'static str, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            what,
            expected,
            actual,
        }
    }

    /// Check that a buffer length matches, returning a dimension mismatch otherwise.
    pub fn check_len(what: &'static str, expected: usize, actual: usize) -> Result<()> {
        if expected == actual {
            Ok(())
        } else {
            Err(Self::dimension_mismatch(what, expected, actual))
        }
    }
}
