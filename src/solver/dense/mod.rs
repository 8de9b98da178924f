//! Small dense solves for the per-cell 4×4 systems.
//!
//! Every (cell, angle, group) ends in one 4×4 solve, so the solver is a
//! stack-only routine working in place on [`Matrix4`] and [`Vector4`].
//!
//! # Strategies
//!
//! The [`DenseSolver`] trait is the single seam for swapping algorithms:
//! - [`NoPivotElimination`]: Gaussian elimination without row exchanges (default)
//! - [`PartialPivotElimination`]: Gaussian elimination with partial pivoting
//! - [`CofactorInverse`]: explicit inverse from 2×2 minors
//! - [`DenseSolveStrategy`]: enum over the above for zero-cost runtime selection
//!
//! All strategies agree to floating-point tolerance on well-conditioned input.
//!
//! # Example
//! ```
//! use sn_rs::solver::{DenseSolveStrategy, DenseSolver, Matrix4};
//!
//! let mut a = Matrix4::from_rows([
//!     [4.0, 1.0, 0.0, 0.0],
//!     [1.0, 4.0, 1.0, 0.0],
//!     [0.0, 1.0, 4.0, 1.0],
//!     [0.0, 0.0, 1.0, 4.0],
//! ]);
//! let mut b = [5.0, 6.0, 6.0, 5.0];
//! DenseSolveStrategy::default().solve(&mut a, &mut b);
//! for x in b {
//!     assert!((x - 1.0).abs() < 1e-14);
//! }
//! ```

mod cofactor;
mod no_pivot;
mod partial_pivot;

use std::ops::{Index, IndexMut};

use thiserror::Error;

pub use cofactor::CofactorInverse;
pub use no_pivot::NoPivotElimination;
pub use partial_pivot::PartialPivotElimination;

/// Length-4 vector (one value per cell vertex).
pub type Vector4 = [f64; 4];

/// Row-major 4×4 matrix on the stack.
///
/// Indexed with `m[(row, col)]`. Out-of-range indices panic through the
/// underlying array bounds checks; loops over `0..4` let the compiler drop
/// them in optimized builds.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Matrix4 {
    rows: [[f64; 4]; 4],
}

impl Matrix4 {
    /// All-zero matrix.
    #[inline]
    pub const fn zeros() -> Self {
        Self { rows: [[0.0; 4]; 4] }
    }

    /// Identity matrix.
    pub const fn identity() -> Self {
        Self {
            rows: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Build from rows.
    #[inline]
    pub const fn from_rows(rows: [[f64; 4]; 4]) -> Self {
        Self { rows }
    }

    /// Build entry by entry.
    #[inline]
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> f64,
    {
        Self {
            rows: std::array::from_fn(|row| std::array::from_fn(|col| f(row, col))),
        }
    }

    /// Rows as arrays.
    #[inline]
    pub fn rows(&self) -> &[[f64; 4]; 4] {
        &self.rows
    }

    /// Matrix-vector product.
    pub fn mul_vec(&self, x: &Vector4) -> Vector4 {
        std::array::from_fn(|row| {
            self.rows[row]
                .iter()
                .zip(x.iter())
                .map(|(a, x)| a * x)
                .sum()
        })
    }

    #[inline]
    pub(crate) fn swap_rows(&mut self, i: usize, j: usize) {
        self.rows.swap(i, j);
    }
}

impl Index<(usize, usize)> for Matrix4 {
    type Output = f64;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        &self.rows[row][col]
    }
}

impl IndexMut<(usize, usize)> for Matrix4 {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        &mut self.rows[row][col]
    }
}

/// A 4×4 system that cannot be solved by the chosen strategy.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum SingularMatrix {
    /// Elimination hit a zero or non-finite pivot.
    #[error("zero pivot {value:e} in row {row}")]
    ZeroPivot { row: usize, value: f64 },

    /// The determinant vanished.
    #[error("zero determinant {0:e}")]
    ZeroDeterminant(f64),
}

/// Pivot check used by the elimination strategies.
///
/// With `CHECKED` a zero or non-finite pivot is reported; otherwise only a
/// debug assertion guards the division.
#[inline(always)]
pub(crate) fn check_pivot<const CHECKED: bool>(
    row: usize,
    value: f64,
) -> Result<(), SingularMatrix> {
    if CHECKED {
        if value == 0.0 || !value.is_finite() {
            return Err(SingularMatrix::ZeroPivot { row, value });
        }
    } else {
        debug_assert!(value != 0.0, "zero pivot in row {row} of local 4x4 system");
    }
    Ok(())
}

/// In-place solver for `A x = b` with 4 unknowns.
///
/// On return `b` holds `x`; `a` is overwritten with intermediate factors.
pub trait DenseSolver: Send + Sync {
    /// Solve without reporting singularity (debug builds still assert).
    fn solve(&self, a: &mut Matrix4, b: &mut Vector4);

    /// Solve, reporting a singular system instead of producing inf/NaN.
    fn try_solve(&self, a: &mut Matrix4, b: &mut Vector4) -> Result<(), SingularMatrix>;

    /// Human-readable name for logging.
    fn name(&self) -> &'static str;
}

/// Enum over the built-in strategies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DenseSolveStrategy {
    /// Gaussian elimination without pivoting.
    #[default]
    NoPivot,
    /// Gaussian elimination with partial pivoting.
    PartialPivot,
    /// Cofactor (adjugate) inverse.
    Cofactor,
}

impl DenseSolveStrategy {
    /// All strategies, in declaration order.
    pub const ALL: [DenseSolveStrategy; 3] = [
        DenseSolveStrategy::NoPivot,
        DenseSolveStrategy::PartialPivot,
        DenseSolveStrategy::Cofactor,
    ];
}

impl DenseSolver for DenseSolveStrategy {
    #[inline]
    fn solve(&self, a: &mut Matrix4, b: &mut Vector4) {
        match self {
            DenseSolveStrategy::NoPivot => NoPivotElimination.solve(a, b),
            DenseSolveStrategy::PartialPivot => PartialPivotElimination.solve(a, b),
            DenseSolveStrategy::Cofactor => CofactorInverse.solve(a, b),
        }
    }

    #[inline]
    fn try_solve(&self, a: &mut Matrix4, b: &mut Vector4) -> Result<(), SingularMatrix> {
        match self {
            DenseSolveStrategy::NoPivot => NoPivotElimination.try_solve(a, b),
            DenseSolveStrategy::PartialPivot => PartialPivotElimination.try_solve(a, b),
            DenseSolveStrategy::Cofactor => CofactorInverse.try_solve(a, b),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            DenseSolveStrategy::NoPivot => NoPivotElimination.name(),
            DenseSolveStrategy::PartialPivot => PartialPivotElimination.name(),
            DenseSolveStrategy::Cofactor => CofactorInverse.name(),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Diagonally dominant nonsymmetric matrix resembling an assembled cell system.
    pub fn cell_like_matrix() -> Matrix4 {
        Matrix4::from_rows([
            [0.31, 0.02, -0.04, 0.05],
            [0.07, 0.29, 0.03, -0.02],
            [-0.03, 0.06, 0.34, 0.01],
            [0.04, -0.05, 0.02, 0.27],
        ])
    }

    pub fn max_rel_diff(x: &Vector4, y: &Vector4) -> f64 {
        let scale = x.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
        x.iter()
            .zip(y.iter())
            .map(|(a, b)| (a - b).abs() / scale)
            .fold(0.0, f64::max)
    }
}
