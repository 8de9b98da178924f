//! Gaussian elimination without pivoting.
//!
//! Rows are normalized by their pivot and eliminated downward in natural
//! order, then back-substituted. No rows are exchanged, so the assembled cell
//! matrix must have non-zero leading pivots; a debug assertion guards each
//! division and [`DenseSolver::try_solve`] reports the failure instead.

use super::{DenseSolver, Matrix4, SingularMatrix, Vector4, check_pivot};

/// Gaussian elimination with no row exchanges.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoPivotElimination;

#[inline(always)]
fn eliminate<const CHECKED: bool>(a: &mut Matrix4, b: &mut Vector4) -> Result<(), SingularMatrix> {
    for k in 0..3 {
        // Normalize row k
        let pivot = a[(k, k)];
        check_pivot::<CHECKED>(k, pivot)?;
        let tmp = 1.0 / pivot;
        a[(k, k)] = 1.0;
        for col in k + 1..4 {
            a[(k, col)] *= tmp;
        }
        b[k] *= tmp;

        // Zero column k below the diagonal
        for row in k + 1..4 {
            let factor = a[(row, k)];
            a[(row, k)] = 0.0;
            for col in k + 1..4 {
                a[(row, col)] -= a[(k, col)] * factor;
            }
            b[row] -= b[k] * factor;
        }
    }

    // Backward solve
    check_pivot::<CHECKED>(3, a[(3, 3)])?;
    b[3] /= a[(3, 3)];
    for row in (0..3).rev() {
        for col in (row + 1..4).rev() {
            b[row] -= a[(row, col)] * b[col];
        }
    }
    Ok(())
}

impl DenseSolver for NoPivotElimination {
    #[inline]
    fn solve(&self, a: &mut Matrix4, b: &mut Vector4) {
        // The unchecked path has no error exit.
        let _ = eliminate::<false>(a, b);
    }

    #[inline]
    fn try_solve(&self, a: &mut Matrix4, b: &mut Vector4) -> Result<(), SingularMatrix> {
        eliminate::<true>(a, b)
    }

    fn name(&self) -> &'static str {
        "no-pivot"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upper_triangular_factor() {
        let mut a = Matrix4::from_rows([
            [2.0, 1.0, 0.0, 0.0],
            [1.0, 2.0, 1.0, 0.0],
            [0.0, 1.0, 2.0, 1.0],
            [0.0, 0.0, 1.0, 2.0],
        ]);
        let mut b = [1.0, 0.0, 0.0, 1.0];
        NoPivotElimination.solve(&mut a, &mut b);

        // Unit diagonal above row 3, zeros below the diagonal.
        for k in 0..3 {
            assert_eq!(a[(k, k)], 1.0);
        }
        for row in 1..4 {
            for col in 0..row {
                assert_eq!(a[(row, col)], 0.0);
            }
        }
        let expected = [0.6, -0.2, -0.2, 0.6];
        for i in 0..4 {
            assert!((b[i] - expected[i]).abs() < 1e-14);
        }
    }

    #[test]
    fn test_last_pivot_checked() {
        let mut a = Matrix4::from_rows([
            [1.0, 0.0, 0.0, 1.0],
            [0.0, 1.0, 0.0, 1.0],
            [0.0, 0.0, 1.0, 1.0],
            [1.0, 1.0, 1.0, 3.0],
        ]);
        let mut b = [1.0; 4];
        let err = NoPivotElimination.try_solve(&mut a, &mut b).unwrap_err();
        assert!(matches!(err, SingularMatrix::ZeroPivot { row: 3, .. }));
    }
}
