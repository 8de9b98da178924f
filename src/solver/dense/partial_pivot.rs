//! Gaussian elimination with partial (row) pivoting.

use super::{DenseSolver, Matrix4, SingularMatrix, Vector4, check_pivot};

/// Gaussian elimination choosing the largest remaining entry of each column as pivot.
#[derive(Clone, Copy, Debug, Default)]
pub struct PartialPivotElimination;

#[inline(always)]
fn eliminate<const CHECKED: bool>(a: &mut Matrix4, b: &mut Vector4) -> Result<(), SingularMatrix> {
    for k in 0..4 {
        let mut pivot_row = k;
        let mut pivot_abs = a[(k, k)].abs();
        for row in k + 1..4 {
            let candidate = a[(row, k)].abs();
            if candidate > pivot_abs {
                pivot_row = row;
                pivot_abs = candidate;
            }
        }
        if pivot_row != k {
            a.swap_rows(k, pivot_row);
            b.swap(k, pivot_row);
        }

        let pivot = a[(k, k)];
        check_pivot::<CHECKED>(k, pivot)?;
        for row in k + 1..4 {
            let factor = a[(row, k)] / pivot;
            a[(row, k)] = 0.0;
            for col in k + 1..4 {
                a[(row, col)] -= factor * a[(k, col)];
            }
            b[row] -= factor * b[k];
        }
    }

    for row in (0..4).rev() {
        let mut sum = b[row];
        for col in row + 1..4 {
            sum -= a[(row, col)] * b[col];
        }
        b[row] = sum / a[(row, row)];
    }
    Ok(())
}

impl DenseSolver for PartialPivotElimination {
    #[inline]
    fn solve(&self, a: &mut Matrix4, b: &mut Vector4) {
        let _ = eliminate::<false>(a, b);
    }

    #[inline]
    fn try_solve(&self, a: &mut Matrix4, b: &mut Vector4) -> Result<(), SingularMatrix> {
        eliminate::<true>(a, b)
    }

    fn name(&self) -> &'static str {
        "partial-pivot"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permuted_identity() {
        // Needs a row exchange at every step.
        let mut a = Matrix4::from_rows([
            [0.0, 0.0, 0.0, 1.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [1.0, 0.0, 0.0, 0.0],
        ]);
        let mut b = [4.0, 3.0, 2.0, 1.0];
        PartialPivotElimination.try_solve(&mut a, &mut b).unwrap();
        assert_eq!(b, [1.0, 2.0, 3.0, 4.0]);
    }
}
