//! Explicit inverse from the adjugate.
//!
//! The determinant and all sixteen cofactors are expanded from the six 2×2
//! minors of the top two rows and the six of the bottom two rows. No
//! elimination order is involved, which makes it a useful independent check
//! on the elimination strategies.

use super::{DenseSolver, Matrix4, SingularMatrix, Vector4};

/// Solve via `x = adj(A) b / det(A)`.
#[derive(Clone, Copy, Debug, Default)]
pub struct CofactorInverse;

impl CofactorInverse {
    /// Adjugate and determinant of `a`.
    pub fn adjugate(a: &Matrix4) -> (Matrix4, f64) {
        let [
            [a00, a01, a02, a03],
            [a10, a11, a12, a13],
            [a20, a21, a22, a23],
            [a30, a31, a32, a33],
        ] = *a.rows();

        let s0 = a00 * a11 - a10 * a01;
        let s1 = a00 * a12 - a10 * a02;
        let s2 = a00 * a13 - a10 * a03;
        let s3 = a01 * a12 - a11 * a02;
        let s4 = a01 * a13 - a11 * a03;
        let s5 = a02 * a13 - a12 * a03;

        let c5 = a22 * a33 - a32 * a23;
        let c4 = a21 * a33 - a31 * a23;
        let c3 = a21 * a32 - a31 * a22;
        let c2 = a20 * a33 - a30 * a23;
        let c1 = a20 * a32 - a30 * a22;
        let c0 = a20 * a31 - a30 * a21;

        let det = s0 * c5 - s1 * c4 + s2 * c3 + s3 * c2 - s4 * c1 + s5 * c0;

        let adj = Matrix4::from_rows([
            [
                a11 * c5 - a12 * c4 + a13 * c3,
                -a01 * c5 + a02 * c4 - a03 * c3,
                a31 * s5 - a32 * s4 + a33 * s3,
                -a21 * s5 + a22 * s4 - a23 * s3,
            ],
            [
                -a10 * c5 + a12 * c2 - a13 * c1,
                a00 * c5 - a02 * c2 + a03 * c1,
                -a30 * s5 + a32 * s2 - a33 * s1,
                a20 * s5 - a22 * s2 + a23 * s1,
            ],
            [
                a10 * c4 - a11 * c2 + a13 * c0,
                -a00 * c4 + a01 * c2 - a03 * c0,
                a30 * s4 - a31 * s2 + a33 * s0,
                -a20 * s4 + a21 * s2 - a23 * s0,
            ],
            [
                -a10 * c3 + a11 * c1 - a12 * c0,
                a00 * c3 - a01 * c1 + a02 * c0,
                -a30 * s3 + a31 * s1 - a32 * s0,
                a20 * s3 - a21 * s1 + a22 * s0,
            ],
        ]);
        (adj, det)
    }

    /// Determinant of `a`.
    pub fn determinant(a: &Matrix4) -> f64 {
        Self::adjugate(a).1
    }

    #[inline]
    fn apply(adj: &Matrix4, det: f64, b: &mut Vector4) {
        let inv_det = 1.0 / det;
        let x = adj.mul_vec(b);
        for i in 0..4 {
            b[i] = x[i] * inv_det;
        }
    }
}

impl DenseSolver for CofactorInverse {
    #[inline]
    fn solve(&self, a: &mut Matrix4, b: &mut Vector4) {
        let (adj, det) = Self::adjugate(a);
        debug_assert!(det != 0.0, "singular local 4x4 system");
        Self::apply(&adj, det, b);
    }

    fn try_solve(&self, a: &mut Matrix4, b: &mut Vector4) -> Result<(), SingularMatrix> {
        let (adj, det) = Self::adjugate(a);
        if det == 0.0 || !det.is_finite() {
            return Err(SingularMatrix::ZeroDeterminant(det));
        }
        Self::apply(&adj, det, b);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "cofactor"
    }
}
