//! Discrete-ordinates quadrature sets.
//!
//! A quadrature set is a list of unit directions Ω = (ξ, η, μ) with weights
//! summing to 4π, so that Σ_a w_a ψ_a approximates the scalar flux.

use std::f64::consts::PI;

use crate::error::{Result, TransportError};
use crate::types::AngleIndex;

/// Tolerance for unit-length and weight-sum checks.
const QUADRATURE_TOL: f64 = 1e-10;

/// Discrete ordinates with weights.
#[derive(Clone, Debug)]
pub struct Quadrature {
    directions: Vec<[f64; 3]>,
    weights: Vec<f64>,
}

impl Quadrature {
    /// Create a quadrature set from directions and weights.
    ///
    /// Directions must be unit vectors and weights must be positive and sum to 4π.
    pub fn new(directions: Vec<[f64; 3]>, weights: Vec<f64>) -> Result<Self> {
        if directions.is_empty() {
            return Err(TransportError::InvalidQuadrature(
                "quadrature set has no directions".to_string(),
            ));
        }
        TransportError::check_len("quadrature weights", directions.len(), weights.len())?;

        for (a, omega) in directions.iter().enumerate() {
            let norm = (omega[0] * omega[0] + omega[1] * omega[1] + omega[2] * omega[2]).sqrt();
            if (norm - 1.0).abs() > QUADRATURE_TOL {
                return Err(TransportError::InvalidQuadrature(format!(
                    "direction {a} has length {norm}"
                )));
            }
        }
        if let Some(a) = weights.iter().position(|&w| w <= 0.0 || !w.is_finite()) {
            return Err(TransportError::InvalidQuadrature(format!(
                "weight {a} is not positive"
            )));
        }
        let total: f64 = weights.iter().sum();
        if (total - 4.0 * PI).abs() > QUADRATURE_TOL * 4.0 * PI {
            return Err(TransportError::InvalidQuadrature(format!(
                "weights sum to {total}, expected 4π"
            )));
        }

        Ok(Self {
            directions,
            weights,
        })
    }

    /// Level-symmetric S2: one direction per octant, all cosines ±1/√3.
    pub fn s2() -> Self {
        let c = 1.0 / 3.0_f64.sqrt();
        let mut directions = Vec::with_capacity(8);
        for sx in [1.0, -1.0] {
            for sy in [1.0, -1.0] {
                for sz in [1.0, -1.0] {
                    directions.push([sx * c, sy * c, sz * c]);
                }
            }
        }
        Self {
            directions,
            weights: vec![4.0 * PI / 8.0; 8],
        }
    }

    /// Number of directions.
    #[inline]
    pub fn n_angles(&self) -> usize {
        self.directions.len()
    }

    /// Direction cosines (ξ, η, μ) of an angle.
    #[inline]
    pub fn omega(&self, angle: AngleIndex) -> [f64; 3] {
        self.directions[angle]
    }

    /// Weight of an angle.
    #[inline]
    pub fn weight(&self, angle: AngleIndex) -> f64 {
        self.weights[angle]
    }

    /// All weights.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Index of the direction -Ω for a given angle, if the set contains it.
    pub fn opposite(&self, angle: AngleIndex) -> Option<AngleIndex> {
        let [x, y, z] = self.omega(angle);
        self.directions
            .iter()
            .position(|d| {
                (d[0] + x).abs() < QUADRATURE_TOL
                    && (d[1] + y).abs() < QUADRATURE_TOL
                    && (d[2] + z).abs() < QUADRATURE_TOL
            })
            .map(AngleIndex::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_s2_weights_sum_to_four_pi() {
        let q = Quadrature::s2();
        assert_eq!(q.n_angles(), 8);
        let total: f64 = q.weights().iter().sum();
        assert!((total - 4.0 * PI).abs() < 1e-12);
    }

    #[test]
    fn test_s2_is_symmetric() {
        let q = Quadrature::s2();
        for angle in AngleIndex::iter(q.n_angles()) {
            let opp = q.opposite(angle).expect("S2 contains every -Ω");
            let (a, b) = (q.omega(angle), q.omega(opp));
            for d in 0..3 {
                assert!((a[d] + b[d]).abs() < 1e-14);
            }
        }
    }

    #[test]
    fn test_new_validates_directions() {
        let err = Quadrature::new(vec![[1.0, 1.0, 0.0]], vec![4.0 * PI]).unwrap_err();
        assert!(matches!(err, TransportError::InvalidQuadrature(_)));
    }

    #[test]
    fn test_new_validates_weights() {
        let dirs = vec![[1.0, 0.0, 0.0], [-1.0, 0.0, 0.0]];
        assert!(Quadrature::new(dirs.clone(), vec![1.0, 1.0]).is_err());
        assert!(Quadrature::new(dirs.clone(), vec![4.0 * PI]).is_err());
        assert!(Quadrature::new(dirs, vec![2.0 * PI, 2.0 * PI]).is_ok());
    }
}
