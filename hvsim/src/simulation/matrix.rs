//! Small numerical helpers for initial-condition sampling
//!
//! - `cholesky`: lower-triangular factor of a 6x6 covariance with a fixed
//!   epsilon-diagonal fallback when the matrix is not positive-definite
//! - `standard_normal`: Box–Muller draw from an injected RNG

use std::f64::consts::PI;

use nalgebra::Matrix6;
use rand::Rng;

use crate::simulation::constants::CHOLESKY_FALLBACK_EPS;

pub type Mat6 = Matrix6<f64>;

/// Factor returned when the decomposition fails
pub fn cholesky_fallback() -> Mat6 {
    Mat6::from_diagonal_element(CHOLESKY_FALLBACK_EPS)
}

/// Factor `m` into `L` with `L * L^T = m`.
/// Returns `None` if a pivot is non-positive or a divisor is zero.
pub fn try_cholesky(m: &Mat6) -> Option<Mat6> {
    let mut l = Mat6::zeros();

    for i in 0..6 {
        for j in 0..=i {
            // sum = sum_{k<j} L[i,k] * L[j,k]
            let mut sum = 0.0;
            for k in 0..j {
                sum += l[(i, k)] * l[(j, k)];
            }

            if i == j {
                let d = m[(i, i)] - sum;
                if !(d > 0.0) {
                    return None;
                }
                l[(i, j)] = d.sqrt();
            } else {
                let pivot = l[(j, j)];
                if pivot == 0.0 {
                    return None;
                }
                l[(i, j)] = (m[(i, j)] - sum) / pivot;
            }
        }
    }

    Some(l)
}

/// Factor `m`, falling back to `CHOLESKY_FALLBACK_EPS * I` on failure
pub fn cholesky(m: &Mat6) -> Mat6 {
    try_cholesky(m).unwrap_or_else(cholesky_fallback)
}

/// One standard-normal variate via Box–Muller.
/// Consumes two uniforms in (0, 1]; the cosine partner is discarded.
pub fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    // gen::<f64>() is in [0, 1); flip it so log never sees 0
    let u1 = 1.0 - rng.gen::<f64>();
    let u2 = 1.0 - rng.gen::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).sin()
}
