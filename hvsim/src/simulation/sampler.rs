//! Monte Carlo initial conditions from a star's mean state and covariance
//!
//! Draws `n` phase-space samples from the 6D Gaussian N(mean, C) using
//! `mean + L z`, where `L` is the Cholesky factor of `C` and `z` is a
//! vector of independent standard-normal variates.

use nalgebra::Vector6;
use rand::Rng;
use tracing::warn;

use crate::simulation::constants::KMS_TO_KPC_MYR;
use crate::simulation::matrix::{cholesky_fallback, standard_normal, try_cholesky, Mat6};
use crate::simulation::states::{NVec3, PhaseSpacePoint};

/// Catalog entry for one star.
/// Covariance index order is x, y, z, vx, vy, vz (kpc and km/s).
#[derive(Debug, Clone, PartialEq)]
pub struct StarRecord {
    pub id: u64,
    pub name: String,
    pub source_id: String,
    pub mean_position: NVec3,      // kpc
    pub mean_velocity: NVec3,      // km/s
    pub covariance: Mat6,
}

impl StarRecord {
    /// Mean state in canonical units
    pub fn mean_state(&self) -> PhaseSpacePoint {
        PhaseSpacePoint::from_km_s(self.mean_position, self.mean_velocity)
    }
}

/// Produces ensembles for a star.
/// Holds the factored covariance so repeated draws skip the decomposition.
#[derive(Debug, Clone)]
pub struct InitialConditionSampler {
    mean: PhaseSpacePoint,
    mean_velocity_km_s: NVec3,
    factor: Mat6,
    disabled: bool,
}

impl InitialConditionSampler {
    pub fn new(star: &StarRecord, disable_sampling: bool) -> Self {
        let factor = match try_cholesky(&star.covariance) {
            Some(l) => l,
            None => {
                if !disable_sampling {
                    warn!(
                        star = %star.name,
                        source_id = %star.source_id,
                        "covariance is not positive-definite, sampling with epsilon fallback"
                    );
                }
                cholesky_fallback()
            }
        };

        Self {
            mean: star.mean_state(),
            mean_velocity_km_s: star.mean_velocity,
            factor,
            disabled: disable_sampling,
        }
    }

    /// Lower-triangular factor used to correlate the draws
    pub fn factor(&self) -> &Mat6 {
        &self.factor
    }

    pub fn mean(&self) -> PhaseSpacePoint {
        self.mean
    }

    /// Draw `n` samples. With sampling disabled every sample is the mean.
    pub fn sample<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<PhaseSpacePoint> {
        if self.disabled {
            return vec![self.mean; n];
        }

        let mut out = Vec::with_capacity(n);
        for _ in 0..n {
            // Six independent N(0, 1) draws, correlated through L
            let z = Vector6::from_fn(|_, _| standard_normal(rng));
            let dev = self.factor * z;

            // Position deviation in kpc, velocity deviation still in km/s
            let dpos = NVec3::new(dev[0], dev[1], dev[2]);
            let dvel_km_s = NVec3::new(dev[3], dev[4], dev[5]);

            out.push(PhaseSpacePoint::from_km_s(
                self.mean.position + dpos,
                self.mean_velocity_km_s + dvel_km_s,
            ));
        }
        out
    }
}

/// One-shot helper: factor `star`'s covariance and draw `n` samples
pub fn sample_initial_conditions<R: Rng + ?Sized>(
    star: &StarRecord,
    n: usize,
    disable_sampling: bool,
    rng: &mut R,
) -> Vec<PhaseSpacePoint> {
    InitialConditionSampler::new(star, disable_sampling).sample(n, rng)
}
