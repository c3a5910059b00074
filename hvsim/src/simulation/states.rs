//! Core state types for the ensemble simulation.
//!
//! Defines the per-sample phase-space state and the ensemble that the
//! integrator advances:
//! - `PhaseSpacePoint` using `NVec3` (kpc, kpc/Myr)
//! - `Ensemble` holding every Monte Carlo sample plus the current time `t`

use nalgebra::Vector3;

use super::constants::KMS_TO_KPC_MYR;

pub type NVec3 = Vector3<f64>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseSpacePoint {
    pub position: NVec3, // kpc
    pub velocity: NVec3, // kpc/Myr
}

impl PhaseSpacePoint {
    pub fn new(position: NVec3, velocity: NVec3) -> Self {
        Self { position, velocity }
    }

    /// Build a point from a catalog-style velocity in km/s
    pub fn from_km_s(position: NVec3, velocity_km_s: NVec3) -> Self {
        Self {
            position,
            velocity: velocity_km_s * KMS_TO_KPC_MYR,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Ensemble {
    pub points: Vec<PhaseSpacePoint>, // one entry per Monte Carlo sample
    pub t: f64,                       // simulation time (Myr), 0 = now
}

impl Ensemble {
    /// New ensemble at t = 0
    pub fn new(points: Vec<PhaseSpacePoint>) -> Self {
        Self { points, t: 0.0 }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Mean position of all samples, zero for an empty ensemble
    pub fn centroid(&self) -> NVec3 {
        if self.points.is_empty() {
            return NVec3::zeros();
        }
        let sum = self
            .points
            .iter()
            .fold(NVec3::zeros(), |acc, p| acc + p.position);
        sum / self.points.len() as f64
    }

    /// RMS distance of the samples from the centroid (kpc)
    pub fn dispersion(&self) -> f64 {
        if self.points.is_empty() {
            return 0.0;
        }
        let c = self.centroid();
        let sq: f64 = self
            .points
            .iter()
            .map(|p| (p.position - c).norm_squared())
            .sum();
        (sq / self.points.len() as f64).sqrt()
    }
}
