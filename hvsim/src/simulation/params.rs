//! Numerical and run parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - trajectory selector (MW/LMC history pair and LMC model),
//! - ensemble size and Monte Carlo seed,
//! - signed step size and number of steps,
//! - whether covariance sampling is disabled

#[derive(Debug, Clone)]
pub struct Parameters {
    pub trajectory: u32,        // 1..=8
    pub samples: usize,         // ensemble size
    pub h: f64,                 // step size (Myr), negative = backward
    pub steps: usize,           // number of steps to take
    pub seed: u64,              // deterministic seed
    pub disable_sampling: bool, // every sample sits on the mean state
}
