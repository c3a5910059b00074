//! Physical constants and unit conversions
//!
//! Canonical units are kpc, Myr and solar masses.

/// Gravitational constant in kpc^3 / (M_sun Myr^2)
pub const G: f64 = 4.498502151469554e-12;

/// 1 km/s expressed in kpc/Myr
pub const KMS_TO_KPC_MYR: f64 = 1.0227121650537077e-3;

/// 1 Gyr expressed in Myr
pub const GYR_TO_MYR: f64 = 1000.0;

/// Diagonal of the Cholesky fallback factor when a covariance is degenerate
pub const CHOLESKY_FALLBACK_EPS: f64 = 1e-6;
