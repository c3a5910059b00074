//! Force / acceleration contributors for the galactic potential
//!
//! Defines the analytic acceleration laws (Hernquist, Miyamoto–Nagai, NFW),
//! the `PotentialComponent` variant that carries one law with its parameters,
//! and the `AccelerationField` trait the integrator evaluates.
//!
//! Every law takes a position relative to its own mass center and returns
//! the zero vector at that center.

use crate::simulation::constants::G;
use crate::simulation::states::NVec3;

/// Trait for acceleration sources sampled at a point and a time
/// Implementations must be pure: same `(pos, t)` gives the same result
pub trait AccelerationField: Send + Sync {
    fn acceleration(&self, pos: &NVec3, t: f64) -> NVec3;
}

/// Hernquist sphere: a = -G m / (r (r + c)^2) * pos
pub fn hernquist(pos: &NVec3, mass: f64, scale: f64) -> NVec3 {
    let r = pos.norm();
    if r == 0.0 {
        return NVec3::zeros();
    }
    let rc = r + scale;
    let coef = -G * mass / (r * rc * rc);
    pos * coef
}

/// Miyamoto–Nagai disk with radial scale `a` and vertical scale `b`
pub fn miyamoto_nagai(pos: &NVec3, mass: f64, a: f64, b: f64) -> NVec3 {
    let (x, y, z) = (pos.x, pos.y, pos.z);

    // Cylindrical radius squared and the softened height
    let r2 = x * x + y * y;
    let zeta = (z * z + b * b).sqrt();

    // D = (R^2 + (a + zeta)^2)^(3/2)
    let az = a + zeta;
    let d = (r2 + az * az).powf(1.5);
    if d == 0.0 {
        return NVec3::zeros();
    }

    let gm = G * mass;
    let ax = -gm * x / d;
    let ay = -gm * y / d;

    // zeta = 0 only for b = 0 in the midplane
    let dz = d * zeta;
    let az_comp = if dz == 0.0 { 0.0 } else { -gm * z * az / dz };

    NVec3::new(ax, ay, az_comp)
}

/// Navarro–Frenk–White halo with scale radius `r_s`
pub fn nfw(pos: &NVec3, mass: f64, r_s: f64) -> NVec3 {
    let r = pos.norm();
    if r == 0.0 {
        return NVec3::zeros();
    }
    let s = r / r_s;

    // Enclosed-mass shape: mu(s) = ln(1 + s) - s / (1 + s)
    let mu = s.ln_1p() - s / (1.0 + s);

    // -(G m mu / r^2) * pos / r
    let coef = -G * mass * mu / (r * r * r);
    pos * coef
}

/// One analytic mass component with its parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PotentialComponent {
    Hernquist { mass: f64, scale: f64 },
    Nfw { mass: f64, scale_radius: f64 },
    MiyamotoNagai { mass: f64, a: f64, b: f64 },
}

impl PotentialComponent {
    /// Acceleration at `rel`, a position relative to the component's center
    pub fn evaluate(&self, rel: &NVec3) -> NVec3 {
        match *self {
            PotentialComponent::Hernquist { mass, scale } => hernquist(rel, mass, scale),
            PotentialComponent::Nfw { mass, scale_radius } => nfw(rel, mass, scale_radius),
            PotentialComponent::MiyamotoNagai { mass, a, b } => miyamoto_nagai(rel, mass, a, b),
        }
    }

    pub fn mass(&self) -> f64 {
        match *self {
            PotentialComponent::Hernquist { mass, .. }
            | PotentialComponent::Nfw { mass, .. }
            | PotentialComponent::MiyamotoNagai { mass, .. } => mass,
        }
    }
}

/// Sum every component at the same relative position, no early exit
pub fn sum_components(components: &[PotentialComponent], rel: &NVec3) -> NVec3 {
    components
        .iter()
        .fold(NVec3::zeros(), |acc, c| acc + c.evaluate(rel))
}
