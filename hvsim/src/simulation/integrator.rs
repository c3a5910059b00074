//! Fixed-step kick-drift-kick leapfrog for the sample ensemble
//!
//! Samples are independent test particles in an external field, so each
//! one is advanced on its own with the same step-start time. The ensemble
//! time only moves after every sample has been updated.

use rayon::prelude::*;

use super::forces::AccelerationField;
use super::states::{Ensemble, PhaseSpacePoint};

/// Advance a single sample from time `t` by `h` (h < 0 integrates backward)
pub fn kick_drift_kick<F>(p: &PhaseSpacePoint, field: &F, t: f64, h: f64) -> PhaseSpacePoint
where
    F: AccelerationField + ?Sized,
{
    let half_h = 0.5 * h;

    // Kick: v_n+1/2 = v_n + (h/2) a(x_n, t_n)
    let a0 = field.acceleration(&p.position, t);
    let v_half = p.velocity + a0 * half_h;

    // Drift: x_n+1 = x_n + h v_n+1/2
    let position = p.position + v_half * h;

    // Kick: v_n+1 = v_n+1/2 + (h/2) a(x_n+1, t_n+1)
    let a1 = field.acceleration(&position, t + h);
    let velocity = v_half + a1 * half_h;

    PhaseSpacePoint { position, velocity }
}

/// Advance the whole ensemble by one step on the current thread
pub fn leapfrog_step<F>(ens: &mut Ensemble, field: &F, h: f64)
where
    F: AccelerationField + ?Sized,
{
    let t = ens.t;
    for p in ens.points.iter_mut() {
        *p = kick_drift_kick(p, field, t, h);
    }
    ens.t += h;
}

/// Same as [`leapfrog_step`], with the samples split across the rayon pool
pub fn leapfrog_step_par<F>(ens: &mut Ensemble, field: &F, h: f64)
where
    F: AccelerationField + ?Sized,
{
    let t = ens.t;
    ens.points
        .par_iter_mut()
        .for_each(|p| *p = kick_drift_kick(p, field, t, h));
    // par_iter_mut joins before returning, so every sample is done here
    ens.t += h;
}

/// Ensemble plus the field and step settings that drive it
pub struct Integrator<F: AccelerationField> {
    pub ensemble: Ensemble,
    pub field: F,
    pub h: f64,        // signed step (Myr)
    pub parallel: bool,
    steps_taken: usize,
}

impl<F: AccelerationField> Integrator<F> {
    pub fn new(ensemble: Ensemble, field: F, h: f64, parallel: bool) -> Self {
        Self {
            ensemble,
            field,
            h,
            parallel,
            steps_taken: 0,
        }
    }

    pub fn time(&self) -> f64 {
        self.ensemble.t
    }

    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    pub fn points(&self) -> &[PhaseSpacePoint] {
        &self.ensemble.points
    }

    pub fn step(&mut self) {
        if self.parallel {
            leapfrog_step_par(&mut self.ensemble, &self.field, self.h);
        } else {
            leapfrog_step(&mut self.ensemble, &self.field, self.h);
        }
        self.steps_taken += 1;
    }

    /// Take `steps` steps, handing the ensemble to `on_step` after each one
    pub fn run<C>(&mut self, steps: usize, mut on_step: C)
    where
        C: FnMut(usize, &Ensemble),
    {
        for _ in 0..steps {
            self.step();
            on_step(self.steps_taken, &self.ensemble);
        }
    }
}
