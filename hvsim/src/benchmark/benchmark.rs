use std::sync::Arc;
use std::time::Instant;

use crate::simulation::integrator::{leapfrog_step, leapfrog_step_par};
use crate::simulation::potential::GalacticPotential;
use crate::simulation::states::{Ensemble, NVec3, PhaseSpacePoint};
use crate::simulation::trajectory::{TimeSample, TrajectoryInterpolator};

/// Helper to build a synthetic ensemble of size `n`
fn make_ensemble(n: usize) -> Ensemble {
    let mut points = Vec::with_capacity(n);

    for i in 0..n {
        let i_f = i as f64;
        // deterministic positions, no rand needed
        let x = NVec3::new(
            (i_f * 0.37).sin() * 50.0,
            (i_f * 0.13).cos() * 50.0,
            (i_f * 0.07).sin() * 50.0,
        );
        let v = NVec3::new(0.3, -0.2, 0.1);
        points.push(PhaseSpacePoint::new(x, v));
    }

    Ensemble::new(points)
}

/// Helper to build a linear track from `from` to `to` over 1 Gyr
fn make_track(from: NVec3, to: NVec3, samples: usize) -> TrajectoryInterpolator {
    let last = (samples - 1) as f64;
    let v = (to - from) / 1000.0;
    let track = (0..samples)
        .map(|k| {
            let f = k as f64 / last;
            TimeSample {
                time: -1000.0 * f,
                position: from + (to - from) * f,
                velocity: v,
            }
        })
        .collect();
    TrajectoryInterpolator::from_samples(track)
}

fn make_field() -> GalacticPotential {
    let mw = make_track(NVec3::zeros(), NVec3::new(-30.0, 10.0, 5.0), 1000);
    let lmc = make_track(NVec3::new(-1.0, -41.0, -28.0), NVec3::new(100.0, -300.0, 50.0), 1000);
    GalacticPotential::milky_way(Arc::new(mw), Arc::new(lmc), 1)
}

/// Benchmark single-thread vs rayon `leapfrog_step` for a range of n
/// Paste output directly into excel to graph
pub fn bench_leapfrog() {
    let field = make_field();
    let h = -0.1;

    println!("N,serial_ms,parallel_ms");

    for n in [1_000, 2_000, 5_000, 10_000, 20_000, 50_000, 100_000] {
        // Small n: average over a few steps to smooth noise
        let steps = if n <= 10_000 { 10 } else { 2 };

        let template = make_ensemble(n);

        let mut serial = template.clone();
        leapfrog_step(&mut serial, &field, h); // warm-up
        let t0 = Instant::now();
        for _ in 0..steps {
            leapfrog_step(&mut serial, &field, h);
        }
        let ms_serial = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        let mut parallel = template.clone();
        leapfrog_step_par(&mut parallel, &field, h); // warm-up
        let t1 = Instant::now();
        for _ in 0..steps {
            leapfrog_step_par(&mut parallel, &field, h);
        }
        let ms_parallel = t1.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        println!("{},{:.6},{:.6}", n, ms_serial, ms_parallel);
    }
}
