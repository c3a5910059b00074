use std::sync::Arc;

use hvsim::simulation::constants::G;
use hvsim::simulation::forces::{AccelerationField, PotentialComponent};
use hvsim::simulation::integrator::{kick_drift_kick, leapfrog_step, leapfrog_step_par, Integrator};
use hvsim::simulation::potential::{GalacticPotential, LmcParams};
use hvsim::simulation::states::{Ensemble, NVec3, PhaseSpacePoint};
use hvsim::simulation::trajectory::{TimeSample, TrajectoryInterpolator};

/// Static point mass at the origin with G M = `gm`
struct PointMass {
    gm: f64,
}

impl AccelerationField for PointMass {
    fn acceleration(&self, pos: &NVec3, _t: f64) -> NVec3 {
        let r = pos.norm();
        if r == 0.0 {
            return NVec3::zeros();
        }
        pos * (-self.gm / (r * r * r))
    }
}

/// Uniform field along x whose strength equals the query time
struct ClockField;

impl AccelerationField for ClockField {
    fn acceleration(&self, _pos: &NVec3, t: f64) -> NVec3 {
        NVec3::new(t, 0.0, 0.0)
    }
}

fn static_track(p: NVec3) -> Arc<TrajectoryInterpolator> {
    Arc::new(TrajectoryInterpolator::from_samples(vec![TimeSample {
        time: 0.0,
        position: p,
        velocity: NVec3::zeros(),
    }]))
}

fn moving_galaxy() -> GalacticPotential {
    let mw = TrajectoryInterpolator::from_samples(
        (0..=100)
            .map(|k| {
                let t = -(k as f64) * 10.0;
                TimeSample { time: t, position: NVec3::new(0.01 * t, 0.0, 0.002 * t), velocity: NVec3::zeros() }
            })
            .collect(),
    );
    let lmc = TrajectoryInterpolator::from_samples(
        (0..=100)
            .map(|k| {
                let t = -(k as f64) * 10.0;
                TimeSample { time: t, position: NVec3::new(-1.0, -41.0 + 0.2 * t, -28.0), velocity: NVec3::zeros() }
            })
            .collect(),
    );
    GalacticPotential::milky_way(Arc::new(mw), Arc::new(lmc), 2)
}

fn spread_ensemble(n: usize) -> Ensemble {
    let points = (0..n)
        .map(|i| {
            let f = i as f64;
            PhaseSpacePoint::new(
                NVec3::new(20.0 + (f * 0.37).sin() * 30.0, (f * 0.13).cos() * 30.0, (f * 0.07).sin() * 10.0),
                NVec3::new(0.2, -0.1, 0.3),
            )
        })
        .collect();
    Ensemble::new(points)
}

// ==================================================================================
// Leapfrog tests
// ==================================================================================

#[test]
fn forward_then_backward_returns_to_start() {
    let field = PointMass { gm: 1.0 };
    let start = PhaseSpacePoint::new(NVec3::new(1.0, 0.0, 0.2), NVec3::new(0.0, 0.9, 0.1));
    let h = 0.01;

    let fwd = kick_drift_kick(&start, &field, 0.0, h);
    let back = kick_drift_kick(&fwd, &field, h, -h);

    assert!((back.position - start.position).norm() < 1e-12, "position drift {:?}", back.position - start.position);
    assert!((back.velocity - start.velocity).norm() < 1e-12, "velocity drift {:?}", back.velocity - start.velocity);
}

#[test]
fn many_steps_are_time_reversible() {
    let field = PointMass { gm: 1.0 };
    let start = PhaseSpacePoint::new(NVec3::new(1.0, 0.0, 0.0), NVec3::new(0.0, 1.2, 0.0));
    let mut ens = Ensemble::new(vec![start]);

    for _ in 0..1000 {
        leapfrog_step(&mut ens, &field, 0.005);
    }
    for _ in 0..1000 {
        leapfrog_step(&mut ens, &field, -0.005);
    }

    let end = ens.points[0];
    assert!((end.position - start.position).norm() < 1e-9);
    assert!((end.velocity - start.velocity).norm() < 1e-9);
    assert!(ens.t.abs() < 1e-12);
}

#[test]
fn every_sample_sees_the_step_start_time() {
    // a(t) = t along x: v_n+1 = v_n + (h/2)(t_n + t_n + h)
    let p = PhaseSpacePoint::new(NVec3::zeros(), NVec3::zeros());
    let mut ens = Ensemble::new(vec![p; 16]);
    ens.t = 2.0;
    let h = -0.5;

    leapfrog_step(&mut ens, &ClockField, h);

    let expected_v = 0.5 * h * (2.0 + (2.0 + h));
    for q in &ens.points {
        assert_eq!(*q, ens.points[0], "samples diverged within one step");
        assert!((q.velocity.x - expected_v).abs() < 1e-15);
    }
    assert_eq!(ens.t, 1.5);
}

#[test]
fn parallel_step_matches_serial_bitwise() {
    let field = moving_galaxy();
    let mut serial = spread_ensemble(257);
    let mut parallel = serial.clone();

    for _ in 0..20 {
        leapfrog_step(&mut serial, &field, -0.5);
        leapfrog_step_par(&mut parallel, &field, -0.5);
    }

    assert_eq!(serial.t, parallel.t);
    assert_eq!(serial.points, parallel.points);
}

#[test]
fn circular_orbit_keeps_its_radius() {
    let (m, c, r) = (1e11, 1.0, 8.0);
    let field = GalacticPotential::new(
        static_track(NVec3::zeros()),
        static_track(NVec3::new(-1.0, -41.0, -28.0)),
        vec![PotentialComponent::Hernquist { mass: m, scale: c }],
        LmcParams { mass: 0.0, scale_radius: 1.0 },
    );

    // v_c^2 = G m r / (r + c)^2 for a Hernquist sphere
    let vc = (G * m * r / ((r + c) * (r + c))).sqrt();
    let start = PhaseSpacePoint::new(NVec3::new(r, 0.0, 0.0), NVec3::new(0.0, vc, 0.0));
    let mut integ = Integrator::new(Ensemble::new(vec![start]), field, -0.1, false);

    let mut worst: f64 = 0.0;
    integ.run(5000, |_, ens| {
        let dr = (ens.points[0].position.norm() - r).abs() / r;
        worst = worst.max(dr);
    });

    assert!(worst < 1e-3, "radius wandered by {}", worst);
    assert_eq!(integ.steps_taken(), 5000);
    assert!((integ.time() + 500.0).abs() < 1e-9);
}

#[test]
fn integrator_run_reports_each_step() {
    let mut integ = Integrator::new(spread_ensemble(8), moving_galaxy(), -1.0, true);
    let mut seen = Vec::new();
    integ.run(5, |step, ens| seen.push((step, ens.t)));

    assert_eq!(seen.iter().map(|s| s.0).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
    assert!((seen[4].1 + 5.0).abs() < 1e-12);
    assert_eq!(integ.points().len(), 8);
}

#[test]
fn empty_ensemble_still_advances_time() {
    let mut ens = Ensemble::new(Vec::new());
    leapfrog_step(&mut ens, &PointMass { gm: 1.0 }, -0.25);
    assert!(ens.is_empty());
    assert_eq!(ens.t, -0.25);
    assert_eq!(ens.centroid(), NVec3::zeros());
}
