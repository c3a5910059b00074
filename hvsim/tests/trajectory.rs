use std::sync::Arc;

use hvsim::simulation::constants::KMS_TO_KPC_MYR;
use hvsim::simulation::forces::AccelerationField;
use hvsim::simulation::potential::GalacticPotential;
use hvsim::simulation::states::NVec3;
use hvsim::simulation::trajectory::{RawSample, TimeSample, TimeUnit, TrajectoryInterpolator};

fn sample(time: f64, p: [f64; 3], v: [f64; 3]) -> TimeSample {
    TimeSample {
        time,
        position: NVec3::new(p[0], p[1], p[2]),
        velocity: NVec3::new(v[0], v[1], v[2]),
    }
}

/// Three samples at t = -20, 0, 10
fn three_point_track() -> TrajectoryInterpolator {
    TrajectoryInterpolator::from_samples(vec![
        sample(0.0, [1.0, 2.0, 3.0], [0.1, 0.0, 0.0]),
        sample(10.0, [3.0, 0.0, -1.0], [0.3, 0.0, 0.2]),
        sample(-20.0, [-5.0, 4.0, 0.0], [0.0, 0.5, 0.0]),
    ])
}

// ==================================================================================
// Clamping and exact hits
// ==================================================================================

#[test]
fn queries_clamp_outside_span() {
    let tr = three_point_track();
    let first = NVec3::new(-5.0, 4.0, 0.0);
    let last = NVec3::new(3.0, 0.0, -1.0);

    for t in [-20.0, -20.0001, -1e6, f64::NEG_INFINITY] {
        assert_eq!(tr.position(t), first, "t = {}", t);
        assert_eq!(tr.velocity(t), NVec3::new(0.0, 0.5, 0.0));
    }
    for t in [10.0, 10.5, 1e9, f64::INFINITY] {
        assert_eq!(tr.position(t), last, "t = {}", t);
        assert_eq!(tr.velocity(t), NVec3::new(0.3, 0.0, 0.2));
    }
}

#[test]
fn exact_sample_time_returns_stored_value() {
    let tr = three_point_track();
    assert_eq!(tr.position(0.0), NVec3::new(1.0, 2.0, 3.0));
    assert_eq!(tr.velocity(0.0), NVec3::new(0.1, 0.0, 0.0));
    assert_eq!(tr.state(10.0), (NVec3::new(3.0, 0.0, -1.0), NVec3::new(0.3, 0.0, 0.2)));
}

#[test]
fn midpoint_is_average() {
    let p0 = NVec3::new(1.0, -2.0, 4.0);
    let p1 = NVec3::new(3.0, 6.0, -8.0);
    let tr = TrajectoryInterpolator::from_samples(vec![
        TimeSample { time: 0.0, position: p0, velocity: NVec3::zeros() },
        TimeSample { time: 10.0, position: p1, velocity: NVec3::zeros() },
    ]);

    let mid = tr.position(5.0);
    let expected = (p0 + p1) / 2.0;
    assert!((mid - expected).norm() < 1e-14, "got {:?}", mid);
}

// ==================================================================================
// Construction
// ==================================================================================

#[test]
fn unsorted_input_is_sorted() {
    let tr = three_point_track();
    let times: Vec<f64> = tr.samples().iter().map(|s| s.time).collect();
    assert_eq!(times, vec![-20.0, 0.0, 10.0]);
    assert_eq!(tr.time_span(), Some((-20.0, 10.0)));
}

#[test]
fn empty_track_answers_zero() {
    let tr = TrajectoryInterpolator::from_samples(Vec::new());
    assert!(tr.is_empty());
    assert_eq!(tr.time_span(), None);
    assert_eq!(tr.position(3.0), NVec3::zeros());
    assert_eq!(tr.velocity(-3.0), NVec3::zeros());
}

#[test]
fn single_sample_track_is_constant() {
    let tr = TrajectoryInterpolator::from_samples(vec![sample(5.0, [1.0, 1.0, 1.0], [0.0, 0.0, 1.0])]);
    assert_eq!(tr.position(-100.0), NVec3::new(1.0, 1.0, 1.0));
    assert_eq!(tr.position(100.0), NVec3::new(1.0, 1.0, 1.0));
}

#[test]
fn raw_rows_are_converted_to_myr_and_kpc_per_myr() {
    let raw = vec![
        RawSample { time: -0.5, position: NVec3::new(1.0, 0.0, 0.0), velocity_km_s: NVec3::new(100.0, 0.0, 0.0) },
        RawSample { time: 0.0, position: NVec3::zeros(), velocity_km_s: NVec3::new(0.0, 200.0, 0.0) },
    ];

    let gyr = TrajectoryInterpolator::from_raw(&raw, TimeUnit::Gyr);
    assert_eq!(gyr.time_span(), Some((-500.0, 0.0)));
    assert!((gyr.velocity(-500.0).x - 100.0 * KMS_TO_KPC_MYR).abs() < 1e-15);
    assert!((gyr.velocity(0.0).y - 200.0 * KMS_TO_KPC_MYR).abs() < 1e-15);

    let myr = TrajectoryInterpolator::from_raw(&raw, TimeUnit::Myr);
    assert_eq!(myr.time_span(), Some((-0.5, 0.0)));
}

#[test]
fn binary_search_agrees_with_linear_scan() {
    // uneven spacing, shuffled
    let mut samples: Vec<TimeSample> = (0..200)
        .map(|k| {
            let t = -(k as f64).powf(1.3);
            sample(t, [t.sin(), t.cos(), 0.01 * t], [0.0, 0.0, 0.0])
        })
        .collect();
    samples.reverse();
    samples.swap(3, 150);
    let tr = TrajectoryInterpolator::from_samples(samples.clone());

    samples.sort_by(|a, b| a.time.partial_cmp(&b.time).unwrap());
    let scan = |t: f64| -> NVec3 {
        let i = samples.iter().position(|s| s.time >= t).unwrap();
        let (a, b) = (&samples[i - 1], &samples[i]);
        let f = (t - a.time) / (b.time - a.time);
        a.position + (b.position - a.position) * f
    };

    let (lo, hi) = tr.time_span().unwrap();
    for k in 1..500 {
        let t = lo + (hi - lo) * k as f64 / 500.0;
        let d = (tr.position(t) - scan(t)).norm();
        assert!(d < 1e-12, "mismatch {} at t = {}", d, t);
    }
}

// ==================================================================================
// Non-finite input
// ==================================================================================

#[test]
fn nan_query_returns_first_sample() {
    let tr = three_point_track();
    let (p, v) = tr.state(f64::NAN);
    assert_eq!(p, NVec3::new(-5.0, 4.0, 0.0));
    assert_eq!(v, NVec3::new(0.0, 0.5, 0.0));
}

#[test]
fn nan_sample_time_does_not_panic() {
    let tr = TrajectoryInterpolator::from_samples(vec![
        sample(0.0, [1.0, 0.0, 0.0], [0.0, 0.0, 0.0]),
        sample(f64::NAN, [9.0, 9.0, 9.0], [0.0, 0.0, 0.0]),
        sample(-10.0, [0.0, 1.0, 0.0], [0.0, 0.0, 0.0]),
    ]);
    // NaN sorts last under total_cmp
    for t in [-10.0, -5.0, 0.0, 5.0, f64::NAN] {
        let _ = tr.position(t);
        let _ = tr.velocity(t);
    }
    assert_eq!(tr.position(-10.0), NVec3::new(0.0, 1.0, 0.0));
}

#[test]
fn potential_at_nan_time_does_not_panic() {
    let mw = Arc::new(three_point_track());
    let lmc = Arc::new(TrajectoryInterpolator::from_samples(vec![
        sample(-20.0, [-1.0, -41.0, -28.0], [0.0, 0.0, 0.0]),
        sample(10.0, [-1.0, -40.0, -28.0], [0.0, 0.0, 0.0]),
    ]));
    let field = GalacticPotential::milky_way(mw, lmc, 1);

    let pos = NVec3::new(8.0, 0.0, 0.0);
    let at_nan = field.acceleration(&pos, f64::NAN);
    // both centers clamp to their first sample
    assert_eq!(at_nan, field.acceleration(&pos, -20.0));
}
