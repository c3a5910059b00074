//! Time-series interpolation of a moving mass center
//!
//! A `TrajectoryInterpolator` holds the discretized history of one body
//! (the Milky Way or the LMC) and answers position / velocity queries at
//! arbitrary times by linear interpolation between the bracketing samples.
//! Queries outside the covered span are clamped to the first / last sample.
//! An empty interpolator is valid and answers every query with zero.

use serde::Deserialize;

use crate::simulation::constants::{GYR_TO_MYR, KMS_TO_KPC_MYR};
use crate::simulation::states::NVec3;

/// Time unit of a raw trajectory file
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeUnit {
    #[serde(rename = "gyr")]
    #[default]
    Gyr,
    #[serde(rename = "myr")]
    Myr,
}

impl TimeUnit {
    /// Factor converting this unit to Myr
    pub fn to_myr(self) -> f64 {
        match self {
            TimeUnit::Gyr => GYR_TO_MYR,
            TimeUnit::Myr => 1.0,
        }
    }
}

/// One row as it appears in a trajectory file (velocity in km/s)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawSample {
    pub time: f64,
    pub position: NVec3,
    pub velocity_km_s: NVec3,
}

/// Canonical sample: time in Myr, position in kpc, velocity in kpc/Myr
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSample {
    pub time: f64,
    pub position: NVec3,
    pub velocity: NVec3,
}

#[derive(Debug, Clone, Default)]
pub struct TrajectoryInterpolator {
    samples: Vec<TimeSample>, // sorted ascending by time
}

impl TrajectoryInterpolator {
    /// Build from samples already in canonical units
    pub fn from_samples(mut samples: Vec<TimeSample>) -> Self {
        // stable sort; ties keep file order
        samples.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self { samples }
    }

    /// Build from file rows, converting time to Myr and velocity to kpc/Myr
    pub fn from_raw(raw: &[RawSample], unit: TimeUnit) -> Self {
        let scale = unit.to_myr();
        let samples = raw
            .iter()
            .map(|r| TimeSample {
                time: r.time * scale,
                position: r.position,
                velocity: r.velocity_km_s * KMS_TO_KPC_MYR,
            })
            .collect();
        Self::from_samples(samples)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[TimeSample] {
        &self.samples
    }

    /// First and last sample time (Myr)
    pub fn time_span(&self) -> Option<(f64, f64)> {
        match (self.samples.first(), self.samples.last()) {
            (Some(a), Some(b)) => Some((a.time, b.time)),
            _ => None,
        }
    }

    /// Center position at time `t` (kpc)
    pub fn position(&self, t: f64) -> NVec3 {
        self.interpolate(t, |s| s.position)
    }

    /// Center velocity at time `t` (kpc/Myr)
    pub fn velocity(&self, t: f64) -> NVec3 {
        self.interpolate(t, |s| s.velocity)
    }

    /// Position and velocity at time `t`
    pub fn state(&self, t: f64) -> (NVec3, NVec3) {
        (self.position(t), self.velocity(t))
    }

    fn interpolate<F>(&self, t: f64, value: F) -> NVec3
    where
        F: Fn(&TimeSample) -> NVec3,
    {
        let (first, last) = match (self.samples.first(), self.samples.last()) {
            (Some(f), Some(l)) => (f, l),
            _ => return NVec3::zeros(),
        };

        // Clamp outside the covered span; NaN fails every comparison and
        // lands on the first sample
        if !(t > first.time) {
            return value(first);
        }
        if t >= last.time {
            return value(last);
        }

        // First index with time >= t, then back up one.
        // Non-finite sample times can push idx to either end, so clamp there too.
        let idx = self.samples.partition_point(|s| s.time < t);
        if idx == 0 {
            return value(first);
        }
        let (p1, p2) = match (self.samples.get(idx - 1), self.samples.get(idx)) {
            (Some(a), Some(b)) => (a, b),
            _ => return value(last),
        };

        // p1.time < t <= p2.time, so the span is never zero
        let frac = (t - p1.time) / (p2.time - p1.time);
        value(p1).lerp(&value(p2), frac)
    }
}
