//! Trajectory files: `time,x,y,z,vx,vy,vz` (time in Gyr or Myr, kpc, km/s)

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use tracing::info;

use super::records::{expect_len, field_f64, field_vec3, read_rows, LoadReport};
use crate::error::{SimError, SimResult};
use crate::simulation::trajectory::{RawSample, TimeUnit, TrajectoryInterpolator};

/// Parse trajectory rows; rows may be in any order
pub fn read_trajectory<R: io::Read>(reader: R) -> SimResult<LoadReport<RawSample>> {
    read_rows(reader, "trajectory", |rec| {
        expect_len(rec, 7)?;
        Ok(RawSample {
            time: field_f64(rec, 0)?,
            position: field_vec3(rec, 1)?,
            velocity_km_s: field_vec3(rec, 4)?,
        })
    })
}

/// Load a trajectory file into an interpolator in canonical units
pub fn load_trajectory(path: &Path, unit: TimeUnit) -> SimResult<TrajectoryInterpolator> {
    let file = File::open(path).map_err(|e| {
        SimError::DataUnavailable(format!("trajectory {}: {}", path.display(), e))
    })?;
    let report = read_trajectory(BufReader::new(file))?;

    let track = TrajectoryInterpolator::from_raw(&report.records, unit);
    info!(
        "Loaded trajectory {:?}: {} samples, {} skipped, span {:?} Myr",
        path,
        track.len(),
        report.skipped,
        track.time_span()
    );
    Ok(track)
}
