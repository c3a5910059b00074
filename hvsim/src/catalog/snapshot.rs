//! Ensemble snapshots as CSV: `step,time,sample,x,y,z,vx,vy,vz`
//! (Myr, kpc, kpc/Myr)

use std::fs::{self, File};
use std::io;
use std::path::Path;

use csv::Writer;

use crate::error::SimResult;
use crate::simulation::states::Ensemble;

pub struct SnapshotWriter<W: io::Write> {
    writer: Writer<W>,
    rows: usize,
}

impl SnapshotWriter<File> {
    /// Create (or truncate) `path`, making parent directories as needed
    pub fn create(path: &Path) -> SimResult<Self> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        Self::new(File::create(path)?)
    }
}

impl<W: io::Write> SnapshotWriter<W> {
    pub fn new(inner: W) -> SimResult<Self> {
        let mut writer = Writer::from_writer(inner);
        writer.write_record(["step", "time", "sample", "x", "y", "z", "vx", "vy", "vz"])?;
        Ok(Self { writer, rows: 0 })
    }

    /// Append every sample of `ens` tagged with `step`
    pub fn write(&mut self, step: usize, ens: &Ensemble) -> SimResult<()> {
        for (i, p) in ens.points.iter().enumerate() {
            self.writer.write_record(&[
                step.to_string(),
                ens.t.to_string(),
                i.to_string(),
                p.position.x.to_string(),
                p.position.y.to_string(),
                p.position.z.to_string(),
                p.velocity.x.to_string(),
                p.velocity.y.to_string(),
                p.velocity.z.to_string(),
            ])?;
            self.rows += 1;
        }
        Ok(())
    }

    /// Data rows written so far (header excluded)
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn finish(mut self) -> SimResult<W> {
        self.writer.flush()?;
        self.writer
            .into_inner()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()).into())
    }
}
