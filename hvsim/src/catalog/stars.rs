//! Star mean-state and covariance catalogs
//!
//! Star file: `id,name,source_id,x,y,z,vx,vy,vz` (kpc, km/s).
//!
//! Covariance file: `source_id` followed by the 21 upper-triangle entries
//! of the 6x6 matrix in row-major order, index order x,y,z,vx,vy,vz:
//! `(0,0) (0,1) .. (0,5) (1,1) .. (1,5) .. (4,4) (4,5) (5,5)`.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use tracing::{info, warn};

use super::records::{expect_len, field_f64, field_vec3, malformed, read_rows, LoadReport};
use crate::error::{SimError, SimResult};
use crate::simulation::matrix::Mat6;
use crate::simulation::sampler::StarRecord;
use crate::simulation::states::NVec3;

/// Number of independent entries of a symmetric 6x6 matrix
pub const COVARIANCE_ENTRIES: usize = 21;

/// One row of the star file
#[derive(Debug, Clone, PartialEq)]
pub struct StarRow {
    pub id: u64,
    pub name: String,
    pub source_id: String,
    pub position: NVec3,      // kpc
    pub velocity_km_s: NVec3, // km/s
}

/// Rebuild the full symmetric matrix from its row-major upper triangle
pub fn covariance_from_upper(upper: &[f64; COVARIANCE_ENTRIES]) -> Mat6 {
    let mut m = Mat6::zeros();
    let mut k = 0;
    for i in 0..6 {
        for j in i..6 {
            m[(i, j)] = upper[k];
            m[(j, i)] = upper[k];
            k += 1;
        }
    }
    m
}

pub fn read_stars<R: io::Read>(reader: R) -> SimResult<LoadReport<StarRow>> {
    read_rows(reader, "star", |rec| {
        expect_len(rec, 9)?;
        let id_raw = &rec[0];
        let id = id_raw
            .parse::<u64>()
            .map_err(|_| malformed(rec, format!("id '{id_raw}' is not an integer")))?;
        Ok(StarRow {
            id,
            name: rec[1].to_string(),
            source_id: rec[2].to_string(),
            position: field_vec3(rec, 3)?,
            velocity_km_s: field_vec3(rec, 6)?,
        })
    })
}

pub fn read_covariances<R: io::Read>(reader: R) -> SimResult<LoadReport<(String, Mat6)>> {
    read_rows(reader, "covariance", |rec| {
        expect_len(rec, 1 + COVARIANCE_ENTRIES)?;
        let mut upper = [0.0; COVARIANCE_ENTRIES];
        for (k, slot) in upper.iter_mut().enumerate() {
            *slot = field_f64(rec, k + 1)?;
        }
        Ok((rec[0].to_string(), covariance_from_upper(&upper)))
    })
}

/// Stars joined with their covariance by `source_id`
#[derive(Debug, Clone, Default)]
pub struct StarCatalog {
    stars: Vec<StarRecord>,
}

impl StarCatalog {
    /// Join star rows with covariance rows.
    /// A star with no covariance row gets the zero matrix.
    pub fn from_parts(stars: Vec<StarRow>, covariances: Vec<(String, Mat6)>) -> Self {
        let by_source: HashMap<String, Mat6> = covariances.into_iter().collect();

        let stars = stars
            .into_iter()
            .map(|row| {
                let covariance = match by_source.get(&row.source_id) {
                    Some(c) => *c,
                    None => {
                        warn!(star = %row.name, source_id = %row.source_id, "no covariance row");
                        Mat6::zeros()
                    }
                };
                StarRecord {
                    id: row.id,
                    name: row.name,
                    source_id: row.source_id,
                    mean_position: row.position,
                    mean_velocity: row.velocity_km_s,
                    covariance,
                }
            })
            .collect();

        Self { stars }
    }

    /// Load and join the star and covariance files
    pub fn load(stars_path: &Path, covariance_path: &Path) -> SimResult<Self> {
        let open = |p: &Path| {
            File::open(p)
                .map(BufReader::new)
                .map_err(|e| SimError::DataUnavailable(format!("{}: {}", p.display(), e)))
        };

        let stars = read_stars(open(stars_path)?)?;
        let covs = read_covariances(open(covariance_path)?)?;
        info!(
            "Loaded {} stars ({} skipped), {} covariances ({} skipped)",
            stars.records.len(),
            stars.skipped,
            covs.records.len(),
            covs.skipped
        );

        Ok(Self::from_parts(stars.records, covs.records))
    }

    pub fn stars(&self) -> &[StarRecord] {
        &self.stars
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    /// Find a star by numeric id, name or catalog source id
    pub fn find(&self, key: &str) -> SimResult<&StarRecord> {
        let key = key.trim();
        let id = key.parse::<u64>().ok();
        self.stars
            .iter()
            .find(|s| Some(s.id) == id || s.name == key || s.source_id == key)
            .ok_or_else(|| SimError::StarNotFound(key.to_string()))
    }
}
