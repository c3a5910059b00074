//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! run. A scenario consists of:
//!
//! - [`EngineConfig`]     – threading and output cadence
//! - [`ParametersConfig`] – trajectory selector, ensemble size, step settings
//! - [`DataConfig`]       – where the trajectory and star catalogs live
//! - [`ScenarioConfig`]   – top-level wrapper, plus the star and output path
//!
//! # YAML format
//!
//! ```yaml
//! engine:
//!   parallel: true          # rayon over samples
//!   output_every: 100       # snapshot cadence in steps, 0 = final only
//!
//! parameters:
//!   trajectory: 1           # 1..=8, picks MW/LMC history and LMC model
//!   samples: 1000           # ensemble size
//!   h: -0.1                 # step in Myr, negative integrates backward
//!   steps: 2000
//!   seed: 42
//!   disable_sampling: false
//!
//! data:
//!   mw_trajectory: "../data/MW{id}.csv"
//!   lmc_trajectory: "../data/LMC{id}.csv"
//!   time_unit: "gyr"        # or "myr"
//!   stars: "../data/stars.csv"
//!   covariance: "../data/covariance.csv"
//!
//! star: "HVS1"              # id, name or source id
//! output: "../out/hvs1.csv"
//! ```
//!
//! Relative paths resolve against the directory of the scenario file.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use crate::error::{SimError, SimResult};
use crate::simulation::trajectory::TimeUnit;

/// Engine configuration
#[derive(Deserialize, Debug, Clone)]
pub struct EngineConfig {
    #[serde(default)]
    pub parallel: bool, // `true` - update samples across the rayon pool
    #[serde(default)]
    pub output_every: usize, // write a snapshot every n steps, 0 = final state only
}

/// Run parameters
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub trajectory: u32, // selects MW/LMC history pair and LMC mass/radius
    pub samples: usize,  // number of Monte Carlo samples
    pub h: f64,          // signed step size in Myr
    pub steps: usize,    // how many steps to take
    #[serde(default = "default_seed")]
    pub seed: u64, // deterministic seed to make runs reproducable
    #[serde(default)]
    pub disable_sampling: bool, // all samples at the mean state
}

fn default_seed() -> u64 {
    42
}

/// Input files
#[derive(Deserialize, Debug, Clone)]
pub struct DataConfig {
    pub mw_trajectory: String,  // path template, `{id}` -> trajectory selector
    pub lmc_trajectory: String, // path template, `{id}` -> trajectory selector
    #[serde(default)]
    pub time_unit: TimeUnit, // unit of the trajectory time column
    pub stars: String,
    pub covariance: String,
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    pub engine: EngineConfig,
    pub parameters: ParametersConfig,
    pub data: DataConfig,
    pub star: String,   // star to simulate
    pub output: String, // snapshot CSV path
    #[serde(skip)]
    pub base_dir: PathBuf, // directory of the YAML file
}

impl ScenarioConfig {
    /// Read a scenario file and remember its directory for relative paths
    pub fn from_path(path: &Path) -> SimResult<Self> {
        let file = File::open(path)
            .map_err(|e| SimError::DataUnavailable(format!("scenario {}: {}", path.display(), e)))?;
        let mut cfg: ScenarioConfig = serde_yaml::from_reader(BufReader::new(file))?;
        cfg.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(cfg)
    }

    pub fn from_yaml_str(s: &str) -> SimResult<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Reject settings the integrator cannot run with
    pub fn validate(&self) -> SimResult<()> {
        let p = &self.parameters;
        if !p.h.is_finite() || p.h == 0.0 {
            return Err(SimError::InvalidConfig(format!("step h must be finite and non-zero, got {}", p.h)));
        }
        if p.samples == 0 {
            return Err(SimError::InvalidConfig("samples must be positive".into()));
        }
        if !(1..=8).contains(&p.trajectory) {
            warn!(trajectory = p.trajectory, "trajectory selector outside 1..=8");
        }
        Ok(())
    }

    pub fn mw_trajectory_path(&self) -> PathBuf {
        self.resolve(&expand_id(&self.data.mw_trajectory, self.parameters.trajectory))
    }

    pub fn lmc_trajectory_path(&self) -> PathBuf {
        self.resolve(&expand_id(&self.data.lmc_trajectory, self.parameters.trajectory))
    }

    pub fn stars_path(&self) -> PathBuf {
        self.resolve(&self.data.stars)
    }

    pub fn covariance_path(&self) -> PathBuf {
        self.resolve(&self.data.covariance)
    }

    pub fn output_path(&self) -> PathBuf {
        self.resolve(&self.output)
    }

    fn resolve(&self, p: &str) -> PathBuf {
        let path = Path::new(p);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

/// Substitute the trajectory selector into a path template
pub fn expand_id(template: &str, id: u32) -> String {
    template.replace("{id}", &id.to_string())
}
