pub mod simulation;
pub mod configuration;
pub mod catalog;
pub mod benchmark;
pub mod error;

pub use simulation::states::{Ensemble, PhaseSpacePoint, NVec3};
pub use simulation::forces::{AccelerationField, PotentialComponent, hernquist, miyamoto_nagai, nfw};
pub use simulation::trajectory::{TrajectoryInterpolator, TimeSample, RawSample, TimeUnit};
pub use simulation::potential::{GalacticPotential, MilkyWayModel, LmcParams};
pub use simulation::matrix::{cholesky, standard_normal, Mat6};
pub use simulation::sampler::{InitialConditionSampler, StarRecord, sample_initial_conditions};
pub use simulation::integrator::{leapfrog_step, leapfrog_step_par, Integrator};
pub use simulation::scenario::Scenario;

pub use configuration::config::{EngineConfig, ParametersConfig, DataConfig, ScenarioConfig};
pub use catalog::{StarCatalog, SnapshotWriter};
pub use error::{SimError, SimResult};

pub use benchmark::benchmark::bench_leapfrog;
