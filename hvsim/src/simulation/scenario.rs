//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! (`Scenario`) containing:
//! - engine settings (`Engine`)
//! - run parameters (`Parameters`)
//! - the star being traced (`StarRecord`)
//! - the sampled ensemble at t = 0 inside an `Integrator` driven by the
//!   `GalacticPotential`

use std::io;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::catalog::{load_trajectory, SnapshotWriter, StarCatalog};
use crate::configuration::config::ScenarioConfig;
use crate::error::{SimError, SimResult};
use crate::simulation::engine::Engine;
use crate::simulation::integrator::Integrator;
use crate::simulation::params::Parameters;
use crate::simulation::potential::GalacticPotential;
use crate::simulation::sampler::{InitialConditionSampler, StarRecord};
use crate::simulation::states::Ensemble;
use crate::simulation::trajectory::TrajectoryInterpolator;

pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub star: StarRecord,
    pub integrator: Integrator<GalacticPotential>,
}

impl Scenario {
    /// Assemble a scenario from already-loaded inputs.
    /// Fails on an unusable config or if either trajectory is empty.
    pub fn build_scenario(
        cfg: &ScenarioConfig,
        mw_track: TrajectoryInterpolator,
        lmc_track: TrajectoryInterpolator,
        star: StarRecord,
    ) -> SimResult<Self> {
        cfg.validate()?;

        if mw_track.is_empty() {
            return Err(SimError::DataUnavailable("Milky Way trajectory has no samples".into()));
        }
        if lmc_track.is_empty() {
            return Err(SimError::DataUnavailable("LMC trajectory has no samples".into()));
        }

        // Parameters (runtime) from ParametersConfig
        let p_cfg = &cfg.parameters;
        let parameters = Parameters {
            trajectory: p_cfg.trajectory,
            samples: p_cfg.samples,
            h: p_cfg.h,
            steps: p_cfg.steps,
            seed: p_cfg.seed,
            disable_sampling: p_cfg.disable_sampling,
        };

        // Engine (runtime) from EngineConfig
        let engine = Engine {
            parallel: cfg.engine.parallel,
            output_every: cfg.engine.output_every,
        };

        // Field: fixed MW table plus the LMC model for this trajectory
        let field = GalacticPotential::milky_way(
            Arc::new(mw_track),
            Arc::new(lmc_track),
            parameters.trajectory,
        );

        // Initial ensemble: seeded draws around the star's mean state
        let mut rng = StdRng::seed_from_u64(parameters.seed);
        let sampler = InitialConditionSampler::new(&star, parameters.disable_sampling);
        let ensemble = Ensemble::new(sampler.sample(parameters.samples, &mut rng));

        let integrator = Integrator::new(ensemble, field, parameters.h, engine.parallel);

        Ok(Self {
            engine,
            parameters,
            star,
            integrator,
        })
    }

    /// Load trajectories and the star catalog named in `cfg`, then build
    pub fn load(cfg: &ScenarioConfig) -> SimResult<Self> {
        // reject bad step settings before touching any files
        cfg.validate()?;

        let unit = cfg.data.time_unit;
        let mw_track = load_trajectory(&cfg.mw_trajectory_path(), unit)?;
        let lmc_track = load_trajectory(&cfg.lmc_trajectory_path(), unit)?;

        let catalog = StarCatalog::load(&cfg.stars_path(), &cfg.covariance_path())?;
        let star = catalog.find(&cfg.star)?.clone();

        Self::build_scenario(cfg, mw_track, lmc_track, star)
    }

    /// Run the configured number of steps, writing the initial state,
    /// every `output_every`-th step and the final state to `out`
    pub fn run<W: io::Write>(&mut self, out: &mut SnapshotWriter<W>) -> SimResult<()> {
        let steps = self.parameters.steps;
        let every = self.engine.output_every;

        info!(
            star = %self.star.name,
            samples = self.integrator.ensemble.len(),
            h = self.parameters.h,
            steps,
            parallel = self.engine.parallel,
            "starting integration"
        );

        out.write(0, &self.integrator.ensemble)?;

        // the callback cannot return errors, so collect the first one
        let mut result: SimResult<()> = Ok(());
        self.integrator.run(steps, |step, ens| {
            let periodic = every > 0 && step % every == 0;
            if result.is_ok() && (periodic || step == steps) {
                debug!(
                    step,
                    t = ens.t,
                    centroid = ?ens.centroid(),
                    dispersion = ens.dispersion(),
                    "ensemble snapshot"
                );
                result = out.write(step, ens);
            }
        });
        result?;

        info!(
            t = self.integrator.time(),
            centroid = ?self.integrator.ensemble.centroid(),
            dispersion = self.integrator.ensemble.dispersion(),
            "integration finished"
        );
        Ok(())
    }
}
