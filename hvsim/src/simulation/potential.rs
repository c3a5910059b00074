//! Time-dependent composite potential of the Milky Way and the LMC
//!
//! The MW is a fixed superposition of analytic components evaluated
//! relative to the MW's current center; the LMC is a single Hernquist
//! sphere evaluated relative to the LMC's current center. Both centers
//! come from `TrajectoryInterpolator`s shared with the caller.

use std::sync::Arc;

use tracing::warn;

use crate::simulation::forces::{sum_components, AccelerationField, PotentialComponent};
use crate::simulation::states::NVec3;
use crate::simulation::trajectory::TrajectoryInterpolator;

/// Literal parameter table for the Milky Way
pub struct MilkyWayModel;

impl MilkyWayModel {
    /// Nucleus + bulge Hernquist spheres, NFW halo, and a thin + thick
    /// disk each built from three Miyamoto–Nagai terms. The negative masses
    /// are part of the signed disk expansion and must stay as they are.
    pub fn default_components() -> Vec<PotentialComponent> {
        vec![
            // nucleus
            PotentialComponent::Hernquist { mass: 1.8142e9, scale: 0.0688867 },
            // bulge
            PotentialComponent::Hernquist { mass: 5.0e9, scale: 1.0 },
            // dark halo
            PotentialComponent::Nfw { mass: 5.5427e11, scale_radius: 15.626 },
            // thin disk
            PotentialComponent::MiyamotoNagai { mass: 6.77e10, a: 3.89, b: 0.28 },
            PotentialComponent::MiyamotoNagai { mass: -4.41e10, a: 7.61, b: 0.28 },
            PotentialComponent::MiyamotoNagai { mass: 1.14e10, a: 1.07, b: 0.28 },
            // thick disk
            PotentialComponent::MiyamotoNagai { mass: 2.02e10, a: 4.41, b: 0.9 },
            PotentialComponent::MiyamotoNagai { mass: -1.30e10, a: 8.46, b: 0.9 },
            PotentialComponent::MiyamotoNagai { mass: 2.80e9, a: 1.31, b: 0.9 },
        ]
    }
}

/// LMC Hernquist mass (M_sun) and scale radius (kpc)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LmcParams {
    pub mass: f64,
    pub scale_radius: f64,
}

impl LmcParams {
    /// Used for trajectory ids outside 1..=8; same as id 1
    pub const DEFAULT: LmcParams = LmcParams { mass: 1.0e11, scale_radius: 10.4 };

    const TABLE: [LmcParams; 4] = [
        LmcParams { mass: 1.0e11, scale_radius: 10.4 },
        LmcParams { mass: 1.5e11, scale_radius: 12.7 },
        LmcParams { mass: 2.0e11, scale_radius: 14.9 },
        LmcParams { mass: 2.5e11, scale_radius: 17.1 },
    ];

    /// Look up the LMC model for a trajectory selector.
    /// Ids 1..=8 cycle through four models with period 4.
    pub fn for_trajectory(id: u32) -> Self {
        match id {
            1..=8 => Self::TABLE[((id - 1) % 4) as usize],
            _ => {
                warn!(trajectory = id, "unknown trajectory id, using default LMC parameters");
                Self::DEFAULT
            }
        }
    }

    pub fn component(&self) -> PotentialComponent {
        PotentialComponent::Hernquist {
            mass: self.mass,
            scale: self.scale_radius,
        }
    }
}

/// Composite MW + LMC field anchored to two moving centers
#[derive(Debug, Clone)]
pub struct GalacticPotential {
    mw_track: Arc<TrajectoryInterpolator>,
    lmc_track: Arc<TrajectoryInterpolator>,
    mw_components: Vec<PotentialComponent>,
    lmc_component: PotentialComponent,
}

impl GalacticPotential {
    /// Build with an arbitrary MW component list
    pub fn new(
        mw_track: Arc<TrajectoryInterpolator>,
        lmc_track: Arc<TrajectoryInterpolator>,
        mw_components: Vec<PotentialComponent>,
        lmc: LmcParams,
    ) -> Self {
        Self {
            mw_track,
            lmc_track,
            mw_components,
            lmc_component: lmc.component(),
        }
    }

    /// Build the standard MW table plus the LMC entry for `trajectory_id`
    pub fn milky_way(
        mw_track: Arc<TrajectoryInterpolator>,
        lmc_track: Arc<TrajectoryInterpolator>,
        trajectory_id: u32,
    ) -> Self {
        Self::new(
            mw_track,
            lmc_track,
            MilkyWayModel::default_components(),
            LmcParams::for_trajectory(trajectory_id),
        )
    }

    pub fn mw_components(&self) -> &[PotentialComponent] {
        &self.mw_components
    }

    pub fn lmc_component(&self) -> PotentialComponent {
        self.lmc_component
    }

    /// MW contribution at world position `pos` and time `t`
    pub fn mw_acceleration(&self, pos: &NVec3, t: f64) -> NVec3 {
        // MW center at t, then the query point relative to it
        let rel = pos - self.mw_track.position(t);

        // Every MW term shares the same center
        sum_components(&self.mw_components, &rel)
    }

    /// LMC contribution at world position `pos` and time `t`
    pub fn lmc_acceleration(&self, pos: &NVec3, t: f64) -> NVec3 {
        // LMC is a single Hernquist sphere around its own center
        let rel = pos - self.lmc_track.position(t);
        self.lmc_component.evaluate(&rel)
    }
}

impl AccelerationField for GalacticPotential {
    fn acceleration(&self, pos: &NVec3, t: f64) -> NVec3 {
        // Both centers are looked up at the same t
        self.mw_acceleration(pos, t) + self.lmc_acceleration(pos, t)
    }
}
