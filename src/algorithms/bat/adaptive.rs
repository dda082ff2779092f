//! Diversity-adaptive Bat Algorithm
//!
//! Population diversity `d` (mean distance from the centroid over its
//! maximum, half the diagonal of the search square) steers exploration: a
//! collapsed swarm gets high frequencies and a wide local walk, a spread
//! swarm the opposite.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::algorithms::bat::standard::validate_bat_params;
use crate::algorithms::bat::{classic_pass, mean_loudness, BatMove, BatParams, BatState};
use crate::error::SwarmResult;
use crate::optimizer::context::{SwarmConfig, SwarmContext};
use crate::optimizer::rule::UpdateRule;
use crate::population::agent::Agent;
use crate::population::swarm::Swarm;
use crate::solution::Bounds;

/// Adaptive Bat parameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdaptiveBatParams {
    #[serde(flatten)]
    pub bat: BatParams,
    /// How sharply the local walk shrinks with diversity
    pub diversity_damping: f64,
}

impl Default for AdaptiveBatParams {
    fn default() -> Self {
        Self {
            bat: BatParams::default(),
            diversity_damping: 10.0,
        }
    }
}

impl AdaptiveBatParams {
    pub fn with_bat(mut self, bat: BatParams) -> Self {
        self.bat = bat;
        self
    }

    pub fn with_diversity_damping(mut self, damping: f64) -> Self {
        self.diversity_damping = damping;
        self
    }
}

/// Diversity normalized to [0, 1] by half the diagonal of `bounds`
pub fn normalized_diversity(swarm: &Swarm<BatState>, bounds: &Bounds) -> f64 {
    let max = bounds.diagonal() / 2.0;
    (swarm.diversity() / max).clamp(0.0, 1.0)
}

/// Diversity-adaptive Bat Algorithm
#[derive(Clone, Debug, Default)]
pub struct AdaptiveBat {
    params: AdaptiveBatParams,
}

impl AdaptiveBat {
    pub fn new(params: AdaptiveBatParams) -> Self {
        Self { params }
    }
}

impl UpdateRule for AdaptiveBat {
    type State = BatState;

    fn name(&self) -> &'static str {
        "adaptive_bat"
    }

    fn validate(&self, _config: &SwarmConfig) -> SwarmResult<()> {
        validate_bat_params(&self.params.bat)
    }

    fn init_agent<R: Rng + ?Sized>(
        &self,
        agent: &mut Agent<BatState>,
        _config: &SwarmConfig,
        _rng: &mut R,
    ) {
        agent.velocity = Some([0.0; 2]);
        agent.state = self.params.bat.initial_state();
    }

    fn update_population<R: Rng + ?Sized>(
        &mut self,
        swarm: &mut Swarm<BatState>,
        ctx: &SwarmContext<'_>,
        rng: &mut R,
    ) {
        let d = normalized_diversity(swarm, ctx.bounds());
        let local_scale = mean_loudness(swarm.agents()) / (1.0 + self.params.diversity_damping * d);
        let bat = &self.params.bat;

        classic_pass(swarm, ctx, bat, rng, |_, rng| {
            let u: f64 = rng.gen();
            BatMove {
                frequency: bat.f_min + (bat.f_max - bat.f_min) * (1.0 - d) * u,
                local_scale,
            }
        });
    }
}
