//! Fast AFSA: geometrically shrinking step

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::algorithms::fish::{school_pass, Cascade, FishParams, FishState};
use crate::error::{SwarmError, SwarmResult};
use crate::optimizer::context::{SwarmConfig, SwarmContext};
use crate::optimizer::rule::UpdateRule;
use crate::population::swarm::Swarm;

/// Fast AFSA parameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FastFishParams {
    #[serde(flatten)]
    pub fish: FishParams,
    /// Step decay factor per iteration
    pub alpha: f64,
    /// Floor for the decayed step
    pub min_step: f64,
}

impl Default for FastFishParams {
    fn default() -> Self {
        Self {
            fish: FishParams::default(),
            alpha: 0.95,
            min_step: 0.01,
        }
    }
}

impl FastFishParams {
    pub fn with_fish(mut self, fish: FishParams) -> Self {
        self.fish = fish;
        self
    }

    pub fn with_decay(mut self, alpha: f64, min_step: f64) -> Self {
        self.alpha = alpha;
        self.min_step = min_step;
        self
    }
}

/// AFSA whose step is multiplied by `alpha` before every iteration and
/// floored at `min_step`
///
/// The configured parameters are never modified; the decayed step lives on
/// the rule and is restored by `reset`.
#[derive(Clone, Debug)]
pub struct FastFish {
    params: FastFishParams,
    step: f64,
}

impl FastFish {
    pub fn new(params: FastFishParams) -> Self {
        let step = params.fish.step;
        Self { params, step }
    }

    /// Step in force for the latest iteration
    pub fn current_step(&self) -> f64 {
        self.step
    }
}

impl Default for FastFish {
    fn default() -> Self {
        Self::new(FastFishParams::default())
    }
}

impl UpdateRule for FastFish {
    type State = FishState;

    fn name(&self) -> &'static str {
        "fast_fish"
    }

    fn validate(&self, _config: &SwarmConfig) -> SwarmResult<()> {
        self.params.fish.validate()?;
        if !(self.params.alpha > 0.0 && self.params.alpha <= 1.0) {
            return Err(SwarmError::Configuration(format!(
                "alpha must be in (0, 1], got {}",
                self.params.alpha
            )));
        }
        if !(self.params.min_step >= 0.0) {
            return Err(SwarmError::Configuration(format!(
                "min_step must be non-negative, got {}",
                self.params.min_step
            )));
        }
        Ok(())
    }

    fn before_iteration<R: Rng + ?Sized>(
        &mut self,
        _swarm: &Swarm<FishState>,
        _ctx: &SwarmContext<'_>,
        _rng: &mut R,
    ) {
        self.step = (self.step * self.params.alpha).max(self.params.min_step);
    }

    fn update_population<R: Rng + ?Sized>(
        &mut self,
        swarm: &mut Swarm<FishState>,
        ctx: &SwarmContext<'_>,
        rng: &mut R,
    ) {
        let cascade = Cascade {
            step: self.step,
            ..Cascade::from(&self.params.fish)
        };
        school_pass(swarm, ctx, &cascade, rng);
    }

    fn reset(&mut self) {
        self.step = self.params.fish.step;
    }
}
