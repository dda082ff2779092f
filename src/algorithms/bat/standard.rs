//! Standard Bat Algorithm

use rand::Rng;

use crate::algorithms::bat::{classic_pass, mean_loudness, BatMove, BatParams, BatState};
use crate::error::{SwarmError, SwarmResult};
use crate::optimizer::context::{SwarmConfig, SwarmContext};
use crate::optimizer::rule::UpdateRule;
use crate::population::agent::Agent;
use crate::population::swarm::Swarm;

/// Standard Bat Algorithm
///
/// Frequency is redrawn uniformly in `[f_min, f_max]` for every bat and
/// iteration; the local walk is scaled by the population's mean loudness.
#[derive(Clone, Debug, Default)]
pub struct StandardBat {
    params: BatParams,
}

impl StandardBat {
    pub fn new(params: BatParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &BatParams {
        &self.params
    }
}

/// Checks shared by every bat variant
pub(crate) fn validate_bat_params(params: &BatParams) -> SwarmResult<()> {
    if !(params.f_min <= params.f_max) {
        return Err(SwarmError::Configuration(format!(
            "f_min ({}) must not exceed f_max ({})",
            params.f_min, params.f_max
        )));
    }
    if !(params.alpha > 0.0 && params.alpha <= 1.0) {
        return Err(SwarmError::Configuration(format!(
            "alpha must be in (0, 1], got {}",
            params.alpha
        )));
    }
    if !(params.initial_loudness >= 0.0) || !(0.0..=1.0).contains(&params.initial_pulse_rate) {
        return Err(SwarmError::Configuration(
            "loudness must be non-negative and pulse rate in [0, 1]".to_string(),
        ));
    }
    Ok(())
}

impl UpdateRule for StandardBat {
    type State = BatState;

    fn name(&self) -> &'static str {
        "standard_bat"
    }

    fn validate(&self, _config: &SwarmConfig) -> SwarmResult<()> {
        validate_bat_params(&self.params)
    }

    fn init_agent<R: Rng + ?Sized>(
        &self,
        agent: &mut Agent<BatState>,
        _config: &SwarmConfig,
        _rng: &mut R,
    ) {
        agent.velocity = Some([0.0; 2]);
        agent.state = self.params.initial_state();
    }

    fn update_population<R: Rng + ?Sized>(
        &mut self,
        swarm: &mut Swarm<BatState>,
        ctx: &SwarmContext<'_>,
        rng: &mut R,
    ) {
        let local_scale = mean_loudness(swarm.agents());
        let params = &self.params;
        classic_pass(swarm, ctx, params, rng, |_, rng| BatMove {
            frequency: params.frequency(rng.gen()),
            local_scale,
        });
    }
}
