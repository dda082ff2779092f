//! Bat × Harmony Search

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::algorithms::bat::standard::validate_bat_params;
use crate::algorithms::bat::{loudness_gate, velocity_move, BatParams, BatState};
use crate::error::{SwarmError, SwarmResult};
use crate::operators::swarm::HarmonyImprovisation;
use crate::optimizer::context::{SwarmConfig, SwarmContext};
use crate::optimizer::rule::UpdateRule;
use crate::population::agent::Agent;
use crate::population::swarm::Swarm;
use crate::solution::Position;

/// Bat × HS parameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HsBatParams {
    #[serde(flatten)]
    pub bat: BatParams,
    /// Harmony memory considering rate
    pub hmcr: f64,
    /// Pitch adjusting rate
    pub par: f64,
    /// Pitch adjustment bandwidth
    pub bandwidth: f64,
}

impl Default for HsBatParams {
    fn default() -> Self {
        let hs = HarmonyImprovisation::default();
        Self {
            bat: BatParams::default(),
            hmcr: hs.hmcr,
            par: hs.par,
            bandwidth: hs.bandwidth,
        }
    }
}

impl HsBatParams {
    pub fn with_bat(mut self, bat: BatParams) -> Self {
        self.bat = bat;
        self
    }

    pub fn with_harmony(mut self, hmcr: f64, par: f64, bandwidth: f64) -> Self {
        self.hmcr = hmcr;
        self.par = par;
        self.bandwidth = bandwidth;
        self
    }
}

/// Bat Algorithm whose local move is a harmony improvisation
///
/// The current population positions form the harmony memory. Improvised
/// proposals leave the bat's velocity untouched.
#[derive(Clone, Debug, Default)]
pub struct HsBat {
    params: HsBatParams,
}

impl HsBat {
    pub fn new(params: HsBatParams) -> Self {
        Self { params }
    }
}

impl UpdateRule for HsBat {
    type State = BatState;

    fn name(&self) -> &'static str {
        "hs_bat"
    }

    fn validate(&self, _config: &SwarmConfig) -> SwarmResult<()> {
        validate_bat_params(&self.params.bat)?;
        for (name, value) in [("hmcr", self.params.hmcr), ("par", self.params.par)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SwarmError::Configuration(format!(
                    "{name} must be in [0, 1], got {value}"
                )));
            }
        }
        Ok(())
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
        let snapshot = swarm.agents().to_vec();
        let memory: Vec<Position> = snapshot.iter().map(|a| a.position).collect();
        let bat = &self.params.bat;
        let harmony =
            HarmonyImprovisation::new(self.params.hmcr, self.params.par, self.params.bandwidth);
        let t = ctx.iteration + 1;

        for (i, agent) in snapshot.iter().enumerate() {
            let best = swarm.best_position();
            let frequency = bat.frequency(rng.gen());
            let (velocity, candidate) = if rng.gen::<f64>() > agent.state.pulse_rate {
                (
                    agent.velocity_or_zero(),
                    harmony.improvise(&memory, ctx.bounds(), rng),
                )
            } else {
                velocity_move(&agent.position, &agent.velocity_or_zero(), &best, frequency)
            };
            let (candidate, fitness) = ctx.clamp_and_evaluate(candidate);

            let current = swarm.agent_mut(i);
            current.velocity = Some(velocity);
            current.state.frequency = frequency;
            if loudness_gate(current.state.loudness, fitness, current.fitness, rng) {
                current.move_to(candidate, fitness);
                current.state.on_accept(bat.alpha, bat.gamma, t);
            }
            swarm.update_global_best(i);
        }
    }
}
