//! Bat × Artificial Bee Colony

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::algorithms::bat::standard::validate_bat_params;
use crate::algorithms::bat::{loudness_gate, velocity_move, BatLike, BatParams, BatState};
use crate::error::{SwarmError, SwarmResult};
use crate::operators::differential::select_other;
use crate::operators::swarm::employed_bee_move;
use crate::optimizer::context::{SwarmConfig, SwarmContext};
use crate::optimizer::rule::UpdateRule;
use crate::population::agent::Agent;
use crate::population::swarm::Swarm;

/// Bat × ABC parameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AbcBatParams {
    #[serde(flatten)]
    pub bat: BatParams,
    /// Consecutive failed proposals before a bat is abandoned
    pub limit: usize,
}

impl Default for AbcBatParams {
    fn default() -> Self {
        Self {
            bat: BatParams::default(),
            limit: 10,
        }
    }
}

impl AbcBatParams {
    pub fn with_bat(mut self, bat: BatParams) -> Self {
        self.bat = bat;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

/// Bat state plus the ABC abandonment counter
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AbcBatState {
    #[serde(flatten)]
    pub bat: BatState,
    /// Consecutive rejected proposals
    pub trials: usize,
}

impl BatLike for AbcBatState {
    fn bat(&self) -> &BatState {
        &self.bat
    }

    fn bat_mut(&mut self) -> &mut BatState {
        &mut self.bat
    }
}

/// Bat Algorithm with employed-bee local moves and scout abandonment
///
/// A bat whose proposals fail more than `limit` times in a row is
/// re-initialized at a random position with fresh state.
#[derive(Clone, Debug, Default)]
pub struct AbcBat {
    params: AbcBatParams,
}

impl AbcBat {
    pub fn new(params: AbcBatParams) -> Self {
        Self { params }
    }

    fn fresh_state(&self) -> AbcBatState {
        AbcBatState {
            bat: self.params.bat.initial_state(),
            trials: 0,
        }
    }
}

impl UpdateRule for AbcBat {
    type State = AbcBatState;

    fn name(&self) -> &'static str {
        "abc_bat"
    }

    fn validate(&self, config: &SwarmConfig) -> SwarmResult<()> {
        validate_bat_params(&self.params.bat)?;
        if config.population_size < 2 {
            return Err(SwarmError::Configuration(format!(
                "ABC hybrid needs a population of at least 2, got {}",
                config.population_size
            )));
        }
        Ok(())
    }

    fn init_agent<R: Rng + ?Sized>(
        &self,
        agent: &mut Agent<AbcBatState>,
        _config: &SwarmConfig,
        _rng: &mut R,
    ) {
        agent.velocity = Some([0.0; 2]);
        agent.state = self.fresh_state();
    }

    fn update_population<R: Rng + ?Sized>(
        &mut self,
        swarm: &mut Swarm<AbcBatState>,
        ctx: &SwarmContext<'_>,
        rng: &mut R,
    ) {
        let snapshot = swarm.agents().to_vec();
        let bat = &self.params.bat;
        let t = ctx.iteration + 1;

        for (i, agent) in snapshot.iter().enumerate() {
            let best = swarm.best_position();
            let frequency = bat.frequency(rng.gen());
            let (velocity, candidate) = if rng.gen::<f64>() > agent.state.bat.pulse_rate {
                let k = select_other(snapshot.len(), i, rng);
                (
                    agent.velocity_or_zero(),
                    employed_bee_move(&agent.position, &snapshot[k].position, rng),
                )
            } else {
                velocity_move(&agent.position, &agent.velocity_or_zero(), &best, frequency)
            };
            let (candidate, fitness) = ctx.clamp_and_evaluate(candidate);

            let current = swarm.agent_mut(i);
            current.velocity = Some(velocity);
            current.state.bat.frequency = frequency;
            if loudness_gate(current.state.bat.loudness, fitness, current.fitness, rng) {
                current.move_to(candidate, fitness);
                current.state.bat.on_accept(bat.alpha, bat.gamma, t);
                current.state.trials = 0;
            } else {
                current.state.trials += 1;
            }

            if current.state.trials > self.params.limit {
                let position = ctx.bounds().random_position(rng);
                let fitness = ctx.evaluate(&position);
                debug!(
                    "abc_bat scout: bat {i} abandoned after {} trials, respawned at {position:?}",
                    current.state.trials
                );
                current.move_to(position, fitness);
                current.velocity = Some([0.0; 2]);
                current.state = self.fresh_state();
            }
            swarm.update_global_best(i);
        }
    }

    fn on_improved(&self, agent: &mut Agent<AbcBatState>) {
        agent.state.trials = 0;
    }
}
